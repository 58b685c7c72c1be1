//! # medal-helper
//!
//! Keeps fan medals growing by sending watch heartbeats to live rooms for
//! every configured account, once per day.
//!
//! ## Usage
//!
//! ```bash
//! medal-helper [-v] [--config PATH] [run|check|validate]
//! ```
//!
//! ## Modules
//!
//! - `engine` - Batch execution engine: sequential or concurrent strategies, Fibonacci retry, failure aggregation
//! - `account` - Login, medal selection and watch rounds per account, plus the fleet running them all
//! - `api` - Live platform gateway trait and its HTTP client
//! - `medal` - Medal model, filtering and daily reports
//! - `watch` - Heartbeat task run by the engine for each medal
//! - `push` - Notification endpoints
//! - `config` - TOML configuration with environment overrides
//! - `testing` - Mocks and fixtures shared by tests
pub mod account;
pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod medal;
pub mod push;
pub mod watch;

pub mod testing;
