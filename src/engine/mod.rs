//! Batch execution engine
//!
//! Runs a per-item operation across an ordered batch of work items, either
//! one at a time or concurrently. Failed attempts are retried with a
//! Fibonacci backoff up to a bound; items that never succeed are collected
//! into a [`FailureSet`] which is handed to a completion handler once per
//! batch.
//!
//! ```no_run
//! use medal_helper::engine::{BatchRunner, EngineConfig, ItemOperation, CompletionHandler, FailureSet};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Ping;
//!
//! #[async_trait]
//! impl ItemOperation<(), u32> for Ping {
//!     async fn attempt(&self, _ctx: &(), item: &u32, index: usize) -> bool {
//!         println!("ping {item} ({index})");
//!         true
//!     }
//! }
//!
//! struct Report;
//!
//! #[async_trait]
//! impl CompletionHandler<(), u32> for Report {
//!     async fn finish(&self, _ctx: &(), failed: &FailureSet<u32>) {
//!         println!("{} failed", failed.len());
//!     }
//! }
//!
//! # async fn example() -> medal_helper::error::Result<()> {
//! let runner = BatchRunner::new(&EngineConfig::concurrent().with_retry(1, 2))?;
//! let failed = runner
//!     .run(Arc::new(()), vec![1, 2], vec![3], Arc::new(Ping), &Report)
//!     .await;
//! assert!(failed.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod backoff;
pub mod config;
pub mod item;
pub mod operation;
pub mod retry;
pub mod runner;
pub mod strategy;

pub use aggregator::{FailureAggregator, FailureSet};
pub use backoff::{BackoffKind, BackoffPolicy, BackoffSchedule};
pub use config::EngineConfig;
pub use item::{IndexedItem, ItemBatch, ItemCategory};
pub use operation::{CompletionHandler, ItemOperation};
pub use retry::{drive_item, ItemOutcome};
pub use runner::BatchRunner;
pub use strategy::{ConcurrencyMode, ConcurrentStrategy, ExecutorStrategy, SequentialStrategy};
