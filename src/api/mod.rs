//! Live platform client abstraction
//!
//! Provides a trait-based seam for everything the account workflow needs
//! from the platform, so it can be tested without network access.

mod http;

pub use http::HttpLiveApi;

use crate::error::Result;
use crate::medal::MedalList;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity returned by a successful login check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub mid: u64,
    pub name: String,
}

/// Request body of one heartbeat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heartbeat<'a> {
    pub access_key: &'a str,
    pub device_ids: &'a [String],
    pub room_id: u64,
    pub target_id: u64,
}

#[async_trait]
pub trait LiveApi: Send + Sync {
    /// Check an access key; `None` when the key is not logged in
    async fn login_verify(&self, access_key: &str) -> Result<Option<AccountProfile>>;

    /// All medals of the account
    async fn fetch_medals(&self, access_key: &str) -> Result<MedalList>;

    /// Send one keep-alive signal for a room
    async fn heartbeat(&self, heartbeat: Heartbeat<'_>) -> Result<()>;
}
