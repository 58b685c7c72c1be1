use crate::api::LiveApi;
use std::sync::Arc;

/// Per-run account state handed to operations
///
/// Built by the account right before a batch and dropped once the batch is
/// finished.
pub struct AccountSession {
    pub uid: u64,
    pub name: String,
    pub access_key: String,
    /// Device identifiers sent along with heartbeats
    pub device_ids: Vec<String>,
    /// Medals tracked for the account
    pub tracked: usize,
    /// Medals scheduled in this batch
    pub scheduled: usize,
    pub api: Arc<dyn LiveApi>,
}

impl std::fmt::Debug for AccountSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSession")
            .field("uid", &self.uid)
            .field("name", &self.name)
            .field("access_key", &mask_key(&self.access_key))
            .field("tracked", &self.tracked)
            .field("scheduled", &self.scheduled)
            .finish()
    }
}

/// Keep only the edges of a credential for logs
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
