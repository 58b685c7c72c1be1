//! Engine settings and their validation

use super::backoff::BackoffPolicy;
use super::strategy::ConcurrencyMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Engine settings, fixed for the lifetime of a runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Sequential or concurrent execution
    #[serde(default)]
    pub mode: ConcurrencyMode,

    /// Base retry wait in seconds, 0 disables retrying
    #[serde(default)]
    pub retry_interval_secs: u64,

    /// Retries per item after the first attempt
    #[serde(default)]
    pub max_retries: u32,

    /// Cap on concurrent attempts, concurrent mode only
    #[serde(default)]
    pub max_parallel: Option<usize>,
}

impl EngineConfig {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn concurrent() -> Self {
        Self {
            mode: ConcurrencyMode::Concurrent,
            ..Self::default()
        }
    }

    pub fn with_retry(mut self, retry_interval_secs: u64, max_retries: u32) -> Self {
        self.retry_interval_secs = retry_interval_secs;
        self.max_retries = max_retries;
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = Some(max_parallel);
        self
    }

    /// Reject settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_parallel == Some(0) {
            return Err(Error::invalid_configuration(
                "max_parallel",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy::from_secs(self.retry_interval_secs, self.max_retries)
    }
}
