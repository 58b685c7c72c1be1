//! Executor strategies
//!
//! A strategy runs an operation over every item of a batch, applying the
//! backoff policy per item, and returns the items that ultimately failed.
//! Both strategies give the same membership guarantee; only the sequential
//! one guarantees the order of the failure set.

mod concurrent;
mod sequential;

pub use concurrent::ConcurrentStrategy;
pub use sequential::SequentialStrategy;

use super::aggregator::FailureSet;
use super::item::ItemBatch;
use super::operation::ItemOperation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How items of one batch are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// One item at a time, in input order
    #[default]
    Sequential,
    /// One task per item, joined before returning
    Concurrent,
}

impl fmt::Display for ConcurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcurrencyMode::Sequential => write!(f, "sequential"),
            ConcurrencyMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl FromStr for ConcurrencyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "sync" | "0" => Ok(ConcurrencyMode::Sequential),
            "concurrent" | "async" | "1" => Ok(ConcurrencyMode::Concurrent),
            other => Err(format!("unknown concurrency mode '{other}'")),
        }
    }
}

/// Runs an operation across a batch and reports the failures
#[async_trait]
pub trait ExecutorStrategy<C, T>: Send + Sync
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Run every item to a terminal state
    async fn run(
        &self,
        ctx: Arc<C>,
        batch: ItemBatch<T>,
        operation: Arc<dyn ItemOperation<C, T>>,
    ) -> FailureSet<T>;
}
