//! Caller-supplied capabilities the engine drives

use super::aggregator::FailureSet;
use async_trait::async_trait;

/// One attempt of the per-item work
///
/// The engine treats an attempt as opaque and possibly long-running. It only
/// looks at the boolean outcome; retries are decided by the backoff policy.
#[async_trait]
pub trait ItemOperation<C: Sync, T: Sync>: Send + Sync {
    /// Attempt the work for `item`
    ///
    /// `index` is the item's 1-based position in the batch and is meant for
    /// progress messages only.
    async fn attempt(&self, ctx: &C, item: &T, index: usize) -> bool;
}

/// Receives the failure set once a batch is finished
#[async_trait]
pub trait CompletionHandler<C: Sync, T: Sync>: Send + Sync {
    async fn finish(&self, ctx: &C, failed: &FailureSet<T>);
}
