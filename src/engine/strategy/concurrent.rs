use super::ExecutorStrategy;
use crate::engine::aggregator::{FailureAggregator, FailureSet};
use crate::engine::backoff::BackoffPolicy;
use crate::engine::item::ItemBatch;
use crate::engine::operation::ItemOperation;
use crate::engine::retry::drive_item;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Runs every item as its own task
///
/// All tasks are spawned up front. With a cap, at most `max_parallel`
/// attempts run at the same time; a task waiting out its backoff holds no
/// permit. Without a cap the fan-out equals the batch size. The strategy
/// returns only after every task is joined. The order of the failure set is
/// unspecified.
#[derive(Debug, Clone)]
pub struct ConcurrentStrategy {
    policy: BackoffPolicy,
    max_parallel: Option<usize>,
}

impl ConcurrentStrategy {
    /// Unbounded fan-out
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            policy,
            max_parallel: None,
        }
    }

    /// Cap the number of items in flight, `None` for no cap
    pub fn with_max_parallel(mut self, max_parallel: Option<usize>) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    pub fn max_parallel(&self) -> Option<usize> {
        self.max_parallel
    }
}

#[async_trait]
impl<C, T> ExecutorStrategy<C, T> for ConcurrentStrategy
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "concurrent"
    }

    async fn run(
        &self,
        ctx: Arc<C>,
        batch: ItemBatch<T>,
        operation: Arc<dyn ItemOperation<C, T>>,
    ) -> FailureSet<T> {
        let total = batch.len();
        let aggregator = FailureAggregator::with_capacity(total);
        let operation: Arc<dyn ItemOperation<C, T>> = match self.max_parallel {
            Some(permits) => Arc::new(Throttled {
                inner: operation,
                permits: Arc::new(Semaphore::new(permits.max(1))),
            }),
            None => operation,
        };

        debug!(
            "Launching {} workers (max parallel: {:?})",
            total, self.max_parallel
        );

        let mut workers = FuturesUnordered::new();
        for entry in batch {
            let ctx = Arc::clone(&ctx);
            let operation = Arc::clone(&operation);
            let aggregator = aggregator.clone();
            let policy = self.policy;
            let item = entry.item.clone();
            let index = entry.index;

            let handle = tokio::spawn(async move {
                let outcome = drive_item(ctx.as_ref(), &entry, operation.as_ref(), policy).await;
                debug!(
                    "Item {}/{} finished after {} attempt(s)",
                    entry.index,
                    total,
                    outcome.attempts()
                );
                if outcome.is_exhausted() {
                    aggregator.record(entry.item).await;
                }
            });

            workers.push(async move { (index, item, handle.await) });
        }

        // Join barrier: every worker reaches a terminal state before we return
        while let Some((index, item, joined)) = workers.next().await {
            if let Err(e) = joined {
                warn!("Worker for item {} aborted: {}", index, e);
                aggregator.record(item).await;
            }
        }

        aggregator.take().await
    }
}

/// Holds a permit for the duration of each attempt
struct Throttled<C: Sync, T: Sync> {
    inner: Arc<dyn ItemOperation<C, T>>,
    permits: Arc<Semaphore>,
}

#[async_trait]
impl<C, T> ItemOperation<C, T> for Throttled<C, T>
where
    C: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    async fn attempt(&self, ctx: &C, item: &T, index: usize) -> bool {
        // The semaphore is never closed
        let _permit = self.permits.acquire().await.ok();
        self.inner.attempt(ctx, item, index).await
    }
}
