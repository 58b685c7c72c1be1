use super::ExecutorStrategy;
use crate::engine::aggregator::FailureSet;
use crate::engine::backoff::BackoffPolicy;
use crate::engine::item::ItemBatch;
use crate::engine::operation::ItemOperation;
use crate::engine::retry::drive_item;
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Processes items one at a time in input order
///
/// The failure set preserves input order. Total run time is the sum of every
/// attempt and every retry wait. An item whose operation panics is recorded
/// as failed and the batch moves on.
#[derive(Debug, Clone)]
pub struct SequentialStrategy {
    policy: BackoffPolicy,
}

impl SequentialStrategy {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl<C, T> ExecutorStrategy<C, T> for SequentialStrategy
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn run(
        &self,
        ctx: Arc<C>,
        batch: ItemBatch<T>,
        operation: Arc<dyn ItemOperation<C, T>>,
    ) -> FailureSet<T> {
        let total = batch.len();
        let mut failed = FailureSet::with_capacity(total);

        for entry in batch {
            let driven = AssertUnwindSafe(drive_item(
                ctx.as_ref(),
                &entry,
                operation.as_ref(),
                self.policy,
            ))
            .catch_unwind()
            .await;

            match driven {
                Ok(outcome) => {
                    debug!(
                        "Item {}/{} finished after {} attempt(s)",
                        entry.index,
                        total,
                        outcome.attempts()
                    );
                    if outcome.is_exhausted() {
                        failed.push(entry.item);
                    }
                }
                Err(_) => {
                    warn!("Worker for item {} panicked", entry.index);
                    failed.push(entry.item);
                }
            }
        }

        failed
    }
}
