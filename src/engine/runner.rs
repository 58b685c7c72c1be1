//! Batch runner
//!
//! The runner is the entry point of the engine. It owns the strategy chosen
//! at construction, drives it once across both sub-collections and hands the
//! resulting failure set to the completion handler exactly once.

use super::aggregator::FailureSet;
use super::config::EngineConfig;
use super::item::{ItemBatch, ItemCategory};
use super::operation::{CompletionHandler, ItemOperation};
use super::strategy::{ConcurrencyMode, ConcurrentStrategy, ExecutorStrategy, SequentialStrategy};
use crate::error::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs one batch of work items to completion
pub struct BatchRunner<C, T>
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    strategy: Box<dyn ExecutorStrategy<C, T>>,
}

impl<C, T> BatchRunner<C, T>
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Build a runner for the configured mode
    ///
    /// Fails when the configuration is invalid, before any item is touched.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let policy = config.backoff();
        let strategy: Box<dyn ExecutorStrategy<C, T>> = match config.mode {
            ConcurrencyMode::Sequential => Box::new(SequentialStrategy::new(policy)),
            ConcurrencyMode::Concurrent => Box::new(
                ConcurrentStrategy::new(policy).with_max_parallel(config.max_parallel),
            ),
        };

        Ok(Self { strategy })
    }

    /// Use a specific strategy
    pub fn with_strategy(strategy: Box<dyn ExecutorStrategy<C, T>>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Attempt every item of `primary` then `secondary`
    ///
    /// Returns once every item is terminal and `completion` has been called
    /// with the failure set that is returned.
    pub async fn run(
        self,
        ctx: Arc<C>,
        primary: Vec<T>,
        secondary: Vec<T>,
        operation: Arc<dyn ItemOperation<C, T>>,
        completion: &dyn CompletionHandler<C, T>,
    ) -> FailureSet<T> {
        let batch = ItemBatch::new(primary, secondary);
        let total = batch.len();
        info!(
            "Running {} items ({} primary, {} secondary) with {} strategy",
            total,
            batch.count(ItemCategory::Primary),
            batch.count(ItemCategory::Secondary),
            self.strategy.name()
        );

        let started = Instant::now();
        let failed = self.strategy.run(Arc::clone(&ctx), batch, operation).await;
        debug!(
            "Batch finished in {:?}: {} succeeded, {} failed",
            started.elapsed(),
            total - failed.len(),
            failed.len()
        );

        completion.finish(ctx.as_ref(), &failed).await;
        failed
    }
}
