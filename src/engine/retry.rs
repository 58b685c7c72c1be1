//! Attempt-and-retry loop for a single work item

use super::backoff::BackoffPolicy;
use super::item::IndexedItem;
use super::operation::ItemOperation;
use tracing::{debug, trace};

/// Terminal state of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl ItemOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            ItemOutcome::Succeeded { attempts } | ItemOutcome::Exhausted { attempts } => *attempts,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ItemOutcome::Exhausted { .. })
    }
}

/// Attempt `entry` until it succeeds or its schedule runs out
///
/// The wait between attempts only suspends the calling task.
pub async fn drive_item<C, T>(
    ctx: &C,
    entry: &IndexedItem<T>,
    operation: &dyn ItemOperation<C, T>,
    policy: BackoffPolicy,
) -> ItemOutcome
where
    C: Sync,
    T: Sync,
{
    let mut schedule = policy.schedule();
    let mut attempts = 0;

    loop {
        attempts += 1;
        trace!(index = entry.index, attempt = attempts, "Attempting item");

        if operation.attempt(ctx, &entry.item, entry.index).await {
            trace!(index = entry.index, attempts, "Item succeeded");
            return ItemOutcome::Succeeded { attempts };
        }

        match schedule.next() {
            Some(delay) => {
                debug!(
                    "Item {} failed (attempt {}/{}), retrying after {:?}",
                    entry.index,
                    attempts,
                    policy.max_attempts(),
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            None => {
                debug!("Item {} exhausted after {} attempt(s)", entry.index, attempts);
                return ItemOutcome::Exhausted { attempts };
            }
        }
    }
}
