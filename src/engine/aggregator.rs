//! Failure collection for batch runs

use std::sync::Arc;
use tokio::sync::Mutex;

/// Items that did not succeed after exhausting their retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureSet<T> {
    items: Vec<T>,
}

impl<T> FailureSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> FailureSet<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> Default for FailureSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for FailureSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for FailureSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FailureSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Shared failure set for concurrent workers
///
/// Clones share the same underlying set. The lock is taken only for the
/// duration of a single insertion.
#[derive(Debug)]
pub struct FailureAggregator<T> {
    failed: Arc<Mutex<FailureSet<T>>>,
}

impl<T> FailureAggregator<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            failed: Arc::new(Mutex::new(FailureSet::with_capacity(capacity))),
        }
    }

    /// Record one exhausted item
    pub async fn record(&self, item: T) {
        self.failed.lock().await.push(item);
    }

    pub async fn len(&self) -> usize {
        self.failed.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.failed.lock().await.is_empty()
    }

    /// Take the collected failures, leaving the aggregator empty
    ///
    /// Call after every worker has been joined.
    pub async fn take(&self) -> FailureSet<T> {
        std::mem::take(&mut *self.failed.lock().await)
    }
}

impl<T> Clone for FailureAggregator<T> {
    fn clone(&self) -> Self {
        Self {
            failed: Arc::clone(&self.failed),
        }
    }
}

impl<T> Default for FailureAggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_set_membership() {
        let set: FailureSet<&str> = vec!["b", "d"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"b"));
        assert!(!set.contains(&"a"));
        assert_eq!(set.as_slice(), &["b", "d"]);
    }

    #[tokio::test]
    async fn test_aggregator_clones_share_state() {
        let aggregator = FailureAggregator::new();
        let worker = aggregator.clone();

        worker.record(1).await;
        aggregator.record(2).await;

        assert_eq!(aggregator.len().await, 2);
        let failed = aggregator.take().await;
        assert_eq!(failed.into_vec(), vec![1, 2]);
        assert!(worker.is_empty().await);
    }

    #[tokio::test]
    async fn test_aggregator_concurrent_inserts() {
        let aggregator = FailureAggregator::with_capacity(64);
        let mut handles = Vec::new();
        for value in 0..64u32 {
            let aggregator = aggregator.clone();
            handles.push(tokio::spawn(async move {
                aggregator.record(value).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut failed = aggregator.take().await.into_vec();
        failed.sort_unstable();
        assert_eq!(failed, (0..64).collect::<Vec<_>>());
    }
}
