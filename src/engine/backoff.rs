//! Retry backoff policy for work items
//!
//! A policy describes how long to wait between attempts and how many retries
//! an item may consume. Every item draws its own [`BackoffSchedule`] from the
//! policy, so schedules never interfere with each other.

use std::time::Duration;

/// Growth pattern of the wait between retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffKind {
    /// `1x, 1x, 2x, 3x, 5x, ...` of the base interval
    #[default]
    Fibonacci,
    /// Same wait before every retry
    Constant,
}

/// Retry policy shared by all items of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    kind: BackoffKind,
    interval: Duration,
    max_retries: u32,
}

impl BackoffPolicy {
    /// Fibonacci backoff seeded by `interval`
    ///
    /// A zero interval disables retrying: the caller performs exactly one
    /// attempt regardless of `max_retries`.
    pub fn fibonacci(interval: Duration, max_retries: u32) -> Self {
        Self {
            kind: BackoffKind::Fibonacci,
            interval,
            max_retries,
        }
    }

    /// Constant backoff, waiting `interval` before each retry
    pub fn constant(interval: Duration, max_retries: u32) -> Self {
        Self {
            kind: BackoffKind::Constant,
            interval,
            max_retries,
        }
    }

    /// Fibonacci backoff from a whole number of seconds
    pub fn from_secs(retry_interval_secs: u64, max_retries: u32) -> Self {
        Self::fibonacci(Duration::from_secs(retry_interval_secs), max_retries)
    }

    /// Single attempt, never retry
    pub fn disabled() -> Self {
        Self::fibonacci(Duration::ZERO, 0)
    }

    pub fn kind(&self) -> BackoffKind {
        self.kind
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether failed attempts are retried at all
    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Number of retries an item may consume, not counting the first attempt
    pub fn max_retries(&self) -> u32 {
        if self.is_enabled() {
            self.max_retries
        } else {
            0
        }
    }

    /// Upper bound on operation invocations for one item
    pub fn max_attempts(&self) -> u32 {
        self.max_retries().saturating_add(1)
    }

    /// Wait before the given retry (1-based), or `None` once exhausted
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if retry == 0 || retry > self.max_retries() {
            return None;
        }

        let delay = match self.kind {
            BackoffKind::Fibonacci => self.interval.saturating_mul(fibonacci(retry)),
            BackoffKind::Constant => self.interval,
        };
        Some(delay)
    }

    /// Fresh schedule for one item
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule {
            policy: *self,
            consumed: 0,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Per-item sequence of retry waits
///
/// Yields one wait per retry and `None` once the policy's retry bound has
/// been consumed.
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    policy: BackoffPolicy,
    consumed: u32,
}

impl BackoffSchedule {
    /// Retries handed out so far
    pub fn retries_consumed(&self) -> u32 {
        self.consumed
    }

    pub fn is_exhausted(&self) -> bool {
        self.consumed >= self.policy.max_retries()
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.policy.delay_for(self.consumed + 1)?;
        self.consumed += 1;
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.policy.max_retries().saturating_sub(self.consumed) as usize;
        (left, Some(left))
    }
}

/// n-th Fibonacci number, saturating instead of overflowing
fn fibonacci(n: u32) -> u32 {
    match n {
        0 => 0,
        1 => 1,
        _ => {
            let mut a: u32 = 0;
            let mut b: u32 = 1;
            for _ in 2..=n {
                let next = a.saturating_add(b);
                a = b;
                b = next;
            }
            b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_calculation() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
        assert_eq!(fibonacci(2), 1);
        assert_eq!(fibonacci(3), 2);
        assert_eq!(fibonacci(4), 3);
        assert_eq!(fibonacci(5), 5);
        assert_eq!(fibonacci(6), 8);
        assert_eq!(fibonacci(200), u32::MAX);
    }

    #[test]
    fn test_fibonacci_schedule_grows() {
        let policy = BackoffPolicy::from_secs(2, 5);
        let waits: Vec<u64> = policy.schedule().map(|d| d.as_secs()).collect();
        assert_eq!(waits, vec![2, 2, 4, 6, 10]);
    }

    #[test]
    fn test_zero_interval_disables_retry() {
        let policy = BackoffPolicy::from_secs(0, 10);
        assert!(!policy.is_enabled());
        assert_eq!(policy.max_retries(), 0);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.schedule().next(), None);
    }

    #[test]
    fn test_schedule_exhausts_after_max_retries() {
        let policy = BackoffPolicy::from_secs(1, 2);
        let mut schedule = policy.schedule();
        assert_eq!(schedule.size_hint(), (2, Some(2)));
        assert!(schedule.next().is_some());
        assert!(schedule.next().is_some());
        assert!(schedule.is_exhausted());
        assert_eq!(schedule.next(), None);
        assert_eq!(schedule.retries_consumed(), 2);
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn test_zero_max_retries_means_single_attempt() {
        let policy = BackoffPolicy::from_secs(5, 0);
        assert!(policy.is_enabled());
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.schedule().count(), 0);
    }

    #[test]
    fn test_constant_backoff() {
        let policy = BackoffPolicy::constant(Duration::from_secs(5), 3);
        assert_eq!(policy.kind(), BackoffKind::Constant);
        assert!(policy
            .schedule()
            .all(|delay| delay == Duration::from_secs(5)));
        assert_eq!(policy.delay_for(4), None);
    }

    #[test]
    fn test_schedules_are_independent() {
        let policy = BackoffPolicy::from_secs(1, 3);
        let mut first = policy.schedule();
        first.next();
        first.next();

        let mut second = policy.schedule();
        assert_eq!(second.next(), Some(Duration::from_secs(1)));
        assert_eq!(first.next(), Some(Duration::from_secs(2)));
    }
}
