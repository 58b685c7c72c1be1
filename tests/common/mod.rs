//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use medal_helper::engine::{CompletionHandler, FailureSet, ItemOperation};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Operation whose outcome per item is fixed up front
///
/// Items listed as failing fail on every attempt. Items with a flaky budget
/// fail that many times and then succeed. Everything else succeeds.
#[derive(Clone, Default)]
pub struct ScriptedOperation {
    failing: HashSet<String>,
    flaky: Arc<Mutex<HashMap<String, u32>>>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
    stamps: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl ScriptedOperation {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing_on<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn flaky(self, item: &str, failures: u32) -> Self {
        self.flaky.lock().unwrap().insert(item.to_string(), failures);
        self
    }

    /// Every attempt as (item, index), in call order
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, item: &str) -> usize {
        self.calls().iter().filter(|(name, _)| name == item).count()
    }

    /// When the last attempt for `item` started
    pub fn last_call_at(&self, item: &str) -> Option<Instant> {
        self.stamps
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == item)
            .map(|(_, at)| *at)
    }
}

#[async_trait]
impl ItemOperation<(), String> for ScriptedOperation {
    async fn attempt(&self, _ctx: &(), item: &String, index: usize) -> bool {
        self.calls.lock().unwrap().push((item.clone(), index));
        self.stamps
            .lock()
            .unwrap()
            .push((item.clone(), Instant::now()));
        tokio::task::yield_now().await;

        if self.failing.contains(item) {
            return false;
        }
        let mut flaky = self.flaky.lock().unwrap();
        match flaky.get_mut(item) {
            Some(left) if *left > 0 => {
                *left -= 1;
                false
            }
            _ => true,
        }
    }
}

/// Completion handler that keeps every failure set it was given
#[derive(Clone, Default)]
pub struct RecordingCompletion {
    received: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Vec<String>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionHandler<(), String> for RecordingCompletion {
    async fn finish(&self, _ctx: &(), failed: &FailureSet<String>) {
        self.received
            .lock()
            .unwrap()
            .push(failed.iter().cloned().collect());
    }
}

pub fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
