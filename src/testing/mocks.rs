use crate::api::{AccountProfile, Heartbeat, LiveApi};
use crate::error::{Error, Result};
use crate::medal::MedalList;
use crate::push::{Notifier, PushMessage};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Scripted [`LiveApi`]
///
/// Medal lists are handed out in order; the last one keeps being returned.
/// Heartbeats for rooms marked as failing return an error.
#[derive(Clone, Default)]
pub struct MockLiveApi {
    profile: Option<AccountProfile>,
    medal_lists: Arc<Mutex<VecDeque<MedalList>>>,
    failing_rooms: Arc<Mutex<HashSet<u64>>>,
    heartbeats: Arc<Mutex<HashMap<u64, u32>>>,
}

impl MockLiveApi {
    /// Logged-out account with no medals
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in(mid: u64, name: &str) -> Self {
        Self {
            profile: Some(AccountProfile {
                mid,
                name: name.to_string(),
            }),
            ..Self::default()
        }
    }

    pub async fn push_medals(&self, list: MedalList) {
        self.medal_lists.lock().await.push_back(list);
    }

    pub async fn fail_room(&self, room_id: u64) {
        self.failing_rooms.lock().await.insert(room_id);
    }

    /// Heartbeats received for a room
    pub async fn heartbeat_count(&self, room_id: u64) -> u32 {
        self.heartbeats
            .lock()
            .await
            .get(&room_id)
            .copied()
            .unwrap_or(0)
    }

    pub async fn total_heartbeats(&self) -> u32 {
        self.heartbeats.lock().await.values().sum()
    }
}

#[async_trait]
impl LiveApi for MockLiveApi {
    async fn login_verify(&self, _access_key: &str) -> Result<Option<AccountProfile>> {
        Ok(self.profile.clone())
    }

    async fn fetch_medals(&self, _access_key: &str) -> Result<MedalList> {
        let mut lists = self.medal_lists.lock().await;
        let list = if lists.len() > 1 {
            lists.pop_front()
        } else {
            lists.front().cloned()
        };
        Ok(list.unwrap_or_default())
    }

    async fn heartbeat(&self, heartbeat: Heartbeat<'_>) -> Result<()> {
        *self
            .heartbeats
            .lock()
            .await
            .entry(heartbeat.room_id)
            .or_insert(0) += 1;

        if self.failing_rooms.lock().await.contains(&heartbeat.room_id) {
            return Err(Error::Api {
                code: -1,
                message: format!("room {} rejected heartbeat", heartbeat.room_id),
            });
        }
        Ok(())
    }
}

/// [`Notifier`] that keeps every submitted message
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<PushMessage>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every message without recording it
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn messages(&self) -> Vec<PushMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn submit(&self, message: &PushMessage) -> Result<()> {
        if self.fail {
            return Err(Error::Push("recording notifier set to fail".to_string()));
        }
        self.messages.lock().await.push(message.clone());
        Ok(())
    }
}
