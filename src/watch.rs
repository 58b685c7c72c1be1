//! Watch-live heartbeat task
//!
//! Keeps an account "watching" a medal's room by sending heartbeats at a
//! fixed interval. Medals below the level cap need more heartbeats to reach
//! the daily intimacy cap than those at or above it.

use crate::account::AccountSession;
use crate::api::Heartbeat;
use crate::engine::{CompletionHandler, FailureSet, ItemOperation};
use crate::medal::MedalInfo;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// Heartbeats for a medal below the level cap
pub const HEARTBEATS_BELOW_CAP: u32 = 25;

/// Heartbeats for a medal at or above the level cap
pub const HEARTBEATS_AT_CAP: u32 = 5;

/// Progress is logged every this many heartbeats
const PROGRESS_EVERY: u32 = 5;

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Sends heartbeats for one medal per attempt
#[derive(Debug, Clone)]
pub struct WatchLive {
    interval: Duration,
}

impl WatchLive {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn heartbeats_for(medal: &MedalInfo) -> u32 {
        if medal.is_below_level_cap() {
            HEARTBEATS_BELOW_CAP
        } else {
            HEARTBEATS_AT_CAP
        }
    }
}

impl Default for WatchLive {
    fn default() -> Self {
        Self::new(DEFAULT_HEARTBEAT_INTERVAL)
    }
}

#[async_trait]
impl ItemOperation<AccountSession, MedalInfo> for WatchLive {
    async fn attempt(&self, session: &AccountSession, medal: &MedalInfo, index: usize) -> bool {
        let times = Self::heartbeats_for(medal);

        for sent in 1..=times {
            let heartbeat = Heartbeat {
                access_key: &session.access_key,
                device_ids: &session.device_ids,
                room_id: medal.room_info.room_id,
                target_id: medal.medal.target_id,
            };
            if let Err(e) = session.api.heartbeat(heartbeat).await {
                warn!(
                    account = %session.name,
                    "{} heartbeat {} failed: {}",
                    medal.anchor_name(),
                    sent,
                    e
                );
                return false;
            }

            if sent % PROGRESS_EVERY == 0 {
                info!(
                    account = %session.name,
                    "{} heartbeat {} sent ({}/{})",
                    medal.anchor_name(),
                    sent,
                    index,
                    session.scheduled
                );
            }
            tokio::time::sleep(self.interval).await;
        }

        true
    }
}

#[async_trait]
impl CompletionHandler<AccountSession, MedalInfo> for WatchLive {
    async fn finish(&self, session: &AccountSession, failed: &FailureSet<MedalInfo>) {
        if failed.is_empty() {
            info!(account = %session.name, "Daily watch complete");
        } else {
            let names: Vec<&str> = failed.iter().map(|medal| medal.anchor_name()).collect();
            warn!(
                account = %session.name,
                "Daily watch incomplete, {}/{} medals left: {:?}",
                failed.len(),
                session.tracked,
                names
            );
        }
    }
}
