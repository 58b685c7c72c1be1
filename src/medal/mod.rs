//! Fan medal model
//!
//! A medal ties an account to one anchor. Watching the anchor's room earns
//! intimacy up to a daily cap; the heartbeat task only cares about medals
//! that are still below that cap.

pub mod report;
pub mod selection;

pub use report::MedalReport;
pub use selection::{MedalFilter, MedalSelection};

use serde::{Deserialize, Serialize};

/// Intimacy a medal can earn per day
pub const DAILY_INTIMACY_CAP: u32 = 1500;

/// Level at which a medal stops being a growth target
pub const LEVEL_CAP: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Medal {
    /// Anchor uid the medal belongs to
    pub target_id: u64,
    pub medal_name: String,
    pub level: u32,
    /// Intimacy earned today
    pub today_feed: u32,
    pub intimacy: u32,
    /// Intimacy needed for the next level
    pub next_intimacy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct AnchorInfo {
    pub nick_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RoomInfo {
    /// 0 when the anchor has no live room
    pub room_id: u64,
}

/// One medal with its anchor and room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct MedalInfo {
    pub medal: Medal,
    pub anchor_info: AnchorInfo,
    pub room_info: RoomInfo,
}

impl MedalInfo {
    pub fn anchor_name(&self) -> &str {
        &self.anchor_info.nick_name
    }

    pub fn is_full_today(&self) -> bool {
        self.medal.today_feed >= DAILY_INTIMACY_CAP
    }

    pub fn is_below_level_cap(&self) -> bool {
        self.medal.level < LEVEL_CAP
    }
}

/// Medals of an account as returned by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MedalList {
    pub medals: Vec<MedalInfo>,
    /// The first medal is the one currently worn
    #[serde(default)]
    pub wearing: bool,
}
