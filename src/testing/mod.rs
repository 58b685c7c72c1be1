//! Testing utilities
//!
//! In-memory stand-ins for the platform client and push endpoints, used by
//! unit tests, integration tests and benchmarks.

mod mocks;

pub use mocks::{MockLiveApi, RecordingNotifier};

use crate::medal::{AnchorInfo, Medal, MedalInfo, RoomInfo};

/// Build a medal for tests
///
/// The room id is derived from the target id so every medal has a room.
pub fn sample_medal(name: &str, target_id: u64, level: u32, today_feed: u32) -> MedalInfo {
    MedalInfo {
        medal: Medal {
            target_id,
            medal_name: format!("{name}'s medal"),
            level,
            today_feed,
            intimacy: 0,
            next_intimacy: 0,
        },
        anchor_info: AnchorInfo {
            nick_name: name.to_string(),
        },
        room_info: RoomInfo {
            room_id: target_id + 1000,
        },
    }
}
