//! Picks which medals an account works on today

use super::{MedalInfo, MedalList, DAILY_INTIMACY_CAP, LEVEL_CAP};

/// Low daily intake that keeps a whitelisted medal in play past the level cap
const WHITELIST_MIN_FEED: u32 = 300;

/// Allow/deny lists of anchor uids
///
/// A non-empty allow list switches selection to whitelist mode and the deny
/// list is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedalFilter {
    pub allowed_uids: Vec<u64>,
    pub banned_uids: Vec<u64>,
}

impl MedalFilter {
    pub fn new(allowed_uids: Vec<u64>, banned_uids: Vec<u64>) -> Self {
        Self {
            allowed_uids,
            banned_uids,
        }
    }

    pub fn is_whitelist(&self) -> bool {
        !self.allowed_uids.is_empty()
    }

    /// Apply the filter to the platform's medal list
    pub fn select(&self, list: MedalList) -> MedalSelection {
        let wearing = if list.wearing {
            list.medals.first().cloned()
        } else {
            None
        };

        let mut selection = MedalSelection {
            wearing,
            ..Default::default()
        };

        if self.is_whitelist() {
            for medal in list.medals {
                if !self.allowed_uids.contains(&medal.medal.target_id) {
                    continue;
                }
                let below_cap = medal.is_below_level_cap()
                    && medal.medal.today_feed < DAILY_INTIMACY_CAP;
                if below_cap || medal.medal.today_feed < WHITELIST_MIN_FEED {
                    selection.remaining.push(medal.clone());
                }
                selection.tracked.push(medal);
            }
            return selection;
        }

        for medal in list.medals {
            if self.banned_uids.contains(&medal.medal.target_id) {
                continue;
            }
            if medal.room_info.room_id == 0 {
                continue;
            }
            if medal.medal.level <= LEVEL_CAP {
                if medal.medal.today_feed < DAILY_INTIMACY_CAP {
                    selection.remaining.push(medal.clone());
                }
                selection.tracked.push(medal);
            }
        }
        selection
    }
}

/// Result of applying a [`MedalFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedalSelection {
    /// Medals the account reports on
    pub tracked: Vec<MedalInfo>,
    /// Tracked medals still below today's cap
    pub remaining: Vec<MedalInfo>,
    /// Currently worn medal, if any
    pub wearing: Option<MedalInfo>,
}

impl MedalSelection {
    /// Split remaining medals into (below level cap, at or above it)
    pub fn work_items(&self) -> (Vec<MedalInfo>, Vec<MedalInfo>) {
        self.remaining
            .iter()
            .cloned()
            .partition(|medal| medal.is_below_level_cap())
    }

    /// Whether every tracked medal reached today's cap
    pub fn all_full(&self) -> bool {
        self.tracked.iter().all(|medal| medal.is_full_today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_medal as medal;

    fn list(medals: Vec<MedalInfo>) -> MedalList {
        MedalList {
            medals,
            wearing: false,
        }
    }

    #[test]
    fn test_blacklist_mode_skips_banned_and_roomless() {
        let mut roomless = medal("roomless", 4, 5, 0);
        roomless.room_info.room_id = 0;
        let medals = vec![
            medal("alice", 1, 10, 200),
            medal("bob", 2, 12, 1500),
            medal("banned", 3, 5, 0),
            roomless,
            medal("veteran", 5, 25, 0),
        ];
        let filter = MedalFilter::new(Vec::new(), vec![3]);

        let selection = filter.select(list(medals));

        let tracked: Vec<&str> = selection.tracked.iter().map(|m| m.anchor_name()).collect();
        let remaining: Vec<&str> = selection.remaining.iter().map(|m| m.anchor_name()).collect();
        assert_eq!(tracked, vec!["alice", "bob"]);
        assert_eq!(remaining, vec!["alice"]);
    }

    #[test]
    fn test_level_twenty_is_tracked_in_blacklist_mode() {
        let selection = MedalFilter::default().select(list(vec![medal("max", 1, 20, 100)]));
        assert_eq!(selection.remaining.len(), 1);
        let (primary, secondary) = selection.work_items();
        assert!(primary.is_empty());
        assert_eq!(secondary.len(), 1);
    }

    #[test]
    fn test_whitelist_mode() {
        let medals = vec![
            medal("low", 1, 10, 1000),
            medal("high-idle", 2, 22, 100),
            medal("high-busy", 3, 22, 800),
            medal("unlisted", 4, 10, 0),
        ];
        let filter = MedalFilter::new(vec![1, 2, 3], vec![1]);

        let selection = filter.select(list(medals));

        let remaining: Vec<&str> = selection.remaining.iter().map(|m| m.anchor_name()).collect();
        assert_eq!(remaining, vec!["low", "high-idle"]);
        assert_eq!(selection.tracked.len(), 3);
    }

    #[test]
    fn test_wearing_is_first_medal() {
        let selection = MedalFilter::default().select(MedalList {
            medals: vec![medal("worn", 1, 3, 0), medal("other", 2, 3, 0)],
            wearing: true,
        });
        assert_eq!(selection.wearing.unwrap().anchor_name(), "worn");
    }

    #[test]
    fn test_all_full() {
        let selection = MedalFilter::default().select(list(vec![
            medal("a", 1, 3, 1500),
            medal("b", 2, 3, 1500),
        ]));
        assert!(selection.all_full());
        assert!(selection.remaining.is_empty());
    }
}
