//! Daily medal summary

use super::{MedalInfo, MedalSelection, DAILY_INTIMACY_CAP};
use chrono::{Days, NaiveDate};
use std::fmt;

/// Progress of the worn medal towards its next level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProjection {
    pub today_feed: u32,
    /// Intimacy still missing for the next level
    pub needed: u32,
    /// Days at the daily cap, rounded up past the current day
    pub days: u32,
    pub eta: NaiveDate,
}

/// Human-readable summary of an account's medals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedalReport {
    pub tracked: usize,
    pub full: Vec<String>,
    pub not_full: Vec<String>,
    pub wearing: Option<MedalInfo>,
    pub projection: Option<LevelProjection>,
}

impl MedalReport {
    pub fn new(selection: &MedalSelection, today: NaiveDate) -> Self {
        let (full, not_full): (Vec<&MedalInfo>, Vec<&MedalInfo>) = selection
            .tracked
            .iter()
            .partition(|medal| medal.is_full_today());

        let projection = selection
            .wearing
            .as_ref()
            .and_then(|medal| project_level(medal, today));

        Self {
            tracked: selection.tracked.len(),
            full: full.iter().map(|m| m.anchor_name().to_string()).collect(),
            not_full: not_full.iter().map(|m| m.anchor_name().to_string()).collect(),
            wearing: selection.wearing.clone(),
            projection,
        }
    }

    pub fn all_full(&self) -> bool {
        self.full.len() == self.tracked
    }
}

/// Only worn medals below the level cap that already earned intimacy today
fn project_level(medal: &MedalInfo, today: NaiveDate) -> Option<LevelProjection> {
    if !medal.is_below_level_cap() || medal.medal.today_feed == 0 {
        return None;
    }

    let needed = medal
        .medal
        .next_intimacy
        .saturating_sub(medal.medal.intimacy);
    let days = needed / DAILY_INTIMACY_CAP + 1;
    let eta = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    Some(LevelProjection {
        today_feed: medal.medal.today_feed,
        needed,
        days,
        eta,
    })
}

impl fmt::Display for MedalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tracked medals: {}", self.tracked)?;
        writeln!(
            f,
            "[full] {:?} ({} medals)",
            self.full,
            self.full.len()
        )?;
        writeln!(
            f,
            "[below {}] {:?} ({} medals)",
            DAILY_INTIMACY_CAP,
            self.not_full,
            self.not_full.len()
        )?;

        if let Some(wearing) = &self.wearing {
            writeln!(
                f,
                "[wearing] \"{}\" ({}) level {}",
                wearing.medal.medal_name,
                wearing.anchor_name(),
                wearing.medal.level
            )?;
        }

        if let Some(projection) = &self.projection {
            writeln!(
                f,
                "Intimacy earned today: {} (platform settlement may lag)",
                projection.today_feed
            )?;
            writeln!(
                f,
                "Next level needs {} more intimacy, about {} day(s) ({}, at {} per day)",
                projection.needed,
                projection.days,
                projection.eta.format("%Y-%m-%d"),
                DAILY_INTIMACY_CAP
            )?;
        }

        Ok(())
    }
}
