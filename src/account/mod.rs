//! Account workflow
//!
//! An [`Account`] logs in, picks its medals for the day, runs the watch task
//! over them through a [`BatchRunner`] and re-checks the medals until every
//! tracked medal reached the daily cap or the round budget is spent.

mod fleet;
mod session;

pub use fleet::{Fleet, FleetSummary};
pub use session::{mask_key, AccountSession};

use crate::api::{AccountProfile, LiveApi};
use crate::config::AccountConfig;
use crate::engine::{BackoffPolicy, BatchRunner, EngineConfig};
use crate::error::Result;
use crate::medal::{MedalFilter, MedalReport, MedalSelection};
use crate::push::{submit_logged, Notifier, PushMessage};
use crate::watch::WatchLive;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Wait between watch rounds when medals are still below the cap
pub const ROUND_RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Extra watch rounds after the first one
pub const MAX_ROUND_RETRIES: u32 = 3;

/// How an account's day ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOutcome {
    /// Login failed, nothing was attempted
    LoggedOut,
    /// Every tracked medal reached the daily cap
    Complete,
    /// Rounds exhausted with medals still below the cap
    Incomplete,
}

pub struct Account {
    settings: AccountConfig,
    api: Arc<dyn LiveApi>,
    notifier: Arc<dyn Notifier>,
    engine: EngineConfig,
    watch: WatchLive,
    rounds: BackoffPolicy,
    device_ids: Vec<String>,
    profile: Option<AccountProfile>,
    selection: MedalSelection,
    message: String,
}

impl Account {
    pub fn new(
        settings: AccountConfig,
        api: Arc<dyn LiveApi>,
        notifier: Arc<dyn Notifier>,
        engine: EngineConfig,
        watch: WatchLive,
    ) -> Self {
        Self {
            settings,
            api,
            notifier,
            engine,
            watch,
            rounds: BackoffPolicy::constant(ROUND_RETRY_INTERVAL, MAX_ROUND_RETRIES),
            device_ids: vec![
                uuid::Uuid::new_v4().to_string(),
                uuid::Uuid::new_v4().to_string(),
            ],
            profile: None,
            selection: MedalSelection::default(),
            message: String::new(),
        }
    }

    /// Override the retry policy of whole watch rounds
    pub fn with_round_policy(mut self, rounds: BackoffPolicy) -> Self {
        self.rounds = rounds;
        self
    }

    /// Display name, the masked access key until logged in
    pub fn name(&self) -> String {
        match &self.profile {
            Some(profile) => profile.name.clone(),
            None => mask_key(&self.settings.access_key),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&AccountProfile> {
        self.profile.as_ref()
    }

    pub fn selection(&self) -> &MedalSelection {
        &self.selection
    }

    /// Last medal report text
    pub fn message(&self) -> &str {
        &self.message
    }

    fn filter(&self) -> MedalFilter {
        MedalFilter::new(
            self.settings.allowed_uids.clone(),
            self.settings.banned_uids.clone(),
        )
    }

    /// Verify the access key, pushing an expiry notice when it is rejected
    pub async fn login(&mut self) -> bool {
        let profile = match self.api.login_verify(&self.settings.access_key).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(account = %self.name(), "Login check failed: {}", e);
                None
            }
        };

        match profile {
            Some(profile) => {
                info!(account = %profile.name, uid = profile.mid, "Logged in");
                self.profile = Some(profile);
                true
            }
            None => {
                self.profile = None;
                error!(
                    "Login failed, access key: {}",
                    mask_key(&self.settings.access_key)
                );
                self.expire().await;
                false
            }
        }
    }

    /// Fetch medals and apply the account's filter
    pub async fn refresh_medals(&mut self) -> Result<()> {
        let list = self.api.fetch_medals(&self.settings.access_key).await?;
        self.selection = self.filter().select(list);
        debug!(
            account = %self.name(),
            "{} medals tracked, {} remaining",
            self.selection.tracked.len(),
            self.selection.remaining.len()
        );
        Ok(())
    }

    /// Log in and load medals
    pub async fn init(&mut self) -> bool {
        if !self.login().await {
            return false;
        }
        if let Err(e) = self.refresh_medals().await {
            warn!(account = %self.name(), "Failed to load medals: {}", e);
        }
        true
    }

    /// Refresh medals and summarize them
    pub async fn check_medals(&mut self) -> Result<MedalReport> {
        self.refresh_medals().await?;
        let report = MedalReport::new(&self.selection, chrono::Local::now().date_naive());
        self.message = report.to_string();
        info!(account = %self.name(), "\n{}", self.message);
        Ok(report)
    }

    fn session(&self, scheduled: usize) -> AccountSession {
        let (uid, name) = match &self.profile {
            Some(profile) => (profile.mid, profile.name.clone()),
            None => (0, self.name()),
        };
        AccountSession {
            uid,
            name,
            access_key: self.settings.access_key.clone(),
            device_ids: self.device_ids.clone(),
            tracked: self.selection.tracked.len(),
            scheduled,
            api: Arc::clone(&self.api),
        }
    }

    /// One watch round over the remaining medals
    ///
    /// Returns whether every tracked medal is full afterwards.
    pub async fn run_once(&mut self) -> Result<bool> {
        let runner = BatchRunner::new(&self.engine)?;
        let (primary, secondary) = self.selection.work_items();
        let session = Arc::new(self.session(primary.len() + secondary.len()));

        runner
            .run(
                session,
                primary,
                secondary,
                Arc::new(self.watch.clone()),
                &self.watch,
            )
            .await;

        let report = self.check_medals().await?;
        Ok(report.all_full())
    }

    /// Run watch rounds until every medal is full, then send the report
    pub async fn start(&mut self) -> AccountOutcome {
        if !self.is_logged_in() {
            error!(
                "Account not logged in, access key: {}",
                mask_key(&self.settings.access_key)
            );
            return AccountOutcome::LoggedOut;
        }

        let mut rounds = self.rounds.schedule();
        let outcome = loop {
            match self.run_once().await {
                Ok(true) => break AccountOutcome::Complete,
                Ok(false) => debug!(account = %self.name(), "Medals still below the cap"),
                Err(e) => warn!(account = %self.name(), "Watch round failed: {}", e),
            }
            match rounds.next() {
                Some(delay) => tokio::time::sleep(delay).await,
                None => break AccountOutcome::Incomplete,
            }
        };

        self.report().await;
        outcome
    }

    /// Push the daily report
    pub async fn report(&self) {
        let message = PushMessage::new(
            "# Today's intimacy progress",
            format!("Account {}, {}", self.name(), self.message),
        );
        submit_logged(self.notifier.as_ref(), message).await;
    }

    /// Push an access key expiry notice
    pub async fn expire(&self) {
        let message = PushMessage::new(
            "# Access key expired",
            format!(
                "Account not logged in, access key: {}",
                mask_key(&self.settings.access_key)
            ),
        );
        submit_logged(self.notifier.as_ref(), message).await;
    }
}
