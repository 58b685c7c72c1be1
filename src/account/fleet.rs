use super::{Account, AccountOutcome};
use crate::api::{HttpLiveApi, LiveApi};
use crate::config::AppConfig;
use crate::error::Result;
use crate::medal::MedalReport;
use crate::push::PushRegistry;
use crate::watch::WatchLive;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Totals over every account of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub complete: usize,
    pub incomplete: usize,
    pub logged_out: usize,
    /// Account tasks that panicked
    pub crashed: usize,
}

impl FleetSummary {
    pub fn total(&self) -> usize {
        self.complete + self.incomplete + self.logged_out + self.crashed
    }

    pub fn is_success(&self) -> bool {
        self.complete == self.total()
    }

    fn record(&mut self, outcome: AccountOutcome) {
        match outcome {
            AccountOutcome::Complete => self.complete += 1,
            AccountOutcome::Incomplete => self.incomplete += 1,
            AccountOutcome::LoggedOut => self.logged_out += 1,
        }
    }
}

/// Independent accounts run side by side
///
/// Each account gets its own task and its own engine; nothing is shared
/// between them. [`Fleet::run`] returns once every account is done.
#[derive(Default)]
pub struct Fleet {
    accounts: Vec<Account>,
}

impl Fleet {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Accounts talking to the configured gateway
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api: Arc<dyn LiveApi> = Arc::new(HttpLiveApi::new(&config.watch.api_base)?);
        let registry = PushRegistry::from_endpoints(&config.push)?;
        Ok(Self::with_api(config, api, &registry))
    }

    pub fn with_api(config: &AppConfig, api: Arc<dyn LiveApi>, registry: &PushRegistry) -> Self {
        let accounts = config
            .accounts
            .iter()
            .map(|settings| {
                Account::new(
                    settings.clone(),
                    Arc::clone(&api),
                    registry.resolve(settings.push.as_deref()),
                    config.engine.clone(),
                    WatchLive::new(config.watch.heartbeat_interval),
                )
            })
            .collect();
        Self::new(accounts)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub async fn run(self) -> FleetSummary {
        info!("Starting {} account(s)", self.accounts.len());

        let handles: Vec<_> = self
            .accounts
            .into_iter()
            .enumerate()
            .map(|(slot, mut account)| {
                let span = info_span!("account", slot);
                tokio::spawn(
                    async move {
                        if !account.init().await {
                            return AccountOutcome::LoggedOut;
                        }
                        account.start().await
                    }
                    .instrument(span),
                )
            })
            .collect();

        let mut summary = FleetSummary::default();
        for joined in join_all(handles).await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    warn!("Account task aborted: {}", e);
                    summary.crashed += 1;
                }
            }
        }

        info!(
            "All accounts finished: {} complete, {} incomplete, {} logged out",
            summary.complete, summary.incomplete, summary.logged_out
        );
        summary
    }

    /// Log in and report medals without watching
    ///
    /// Accounts that fail to log in are left out.
    pub async fn check(self) -> Vec<(String, Result<MedalReport>)> {
        let checks = self.accounts.into_iter().map(|mut account| async move {
            if !account.init().await {
                return None;
            }
            let report = account.check_medals().await;
            Some((account.name(), report))
        });

        join_all(checks).await.into_iter().flatten().collect()
    }
}
