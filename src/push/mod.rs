//! Outbound push notifications
//!
//! Accounts refer to push endpoints by name. A [`PushRegistry`] resolves the
//! name to a [`Notifier`]; unknown or missing names resolve to a notifier
//! that drops every message.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Message delivered to a push endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub content: String,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn submit(&self, message: &PushMessage) -> Result<()>;
}

/// Drops every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn submit(&self, message: &PushMessage) -> Result<()> {
        debug!("No push endpoint configured, dropping '{}'", message.title);
        Ok(())
    }
}

/// Posts messages as JSON to a webhook
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn submit(&self, message: &PushMessage) -> Result<()> {
        let response = self.client.post(&self.url).json(message).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Push(format!(
                "webhook {} answered {}",
                self.url, status
            )));
        }
        Ok(())
    }
}

/// Configured push endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushEndpoint {
    pub url: String,
}

/// Named notifiers
#[derive(Clone, Default)]
pub struct PushRegistry {
    notifiers: HashMap<String, Arc<dyn Notifier>>,
}

impl PushRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build webhook notifiers for every configured endpoint
    pub fn from_endpoints(endpoints: &HashMap<String, PushEndpoint>) -> Result<Self> {
        let mut registry = Self::new();
        for (name, endpoint) in endpoints {
            registry.register(name.clone(), Arc::new(WebhookNotifier::new(&endpoint.url)?));
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, notifier: Arc<dyn Notifier>) {
        self.notifiers.insert(name.into(), notifier);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.notifiers.contains_key(name)
    }

    pub fn resolve(&self, name: Option<&str>) -> Arc<dyn Notifier> {
        match name.filter(|name| !name.is_empty()) {
            Some(name) => match self.notifiers.get(name) {
                Some(notifier) => Arc::clone(notifier),
                None => {
                    warn!("Unknown push endpoint '{}', notifications disabled", name);
                    Arc::new(NoopNotifier)
                }
            },
            None => Arc::new(NoopNotifier),
        }
    }
}

/// Submit and log instead of failing
pub async fn submit_logged(notifier: &dyn Notifier, message: PushMessage) {
    if let Err(e) = notifier.submit(&message).await {
        warn!("Failed to push '{}': {}", message.title, e);
    }
}
