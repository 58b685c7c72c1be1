//! JSON gateway client for the live platform

use super::{AccountProfile, Heartbeat, LiveApi};
use crate::error::{Error, Result};
use crate::medal::MedalList;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope used by every gateway endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<Option<T>> {
        if self.code != 0 {
            return Err(Error::Api {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

/// [`LiveApi`] over HTTP
///
/// Talks to a gateway rooted at `base_url`:
///
/// - `GET  {base}/account/verify?access_key=..` -> `AccountProfile`
/// - `GET  {base}/medals?access_key=..` -> `MedalList`
/// - `POST {base}/heartbeat` with a [`Heartbeat`] body
///
/// Every response is wrapped as `{"code": 0, "message": "", "data": ...}`.
#[derive(Debug, Clone)]
pub struct HttpLiveApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLiveApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            return Err(status.into());
        }
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_result()
    }
}

#[async_trait]
impl LiveApi for HttpLiveApi {
    async fn login_verify(&self, access_key: &str) -> Result<Option<AccountProfile>> {
        debug!("Verifying access key");
        let response = self
            .client
            .get(self.endpoint("account/verify"))
            .query(&[("access_key", access_key)])
            .send()
            .await?;

        // A zero mid means the key is not logged in
        let profile: Option<AccountProfile> = Self::decode(response).await?;
        Ok(profile.filter(|profile| profile.mid != 0))
    }

    async fn fetch_medals(&self, access_key: &str) -> Result<MedalList> {
        let response = self
            .client
            .get(self.endpoint("medals"))
            .query(&[("access_key", access_key)])
            .send()
            .await?;

        let list: Option<MedalList> = Self::decode(response).await?;
        let list = list.unwrap_or_default();
        debug!("Fetched {} medals", list.medals.len());
        Ok(list)
    }

    async fn heartbeat(&self, heartbeat: Heartbeat<'_>) -> Result<()> {
        trace!(room_id = heartbeat.room_id, "Sending heartbeat");
        let response = self
            .client
            .post(self.endpoint("heartbeat"))
            .json(&heartbeat)
            .send()
            .await?;

        let _: Option<serde_json::Value> = Self::decode(response).await?;
        Ok(())
    }
}
