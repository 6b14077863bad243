//! HTTP client for the hosted decision-log table.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;
use url::Url;

use super::types::DecisionRecord;
use crate::config::FeedConfig;

/// Default row cap per fetch: one day of 15-minute decisions.
pub const DEFAULT_LIMIT: usize = 96;

/// Failure modes of a feed fetch.
///
/// Malformed rows are not an error: they degrade field by field inside
/// [`DecisionRecord::from_fields`]. Only the request itself can fail.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The configured API root could not be turned into a request URL.
    #[error("invalid feed endpoint: {0}")]
    Endpoint(String),
    /// The store answered with a non-success status. `body` is captured
    /// best-effort; an unreadable body becomes an empty string.
    #[error("decision feed HTTP {status}: {body}")]
    RemoteRead { status: u16, body: String },
    /// The request never produced a usable response (connect, decode).
    #[error("decision feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One page of raw rows as returned by the store.
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Read-only client for the decision-log table.
///
/// Issues a single GET per fetch: no retry, no timeout override, first
/// page only.
pub struct DecisionFeedClient {
    http: Client,
    config: FeedConfig,
}

impl DecisionFeedClient {
    /// Creates a client with a default HTTP stack.
    pub fn new(config: FeedConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    /// Creates a client over an injected [`reqwest::Client`].
    ///
    /// Logs a non-fatal warning when credentials are missing; the request
    /// is still attempted and the server rejection surfaces as a
    /// [`FeedError::RemoteRead`].
    pub fn with_http(config: FeedConfig, http: Client) -> Self {
        if config.is_degraded() {
            warn!(
                "missing decision feed credentials (AIRTABLE_API_KEY / AIRTABLE_BASE_ID); \
                 requests will fail at the server"
            );
        }
        Self { http, config }
    }

    /// Convenience constructor reading [`FeedConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(FeedConfig::from_env())
    }

    /// Fetches the latest [`DEFAULT_LIMIT`] decisions.
    pub async fn fetch_latest(&self) -> Result<Vec<DecisionRecord>, FeedError> {
        self.fetch_decisions(DEFAULT_LIMIT).await
    }

    /// Fetches up to `limit` decision rows, newest first, and maps each
    /// row into a [`DecisionRecord`].
    ///
    /// # Errors
    ///
    /// [`FeedError::RemoteRead`] on a non-success status (carrying the
    /// status code and best-effort body text), [`FeedError::Transport`]
    /// when the request or JSON decode fails outright.
    pub async fn fetch_decisions(&self, limit: usize) -> Result<Vec<DecisionRecord>, FeedError> {
        let url = self.table_url()?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.api_key)
            .query(&[("sort[0][field]", "time_iso"), ("sort[0][direction]", "desc")])
            .query(&[("maxRecords", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::RemoteRead {
                status: status.as_u16(),
                body,
            });
        }

        let page: RecordPage = response.json().await?;
        Ok(page
            .records
            .iter()
            .map(|r| DecisionRecord::from_fields(&r.fields))
            .collect())
    }

    /// Builds `<api_url>/<base_id>/<table>` with the table percent-encoded
    /// as a path segment.
    fn table_url(&self) -> Result<Url, FeedError> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| FeedError::Endpoint(format!("{}: {e}", self.config.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| {
                FeedError::Endpoint(format!("{} cannot carry a path", self.config.api_url))
            })?
            .push(&self.config.base_id)
            .push(&self.config.table);
        Ok(url)
    }
}
