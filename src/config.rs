//! Environment-sourced configuration for the decision feed.

use std::env;

/// Default table name when `AIRTABLE_TABLE` is unset.
pub const DEFAULT_TABLE: &str = "Decisions";

/// Default API root for the hosted tabular store.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Connection settings for the decision-log table.
///
/// A missing key or base id does not fail construction: the client still
/// attempts requests and lets the server reject them. [`is_degraded`]
/// reports that condition so callers can warn at startup.
///
/// [`is_degraded`]: FeedConfig::is_degraded
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Bearer token for the store (secret).
    pub api_key: String,
    /// Base identifier the table lives under.
    pub base_id: String,
    /// Table name, percent-encoded into the request path.
    pub table: String,
    /// API root URL. Overridable so tests can point at a local stub.
    pub api_url: String,
}

impl FeedConfig {
    /// Builds a config from explicit credentials with default table and URL.
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table: DEFAULT_TABLE.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Reads `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`, and `AIRTABLE_TABLE`
    /// from the environment. Absent credentials become empty strings; an
    /// absent table name falls back to [`DEFAULT_TABLE`].
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("AIRTABLE_API_KEY").ok(),
            env::var("AIRTABLE_BASE_ID").ok(),
            env::var("AIRTABLE_TABLE").ok(),
        )
    }

    fn from_vars(
        api_key: Option<String>,
        base_id: Option<String>,
        table: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.unwrap_or_default(),
            base_id: base_id.unwrap_or_default(),
            table: table.filter(|t| !t.is_empty()).unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// True when the key or base id is missing, meaning requests will fail
    /// at the server.
    pub fn is_degraded(&self) -> bool {
        self.api_key.is_empty() || self.base_id.is_empty()
    }
}
