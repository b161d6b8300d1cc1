//! `ZoneSource` backed by a PostgREST-style hosted store.
//!
//! Each table is read with a single `GET {base_url}/rest/v1/{table}?select=*`
//! carrying the project key in both the `apikey` and bearer headers. The
//! three reads are independent, so callers may issue them concurrently.
//!
//! # Example
//!
//! ```no_run
//! use zonerank_core::ZoneSource;
//! use zonerank_data::http::HttpZoneSource;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpZoneSource::new("https://project.example.co", "anon-key")?;
//! let zones = source.zones().await?;
//! println!("{} zones", zones.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use zonerank_core::{Competitor, DataUnavailable, Listing, Table, Zone, ZoneSource};

/// Default user agent for store requests.
pub const DEFAULT_USER_AGENT: &str = "zonerank/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while building an [`HttpZoneSource`].
#[derive(Debug, Error)]
pub enum HttpSourceBuildError {
    /// The base URL is not an absolute `http` or `https` URL.
    #[error("invalid store URL '{url}': {message}")]
    InvalidBaseUrl {
        /// URL as supplied.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for [`HttpZoneSource`].
#[derive(Clone)]
pub struct HttpZoneSourceConfig {
    /// Base URL of the store, without the `/rest/v1` suffix.
    pub base_url: String,
    /// Project key sent as `apikey` and as a bearer token.
    pub api_key: String,
    /// Connect and overall request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Name of the zones table.
    pub zones_table: String,
    /// Name of the competitors table.
    pub competitors_table: String,
    /// Name of the listings table.
    pub listings_table: String,
}

impl fmt::Debug for HttpZoneSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpZoneSourceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("zones_table", &self.zones_table)
            .field("competitors_table", &self.competitors_table)
            .field("listings_table", &self.listings_table)
            .finish()
    }
}

impl HttpZoneSourceConfig {
    /// Create a configuration for the store at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            zones_table: "Zones".to_owned(),
            competitors_table: "Competitors".to_owned(),
            listings_table: "Listings".to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the store-side name of `table`.
    #[must_use]
    pub fn with_table_name(mut self, table: Table, name: impl Into<String>) -> Self {
        let slot = match table {
            Table::Zones => &mut self.zones_table,
            Table::Competitors => &mut self.competitors_table,
            Table::Listings => &mut self.listings_table,
        };
        *slot = name.into();
        self
    }

    /// Store-side name of `table`.
    #[must_use]
    pub fn table_name(&self, table: Table) -> &str {
        match table {
            Table::Zones => &self.zones_table,
            Table::Competitors => &self.competitors_table,
            Table::Listings => &self.listings_table,
        }
    }
}

/// Reads zones, competitors and listings over HTTP.
///
/// No retries are attempted; every failure surfaces as [`DataUnavailable`].
#[derive(Debug, Clone)]
pub struct HttpZoneSource {
    client: Client,
    config: HttpZoneSourceConfig,
}

impl HttpZoneSource {
    /// Create a source with default timeouts and table names.
    ///
    /// # Errors
    /// Returns an error when the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, HttpSourceBuildError> {
        Self::with_config(HttpZoneSourceConfig::new(base_url, api_key))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    /// Returns an error when the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpZoneSourceConfig) -> Result<Self, HttpSourceBuildError> {
        validate_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Configuration the source was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpZoneSourceConfig {
        &self.config
    }

    /// Build the read URL for `table`.
    fn table_url(&self, table: Table) -> String {
        format!(
            "{}/rest/v1/{}?select=*",
            self.config.base_url.trim_end_matches('/'),
            self.config.table_name(table)
        )
    }

    async fn fetch_rows<T>(&self, table: Table) -> Result<Vec<T>, DataUnavailable>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        debug!("fetching {table} from {url}");

        let body = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(table, &err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(table, &err, &url))?
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(table, &err, &url))?;

        let rows: Vec<T> =
            serde_json::from_slice(&body).map_err(|err| DataUnavailable::Decode {
                table,
                message: err.to_string(),
            })?;
        debug!("fetched {} {table} rows", rows.len());
        Ok(rows)
    }

    fn convert_reqwest_error(
        &self,
        table: Table,
        error: &reqwest::Error,
        url: &str,
    ) -> DataUnavailable {
        if error.is_timeout() {
            return DataUnavailable::Timeout {
                table,
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DataUnavailable::Status {
                table,
                url: url.to_owned(),
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned(),
            };
        }

        DataUnavailable::Network {
            table,
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

fn validate_base_url(raw: &str) -> Result<(), HttpSourceBuildError> {
    let invalid = |message: String| HttpSourceBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        message,
    };
    let parsed = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[async_trait]
impl ZoneSource for HttpZoneSource {
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
        self.fetch_rows(Table::Zones).await
    }

    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
        self.fetch_rows(Table::Competitors).await
    }

    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
        self.fetch_rows(Table::Listings).await
    }
}
