//! Backing tables and the errors raised while reading them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three backing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Zone aggregates.
    Zones,
    /// Per-zone, per-category competitor counts.
    Competitors,
    /// Individual listings.
    Listings,
}

impl Table {
    /// Name of the table in the store and of its snapshot file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zones => "zones",
            Self::Competitors => "competitors",
            Self::Listings => "listings",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A backing table could not be read.
///
/// A whole-request failure: callers never receive a partial ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUnavailable {
    /// The request could not be sent or the connection failed.
    #[error("network error reading {table} from {url}: {message}")]
    Network {
        /// Table being read.
        table: Table,
        /// Request URL.
        url: String,
        /// Transport error message.
        message: String,
    },
    /// The store did not answer in time.
    #[error("timed out after {timeout_secs}s reading {table} from {url}")]
    Timeout {
        /// Table being read.
        table: Table,
        /// Request URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The store answered with a non-success status.
    #[error("store returned status {status} reading {table} from {url}: {message}")]
    Status {
        /// Table being read.
        table: Table,
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response detail.
        message: String,
    },
    /// The response body did not decode as the expected rows.
    #[error("failed to decode {table} rows: {message}")]
    Decode {
        /// Table being read.
        table: Table,
        /// Decoder error message.
        message: String,
    },
    /// A snapshot file could not be read.
    #[error("failed to read {table} snapshot at {path}: {message}")]
    Snapshot {
        /// Table being read.
        table: Table,
        /// Snapshot file path.
        path: String,
        /// I/O error message.
        message: String,
    },
}

impl DataUnavailable {
    /// Table the failure relates to.
    #[must_use]
    pub const fn table(&self) -> Table {
        match self {
            Self::Network { table, .. }
            | Self::Timeout { table, .. }
            | Self::Status { table, .. }
            | Self::Decode { table, .. }
            | Self::Snapshot { table, .. } => *table,
        }
    }
}
