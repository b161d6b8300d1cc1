//! Caller-facing error types for recommendation requests.

use thiserror::Error;

use crate::source::DataUnavailable;

/// A request argument failed validation.
///
/// Raised before any data is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// The requested number of recommendations was zero or negative.
    #[error("recommendation count must be positive, got {requested}")]
    NonPositiveCount {
        /// Count supplied by the caller.
        requested: i64,
    },
    /// The category is not one of the supported business types.
    ///
    /// Only raised by surfaces that check categories strictly; the scorer
    /// itself falls back to uniform weights.
    #[error("invalid business type '{category}'; supported types: {}", supported.join(", "))]
    UnknownCategory {
        /// Category as supplied by the caller.
        category: String,
        /// Supported category keys in table order.
        supported: Vec<String>,
    },
}

/// Errors returned by a recommendation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The request was malformed.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// One of the backing tables could not be read.
    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailable),
}
