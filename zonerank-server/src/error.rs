//! Mapping from domain failures onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;
use zonerank_core::{DataUnavailable, InvalidArgument, RecommendError};

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub error: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `count` query parameter was not an integer.
    #[error("count must be a positive integer, got '{raw}'")]
    UnparsableCount {
        /// Parameter as received.
        raw: String,
    },
    /// A request argument failed validation.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// A backing table could not be read.
    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailable),
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::InvalidArgument(inner) => Self::InvalidArgument(inner),
            RecommendError::DataUnavailable(inner) => Self::DataUnavailable(inner),
        }
    }
}

impl ApiError {
    /// Status code reported for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnparsableCount { .. } | Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        } else {
            warn!("rejected request: {self}");
        }
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
