//! HTTP surface for zone recommendations.
//!
//! Every route is mounted under `/api`:
//!
//! - `GET /api/recommendations/{category}?count=K` ranks zones for a category.
//! - `GET /api/business-types` lists the categories with dedicated weights.
//! - `GET /api/status` reports whether the zone table is readable.
//!
//! Responses carry a `success` flag; failures add an `error` message.

#![forbid(unsafe_code)]

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::info;
use zonerank_core::DynZoneSource;
use zonerank_scorer::ZoneRecommender;

pub use error::{ApiError, ErrorBody};
pub use handlers::{BusinessTypesBody, RecommendationQuery, RecommendationsBody, StatusBody};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    recommender: Arc<ZoneRecommender<DynZoneSource>>,
    strict_categories: bool,
}

impl AppState {
    /// Wrap a recommender. Unknown categories are rejected by default.
    #[must_use]
    pub fn new(recommender: ZoneRecommender<DynZoneSource>) -> Self {
        Self {
            recommender: Arc::new(recommender),
            strict_categories: true,
        }
    }

    /// Choose whether categories without dedicated weights are rejected
    /// (`true`) or scored with uniform weights (`false`).
    #[must_use]
    pub const fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    /// The recommender serving requests.
    #[must_use]
    pub fn recommender(&self) -> &ZoneRecommender<DynZoneSource> {
        &self.recommender
    }

    /// Whether unknown categories are rejected.
    #[must_use]
    pub const fn strict_categories(&self) -> bool {
        self.strict_categories
    }
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/recommendations/{category}", get(handlers::recommendations))
        .route("/business-types", get(handlers::business_types))
        .route("/status", get(handlers::status));
    Router::new().nest("/api", api).with_state(state)
}

/// Bind `addr` and serve requests until the process stops.
///
/// # Errors
/// Returns an I/O error when the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
