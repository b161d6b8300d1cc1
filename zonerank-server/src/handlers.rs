//! Endpoint handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use zonerank_core::{InvalidArgument, ZoneScore, ZoneSource, is_unselected, normalise_category};

use crate::AppState;
use crate::error::{ApiError, ErrorBody};

/// Query string accepted by the recommendations endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    /// Requested number of zones; parsed by the handler so malformed values
    /// produce a JSON error body.
    pub count: Option<String>,
}

/// Successful recommendations body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsBody {
    /// Always `true`.
    pub success: bool,
    /// Normalised category key the zones were ranked for.
    pub business_type: String,
    /// Ranked zones, best first.
    pub recommendations: Vec<ZoneScore>,
}

/// Supported categories body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessTypesBody {
    /// Always `true`.
    pub success: bool,
    /// Category keys in table order.
    pub types: Vec<String>,
}

/// Store health body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBody {
    /// Always `true`.
    pub success: bool,
    /// Fixed confirmation message.
    pub message: String,
    /// Number of zone rows currently readable.
    pub zones_count: usize,
}

pub(crate) async fn recommendations(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationsBody>, ApiError> {
    let count = parse_count(query.count.as_deref())?;
    if state.strict_categories() {
        check_category(&state, &category)?;
    }

    debug!("recommendations requested for '{category}' (count {count:?})");
    let recommendations = state.recommender().recommend(&category, count).await?;
    Ok(Json(RecommendationsBody {
        success: true,
        business_type: normalise_category(&category),
        recommendations,
    }))
}

pub(crate) async fn business_types(State(state): State<AppState>) -> Json<BusinessTypesBody> {
    Json(BusinessTypesBody {
        success: true,
        types: state
            .recommender()
            .weight_table()
            .categories()
            .map(str::to_owned)
            .collect(),
    })
}

pub(crate) async fn status(State(state): State<AppState>) -> Response {
    match state.recommender().source().zones().await {
        Ok(zones) => Json(StatusBody {
            success: true,
            message: "Database connection successful".to_owned(),
            zones_count: zones.len(),
        })
        .into_response(),
        Err(err) => {
            error!("status check failed: {err}");
            let body = ErrorBody {
                success: false,
                error: "Database connection error".to_owned(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn parse_count(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    raw.map(|text| {
        text.trim()
            .parse::<i64>()
            .map_err(|_| ApiError::UnparsableCount {
                raw: text.to_owned(),
            })
    })
    .transpose()
}

fn check_category(state: &AppState, category: &str) -> Result<(), InvalidArgument> {
    let table = state.recommender().weight_table();
    if is_unselected(category) || table.contains(category) {
        return Ok(());
    }
    Err(InvalidArgument::UnknownCategory {
        category: category.to_owned(),
        supported: table.categories().map(str::to_owned).collect(),
    })
}
