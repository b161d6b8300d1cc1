//! Facade crate for the zonerank location recommender.
//!
//! This crate re-exports the domain types and the recommendation pipeline,
//! and exposes the store adapters and HTTP surface behind feature flags.

#![forbid(unsafe_code)]

pub use zonerank_core::{
    CategoryWeights, Competitor, DataUnavailable, DynZoneSource, InvalidArgument, Listing,
    RecommendError, RecommendationCount, Table, TaggedListing, WeightTable, Zone, ZoneScore,
    ZoneSource, is_unselected, normalise_category,
};
pub use zonerank_scorer::{
    ListingOrder, ScoringOptions, SortDirection, ZoneRecommender, rank, score_zones, tag_listings,
};

#[cfg(feature = "http-store")]
pub use zonerank_data::{HttpZoneSource, HttpZoneSourceConfig, SnapshotZoneSource};

#[cfg(feature = "server")]
pub use zonerank_server::{AppState, router, serve};
