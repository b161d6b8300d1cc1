//! Zone scoring, ranking and listing tagging for zonerank.
//!
//! The crate is split into pure stages and one async pipeline:
//! - [`score_zones`] turns fetched zones and competitor counts into one
//!   [`ZoneScore`](zonerank_core::ZoneScore) per zone for a category.
//! - [`rank`] keeps the top-K scores in a deterministic order.
//! - [`tag_listings`] annotates listings with their zone's outcome and puts
//!   recommended listings first.
//! - [`ZoneRecommender`] fetches the tables from any
//!   [`ZoneSource`](zonerank_core::ZoneSource) concurrently and runs the
//!   stages above.
//!
//! None of the pure stages perform I/O, and the recommender keeps no state
//! between calls.

#![forbid(unsafe_code)]

mod options;
mod ranking;
mod recommender;
mod scoring;
mod tagging;


pub use options::{DEFAULT_LISTING_BONUS, ScoringOptions, ScoringOptionsError};
pub use ranking::rank;
pub use recommender::ZoneRecommender;
pub use scoring::score_zones;
pub use tagging::{ListingComparator, ListingOrder, SortDirection, tag_listings};
