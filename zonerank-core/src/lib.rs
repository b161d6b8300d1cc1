//! Core domain types for the zonerank recommendation engine.
//!
//! This crate defines the records read from the backing store, the category
//! weight table, validated request arguments and the [`ZoneSource`] trait
//! that data back-ends implement. Scoring lives in `zonerank-scorer`.

#![forbid(unsafe_code)]

mod category;
mod count;
mod error;
mod listing;
pub mod source;
mod weights;
mod zone;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::{KNOWN_CATEGORIES, UNSELECTED, is_unselected, normalise_category};
pub use count::RecommendationCount;
pub use error::{InvalidArgument, RecommendError};
pub use listing::{Listing, TaggedListing};
pub use source::{DataUnavailable, DynZoneSource, Table, ZoneSource};
pub use weights::{CategoryWeights, WeightTable, WeightsError};
pub use zone::{Competitor, Zone, ZoneScore};
