//! Tunable scoring parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Popularity bonus added per listing located in a zone.
pub const DEFAULT_LISTING_BONUS: f64 = 0.5;

/// Knobs applied on top of the category weights.
///
/// # Examples
///
/// ```
/// use zonerank_scorer::ScoringOptions;
///
/// let options = ScoringOptions::default().with_listing_bonus(0.25);
/// assert!(options.validate().is_ok());
/// assert!(options.use_listings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Popularity added to a zone for every listing it contains.
    pub listing_bonus: f64,
    /// Whether listings are fetched and counted at all.
    pub use_listings: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            listing_bonus: DEFAULT_LISTING_BONUS,
            use_listings: true,
        }
    }
}

/// Errors returned by [`ScoringOptions::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoringOptionsError {
    /// The listing bonus was negative or not finite.
    #[error("listing bonus {value} must be finite and non-negative")]
    InvalidListingBonus {
        /// Value supplied by the caller.
        value: f64,
    },
}

impl ScoringOptions {
    /// Set the per-listing popularity bonus.
    #[must_use]
    pub const fn with_listing_bonus(mut self, listing_bonus: f64) -> Self {
        self.listing_bonus = listing_bonus;
        self
    }

    /// Enable or disable the listing-density adjustment.
    #[must_use]
    pub const fn with_listings(mut self, use_listings: bool) -> Self {
        self.use_listings = use_listings;
        self
    }

    /// Check that the options can be used for scoring.
    ///
    /// # Errors
    /// Returns [`ScoringOptionsError::InvalidListingBonus`] when the bonus is
    /// negative, `NaN` or infinite.
    pub fn validate(&self) -> Result<(), ScoringOptionsError> {
        if self.listing_bonus.is_finite() && self.listing_bonus >= 0.0 {
            Ok(())
        } else {
            Err(ScoringOptionsError::InvalidListingBonus {
                value: self.listing_bonus,
            })
        }
    }
}
