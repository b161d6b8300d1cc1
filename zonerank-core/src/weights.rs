//! Per-category scoring coefficients.
//!
//! A [`WeightTable`] is built once and never mutated afterwards. Lookups for
//! categories missing from the table fall back to [`CategoryWeights::UNIFORM`]
//! rather than failing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::normalise_category;

/// Coefficients applied to a zone's popularity, ratings and competition.
///
/// Each coefficient lies in `0.0..=1.0`. They are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// Multiplier applied to the (adjusted) popularity score.
    pub popularity: f64,
    /// Multiplier applied to the user ratings aggregate.
    pub ratings: f64,
    /// Multiplier applied to the competitor count, subtracted from the score.
    pub competition: f64,
}

/// Errors returned by [`CategoryWeights::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightsError {
    /// A coefficient was non-finite or outside `0.0..=1.0`.
    #[error("{field} weight {value} must be finite and between 0.0 and 1.0")]
    OutOfRange {
        /// Name of the offending coefficient.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
}

#[expect(
    clippy::float_arithmetic,
    reason = "the uniform fallback is defined as an exact third"
)]
const THIRD: f64 = 1.0_f64 / 3.0_f64;

impl CategoryWeights {
    /// Equal weighting used for categories without dedicated coefficients.
    pub const UNIFORM: Self = Self::from_parts(THIRD, THIRD, THIRD);

    /// Validate and construct a weight triple.
    ///
    /// # Errors
    /// Returns [`WeightsError::OutOfRange`] when any coefficient is not a
    /// finite value in `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonerank_core::CategoryWeights;
    ///
    /// assert!(CategoryWeights::new(0.4, 0.2, 0.4).is_ok());
    /// assert!(CategoryWeights::new(1.5, 0.2, 0.4).is_err());
    /// ```
    pub fn new(popularity: f64, ratings: f64, competition: f64) -> Result<Self, WeightsError> {
        check_range("popularity", popularity)?;
        check_range("ratings", ratings)?;
        check_range("competition", competition)?;
        Ok(Self::from_parts(popularity, ratings, competition))
    }

    const fn from_parts(popularity: f64, ratings: f64, competition: f64) -> Self {
        Self {
            popularity,
            ratings,
            competition,
        }
    }
}

fn check_range(field: &'static str, value: f64) -> Result<(), WeightsError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(WeightsError::OutOfRange { field, value })
    }
}

/// Immutable mapping from normalised category key to [`CategoryWeights`].
///
/// # Examples
///
/// ```
/// use zonerank_core::{CategoryWeights, WeightTable};
///
/// let table = WeightTable::default();
/// assert_eq!(table.weights_for("Gas Station").popularity, 0.5);
/// assert_eq!(table.weights_for("florist"), CategoryWeights::UNIFORM);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    entries: Vec<(String, CategoryWeights)>,
}

impl WeightTable {
    /// Create a table with no dedicated categories.
    ///
    /// Every lookup against an empty table yields the uniform fallback.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return a copy of the table with `category` mapped to `weights`.
    ///
    /// The key is normalised before insertion; an existing entry for the same
    /// key is replaced in place so table order stays stable.
    #[must_use]
    pub fn with_category(mut self, category: &str, weights: CategoryWeights) -> Self {
        let key = normalise_category(category);
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = weights,
            None => self.entries.push((key, weights)),
        }
        self
    }

    /// Look up the coefficients for `category`, falling back to
    /// [`CategoryWeights::UNIFORM`] for unknown keys and the `none` sentinel.
    #[must_use]
    pub fn weights_for(&self, category: &str) -> CategoryWeights {
        self.lookup(&normalise_category(category))
            .unwrap_or(CategoryWeights::UNIFORM)
    }

    /// Report whether `category` has dedicated coefficients.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.lookup(&normalise_category(category)).is_some()
    }

    /// Iterate over the configured category keys in table order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn lookup(&self, key: &str) -> Option<CategoryWeights> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, weights)| *weights)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::empty()
            .with_category("barber", CategoryWeights::from_parts(0.40, 0.20, 0.40))
            .with_category("gym", CategoryWeights::from_parts(0.30, 0.40, 0.30))
            .with_category("gas_station", CategoryWeights::from_parts(0.50, 0.30, 0.20))
            .with_category("laundry", CategoryWeights::from_parts(0.50, 0.10, 0.40))
            .with_category("pharmacy", CategoryWeights::from_parts(0.40, 0.40, 0.20))
            .with_category("supermarket", CategoryWeights::from_parts(0.60, 0.20, 0.20))
    }
}
