//! Validated top-K request size.

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

/// Number of zones to return from a recommendation request.
///
/// Always at least one. Counts above the number of available zones are
/// accepted; the ranker simply returns everything it has.
///
/// # Examples
///
/// ```
/// use zonerank_core::RecommendationCount;
///
/// # fn main() -> Result<(), zonerank_core::InvalidArgument> {
/// assert_eq!(RecommendationCount::default().get(), 5);
/// assert_eq!(RecommendationCount::new(3)?.get(), 3);
/// assert!(RecommendationCount::new(0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RecommendationCount(usize);

impl RecommendationCount {
    /// Count used when the caller does not supply one.
    pub const DEFAULT: usize = 5;

    /// Validate a caller-supplied count.
    ///
    /// # Errors
    /// Returns [`InvalidArgument::NonPositiveCount`] when `requested <= 0`.
    pub fn new(requested: i64) -> Result<Self, InvalidArgument> {
        usize::try_from(requested)
            .ok()
            .filter(|count| *count > 0)
            .map(Self)
            .ok_or(InvalidArgument::NonPositiveCount { requested })
    }

    /// Resolve an optional count, substituting the default when absent.
    ///
    /// # Errors
    /// Returns [`InvalidArgument::NonPositiveCount`] when a supplied count is
    /// not positive.
    pub fn resolve(requested: Option<i64>) -> Result<Self, InvalidArgument> {
        requested.map_or(Ok(Self::default()), Self::new)
    }

    /// The validated count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for RecommendationCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for RecommendationCount {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecommendationCount> for i64 {
    fn from(count: RecommendationCount) -> Self {
        Self::try_from(count.0).unwrap_or(Self::MAX)
    }
}
