//! Zone, competitor and score records.
//!
//! Field names match the store's column names so rows decode directly from
//! JSON. Numeric aggregates are optional on the wire; accessors coalesce
//! missing or non-finite values to zero so nothing downstream ever sees a
//! null or `NaN`.

use serde::{Deserialize, Deserializer, Serialize};

/// A geographic partition of the served region.
///
/// # Examples
///
/// ```
/// use zonerank_core::Zone;
///
/// let zone: Zone = serde_json::from_str(r#"{"zone_id": 3, "total_popularity_score": null}"#)?;
/// assert_eq!(zone.zone_id, 3);
/// assert_eq!(zone.popularity(), 0.0);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Zone {
    /// Unique zone identifier.
    pub zone_id: i64,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_name: Option<String>,
    /// Aggregate activity or foot-traffic signal.
    #[serde(default)]
    pub total_popularity_score: Option<f64>,
    /// Aggregate review volume and quality.
    #[serde(default)]
    pub total_user_ratings: Option<f64>,
    /// Number of businesses of any kind recorded in the zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_businesses: Option<u64>,
    /// Centroid latitude, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_center: Option<f64>,
    /// Centroid longitude, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude_center: Option<f64>,
}

impl Zone {
    /// Construct a zone with the two scored aggregates set.
    #[must_use]
    pub fn new(zone_id: i64, popularity: f64, ratings: f64) -> Self {
        Self {
            zone_id,
            total_popularity_score: Some(popularity),
            total_user_ratings: Some(ratings),
            ..Self::default()
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_district_name(mut self, name: impl Into<String>) -> Self {
        self.district_name = Some(name.into());
        self
    }

    /// Attach centroid coordinates.
    #[must_use]
    pub fn with_center(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude_center = Some(latitude);
        self.longitude_center = Some(longitude);
        self
    }

    /// Popularity aggregate with missing values treated as zero.
    #[must_use]
    pub fn popularity(&self) -> f64 {
        finite_or_zero(self.total_popularity_score)
    }

    /// Ratings aggregate with missing values treated as zero.
    #[must_use]
    pub fn ratings(&self) -> f64 {
        finite_or_zero(self.total_user_ratings)
    }

    /// Report whether the store recorded no businesses at all in this zone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.number_of_businesses == Some(0)
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Count of existing same-category businesses in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Competitor {
    /// Zone the count applies to.
    pub zone_id: i64,
    /// Raw category string as stored; normalised before matching.
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_type: String,
    /// Number of existing businesses of this type.
    #[serde(default)]
    pub number_of_same_type_businesses: Option<u64>,
}

impl Competitor {
    /// Construct a competitor record.
    #[must_use]
    pub fn new(zone_id: i64, business_type: impl Into<String>, count: u64) -> Self {
        Self {
            zone_id,
            business_type: business_type.into(),
            number_of_same_type_businesses: Some(count),
        }
    }

    /// Competitor count with a missing value treated as zero.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.number_of_same_type_businesses.unwrap_or(0)
    }
}

/// Suitability of a single zone for one category.
///
/// Created fresh on every scoring pass and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneScore {
    /// Zone identifier.
    pub zone_id: i64,
    /// Weighted suitability score; may be negative.
    pub zone_score: f64,
    /// Popularity used in scoring, including any listing-density bonus.
    pub total_popularity_score: f64,
    /// Ratings used in scoring.
    pub total_user_ratings: f64,
    /// Competitor count used in scoring.
    pub number_of_same_type_businesses: u64,
    /// Listings counted toward the density bonus.
    #[serde(default)]
    pub listing_count: u64,
    /// Display name carried through from the zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_name: Option<String>,
    /// Centroid latitude carried through from the zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_center: Option<f64>,
    /// Centroid longitude carried through from the zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude_center: Option<f64>,
}

/// Decode `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
