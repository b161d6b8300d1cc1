//! Concrete property or business listings.
//!
//! Listings are opaque apart from their zone reference: every other column is
//! kept verbatim so presentation fields (price, area, title) survive tagging.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A listing row with its zone reference and pass-through fields.
///
/// The store returns `zone_id` either as a number or as a numeric string;
/// both decode to the same identifier. Anything else leaves the listing
/// without a zone.
///
/// # Examples
///
/// ```
/// use zonerank_core::Listing;
///
/// let listing: Listing = serde_json::from_str(r#"{"zone_id": "4", "price": 1200}"#)?;
/// assert_eq!(listing.zone_id, Some(4));
/// assert_eq!(listing.numeric_field("price"), Some(1200.0));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    /// Zone the listing sits in, if known.
    #[serde(default, deserialize_with = "lenient_zone_id")]
    pub zone_id: Option<i64>,
    /// Every other column, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Listing {
    /// Construct a listing in `zone_id` with no other fields.
    #[must_use]
    pub fn new(zone_id: Option<i64>) -> Self {
        Self {
            zone_id,
            fields: Map::new(),
        }
    }

    /// Add or replace a pass-through field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Borrow a pass-through field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Read a field as a number.
    ///
    /// Strings are accepted once currency symbols, units and thousands
    /// separators are stripped, so `"1,200 SAR"` reads as `1200.0`.
    #[must_use]
    pub fn numeric_field(&self, name: &str) -> Option<f64> {
        match self.field(name)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => parse_loose_number(text),
            _ => None,
        }
        .filter(|value| value.is_finite())
    }
}

fn parse_loose_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
        .collect();
    digits.parse().ok()
}

fn lenient_zone_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(zone_id_from_value))
}

fn zone_id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// A listing annotated with its zone's recommendation outcome.
///
/// Serialises flat: the listing's own columns sit alongside
/// `isInRecommendedZone`, `recommendationScore` and `businessType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedListing {
    /// The listing being tagged.
    #[serde(flatten)]
    pub listing: Listing,
    /// Whether the listing's zone is among the recommended zones.
    pub is_in_recommended_zone: bool,
    /// The recommended zone's score, or `0.0` when not recommended.
    pub recommendation_score: f64,
    /// Normalised category the recommendation was computed for.
    pub business_type: String,
}
