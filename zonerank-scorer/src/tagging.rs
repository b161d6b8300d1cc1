//! Listing annotation and group-preserving ordering.
//!
//! Tagged output always lists recommended listings first. Within the
//! recommended group listings are ordered by zone score, highest first; a
//! caller-supplied secondary order is then applied stably inside each group,
//! so listings that compare equal keep their score order. The two groups are
//! never interleaved.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use zonerank_core::{Listing, TaggedListing, ZoneScore, normalise_category};

/// Comparator applied within each listing group.
pub type ListingComparator<'a> = &'a dyn Fn(&Listing, &Listing) -> Ordering;

/// Direction for [`ListingOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Common secondary orderings for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    /// Compare a numeric listing field such as `price` or `size`.
    ///
    /// Listings whose field is missing or not numeric sort after every
    /// listing that has a value, whichever the direction.
    Field {
        /// Field name in the listing row.
        name: String,
        /// Sort direction.
        direction: SortDirection,
    },
}

impl ListingOrder {
    /// Order listings by the numeric field `name`.
    #[must_use]
    pub fn by_field(name: impl Into<String>, direction: SortDirection) -> Self {
        Self::Field {
            name: name.into(),
            direction,
        }
    }

    /// Compare two listings under this order.
    #[must_use]
    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            Self::Field { name, direction } => {
                match (a.numeric_field(name), b.numeric_field(name)) {
                    (Some(left), Some(right)) => match direction {
                        SortDirection::Ascending => left.total_cmp(&right),
                        SortDirection::Descending => right.total_cmp(&left),
                    },
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

/// Annotate `listings` against `recommendations` and reorder them.
///
/// A listing is recommended when its zone id matches one of the
/// recommendations; it then carries that zone's score, otherwise `0.0`.
/// Listings without a zone are never recommended. Every tagged listing
/// records the normalised `business_type`.
///
/// # Examples
///
/// ```
/// use zonerank_core::{Listing, ZoneScore};
/// use zonerank_scorer::tag_listings;
///
/// let recommended = ZoneScore {
///     zone_id: 1,
///     zone_score: 2.6,
///     total_popularity_score: 5.0,
///     total_user_ratings: 5.0,
///     number_of_same_type_businesses: 1,
///     listing_count: 0,
///     district_name: None,
///     latitude_center: None,
///     longitude_center: None,
/// };
/// let listings = vec![Listing::new(Some(2)), Listing::new(Some(1))];
///
/// let tagged = tag_listings(&[recommended], listings, "Barber", None);
///
/// assert!(tagged[0].is_in_recommended_zone);
/// assert_eq!(tagged[0].listing.zone_id, Some(1));
/// assert_eq!(tagged[1].recommendation_score, 0.0);
/// assert_eq!(tagged[1].business_type, "barber");
/// ```
#[must_use]
pub fn tag_listings(
    recommendations: &[ZoneScore],
    listings: Vec<Listing>,
    business_type: &str,
    secondary: Option<ListingComparator<'_>>,
) -> Vec<TaggedListing> {
    let mut scores: HashMap<i64, f64> = HashMap::with_capacity(recommendations.len());
    for recommendation in recommendations {
        scores
            .entry(recommendation.zone_id)
            .or_insert(recommendation.zone_score);
    }
    let business_key = normalise_category(business_type);

    let (mut recommended, mut others): (Vec<_>, Vec<_>) = listings
        .into_iter()
        .map(|listing| {
            let score = listing.zone_id.and_then(|id| scores.get(&id).copied());
            TaggedListing {
                listing,
                is_in_recommended_zone: score.is_some(),
                recommendation_score: score.unwrap_or(0.0),
                business_type: business_key.clone(),
            }
        })
        .partition(|tagged| tagged.is_in_recommended_zone);

    recommended.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
    if let Some(compare) = secondary {
        recommended.sort_by(|a, b| compare(&a.listing, &b.listing));
        others.sort_by(|a, b| compare(&a.listing, &b.listing));
    }

    recommended.append(&mut others);
    recommended
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn score(zone_id: i64, zone_score: f64) -> ZoneScore {
        ZoneScore {
            zone_id,
            zone_score,
            total_popularity_score: 0.0,
            total_user_ratings: 0.0,
            number_of_same_type_businesses: 0,
            listing_count: 0,
            district_name: None,
            latitude_center: None,
            longitude_center: None,
        }
    }

    fn listing(title: &str, zone_id: Option<i64>, price: Option<f64>) -> Listing {
        let base = Listing::new(zone_id).with_field("title", title);
        match price {
            Some(value) => base.with_field("price", value),
            None => base,
        }
    }

    fn titles(tagged: &[TaggedListing]) -> Vec<&str> {
        tagged
            .iter()
            .filter_map(|t| t.listing.field("title").and_then(|v| v.as_str()))
            .collect()
    }

    #[fixture]
    fn recommendations() -> Vec<ZoneScore> {
        vec![score(1, 3.0), score(3, 1.5)]
    }

    #[rstest]
    fn recommended_listings_lead_by_score(recommendations: Vec<ZoneScore>) {
        let listings = vec![
            listing("out-1", Some(2), None),
            listing("low", Some(3), None),
            listing("high", Some(1), None),
            listing("nowhere", None, None),
            listing("out-2", Some(9), None),
        ];

        let tagged = tag_listings(&recommendations, listings, "gym", None);

        assert_eq!(titles(&tagged), ["high", "low", "out-1", "nowhere", "out-2"]);
        assert_eq!(tagged[0].recommendation_score, 3.0);
        assert_eq!(tagged[1].recommendation_score, 1.5);
        assert!(tagged[2..].iter().all(|t| t.recommendation_score == 0.0));
    }

    #[rstest]
    fn secondary_order_applies_within_each_group(recommendations: Vec<ZoneScore>) {
        let listings = vec![
            listing("out-expensive", Some(2), Some(900.0)),
            listing("rec-expensive", Some(1), Some(800.0)),
            listing("out-cheap", Some(2), Some(100.0)),
            listing("rec-cheap", Some(3), Some(200.0)),
        ];
        let order = ListingOrder::by_field("price", SortDirection::Ascending);
        let compare = |a: &Listing, b: &Listing| order.compare(a, b);

        let tagged = tag_listings(&recommendations, listings, "gym", Some(&compare));

        assert_eq!(
            titles(&tagged),
            ["rec-cheap", "rec-expensive", "out-cheap", "out-expensive"]
        );
    }

    #[rstest]
    fn secondary_ties_keep_score_order(recommendations: Vec<ZoneScore>) {
        let listings = vec![
            listing("zone-3", Some(3), Some(500.0)),
            listing("zone-1", Some(1), Some(500.0)),
        ];
        let order = ListingOrder::by_field("price", SortDirection::Descending);
        let compare = |a: &Listing, b: &Listing| order.compare(a, b);

        let tagged = tag_listings(&recommendations, listings, "gym", Some(&compare));

        assert_eq!(titles(&tagged), ["zone-1", "zone-3"]);
    }

    #[rstest]
    #[case(SortDirection::Ascending, ["cheap", "dear", "unpriced"])]
    #[case(SortDirection::Descending, ["dear", "cheap", "unpriced"])]
    fn missing_values_sort_last(#[case] direction: SortDirection, #[case] expected: [&str; 3]) {
        let listings = vec![
            listing("unpriced", Some(2), None),
            listing("dear", Some(2), Some(10.0)),
            listing("cheap", Some(2), Some(1.0)),
        ];
        let order = ListingOrder::by_field("price", direction);
        let compare = |a: &Listing, b: &Listing| order.compare(a, b);

        let tagged = tag_listings(&[], listings, "gym", Some(&compare));

        assert_eq!(titles(&tagged), expected);
    }

    #[rstest]
    fn business_type_is_normalised(recommendations: Vec<ZoneScore>) {
        let tagged = tag_listings(
            &recommendations,
            vec![listing("a", Some(1), None)],
            "Gas Station",
            None,
        );
        assert_eq!(tagged[0].business_type, "gas_station");
    }

    #[rstest]
    fn listing_order_deserialises_from_json() {
        let order: ListingOrder = serde_json::from_str(
            r#"{"field": {"name": "size", "direction": "descending"}}"#,
        )
        .expect("order should decode");
        assert_eq!(order, ListingOrder::by_field("size", SortDirection::Descending));
    }
}
