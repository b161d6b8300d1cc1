//! Per-zone suitability scoring.
//!
//! A zone's score for a category is
//! `w_pop * adjusted_popularity + w_rat * ratings - w_comp * competitors`,
//! where the adjusted popularity adds [`ScoringOptions::listing_bonus`] for
//! every listing located in the zone.

use std::collections::HashMap;

use log::debug;
use zonerank_core::{
    CategoryWeights, Competitor, Listing, WeightTable, Zone, ZoneScore, is_unselected,
    normalise_category,
};

use crate::ScoringOptions;

/// Score every zone for `category`.
///
/// Returns an empty list when no category is selected. Categories without
/// dedicated weights are scored with [`CategoryWeights::UNIFORM`]; this
/// function never rejects a category.
///
/// Competitor rows are matched on their normalised `business_type`; when a
/// zone has several rows for the same category the first one wins, and a zone
/// with no row has zero competitors. `listings` is ignored when
/// [`ScoringOptions::use_listings`] is off.
///
/// # Examples
///
/// ```
/// use zonerank_core::{Competitor, WeightTable, Zone};
/// use zonerank_scorer::{ScoringOptions, score_zones};
///
/// let zones = [Zone::new(1, 5.0, 5.0)];
/// let competitors = [Competitor::new(1, "Barber", 1)];
/// let scores = score_zones(
///     "Barber",
///     &WeightTable::default(),
///     &zones,
///     &competitors,
///     None,
///     &ScoringOptions::default(),
/// );
/// assert!((scores[0].zone_score - 2.6).abs() < 1e-9);
/// ```
#[must_use]
pub fn score_zones(
    category: &str,
    table: &WeightTable,
    zones: &[Zone],
    competitors: &[Competitor],
    listings: Option<&[Listing]>,
    options: &ScoringOptions,
) -> Vec<ZoneScore> {
    if is_unselected(category) {
        debug!("no category selected; skipping scoring");
        return Vec::new();
    }

    let key = normalise_category(category);
    let weights = table.weights_for(&key);
    let competitors_by_zone = competitor_counts(&key, competitors);
    let listings_by_zone = listings
        .filter(|_| options.use_listings)
        .map(listing_counts)
        .unwrap_or_default();

    debug!(
        "scoring {} zones for '{key}' with weights {weights:?}",
        zones.len()
    );

    zones
        .iter()
        .map(|zone| {
            let competitor_count = competitors_by_zone.get(&zone.zone_id).copied().unwrap_or(0);
            let listing_count = listings_by_zone.get(&zone.zone_id).copied().unwrap_or(0);
            score_zone(
                zone,
                weights,
                competitor_count,
                listing_count,
                options.listing_bonus,
            )
        })
        .collect()
}

fn competitor_counts(key: &str, competitors: &[Competitor]) -> HashMap<i64, u64> {
    let mut counts = HashMap::new();
    for competitor in competitors
        .iter()
        .filter(|row| normalise_category(&row.business_type) == key)
    {
        counts
            .entry(competitor.zone_id)
            .or_insert_with(|| competitor.count());
    }
    counts
}

fn listing_counts(listings: &[Listing]) -> HashMap<i64, u64> {
    let mut counts = HashMap::new();
    for zone_id in listings.iter().filter_map(|listing| listing.zone_id) {
        counts
            .entry(zone_id)
            .and_modify(|count: &mut u64| *count = count.saturating_add(1))
            .or_insert(1);
    }
    counts
}

fn score_zone(
    zone: &Zone,
    weights: CategoryWeights,
    competitors: u64,
    listing_count: u64,
    listing_bonus: f64,
) -> ZoneScore {
    let popularity = adjusted_popularity(zone.popularity(), listing_count, listing_bonus);
    let ratings = zone.ratings();
    ZoneScore {
        zone_id: zone.zone_id,
        zone_score: weighted_score(weights, popularity, ratings, competitors),
        total_popularity_score: popularity,
        total_user_ratings: ratings,
        number_of_same_type_businesses: competitors,
        listing_count,
        district_name: zone.district_name.clone(),
        latitude_center: zone.latitude_center,
        longitude_center: zone.longitude_center,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "listing density is a linear popularity bonus"
)]
fn adjusted_popularity(popularity: f64, listing_count: u64, listing_bonus: f64) -> f64 {
    if listing_count == 0 {
        return popularity;
    }
    popularity + listing_bonus * count_as_f64(listing_count)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the zone score is a weighted linear combination"
)]
fn weighted_score(weights: CategoryWeights, popularity: f64, ratings: f64, competitors: u64) -> f64 {
    weights.popularity * popularity + weights.ratings * ratings
        - weights.competition * count_as_f64(competitors)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "counts far below 2^52 convert exactly"
)]
const fn count_as_f64(count: u64) -> f64 {
    count as f64
}
