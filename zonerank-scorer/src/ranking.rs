//! Top-K selection over scored zones.

use zonerank_core::{RecommendationCount, ZoneScore};

/// Sort `scores` by score descending, breaking ties by ascending zone id, and
/// keep the first `count`.
///
/// The result holds `min(count, scores.len())` entries.
///
/// # Examples
///
/// ```
/// use zonerank_core::{RecommendationCount, ZoneScore};
/// use zonerank_scorer::rank;
///
/// # fn score(zone_id: i64, zone_score: f64) -> ZoneScore {
/// #     ZoneScore {
/// #         zone_id,
/// #         zone_score,
/// #         total_popularity_score: 0.0,
/// #         total_user_ratings: 0.0,
/// #         number_of_same_type_businesses: 0,
/// #         listing_count: 0,
/// #         district_name: None,
/// #         latitude_center: None,
/// #         longitude_center: None,
/// #     }
/// # }
/// # fn main() -> Result<(), zonerank_core::InvalidArgument> {
/// let ranked = rank(
///     vec![score(2, 1.0), score(3, 4.0), score(1, 1.0)],
///     RecommendationCount::new(2)?,
/// );
/// let ids: Vec<i64> = ranked.iter().map(|s| s.zone_id).collect();
/// assert_eq!(ids, [3, 1]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn rank(mut scores: Vec<ZoneScore>, count: RecommendationCount) -> Vec<ZoneScore> {
    scores.sort_by(|a, b| {
        fold_signed_zero(b.zone_score)
            .total_cmp(&fold_signed_zero(a.zone_score))
            .then_with(|| a.zone_id.cmp(&b.zone_id))
    });
    scores.truncate(count.get());
    scores
}

/// `total_cmp` orders `-0.0` below `0.0`; equal scores must tie.
#[expect(
    clippy::float_arithmetic,
    reason = "adding positive zero maps negative zero onto positive zero"
)]
const fn fold_signed_zero(score: f64) -> f64 {
    score + 0.0
}
