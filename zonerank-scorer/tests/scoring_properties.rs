//! Property-based tests for scoring, ranking and tagging.
//!
//! # Invariants tested
//!
//! - **Zero inputs:** a zone with no popularity, ratings or competitors
//!   scores exactly zero for every category.
//! - **Monotonicity:** raising a zone's popularity never lowers its score.
//! - **Ordering:** ranked output is sorted by score descending with ties
//!   broken by ascending zone id, and holds `min(K, zones)` entries.
//! - **Grouping:** tagging never interleaves recommended and
//!   non-recommended listings.

use proptest::prelude::*;
use zonerank_core::{
    Competitor, KNOWN_CATEGORIES, Listing, RecommendationCount, WeightTable, Zone, ZoneScore,
};
use zonerank_scorer::{ScoringOptions, rank, score_zones, tag_listings};

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(KNOWN_CATEGORIES.to_vec()).prop_map(str::to_owned),
        "[a-z]{3,12}( [a-z]{3,8})?",
    ]
    .prop_filter("category must be selected", |category| {
        !zonerank_core::is_unselected(category)
    })
}

fn zone_strategy() -> impl Strategy<Value = (i64, f64, f64, u64)> {
    (0_i64..50, 0.0_f64..100.0, 0.0_f64..100.0, 0_u64..20)
}

fn zones_strategy() -> impl Strategy<Value = Vec<(i64, f64, f64, u64)>> {
    proptest::collection::vec(zone_strategy(), 0..25)
}

fn score_set(category: &str, rows: &[(i64, f64, f64, u64)]) -> Vec<ZoneScore> {
    let zones: Vec<Zone> = rows
        .iter()
        .map(|(id, popularity, ratings, _)| Zone::new(*id, *popularity, *ratings))
        .collect();
    let competitors: Vec<Competitor> = rows
        .iter()
        .map(|(id, _, _, count)| Competitor::new(*id, category, *count))
        .collect();
    score_zones(
        category,
        &WeightTable::default(),
        &zones,
        &competitors,
        None,
        &ScoringOptions::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: an all-zero zone scores zero whatever the category.
    #[test]
    fn zero_inputs_score_zero(category in category_strategy()) {
        let scores = score_set(&category, &[(1, 0.0, 0.0, 0)]);
        prop_assert_eq!(scores.len(), 1);
        prop_assert_eq!(scores[0].zone_score, 0.0);
    }

    /// Property: increasing popularity never decreases the score.
    #[test]
    fn popularity_is_monotonic(
        category in category_strategy(),
        popularity in 0.0_f64..1_000.0,
        bump in 0.0_f64..1_000.0,
        ratings in 0.0_f64..1_000.0,
        competitors in 0_u64..50,
    ) {
        let base = score_set(&category, &[(1, popularity, ratings, competitors)]);
        let raised = score_set(&category, &[(1, popularity + bump, ratings, competitors)]);
        prop_assert!(
            raised[0].zone_score >= base[0].zone_score,
            "raising popularity by {} lowered the score from {} to {}",
            bump,
            base[0].zone_score,
            raised[0].zone_score
        );
    }

    /// Property: ranked output is ordered and truncated to `min(K, zones)`.
    #[test]
    fn ranking_is_ordered_and_bounded(
        category in category_strategy(),
        rows in zones_strategy(),
        k in 1_i64..30,
    ) {
        let scores = score_set(&category, &rows);
        let total = scores.len();
        let count = RecommendationCount::new(k).expect("positive count");

        let ranked = rank(scores, count);

        prop_assert_eq!(ranked.len(), total.min(count.get()));
        for pair in ranked.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            prop_assert!(
                first.zone_score > second.zone_score
                    || (first.zone_score == second.zone_score && first.zone_id <= second.zone_id),
                "zone {} ({}) ranked before zone {} ({})",
                first.zone_id,
                first.zone_score,
                second.zone_id,
                second.zone_score
            );
        }
    }

    /// Property: recommended listings always precede the rest.
    #[test]
    fn tagging_never_interleaves(
        rows in zones_strategy(),
        listing_zones in proptest::collection::vec(proptest::option::of(0_i64..60), 0..40),
        k in 1_i64..10,
    ) {
        let ranked = rank(
            score_set("gym", &rows),
            RecommendationCount::new(k).expect("positive count"),
        );
        let listings: Vec<Listing> = listing_zones.into_iter().map(Listing::new).collect();
        let total = listings.len();

        let tagged = tag_listings(&ranked, listings, "gym", None);

        prop_assert_eq!(tagged.len(), total);
        let last_recommended = tagged.iter().rposition(|t| t.is_in_recommended_zone);
        let first_other = tagged.iter().position(|t| !t.is_in_recommended_zone);
        if let (Some(last), Some(first)) = (last_recommended, first_other) {
            prop_assert!(last < first, "recommended listing at {} after other at {}", last, first);
        }
    }
}
