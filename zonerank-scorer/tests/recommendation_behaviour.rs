//! Behavioural tests for the recommendation pipeline.

use std::cell::RefCell;
use std::future::Future;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use zonerank_core::test_support::{MemorySource, network_failure};
use zonerank_core::{
    Competitor, Listing, RecommendError, Table, TaggedListing, Zone, ZoneScore,
};
use zonerank_scorer::ZoneRecommender;

type SourceCell = RefCell<Option<MemorySource>>;
type RankedCell = RefCell<Option<Result<Vec<ZoneScore>, RecommendError>>>;
type TaggedCell = RefCell<Vec<TaggedListing>>;

#[fixture]
fn source() -> SourceCell {
    RefCell::new(None)
}

#[fixture]
fn ranked() -> RankedCell {
    RefCell::new(None)
}

#[fixture]
fn tagged() -> TaggedCell {
    RefCell::new(Vec::new())
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
        .block_on(future)
}

fn update(source: &SourceCell, change: impl FnOnce(MemorySource) -> MemorySource) {
    let current = source.borrow_mut().take().expect("source must be initialised");
    *source.borrow_mut() = Some(change(current));
}

fn request(source: &SourceCell, ranked: &RankedCell, category: &str, count: Option<i64>) {
    let memory = source.borrow().clone().expect("source must be initialised");
    let recommender = ZoneRecommender::new(memory);
    *ranked.borrow_mut() = Some(block_on(recommender.recommend(category, count)));
}

fn ranked_zones(ranked: &RankedCell) -> Vec<ZoneScore> {
    match ranked.borrow().as_ref().expect("a request must have run") {
        Ok(zones) => zones.clone(),
        Err(err) => panic!("expected recommendations, got {err}"),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "test compares scores within a tolerance"
)]
fn assert_scores(ranked: &RankedCell, expected: [f64; 2]) {
    let zones = ranked_zones(ranked);
    assert_eq!(zones.len(), expected.len());
    for (zone, want) in zones.iter().zip(expected) {
        assert!(
            (zone.zone_score - want).abs() < 1e-3,
            "zone {} scored {}, expected {want}",
            zone.zone_id,
            zone.zone_score
        );
    }
}

fn title(tagged: &TaggedListing) -> &str {
    tagged
        .listing
        .field("title")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
}

// --- Given steps ---

#[given("two zones with barber competitors")]
fn two_zones(#[from(source)] source: &SourceCell) {
    *source.borrow_mut() = Some(MemorySource::new(
        [Zone::new(1, 5.0, 5.0), Zone::new(2, 1.0, 1.0)],
        [
            Competitor::new(1, "barber", 1),
            Competitor::new(2, "barber", 3),
        ],
    ));
}

#[given("one listing in zone 2")]
fn one_listing(#[from(source)] source: &SourceCell) {
    update(source, |memory| {
        memory.with_listings([Listing::new(Some(2)).with_field("title", "Unit 9")])
    });
}

#[given("listings A and C in zone 1 and B in zone 2")]
fn three_listings(#[from(source)] source: &SourceCell) {
    update(source, |memory| {
        memory.with_listings([
            Listing::new(Some(1)).with_field("title", "A"),
            Listing::new(Some(2)).with_field("title", "B"),
            Listing::new(Some(1)).with_field("title", "C"),
        ])
    });
}

#[given("the competitors table is unreachable")]
fn competitors_unreachable(#[from(source)] source: &SourceCell) {
    update(source, |memory| {
        memory.with_failure(network_failure(Table::Competitors))
    });
}

// --- When steps ---

#[when("I request 2 recommendations for 'barber'")]
fn request_two_barber(#[from(source)] source: &SourceCell, #[from(ranked)] ranked: &RankedCell) {
    request(source, ranked, "barber", Some(2));
}

#[when("I request 2 recommendations for 'unknown_type'")]
fn request_two_unknown(#[from(source)] source: &SourceCell, #[from(ranked)] ranked: &RankedCell) {
    request(source, ranked, "unknown_type", Some(2));
}

#[when("I request recommendations for 'none'")]
fn request_none(#[from(source)] source: &SourceCell, #[from(ranked)] ranked: &RankedCell) {
    request(source, ranked, "none", None);
}

#[when("I request 0 recommendations for 'barber'")]
fn request_zero(#[from(source)] source: &SourceCell, #[from(ranked)] ranked: &RankedCell) {
    request(source, ranked, "barber", Some(0));
}

#[when("I request -1 recommendations for 'barber'")]
fn request_negative(#[from(source)] source: &SourceCell, #[from(ranked)] ranked: &RankedCell) {
    request(source, ranked, "barber", Some(-1));
}

#[when("I request tagged listings for the top barber zone")]
fn request_tagged(#[from(source)] source: &SourceCell, #[from(tagged)] tagged: &TaggedCell) {
    let memory = source.borrow().clone().expect("source must be initialised");
    let recommender = ZoneRecommender::new(memory);
    let listings = block_on(recommender.recommended_listings("Barber", Some(1), None))
        .expect("tagged listings");
    *tagged.borrow_mut() = listings;
}

// --- Then steps ---

#[then("the zones are ranked 1 then 2")]
fn ranked_one_then_two(#[from(ranked)] ranked: &RankedCell) {
    let ids: Vec<i64> = ranked_zones(ranked).iter().map(|z| z.zone_id).collect();
    assert_eq!(ids, [1, 2]);
}

#[then("the scores are 2.6 and -0.6")]
fn barber_scores(#[from(ranked)] ranked: &RankedCell) {
    assert_scores(ranked, [2.6, -0.6]);
}

#[then("the scores are 3.333 and 0.667")]
fn uniform_scores(#[from(ranked)] ranked: &RankedCell) {
    assert_scores(ranked, [3.333, 0.667]);
}

#[then("the scores are 2.6 and -0.4")]
fn listing_adjusted_scores(#[from(ranked)] ranked: &RankedCell) {
    assert_scores(ranked, [2.6, -0.4]);
}

#[then("no recommendations are returned")]
fn no_recommendations(#[from(ranked)] ranked: &RankedCell) {
    assert!(ranked_zones(ranked).is_empty());
}

#[then("no table was read")]
fn no_reads(#[from(source)] source: &SourceCell) {
    let reads = source.borrow().as_ref().map_or(0, MemorySource::reads);
    assert_eq!(reads, 0);
}

#[then("an invalid argument error is returned")]
fn invalid_argument(#[from(ranked)] ranked: &RankedCell) {
    let borrowed = ranked.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(RecommendError::InvalidArgument(_)))),
        "expected InvalidArgument, got {borrowed:?}"
    );
}

#[then("a data unavailable error is returned")]
fn data_unavailable(#[from(ranked)] ranked: &RankedCell) {
    let borrowed = ranked.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(RecommendError::DataUnavailable(_)))),
        "expected DataUnavailable, got {borrowed:?}"
    );
}

#[then("listings A and C precede listing B")]
fn recommended_first(#[from(tagged)] tagged: &TaggedCell) {
    let listings = tagged.borrow();
    let titles: Vec<&str> = listings.iter().map(title).collect();
    assert_eq!(titles.len(), 3);
    assert_eq!(titles.last(), Some(&"B"));
}

#[then("only listings in zone 1 are marked as recommended")]
fn recommended_flags(#[from(tagged)] tagged: &TaggedCell) {
    for listing in tagged.borrow().iter() {
        assert_eq!(
            listing.is_in_recommended_zone,
            listing.listing.zone_id == Some(1),
            "unexpected flag on {}",
            title(listing)
        );
    }
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/zone_recommendations.feature", name = $title)]
        fn $fn_name(source: SourceCell, ranked: RankedCell, tagged: TaggedCell) {
            let _ = (source, ranked, tagged);
        }
    };
}

register_scenario!(barber_scoring, "scoring two zones for a barber");
register_scenario!(uniform_fallback, "an unknown category uses uniform weights");
register_scenario!(unselected_category, "no category selected");
register_scenario!(zero_count, "a zero count is rejected");
register_scenario!(negative_count, "a negative count is rejected");
register_scenario!(listing_bonus, "listings raise a zone's popularity");
register_scenario!(tagging_order, "tagging keeps recommended listings first");
register_scenario!(store_unavailable, "the store is unavailable");
