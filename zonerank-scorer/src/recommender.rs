//! Fetch, score and rank pipeline over a [`ZoneSource`].

use futures_util::try_join;
use log::{debug, info};
use zonerank_core::{
    Competitor, DataUnavailable, Listing, RecommendError, RecommendationCount, TaggedListing,
    WeightTable, Zone, ZoneScore, ZoneSource, is_unselected, normalise_category,
};

use crate::{
    ListingComparator, ListingOrder, ScoringOptions, ScoringOptionsError, rank, score_zones,
    tag_listings,
};

/// Recommends zones for a business category.
///
/// Each call fetches fresh tables from the source; nothing is cached and no
/// state is shared between calls.
///
/// # Examples
///
/// ```
/// use zonerank_core::test_support::MemorySource;
/// use zonerank_core::{Competitor, Zone};
/// use zonerank_scorer::ZoneRecommender;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), zonerank_core::RecommendError> {
/// let source = MemorySource::new(
///     [Zone::new(1, 5.0, 5.0), Zone::new(2, 1.0, 1.0)],
///     [Competitor::new(1, "barber", 1), Competitor::new(2, "barber", 3)],
/// );
/// let recommender = ZoneRecommender::new(source);
///
/// let top = recommender.recommend("Barber", Some(1)).await?;
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].zone_id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZoneRecommender<S> {
    source: S,
    table: WeightTable,
    options: ScoringOptions,
}

impl<S> ZoneRecommender<S>
where
    S: ZoneSource,
{
    /// Create a recommender with the default weight table and options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: WeightTable::default(),
            options: ScoringOptions::default(),
        }
    }

    /// Replace the weight table.
    #[must_use]
    pub fn with_weight_table(mut self, table: WeightTable) -> Self {
        self.table = table;
        self
    }

    /// Replace the scoring options after validating them.
    ///
    /// # Errors
    /// Returns [`ScoringOptionsError`] when the options are invalid.
    pub fn with_options(mut self, options: ScoringOptions) -> Result<Self, ScoringOptionsError> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// The weight table in use.
    #[must_use]
    pub const fn weight_table(&self) -> &WeightTable {
        &self.table
    }

    /// The underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Recommend the top zones for `category`.
    ///
    /// `count` defaults to five. It is validated before anything else, so a
    /// bad count fails even when no category is selected. An unselected
    /// category returns an empty list without touching the source.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidArgument`] for a non-positive count
    /// and [`RecommendError::DataUnavailable`] when any table read fails.
    pub async fn recommend(
        &self,
        category: &str,
        count: Option<i64>,
    ) -> Result<Vec<ZoneScore>, RecommendError> {
        let top_k = RecommendationCount::resolve(count)?;
        if is_unselected(category) {
            debug!("no category selected; returning no recommendations");
            return Ok(Vec::new());
        }

        let (zones, competitors, listings) = self.fetch_tables().await?;
        Ok(self.rank_tables(category, top_k, &zones, &competitors, listings.as_deref()))
    }

    /// Recommend zones for `category`, then tag and order every listing
    /// against them.
    ///
    /// Returns an empty list when no zones are recommended. Listings are read
    /// once and shared between the density bonus and tagging.
    ///
    /// # Errors
    /// Same as [`ZoneRecommender::recommend`].
    pub async fn recommended_listings(
        &self,
        category: &str,
        count: Option<i64>,
        order: Option<&ListingOrder>,
    ) -> Result<Vec<TaggedListing>, RecommendError> {
        let top_k = RecommendationCount::resolve(count)?;
        if is_unselected(category) {
            return Ok(Vec::new());
        }

        let (zones, competitors, listings) = self.fetch_tables_with_listings().await?;
        let scoring_listings = self.options.use_listings.then_some(listings.as_slice());
        let recommendations =
            self.rank_tables(category, top_k, &zones, &competitors, scoring_listings);
        if recommendations.is_empty() {
            return Ok(Vec::new());
        }

        let compare = order.map(|o| move |a: &Listing, b: &Listing| o.compare(a, b));
        let secondary: Option<ListingComparator<'_>> = match &compare {
            Some(closure) => Some(closure),
            None => None,
        };
        let tagged = tag_listings(&recommendations, listings, category, secondary);
        info!(
            "tagged {} listings, {} in recommended zones",
            tagged.len(),
            tagged.iter().filter(|t| t.is_in_recommended_zone).count()
        );
        Ok(tagged)
    }

    async fn fetch_tables(
        &self,
    ) -> Result<(Vec<Zone>, Vec<Competitor>, Option<Vec<Listing>>), DataUnavailable> {
        if self.options.use_listings {
            let (zones, competitors, listings) = self.fetch_tables_with_listings().await?;
            Ok((zones, competitors, Some(listings)))
        } else {
            let (zones, competitors) =
                try_join!(self.source.zones(), self.source.competitors())?;
            Ok((zones, competitors, None))
        }
    }

    async fn fetch_tables_with_listings(
        &self,
    ) -> Result<(Vec<Zone>, Vec<Competitor>, Vec<Listing>), DataUnavailable> {
        try_join!(
            self.source.zones(),
            self.source.competitors(),
            self.source.listings()
        )
    }

    fn rank_tables(
        &self,
        category: &str,
        count: RecommendationCount,
        zones: &[Zone],
        competitors: &[Competitor],
        listings: Option<&[Listing]>,
    ) -> Vec<ZoneScore> {
        let empty_zones = zones.iter().filter(|zone| zone.is_empty()).count();
        info!(
            "fetched {} zones ({empty_zones} empty), {} competitor rows",
            zones.len(),
            competitors.len()
        );

        let scores = score_zones(
            category,
            &self.table,
            zones,
            competitors,
            listings,
            &self.options,
        );
        let ranked = rank(scores, count);
        info!(
            "found {} recommended zones for '{}'",
            ranked.len(),
            normalise_category(category)
        );
        ranked
    }
}
