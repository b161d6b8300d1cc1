//! In-memory `ZoneSource` used by unit and behaviour tests across the
//! workspace.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{Competitor, DataUnavailable, Listing, Table, Zone, ZoneSource};

/// Fixture source backed by vectors.
///
/// Each read clones the stored rows and bumps a shared counter so tests can
/// assert whether any I/O happened. A failure can be injected per table.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    zones: Vec<Zone>,
    competitors: Vec<Competitor>,
    listings: Vec<Listing>,
    failures: Vec<DataUnavailable>,
    reads: Arc<AtomicUsize>,
}

impl MemorySource {
    /// Create a source holding `zones` and `competitors` and no listings.
    #[must_use]
    pub fn new<Z, C>(zones: Z, competitors: C) -> Self
    where
        Z: IntoIterator<Item = Zone>,
        C: IntoIterator<Item = Competitor>,
    {
        Self {
            zones: zones.into_iter().collect(),
            competitors: competitors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replace the stored listings.
    #[must_use]
    pub fn with_listings<L>(mut self, listings: L) -> Self
    where
        L: IntoIterator<Item = Listing>,
    {
        self.listings = listings.into_iter().collect();
        self
    }

    /// Make reads of `error.table()` fail with `error`.
    #[must_use]
    pub fn with_failure(mut self, error: DataUnavailable) -> Self {
        self.failures.retain(|existing| existing.table() != error.table());
        self.failures.push(error);
        self
    }

    /// Total number of table reads served so far, failures included.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn serve<T: Clone>(&self, table: Table, rows: &[T]) -> Result<Vec<T>, DataUnavailable> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.failures.iter().find(|failure| failure.table() == table) {
            Some(failure) => Err(failure.clone()),
            None => Ok(rows.to_vec()),
        }
    }
}

#[async_trait]
impl ZoneSource for MemorySource {
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
        self.serve(Table::Zones, &self.zones)
    }

    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
        self.serve(Table::Competitors, &self.competitors)
    }

    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
        self.serve(Table::Listings, &self.listings)
    }
}

/// Build a network failure for `table` with a fixed URL.
#[must_use]
pub fn network_failure(table: Table) -> DataUnavailable {
    DataUnavailable::Network {
        table,
        url: format!("http://store.invalid/rest/v1/{table}"),
        message: "connection refused".to_owned(),
    }
}
