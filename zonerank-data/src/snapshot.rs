//! `ZoneSource` backed by JSON files on disk.
//!
//! A snapshot directory holds `zones.json`, `competitors.json` and optionally
//! `listings.json`, each a JSON array of rows in the store's column layout.
//! Files are read through `cap-std` on the blocking pool.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::debug;
use serde::de::DeserializeOwned;
use zonerank_core::{Competitor, DataUnavailable, Listing, Table, Zone, ZoneSource};

/// Reads full tables from a directory of JSON exports.
///
/// # Examples
///
/// ```no_run
/// use zonerank_core::ZoneSource;
/// use zonerank_data::snapshot::SnapshotZoneSource;
///
/// # async fn demo() -> Result<(), zonerank_core::DataUnavailable> {
/// let source = SnapshotZoneSource::new("fixtures/riyadh");
/// let zones = source.zones().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotZoneSource {
    dir: Utf8PathBuf,
}

impl SnapshotZoneSource {
    /// Create a source reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for `table`.
    #[must_use]
    pub fn file_path(&self, table: Table) -> Utf8PathBuf {
        self.dir.join(file_name(table))
    }

    async fn read<T>(&self, table: Table) -> Result<Vec<T>, DataUnavailable>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let dir = self.dir.clone();
        let path = self.file_path(table);
        let rows: Vec<T> = tokio::task::spawn_blocking(move || read_table(&dir, table))
            .await
            .map_err(|err| snapshot_error(table, &path, &err))??;
        debug!("read {} {table} rows from {path}", rows.len());
        Ok(rows)
    }
}

fn file_name(table: Table) -> String {
    format!("{}.json", table.name())
}

fn read_table<T>(dir: &Utf8Path, table: Table) -> Result<Vec<T>, DataUnavailable>
where
    T: DeserializeOwned,
{
    let name = file_name(table);
    let path = dir.join(&name);
    let contents = fs_utf8::Dir::open_ambient_dir(dir, ambient_authority())
        .and_then(|handle| handle.read_to_string(&name));

    match contents {
        Ok(text) => serde_json::from_str(&text).map_err(|err| snapshot_error(table, &path, &err)),
        Err(err) if err.kind() == io::ErrorKind::NotFound && table == Table::Listings => {
            debug!("no listings snapshot at {path}; treating as empty");
            Ok(Vec::new())
        }
        Err(err) => Err(snapshot_error(table, &path, &err)),
    }
}

fn snapshot_error(table: Table, path: &Utf8Path, err: &dyn std::error::Error) -> DataUnavailable {
    DataUnavailable::Snapshot {
        table,
        path: path.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl ZoneSource for SnapshotZoneSource {
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
        self.read(Table::Zones).await
    }

    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
        self.read(Table::Competitors).await
    }

    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
        self.read(Table::Listings).await
    }
}
