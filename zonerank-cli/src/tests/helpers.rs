//! Test helpers for snapshot fixtures and in-memory sources.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;
use zonerank_core::DynZoneSource;
use zonerank_core::test_support::MemorySource;

use crate::CliError;
use crate::source::{SourceBuilder, SourceConfig};

/// Hands out clones of a fixed in-memory source regardless of flags.
pub(super) struct MemorySourceBuilder {
    pub(super) source: MemorySource,
}

impl SourceBuilder for MemorySourceBuilder {
    fn build(&self, _config: &SourceConfig) -> Result<DynZoneSource, CliError> {
        Ok(Arc::new(self.source.clone()))
    }
}

/// A temporary snapshot directory seeded with three zones and barber
/// competitors in zones 1 and 2.
pub(super) struct SnapshotDir {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl SnapshotDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let snapshot = Self { _dir: dir, path };
        snapshot.write(
            "zones.json",
            &json!([
                {"zone_id": 1, "total_popularity_score": 5.0, "total_user_ratings": 5.0},
                {"zone_id": 2, "total_popularity_score": 1.0, "total_user_ratings": 1.0},
                {"zone_id": 3, "total_popularity_score": 3.0, "total_user_ratings": 0.0}
            ]),
        );
        snapshot.write(
            "competitors.json",
            &json!([
                {"zone_id": 1, "business_type": "Barber", "number_of_same_type_businesses": 1},
                {"zone_id": 2, "business_type": "barber", "number_of_same_type_businesses": 3}
            ]),
        );
        snapshot
    }

    pub(super) fn with_listings(self) -> Self {
        self.write(
            "listings.json",
            &json!([
                {"zone_id": 1, "title": "A", "price": 900},
                {"zone_id": 3, "title": "B", "price": 1500},
                {"zone_id": 2, "title": "C", "price": 700},
                {"zone_id": "1", "title": "D", "price": "1,200 SAR"}
            ]),
        );
        self
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn write(&self, name: &str, value: &Value) {
        let payload = serde_json::to_vec(value).expect("serialise fixture");
        std::fs::write(self.path.join(name), payload).expect("write fixture");
    }
}

/// Parse captured stdout as JSON.
pub(super) fn stdout_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("stdout should be JSON")
}

/// Collect `field` from each element of a JSON array.
pub(super) fn column(value: &Value, field: &str) -> Vec<Value> {
    value
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|row| row[field].clone())
        .collect()
}
