//! Data access adapters for the zonerank engine.
//!
//! Responsibilities:
//! - Implement [`zonerank_core::ZoneSource`] over a hosted REST store and
//!   over on-disk JSON snapshots.
//! - Map transport, status and decode failures onto
//!   [`zonerank_core::DataUnavailable`].
//!
//! Boundaries:
//! - No scoring or ranking rules (these live in `zonerank-scorer`).
//! - No retries or caching; every read hits the backing store.
//! - Keep blocking I/O off async executors.

#![forbid(unsafe_code)]

pub mod http;
pub mod snapshot;

pub use http::{HttpSourceBuildError, HttpZoneSource, HttpZoneSourceConfig};
pub use snapshot::SnapshotZoneSource;
