//! Read access to the zone, competitor and listing tables.
//!
//! The [`ZoneSource`] trait abstracts where rows come from: a hosted REST
//! store, a directory of JSON snapshots, or an in-memory fixture. Every read
//! returns the full table; nothing is cached between calls.

mod error;
mod provider;

pub use error::{DataUnavailable, Table};
pub use provider::{DynZoneSource, ZoneSource};
