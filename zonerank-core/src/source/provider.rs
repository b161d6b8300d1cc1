//! Source trait for the three backing tables.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::DataUnavailable;
use crate::{Competitor, Listing, Zone};

/// Fetch full tables from a backing store.
///
/// Implementations perform no filtering or ranking and keep no state between
/// calls, so concurrent requests never observe each other.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use zonerank_core::{Competitor, DataUnavailable, Listing, Zone, ZoneSource};
///
/// struct SingleZone;
///
/// #[async_trait]
/// impl ZoneSource for SingleZone {
///     async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
///         Ok(vec![Zone::new(1, 5.0, 5.0)])
///     }
///
///     async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
///         Ok(Vec::new())
///     }
///
///     async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait ZoneSource: Send + Sync {
    /// Read every zone row.
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable>;

    /// Read every competitor row.
    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable>;

    /// Read every listing row.
    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable>;
}

/// Shared, type-erased source handle.
pub type DynZoneSource = Arc<dyn ZoneSource>;

#[async_trait]
impl<S> ZoneSource for Arc<S>
where
    S: ZoneSource + ?Sized,
{
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
        (**self).zones().await
    }

    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
        (**self).competitors().await
    }

    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
        (**self).listings().await
    }
}

#[async_trait]
impl<S> ZoneSource for Box<S>
where
    S: ZoneSource + ?Sized,
{
    async fn zones(&self) -> Result<Vec<Zone>, DataUnavailable> {
        (**self).zones().await
    }

    async fn competitors(&self) -> Result<Vec<Competitor>, DataUnavailable> {
        (**self).competitors().await
    }

    async fn listings(&self) -> Result<Vec<Listing>, DataUnavailable> {
        (**self).listings().await
    }
}
