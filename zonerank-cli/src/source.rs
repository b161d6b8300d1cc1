//! Zone source selection shared by every data-reading subcommand.

use std::sync::Arc;

use camino::Utf8PathBuf;
use log::debug;
use zonerank_core::DynZoneSource;
use zonerank_data::{HttpZoneSource, SnapshotZoneSource};

use crate::{ARG_API_KEY, ARG_STORE_URL, CliError};

/// Environment variable names reported when a source flag is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceEnv {
    pub(crate) store_url: &'static str,
    pub(crate) api_key: &'static str,
}

/// Where zone, competitor and listing rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceConfig {
    /// JSON files in a local directory.
    Snapshot { dir: Utf8PathBuf },
    /// A hosted store reached over HTTP.
    Store { url: String, api_key: String },
}

impl SourceConfig {
    /// Resolve the source from merged flags.
    ///
    /// A snapshot directory wins over a store URL. A store URL needs an API
    /// key to go with it.
    pub(crate) fn from_flags(
        store_url: Option<String>,
        api_key: Option<String>,
        snapshot_dir: Option<Utf8PathBuf>,
        env: SourceEnv,
    ) -> Result<Self, CliError> {
        if let Some(dir) = snapshot_dir {
            return Ok(Self::Snapshot { dir });
        }
        let url = store_url.ok_or(CliError::MissingArgument {
            field: ARG_STORE_URL,
            env: env.store_url,
        })?;
        let key = api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: env.api_key,
        })?;
        Ok(Self::Store { url, api_key: key })
    }

    /// Check that a snapshot directory exists. Store URLs are validated when
    /// the client is built.
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        let Self::Snapshot { dir } = self else {
            return Ok(());
        };
        match dir.metadata() {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(CliError::SnapshotPathNotDirectory { path: dir.clone() }),
            Err(_) => Err(CliError::MissingSnapshotDir { path: dir.clone() }),
        }
    }
}

/// Builds the zone source for the current invocation.
pub(crate) trait SourceBuilder {
    fn build(&self, config: &SourceConfig) -> Result<DynZoneSource, CliError>;
}

pub(crate) struct DefaultSourceBuilder;

impl SourceBuilder for DefaultSourceBuilder {
    fn build(&self, config: &SourceConfig) -> Result<DynZoneSource, CliError> {
        match config {
            SourceConfig::Snapshot { dir } => {
                debug!("reading snapshots from {dir}");
                Ok(Arc::new(SnapshotZoneSource::new(dir.clone())))
            }
            SourceConfig::Store { url, api_key } => {
                debug!("reading from store at {url}");
                let source = HttpZoneSource::new(url.clone(), api_key.clone()).map_err(
                    |source| CliError::BuildStoreSource {
                        url: url.clone(),
                        source,
                    },
                )?;
                Ok(Arc::new(source))
            }
        }
    }
}
