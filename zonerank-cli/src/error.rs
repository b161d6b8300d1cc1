//! Error types emitted by the zonerank CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::net::SocketAddr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use zonerank_core::RecommendError;
use zonerank_data::HttpSourceBuildError;
use zonerank_scorer::ScoringOptionsError;

/// Errors emitted by the zonerank CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A required positional argument is missing after configuration merging.
    #[error("missing <{name}> argument (pass it after the subcommand or set {env})")]
    MissingPositional {
        name: &'static str,
        env: &'static str,
    },
    /// The snapshot directory does not exist.
    #[error("snapshot directory {path:?} does not exist")]
    MissingSnapshotDir { path: Utf8PathBuf },
    /// The snapshot path exists but is not a directory.
    #[error("snapshot path {path:?} is not a directory")]
    SnapshotPathNotDirectory { path: Utf8PathBuf },
    /// Constructing the HTTP store client failed.
    #[error("failed to build store client for {url:?}: {source}")]
    BuildStoreSource {
        url: String,
        #[source]
        source: HttpSourceBuildError,
    },
    /// The scoring overrides were rejected.
    #[error(transparent)]
    InvalidScoringOptions(#[from] ScoringOptionsError),
    /// Building the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The recommendation pipeline failed.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// The HTTP server stopped with an error.
    #[error("server on {addr} failed: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
