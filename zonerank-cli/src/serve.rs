//! Serve command implementation.

use std::net::{Ipv4Addr, SocketAddr};

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use zonerank_scorer::ZoneRecommender;
use zonerank_server::AppState;

use crate::source::{DefaultSourceBuilder, SourceBuilder, SourceConfig, SourceEnv};
use crate::{ARG_API_KEY, ARG_BIND, ARG_LENIENT, ARG_SNAPSHOT_DIR, ARG_STORE_URL, CliError};

pub(crate) const DEFAULT_PORT: u16 = 3000;

pub(crate) const SERVE_ENV: SourceEnv = SourceEnv {
    store_url: "ZONERANK_CMDS_SERVE_STORE_URL",
    api_key: "ZONERANK_CMDS_SERVE_API_KEY",
};

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "serve",
    long_about = "Serve the recommendation API under /api. Requests are \
                 answered from fresh reads of the configured source.",
    about = "Serve recommendations over HTTP"
)]
#[ortho_config(prefix = "ZONERANK")]
pub(crate) struct ServeArgs {
    /// Address to listen on (default 127.0.0.1:3000).
    #[arg(long = ARG_BIND, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind: Option<SocketAddr>,
    /// Score unknown categories with uniform weights instead of rejecting them.
    #[arg(long = ARG_LENIENT)]
    #[serde(default)]
    pub(crate) lenient: bool,
    /// Base URL of the hosted store.
    #[arg(long = ARG_STORE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) store_url: Option<String>,
    /// API key for the hosted store.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Directory holding zones.json, competitors.json and listings.json.
    #[arg(long = ARG_SNAPSHOT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) snapshot_dir: Option<Utf8PathBuf>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) bind: SocketAddr,
    pub(crate) strict_categories: bool,
    pub(crate) source: SourceConfig,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let bind = args
            .bind
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)));
        let source =
            SourceConfig::from_flags(args.store_url, args.api_key, args.snapshot_dir, SERVE_ENV)?;
        Ok(Self {
            bind,
            strict_categories: !args.lenient,
            source,
        })
    }
}

/// Build the handler state for a resolved configuration.
pub(crate) fn app_state(
    config: &ServeConfig,
    builder: &dyn SourceBuilder,
) -> Result<AppState, CliError> {
    config.source.validate()?;
    let recommender = ZoneRecommender::new(builder.build(&config.source)?);
    Ok(AppState::new(recommender).with_strict_categories(config.strict_categories))
}

pub(crate) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let state = app_state(&config, &DefaultSourceBuilder)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    info!("starting server on {}", config.bind);
    runtime
        .block_on(zonerank_server::serve(config.bind, state))
        .map_err(|source| CliError::Serve {
            addr: config.bind,
            source,
        })
}
