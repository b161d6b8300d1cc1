//! Recommend command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use zonerank_scorer::{ScoringOptions, ZoneRecommender};

use crate::source::{DefaultSourceBuilder, SourceBuilder, SourceConfig, SourceEnv};
use crate::{
    ARG_API_KEY, ARG_CATEGORY, ARG_COUNT, ARG_LISTING_BONUS, ARG_NO_LISTINGS, ARG_SNAPSHOT_DIR,
    ARG_STORE_URL, CliError, ENV_RECOMMEND_CATEGORY, current_thread_runtime, write_json,
};

pub(crate) const RECOMMEND_ENV: SourceEnv = SourceEnv {
    store_url: "ZONERANK_CMDS_RECOMMEND_STORE_URL",
    api_key: "ZONERANK_CMDS_RECOMMEND_API_KEY",
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Score every zone for a business category and print the \
                 best ones as JSON. Zones are read from a hosted store or \
                 from a directory of JSON snapshots.",
    about = "Print the best zones for a business category"
)]
#[ortho_config(prefix = "ZONERANK")]
pub(crate) struct RecommendArgs {
    /// Business category, e.g. "Gas Station" or "gym".
    #[arg(value_name = ARG_CATEGORY)]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Number of zones to return (default 5).
    #[arg(long = ARG_COUNT, value_name = "n", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) count: Option<i64>,
    /// Popularity points added per listing in a zone.
    #[arg(long = ARG_LISTING_BONUS, value_name = "points")]
    #[serde(default)]
    pub(crate) listing_bonus: Option<f64>,
    /// Ignore listings when scoring.
    #[arg(long = ARG_NO_LISTINGS)]
    #[serde(default)]
    pub(crate) no_listings: bool,
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

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) category: String,
    pub(crate) count: Option<i64>,
    pub(crate) options: ScoringOptions,
    pub(crate) source: SourceConfig,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let category = args.category.ok_or(CliError::MissingPositional {
            name: ARG_CATEGORY,
            env: ENV_RECOMMEND_CATEGORY,
        })?;
        let mut options = ScoringOptions::default().with_listings(!args.no_listings);
        if let Some(bonus) = args.listing_bonus {
            options = options.with_listing_bonus(bonus);
        }
        options.validate()?;
        let source =
            SourceConfig::from_flags(args.store_url, args.api_key, args.snapshot_dir, RECOMMEND_ENV)?;
        Ok(Self {
            category,
            count: args.count,
            options,
            source,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &DefaultSourceBuilder, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.source.validate()?;
    let source = builder.build(&config.source)?;
    let recommender = ZoneRecommender::new(source).with_options(config.options)?;

    let runtime = current_thread_runtime()?;
    let recommendations =
        runtime.block_on(recommender.recommend(&config.category, config.count))?;
    write_json(writer, &recommendations)
}
