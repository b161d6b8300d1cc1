//! Tag command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use zonerank_scorer::{ListingOrder, SortDirection, ZoneRecommender};

use crate::source::{DefaultSourceBuilder, SourceBuilder, SourceConfig, SourceEnv};
use crate::{
    ARG_API_KEY, ARG_CATEGORY, ARG_COUNT, ARG_DESCENDING, ARG_SNAPSHOT_DIR, ARG_SORT_BY,
    ARG_STORE_URL, CliError, ENV_TAG_CATEGORY, current_thread_runtime, write_json,
};

pub(crate) const TAG_ENV: SourceEnv = SourceEnv {
    store_url: "ZONERANK_CMDS_TAG_STORE_URL",
    api_key: "ZONERANK_CMDS_TAG_API_KEY",
};

/// CLI arguments for the `tag` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "tag",
    long_about = "Recommend zones for a business category, then print every \
                 listing annotated with whether it sits in a recommended zone. \
                 Listings in recommended zones come first, best zone first.",
    about = "Print listings tagged against the recommended zones"
)]
#[ortho_config(prefix = "ZONERANK")]
pub(crate) struct TagArgs {
    /// Business category, e.g. "Pharmacy".
    #[arg(value_name = ARG_CATEGORY)]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Number of zones to recommend (default 5).
    #[arg(long = ARG_COUNT, value_name = "n", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) count: Option<i64>,
    /// Numeric listing field used to order listings within each group.
    #[arg(long = ARG_SORT_BY, value_name = "field")]
    #[serde(default)]
    pub(crate) sort_by: Option<String>,
    /// Sort the listing field from largest to smallest.
    #[arg(long = ARG_DESCENDING)]
    #[serde(default)]
    pub(crate) descending: bool,
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

impl TagArgs {
    pub(crate) fn into_config(self) -> Result<TagConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TagConfig::try_from(merged)
    }
}

/// Resolved `tag` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TagConfig {
    pub(crate) category: String,
    pub(crate) count: Option<i64>,
    pub(crate) order: Option<ListingOrder>,
    pub(crate) source: SourceConfig,
}

impl TryFrom<TagArgs> for TagConfig {
    type Error = CliError;

    fn try_from(args: TagArgs) -> Result<Self, Self::Error> {
        let category = args.category.ok_or(CliError::MissingPositional {
            name: ARG_CATEGORY,
            env: ENV_TAG_CATEGORY,
        })?;
        let direction = if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let order = args
            .sort_by
            .map(|field| ListingOrder::by_field(field, direction));
        let source =
            SourceConfig::from_flags(args.store_url, args.api_key, args.snapshot_dir, TAG_ENV)?;
        Ok(Self {
            category,
            count: args.count,
            order,
            source,
        })
    }
}

pub(crate) fn run_tag(args: TagArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_tag_with(args, &DefaultSourceBuilder, &mut stdout)
}

pub(crate) fn run_tag_with(
    args: TagArgs,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.source.validate()?;
    let recommender = ZoneRecommender::new(builder.build(&config.source)?);

    let runtime = current_thread_runtime()?;
    let tagged = runtime.block_on(recommender.recommended_listings(
        &config.category,
        config.count,
        config.order.as_ref(),
    ))?;
    write_json(writer, &tagged)
}
