//! Command-line interface for zone recommendations.
//!
//! Every subcommand reads zones from either a hosted store (`--store-url`
//! with `--api-key`) or a directory of JSON snapshots (`--snapshot-dir`).
//! Flags layer over configuration files and `ZONERANK_CMDS_*` environment
//! variables.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;
use zonerank_core::WeightTable;

mod error;
mod recommend;
mod serve;
mod source;
mod tag;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend};
use serve::{ServeArgs, run_serve};
use tag::{TagArgs, run_tag};

pub(crate) const ARG_CATEGORY: &str = "category";
pub(crate) const ARG_COUNT: &str = "count";
pub(crate) const ARG_LISTING_BONUS: &str = "listing-bonus";
pub(crate) const ARG_NO_LISTINGS: &str = "no-listings";
pub(crate) const ARG_SORT_BY: &str = "sort-by";
pub(crate) const ARG_DESCENDING: &str = "descending";
pub(crate) const ARG_BIND: &str = "bind";
pub(crate) const ARG_LENIENT: &str = "lenient";
pub(crate) const ARG_STORE_URL: &str = "store-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_SNAPSHOT_DIR: &str = "snapshot-dir";

pub(crate) const ENV_RECOMMEND_CATEGORY: &str = "ZONERANK_CMDS_RECOMMEND_CATEGORY";
pub(crate) const ENV_TAG_CATEGORY: &str = "ZONERANK_CMDS_TAG_CATEGORY";

/// Run the zonerank CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Tag(args) => run_tag(args),
        Command::BusinessTypes => {
            let mut stdout = std::io::stdout().lock();
            write_business_types(&mut stdout, &WeightTable::default())
        }
        Command::Serve(args) => run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "zonerank",
    about = "Rank city zones for opening a new business",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the best zones for a business category.
    Recommend(RecommendArgs),
    /// Print every listing tagged against the recommended zones.
    Tag(TagArgs),
    /// Print the categories with dedicated weights.
    BusinessTypes,
    /// Serve recommendations over HTTP.
    Serve(ServeArgs),
}

fn write_business_types(writer: &mut dyn Write, table: &WeightTable) -> Result<(), CliError> {
    for category in table.categories() {
        writeln!(writer, "{category}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Build the single-threaded runtime used by one-shot commands.
pub(crate) fn current_thread_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

#[cfg(test)]
mod tests;
