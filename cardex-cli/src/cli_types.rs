//! CLI type definitions: command enums and argument structs.

use clap::{Args, Parser, Subcommand};

use cardex_catalog::types::Language;

#[derive(Parser)]
#[command(name = "cardex")]
#[command(about = "Ingest the Pokémon TCG card catalog into SQLite", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for an ingestion run.
#[derive(Args, Clone)]
pub(crate) struct IngestArgs {
    /// Catalog language to ingest (fr, en, jp); defaults to the configured one
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Only ingest the bloc with this TCGdex id (e.g., sv, swsh)
    #[arg(long)]
    pub bloc: Option<String>,

    /// Only ingest the set with this TCGdex id (e.g., sv01)
    #[arg(long)]
    pub set: Option<String>,

    /// Ask for the dex id of cards whose species cannot be resolved
    #[arg(short, long)]
    pub interactive: bool,

    /// Pause between card requests, in milliseconds
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// Leave unknown rarities and elements unset instead of creating them
    #[arg(long)]
    pub no_auto_create: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Walk TCGdex blocs, sets and cards into the catalog
    Ingest {
        #[command(flatten)]
        args: IngestArgs,
    },

    /// Check the integrity of one set (e.g., poke-fr/sv/sv1)
    Verify {
        /// Slug of the set to check
        set_slug: String,

        /// Print the report as JSON
        #[arg(long, conflicts_with = "fixes")]
        json: bool,

        /// Print SQL statements stubbing out missing detail rows
        #[arg(long)]
        fixes: bool,

        /// Language of the names shown in the report
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Show catalog row counts and recent ingestion runs
    Stats,

    /// Show configuration and where each value comes from
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
