//! cardex CLI
//!
//! Command-line interface for ingesting the TCGdex card catalog and checking
//! what was stored.

mod cli_types;
mod commands;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cardex_tcgdex::config::ENV_DEBUG;
use cardex_tcgdex::{Settings, parse_flag};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    let settings = Settings::load();
    let debug = cli.verbose
        || match &settings {
            Ok(settings) => settings.debug,
            Err(_) => std::env::var(ENV_DEBUG)
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
        };
    init_logging(debug, cli.quiet);

    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Ingest { args } => {
            if let Err(e) = commands::ingest::install_interrupt_handler() {
                log::warn!("Ctrl-C will not stop the run cleanly: {}", e);
            }
            settings
                .map_err(CliError::from)
                .and_then(|s| commands::ingest::run_ingest(&s, args, quiet))
        }
        Commands::Verify {
            set_slug,
            json,
            fixes,
            language,
        } => settings.map_err(CliError::from).and_then(|s| {
            commands::verify::run_verify(&s, &set_slug, json, fixes, language)
        }),
        Commands::Stats => settings
            .map_err(CliError::from)
            .and_then(|s| commands::stats::run_stats(&s)),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Set up `env_logger`: plain messages normally, timestamped and leveled in
/// debug mode. `RUST_LOG` still overrides the chosen level.
fn init_logging(debug: bool, quiet: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("rustls", LevelFilter::Info)
        .filter_module("hyper_util", LevelFilter::Info)
        .target(env_logger::Target::Stdout);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format(move |buf, record| {
        if debug {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        } else {
            writeln!(buf, "{}", record.args())
        }
    });
    builder.init();
}

/// Log an empty line (visible unless --quiet).
pub(crate) fn log_blank() {
    log::info!("");
}
