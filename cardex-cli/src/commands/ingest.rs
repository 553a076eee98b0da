use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardex_import::{
    DeferFallback, IngestOptions, IngestStats, LogProgress, PendingSpecies, PromptFallback,
    ingest, log_ingest,
};
use cardex_tcgdex::{CardSource, Settings, TcgdexClient};

use crate::CliError;
use crate::cli_types::IngestArgs;
use crate::progress::SpinnerProgress;

/// Exit status of an ingestion run stopped with Ctrl-C.
pub(crate) const INTERRUPTED_EXIT_CODE: i32 = 0;

/// Stop the run on Ctrl-C. Every stored row is already committed, so the
/// next run picks up where this one stopped.
pub(crate) fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        log::warn!("Interrupted; stored cards are kept, run again to resume");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
}

/// Ingest the TCGdex catalog of one language into the database.
pub(crate) fn run_ingest(settings: &Settings, args: IngestArgs, quiet: bool) -> Result<(), CliError> {
    let settings = settings.clone().with_language(args.language);
    let conn = super::open_catalog(&settings)?;
    let client = TcgdexClient::new(&settings.base_url, settings.language)?;

    let options = IngestOptions {
        throttle: args
            .throttle_ms
            .map(Duration::from_millis)
            .unwrap_or(settings.throttle),
        auto_create: settings.auto_create && !args.no_auto_create,
        bloc_filter: args.bloc,
        set_filter: args.set,
    };

    log::info!(
        "{}",
        format!(
            "Ingesting {} catalog from {} into {}",
            settings.language.tcg_slug(),
            settings.base_url,
            settings.database_path.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(bloc) = &options.bloc_filter {
        log::info!("  Bloc filter: {}", bloc);
    }
    if let Some(set) = &options.set_filter {
        log::info!("  Set filter: {}", set);
    }

    // The prompt needs the terminal, so interactive runs log instead of spinning
    let (stats, pending) = if args.interactive {
        let mut fallback = PromptFallback::stdin();
        let stats = ingest(&conn, &client, &options, &mut fallback, &LogProgress)?;
        (stats, Vec::new())
    } else {
        let mut fallback = DeferFallback::new();
        let progress = SpinnerProgress::new(quiet);
        let stats = ingest(&conn, &client, &options, &mut fallback, &progress)?;
        (stats, fallback.into_pending())
    };

    if let Err(e) = log_ingest(&conn, client.name(), settings.language, &stats) {
        log::warn!("Failed to log ingestion run: {}", e);
    }

    print_summary(&stats);
    print_pending(&pending);
    log::info!("  Database: {}", settings.database_path.display());
    Ok(())
}

fn print_summary(stats: &IngestStats) {
    crate::log_blank();
    log::info!(
        "{}",
        "Ingestion complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Blocs:     {:>6} new", stats.blocs_created);
    log::info!("  Sets:      {:>6} new", stats.sets_created);
    log::info!(
        "  Cards:     {:>6} new, {} already complete",
        stats.cards_created,
        stats.cards_skipped
    );
    log::info!("  Variants:  {:>6} added", stats.variants_added);
    if stats.cards_incomplete > 0 {
        log::info!(
            "  {} {} card(s) stored without their detail row",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.cards_incomplete,
        );
    }
    if stats.fetch_failures > 0 || stats.errors > 0 {
        log::info!(
            "  {} {} fetch failure(s), {} write error(s)",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            stats.fetch_failures,
            stats.errors,
        );
    }
}

fn print_pending(pending: &[PendingSpecies]) {
    if pending.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!(
        "{}",
        format!("{} card(s) need a species", pending.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for card in pending {
        log::info!(
            "  {} {} {}",
            card.card_slug.if_supports_color(Stdout, |t| t.cyan()),
            card.card_name,
            format!("({})", card.card_id).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("Re-run with --interactive to enter their dex ids.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_handler_installs_once_and_exits_cleanly() {
        assert_eq!(INTERRUPTED_EXIT_CODE, 0);
        install_interrupt_handler().unwrap();
        assert!(matches!(
            install_interrupt_handler(),
            Err(ctrlc::Error::MultipleHandlers)
        ));
    }
}
