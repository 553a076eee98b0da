use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardex_tcgdex::Settings;

use crate::CliError;

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let db_path = &settings.database_path;

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'cardex ingest' to create one.");
        return Ok(());
    }

    let conn = super::open_catalog(settings)?;

    let stats = cardex_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Blocs:              {:>8}", stats.blocs);
    log::info!("  Sets:               {:>8}", stats.sets);
    log::info!("  Cards:              {:>8}", stats.cards);
    log::info!("  Card translations:  {:>8}", stats.card_translations);
    log::info!("  Pokémon species:    {:>8}", stats.pokemon);
    log::info!("  Pokémon cards:      {:>8}", stats.pokemon_cards);
    log::info!("  Energy cards:       {:>8}", stats.energy_cards);
    log::info!("  Trainer cards:      {:>8}", stats.trainer_cards);
    log::info!("  Card variants:      {:>8}", stats.card_variants);
    log::info!("  Illustrators:       {:>8}", stats.illustrators);
    log::info!("  Rarities:           {:>8}", stats.rarities);
    log::info!("  Elements:           {:>8}", stats.elements);
    let incomplete = stats.cards_without_detail();
    if incomplete > 0 {
        log::info!(
            "  {} {:>8}",
            "Without detail:    ".if_supports_color(Stdout, |t| t.yellow()),
            incomplete,
        );
    }

    let logs = cardex_db::list_import_logs(&conn, Some(5))
        .map_err(|e| CliError::database(format!("Failed to list ingestion runs: {}", e)))?;
    if !logs.is_empty() {
        crate::log_blank();
        log::info!(
            "{} ({} total)",
            "Recent ingestion runs".if_supports_color(Stdout, |t| t.bold()),
            stats.import_runs,
        );
        for run in &logs {
            log::info!(
                "  {} {} {}: {} created, {} skipped, {} errors",
                run.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
                run.source_name,
                run.language,
                run.records_created,
                run.records_skipped,
                run.errors,
            );
        }
    }

    Ok(())
}
