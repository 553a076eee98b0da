use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardex_catalog::types::Language;
use cardex_import::{SetReport, Severity, verify_set};
use cardex_tcgdex::Settings;

use crate::CliError;

/// Check one set and print the report as text, JSON, or SQL fixes.
///
/// Fails when any card has a critical issue, so scripts can gate on it.
pub(crate) fn run_verify(
    settings: &Settings,
    set_slug: &str,
    json: bool,
    fixes: bool,
    language: Option<Language>,
) -> Result<(), CliError> {
    let conn = super::open_catalog(settings)?;
    let language = language.unwrap_or(settings.language);
    let report = verify_set(&conn, set_slug, language)?;

    if json {
        println!("{}", report.to_json()?);
    } else if fixes {
        print_fixes(&report);
    } else {
        print_report(&report);
    }

    let critical = report
        .cards
        .iter()
        .filter(|c| c.worst() == Severity::Critical)
        .count();
    if critical > 0 {
        return Err(CliError::Integrity(critical));
    }
    Ok(())
}

fn print_fixes(report: &SetReport) {
    let fixes = report.fix_suggestions();
    if fixes.is_empty() {
        println!("-- No missing detail rows in {}", report.summary.set_slug);
        return;
    }
    println!("-- Fixes for {}", report.summary.set_slug);
    println!("-- Review each value before running\n");
    for fix in fixes {
        println!("{}\n", fix);
    }
}

fn severity_marker(severity: Severity) -> String {
    match severity {
        Severity::Critical => format!(
            "{}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red())
        ),
        Severity::Warning => format!(
            "{}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow())
        ),
        Severity::Info => format!(
            "{}",
            "\u{2139}".if_supports_color(Stdout, |t| t.blue())
        ),
    }
}

fn print_report(report: &SetReport) {
    let summary = &report.summary;
    log::info!(
        "{}",
        format!(
            "Set {} ({})",
            summary.set_slug,
            summary.set_name.as_deref().unwrap_or("unnamed")
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    let count_line = format!(
        "{} of {} expected cards stored",
        summary.actual_cards, summary.expected_cards
    );
    if summary.actual_cards as i64 == summary.expected_cards {
        log::info!("  {}", count_line);
    } else {
        log::info!(
            "  {}",
            count_line.if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log::info!(
        "  {} ok, {} with issues",
        summary.cards_ok,
        summary.cards_with_issues
    );

    if report.is_clean() {
        log::info!(
            "  {} No issues found",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        return;
    }

    crate::log_blank();
    for card in &report.cards {
        log::info!(
            "  {} #{} {} {}",
            severity_marker(card.worst()),
            card.position,
            card.name.as_deref().unwrap_or("(no translation)"),
            card.slug.if_supports_color(Stdout, |t| t.dimmed()),
        );
        for issue in &card.issues {
            log::info!(
                "      {} {}",
                severity_marker(issue.severity),
                issue.message
            );
        }
    }

    crate::log_blank();
    log::info!("{}", "Issues by category".if_supports_color(Stdout, |t| t.bold()));
    for (category, count) in &summary.issues_by_category {
        log::info!("  {:<12} {:>6}", category, count);
    }
    log::info!("{}", "Issues by type".if_supports_color(Stdout, |t| t.bold()));
    for (kind, count) in &summary.issues_by_type {
        log::info!("  {:<22} {:>6}", kind, count);
    }
}
