//! Spinner display for ingestion runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardex_import::{CardOutcome, IngestProgress};

/// Shows the current set's card position on a single spinner line and logs
/// bloc and set headers above it.
pub(crate) struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        Self { bar }
    }
}

impl IngestProgress for SpinnerProgress {
    fn on_bloc(&self, position: usize, total: usize, name: &str) {
        self.bar.suspend(|| {
            log::info!(
                "{} {}",
                format!("[{}/{}]", position, total).if_supports_color(Stdout, |t| t.dimmed()),
                name.if_supports_color(Stdout, |t| t.bold()),
            );
        });
    }

    fn on_set(&self, name: &str, card_total: usize) {
        self.bar.suspend(|| {
            log::info!(
                "  {} ({} cards)",
                name.if_supports_color(Stdout, |t| t.cyan()),
                card_total
            );
        });
        self.bar.reset();
        self.bar.set_length(card_total as u64);
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_card(&self, current: usize, _total: usize, name: &str, outcome: CardOutcome) {
        self.bar.set_position(current as u64);
        match outcome {
            CardOutcome::Incomplete => self.bar.suspend(|| {
                log::warn!(
                    "    {} {} stored without its detail row",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    name
                );
            }),
            CardOutcome::Failed => self.bar.suspend(|| {
                log::warn!(
                    "    {} {} not stored",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    name
                );
            }),
            CardOutcome::Ingested | CardOutcome::Skipped => {
                self.bar.set_message(name.to_string());
            }
        }
    }

    fn on_complete(&self, message: &str) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}
