/// What happened to one card of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    /// Card and detail row written.
    Ingested,
    /// Already complete from an earlier run.
    Skipped,
    /// Card written but its detail row could not be.
    Incomplete,
    /// Fetch or write failed before the card was stored.
    Failed,
}

/// Trait for reporting progress during ingestion.
pub trait IngestProgress {
    /// Called when a bloc starts.
    fn on_bloc(&self, position: usize, total: usize, name: &str);

    /// Called when a set starts, with its number of cards.
    fn on_set(&self, name: &str, card_total: usize);

    /// Called after each card of the current set.
    fn on_card(&self, current: usize, total: usize, name: &str, outcome: CardOutcome);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn on_bloc(&self, _position: usize, _total: usize, _name: &str) {}
    fn on_set(&self, _name: &str, _card_total: usize) {}
    fn on_card(&self, _current: usize, _total: usize, _name: &str, _outcome: CardOutcome) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl IngestProgress for LogProgress {
    fn on_bloc(&self, position: usize, total: usize, name: &str) {
        log::info!("Bloc [{}/{}] {}", position, total, name);
    }

    fn on_set(&self, name: &str, card_total: usize) {
        log::info!("  Set {} ({} cards)", name, card_total);
    }

    fn on_card(&self, current: usize, total: usize, name: &str, outcome: CardOutcome) {
        log::debug!("    [{}/{}] {} {:?}", current, total, name, outcome);
        if current.is_multiple_of(50) || current == total {
            log::info!("    [{}/{}] {}", current, total, name);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
