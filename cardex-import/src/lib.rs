//! Ingest a card source into the catalog database.
//!
//! This crate owns the ETL logic: resolving source names to catalog rows,
//! walking the source bloc → set → card, and checking the result.

pub mod pipeline;
pub mod progress;
pub mod resolver;
pub mod species;
pub mod verify;

pub use pipeline::{CardDetailKind, IngestError, IngestOptions, IngestStats, ingest, log_ingest};
pub use progress::{CardOutcome, IngestProgress, LogProgress, SilentProgress};
pub use resolver::{
    CatalogContext, SPECIAL_ELEMENT, energy_element_candidates, resolve_element_id,
    resolve_energy_element, resolve_pokemon_by_name, resolve_rarity_id,
};
pub use species::{DeferFallback, PendingSpecies, PromptFallback, SpeciesFallback};
pub use verify::{
    CardIssues, Issue, IssueKind, SetReport, Severity, Summary, VerifyError, verify_set,
};
