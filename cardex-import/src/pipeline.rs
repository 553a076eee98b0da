//! Walk a card source bloc → set → card and write everything into the
//! catalog.
//!
//! The walk is depth-first and strictly sequential. Every write goes through
//! an insert-or-fetch operation, so a run can be interrupted and restarted at
//! any point: blocs and sets already stored are reused, and cards that
//! already have their detail row are skipped without being fetched.
//!
//! Failures are contained to the node they happen on. A bloc, set or card
//! that cannot be fetched is logged and skipped; an entity that cannot be
//! written is logged and abandoned, and the walk moves on to the next
//! sibling.

use std::time::Duration;

use cardex_catalog::slug::{build_slug, clean_slug_segment};
use cardex_catalog::species::clean_pokemon_name;
use cardex_catalog::types::*;
use cardex_db::operations::{self, OperationError};
use cardex_db::queries;
use cardex_tcgdex::{CardBrief, CardDetail, CardSource, SetBrief, SourceError};
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::{CardOutcome, IngestProgress};
use crate::resolver::{self, CatalogContext};
use crate::species::{PendingSpecies, SpeciesFallback};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Options for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Pause after each card request, whether it succeeded or not.
    pub throttle: Duration,
    /// Create unknown rarities and elements instead of leaving them unset.
    pub auto_create: bool,
    /// Only walk the bloc with this source id.
    pub bloc_filter: Option<String>,
    /// Only walk the set with this source id.
    pub set_filter: Option<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            throttle: Duration::from_secs(1),
            auto_create: true,
            bloc_filter: None,
            set_filter: None,
        }
    }
}

/// Statistics from an ingestion run.
#[derive(Debug, Default, Clone)]
pub struct IngestStats {
    pub blocs_created: u64,
    pub sets_created: u64,
    pub cards_created: u64,
    /// Cards skipped because an earlier run completed them.
    pub cards_skipped: u64,
    /// Cards written without their detail row.
    pub cards_incomplete: u64,
    pub variants_added: u64,
    pub fetch_failures: u64,
    /// Writes that failed and were rolled back.
    pub errors: u64,
}

/// The category-specific part of a card, decided once from its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDetailKind {
    Pokemon {
        pokemon_id: i64,
        hp: i64,
        level: String,
        element_ids: Vec<i64>,
    },
    Energy {
        element_id: i64,
    },
    Trainer,
}

impl CardDetailKind {
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Pokemon { .. } => CardKind::Pokemon,
            Self::Energy { .. } => CardKind::Energy,
            Self::Trainer => CardKind::Trainer,
        }
    }
}

/// Everything one ingestion run shares across the walk.
struct Run<'a> {
    conn: &'a Connection,
    source: &'a dyn CardSource,
    ctx: CatalogContext,
    options: &'a IngestOptions,
    fallback: &'a mut dyn SpeciesFallback,
    progress: &'a dyn IngestProgress,
    stats: IngestStats,
}

/// Ingest the source's whole catalog for its language.
///
/// Only setup failures (reading the category tables) are returned as errors;
/// everything after that is contained, logged and counted in the stats.
pub fn ingest(
    conn: &Connection,
    source: &dyn CardSource,
    options: &IngestOptions,
    fallback: &mut dyn SpeciesFallback,
    progress: &dyn IngestProgress,
) -> Result<IngestStats, IngestError> {
    let ctx = CatalogContext::load(conn, source.language())?;
    let mut run = Run {
        conn,
        source,
        ctx,
        options,
        fallback,
        progress,
        stats: IngestStats::default(),
    };
    run.walk_blocs();

    let stats = run.stats;
    progress.on_complete(&format!(
        "Ingestion complete: {} cards created, {} skipped, {} incomplete, {} errors",
        stats.cards_created, stats.cards_skipped, stats.cards_incomplete, stats.errors
    ));
    Ok(stats)
}

/// Record an ingestion run in the import_log table.
pub fn log_ingest(
    conn: &Connection,
    source_name: &str,
    language: Language,
    stats: &IngestStats,
) -> Result<i64, IngestError> {
    let log_entry = ImportLog {
        id: 0,
        source_name: source_name.to_string(),
        language: language.code().to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_created: stats.cards_created as i64,
        records_skipped: stats.cards_skipped as i64,
        errors: (stats.errors + stats.fetch_failures) as i64,
    };
    let id = operations::insert_import_log(conn, &log_entry)?;
    Ok(id)
}

impl Run<'_> {
    fn language(&self) -> Language {
        self.ctx.language()
    }

    /// Unwrap a write, logging and counting it when it failed.
    fn written<T>(&mut self, what: &str, slug: &str, result: Result<T, OperationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Failed to write {} {}: {}", what, slug, e);
                self.stats.errors += 1;
                None
            }
        }
    }

    /// Unwrap a fetch, logging and counting it when it failed.
    fn fetched<T>(&mut self, what: &str, id: &str, result: Result<T, SourceError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Failed to fetch {} {}: {}", what, id, e);
                self.stats.fetch_failures += 1;
                None
            }
        }
    }

    // ── Blocs ───────────────────────────────────────────────────────────────

    fn walk_blocs(&mut self) {
        let fetched = self.source.series();
        let Some(series) = self.fetched("bloc list", self.language().tcg_slug(), fetched) else {
            return;
        };

        let total = series.len();
        for (index, brief) in series.iter().enumerate() {
            if let Some(only) = &self.options.bloc_filter
                && only != &brief.id
            {
                continue;
            }
            self.progress.on_bloc(index + 1, total, &brief.name);
            self.ingest_bloc(index as i64 + 1, &brief.id, &brief.name);
        }
    }

    fn ingest_bloc(&mut self, position: i64, bloc_id: &str, name: &str) {
        let fetched = self.source.serie(bloc_id);
        let Some(detail) = self.fetched("bloc", bloc_id, fetched) else {
            return;
        };

        let slug = build_slug(&[self.language().tcg_slug(), &clean_slug_segment(bloc_id)]);
        let bloc = NewBloc {
            slug: slug.clone(),
            tcg_language_id: self.language().id(),
            set_number: detail.sets.len() as i64,
            position,
        };
        let result = operations::insert_bloc(self.conn, &bloc);
        let Some(bloc) = self.written("bloc", &slug, result) else {
            return;
        };
        if bloc.created {
            self.stats.blocs_created += 1;
        }

        let translation = NewBlocTranslation {
            slug: format!("{slug}/translation"),
            bloc_id: bloc.id,
            name: name.to_string(),
            description: None,
            language_id: self.language().id(),
        };
        let result = operations::insert_bloc_translation(self.conn, &translation);
        self.written("bloc translation", &translation.slug, result);

        for (index, set) in detail.sets.iter().enumerate() {
            if let Some(only) = &self.options.set_filter
                && only != &set.id
            {
                continue;
            }
            self.ingest_set(index as i64 + 1, &slug, bloc.id, set);
        }
    }

    // ── Sets ────────────────────────────────────────────────────────────────

    fn ingest_set(&mut self, position: i64, bloc_slug: &str, bloc_id: i64, brief: &SetBrief) {
        let slug = build_slug(&[bloc_slug, &clean_slug_segment(&brief.id)]);
        let set = NewSet {
            slug: slug.clone(),
            card_count: brief.card_count.total,
            position,
            bloc_id,
        };
        let result = operations::insert_set(self.conn, &set);
        let Some(set) = self.written("set", &slug, result) else {
            return;
        };
        if set.created {
            self.stats.sets_created += 1;
        }

        let translation = NewSetTranslation {
            slug: format!("{slug}/translation"),
            set_id: set.id,
            name: brief.name.clone(),
            description: None,
            language_id: self.language().id(),
        };
        let result = operations::insert_set_translation(self.conn, &translation);
        self.written("set translation", &translation.slug, result);

        let fetched = self.source.set(&brief.id);
        let Some(detail) = self.fetched("set", &brief.id, fetched) else {
            return;
        };

        self.progress.on_set(&brief.name, detail.cards.len());
        let total = detail.cards.len();
        for (index, card) in detail.cards.iter().enumerate() {
            let outcome = self.ingest_card(&slug, set.id, card);
            self.progress.on_card(index + 1, total, &card.name, outcome);
        }
    }

    // ── Cards ───────────────────────────────────────────────────────────────

    fn ingest_card(&mut self, set_slug: &str, set_id: i64, brief: &CardBrief) -> CardOutcome {
        let slug = build_slug(&[set_slug, &clean_slug_segment(&brief.local_id)]);

        let complete = self.is_complete(&slug);
        match self.written("card lookup", &slug, complete) {
            Some(true) => {
                log::debug!("Already ingested: {} ({})", brief.id, brief.name);
                self.stats.cards_skipped += 1;
                return CardOutcome::Skipped;
            }
            Some(false) => {}
            None => return CardOutcome::Failed,
        }

        // Every request is paced, including the ones that fail
        let fetched = self.source.card(&brief.id);
        if !self.options.throttle.is_zero() {
            std::thread::sleep(self.options.throttle);
        }
        let Some(detail) = self.fetched("card", &brief.id, fetched) else {
            return CardOutcome::Failed;
        };

        self.store_card(&slug, set_id, &detail)
    }

    /// A card is complete once its detail row for its category exists.
    fn is_complete(&self, slug: &str) -> Result<bool, OperationError> {
        let Some(card) = queries::find_card_by_slug(self.conn, slug)? else {
            return Ok(false);
        };
        match self.ctx.kind_of(card.category_id) {
            Some(kind) => queries::detail_exists(self.conn, kind, card.id),
            None => Ok(false),
        }
    }

    fn store_card(&mut self, slug: &str, set_id: i64, detail: &CardDetail) -> CardOutcome {
        let language = self.language();

        let result = operations::insert_illustrator(self.conn, detail.illustrator_or_unknown());
        let Some(illustrator) = self.written("illustrator", slug, result) else {
            return CardOutcome::Failed;
        };

        let Some(category_id) = self.ctx.resolve_category_id(&detail.category) else {
            log::warn!(
                "Unknown category '{}' for {}, card not stored",
                detail.category,
                detail.id
            );
            self.stats.errors += 1;
            return CardOutcome::Failed;
        };

        let rarity_id = match detail.rarity.as_deref() {
            Some(rarity) => {
                let result =
                    resolver::resolve_rarity_id(self.conn, language, rarity, self.options.auto_create);
                self.written("rarity", rarity, result).flatten()
            }
            None => None,
        };

        let card = NewCard {
            slug: slug.to_string(),
            position: detail.local_id.clone(),
            category_id,
            rarity_id,
            set_id,
            illustrator_id: illustrator.id,
        };
        let result = operations::insert_card(self.conn, &card);
        let Some(card) = self.written("card", slug, result) else {
            return CardOutcome::Failed;
        };
        if card.created {
            self.stats.cards_created += 1;
        }

        let translation = NewCardTranslation {
            slug: format!("{slug}/translation"),
            card_id: card.id,
            language_id: language.id(),
            name: detail.name.clone(),
            description: detail.description_or_effect().map(str::to_string),
        };
        let result = operations::insert_card_translation(self.conn, &translation);
        self.written("card translation", &translation.slug, result);

        let stored = match self.ctx.kind_of(category_id) {
            Some(kind) => match self.resolve_detail(kind, slug, detail) {
                Some(payload) => self.store_detail(card.id, slug, &payload),
                None => false,
            },
            None => {
                log::warn!("Category {} of {} has no detail table", category_id, slug);
                false
            }
        };

        for variant in detail.variants.enabled() {
            let result = operations::insert_card_variant(self.conn, card.id, variant);
            if let Some(true) = self.written("variant", slug, result) {
                self.stats.variants_added += 1;
            }
        }

        if stored {
            log::debug!("Ingested {} ({})", detail.id, detail.name);
            CardOutcome::Ingested
        } else {
            self.stats.cards_incomplete += 1;
            CardOutcome::Incomplete
        }
    }

    // ── Card details ────────────────────────────────────────────────────────

    fn resolve_detail(
        &mut self,
        kind: CardKind,
        slug: &str,
        detail: &CardDetail,
    ) -> Option<CardDetailKind> {
        let language = self.language();
        let auto_create = self.options.auto_create;

        match kind {
            CardKind::Trainer => Some(CardDetailKind::Trainer),
            CardKind::Energy => {
                let result =
                    resolver::resolve_energy_element(self.conn, language, &detail.name, auto_create);
                let element_id = self.written("energy element", slug, result).flatten();
                if element_id.is_none() {
                    log::warn!("No element for energy {} ({})", detail.id, detail.name);
                }
                element_id.map(|element_id| CardDetailKind::Energy { element_id })
            }
            CardKind::Pokemon => {
                let pokemon_id = self.resolve_species(slug, detail)?;
                let mut element_ids = Vec::with_capacity(detail.types.len());
                for element in &detail.types {
                    let result =
                        resolver::resolve_element_id(self.conn, language, element, auto_create);
                    if let Some(Some(id)) = self.written("element", element, result) {
                        element_ids.push(id);
                    }
                }
                Some(CardDetailKind::Pokemon {
                    pokemon_id,
                    hp: detail.hp_or_default(),
                    level: detail.level_or_default(),
                    element_ids,
                })
            }
        }
    }

    /// Species of a pokémon card: its dex id, a known name, or the fallback.
    /// The species row and its translation are created when missing.
    fn resolve_species(&mut self, slug: &str, detail: &CardDetail) -> Option<i64> {
        let language = self.language();

        let dex_id = match detail.first_dex_id() {
            Some(dex) => dex,
            None => {
                let result = resolver::resolve_pokemon_by_name(self.conn, language, &detail.name);
                match self.written("species lookup", slug, result)? {
                    Some(dex) => dex,
                    None => {
                        let pending = PendingSpecies {
                            card_id: detail.id.clone(),
                            card_slug: slug.to_string(),
                            card_name: detail.name.clone(),
                            language,
                        };
                        self.fallback.resolve(&pending)?
                    }
                }
            }
        };

        let species_name = match clean_pokemon_name(&detail.name) {
            name if name.is_empty() => detail.name.clone(),
            name => name,
        };
        let pokemon = NewPokemon {
            dex_id,
            translation_slug: format!("{}/pokemon/{}", language.code(), dex_id),
            name: species_name,
            language_id: language.id(),
        };
        let result = operations::insert_pokemon(self.conn, &pokemon);
        self.written("pokemon", &pokemon.translation_slug, result)
            .map(|p| p.id)
    }

    fn store_detail(&mut self, card_id: i64, card_slug: &str, payload: &CardDetailKind) -> bool {
        let slug = format!("{card_slug}/{}", payload.kind().detail_suffix());
        match payload {
            CardDetailKind::Pokemon {
                pokemon_id,
                hp,
                level,
                element_ids,
            } => {
                let row = NewPokemonCard {
                    slug: slug.clone(),
                    card_id,
                    pokemon_id: *pokemon_id,
                    hp: *hp,
                    level: level.clone(),
                };
                let result = operations::insert_pokemon_card(self.conn, &row);
                let Some(pokemon_card) = self.written("pokemon card", &slug, result) else {
                    return false;
                };
                for element_id in element_ids {
                    let result = operations::insert_pokemon_card_element(
                        self.conn,
                        pokemon_card.id,
                        *element_id,
                    );
                    self.written("pokemon card element", &slug, result);
                }
                true
            }
            CardDetailKind::Energy { element_id } => {
                let row = NewEnergyCard {
                    slug: slug.clone(),
                    card_id,
                    element_id: *element_id,
                };
                let result = operations::insert_energy_card(self.conn, &row);
                self.written("energy card", &slug, result).is_some()
            }
            CardDetailKind::Trainer => {
                let row = NewTrainerCard {
                    slug: slug.clone(),
                    card_id,
                };
                let result = operations::insert_trainer_card(self.conn, &row);
                self.written("trainer card", &slug, result).is_some()
            }
        }
    }
}
