//! Read queries for the catalog database.
//!
//! Lookups used by the ingestion pipeline (card re-entrancy, category
//! names), set integrity queries, and catalog statistics.

use std::collections::HashSet;

use cardex_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

// ── Card Lookups ────────────────────────────────────────────────────────────

/// Find a card by its slug.
pub fn find_card_by_slug(conn: &Connection, slug: &str) -> Result<Option<CardRow>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, slug, position, category_id, rarity_id, serie_id, illustrator_id
         FROM card WHERE slug = ?1",
    )?;
    let result = stmt.query_row(params![slug], row_to_card);
    match result {
        Ok(card) => Ok(Some(card)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether the detail row of the given kind exists for a card.
pub fn detail_exists(conn: &Connection, kind: CardKind, card_id: i64) -> Result<bool, OperationError> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE card_id = ?1",
        kind.detail_table()
    );
    let count: i64 = conn.query_row(&sql, params![card_id], |r| r.get(0))?;
    Ok(count > 0)
}

/// Variant names recorded for a card, in name order.
pub fn variants_for_card(conn: &Connection, card_id: i64) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT v.name FROM card_variant cv
         JOIN variant v ON v.id = cv.variant_id
         WHERE cv.card_id = ?1 ORDER BY v.name",
    )?;
    let rows = stmt.query_map(params![card_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Element slugs attached to a card's pokémon detail row.
pub fn elements_for_card(conn: &Connection, card_id: i64) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT e.slug FROM pokemon_card pc
         JOIN pokemon_card_element pce ON pce.pokemon_card_id = pc.id
         JOIN element e ON e.id = pce.element_id
         WHERE pc.card_id = ?1 ORDER BY e.slug",
    )?;
    let rows = stmt.query_map(params![card_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Category Queries ────────────────────────────────────────────────────────

/// All category ids with their slugs.
pub fn list_categories(conn: &Connection) -> Result<Vec<(i64, String)>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, slug FROM category ORDER BY id")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Category names in one language, mapped to their category ids.
pub fn category_names(
    conn: &Connection,
    language_id: i64,
) -> Result<Vec<(String, i64)>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT name, category_id FROM category_translation
         WHERE translation_language_id = ?1 ORDER BY category_id",
    )?;
    let rows = stmt.query_map(params![language_id], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Set Queries ─────────────────────────────────────────────────────────────

/// Find a set by slug, with its name in `language_id` when translated.
pub fn find_set_by_slug(
    conn: &Connection,
    slug: &str,
    language_id: i64,
) -> Result<Option<SetRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.slug, s.card_number, s.position, s.bloc_id, st.name
         FROM serie s
         LEFT JOIN serie_translation st
             ON st.serie_id = s.id AND st.translation_language_id = ?2
         WHERE s.slug = ?1",
    )?;
    let result = stmt.query_row(params![slug, language_id], |row| {
        Ok(SetRow {
            id: row.get(0)?,
            slug: row.get(1)?,
            card_count: row.get(2)?,
            position: row.get(3)?,
            bloc_id: row.get(4)?,
            name: row.get(5)?,
        })
    });
    match result {
        Ok(set) => Ok(Some(set)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// A card of a set, joined with what integrity checks need to see.
#[derive(Debug, Clone)]
pub struct SetCardRow {
    pub card: CardRow,
    /// Translated name, `None` when the card has no translation in the
    /// requested language.
    pub name: Option<String>,
    /// False when `illustrator_id` points at no illustrator row.
    pub illustrator_known: bool,
}

/// All cards of a set ordered by position.
pub fn cards_in_set(
    conn: &Connection,
    set_id: i64,
    language_id: i64,
) -> Result<Vec<SetCardRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.slug, c.position, c.category_id, c.rarity_id, c.serie_id,
                c.illustrator_id, ct.name, i.id IS NOT NULL
         FROM card c
         LEFT JOIN card_translation ct
             ON ct.card_id = c.id AND ct.translation_language_id = ?2
         LEFT JOIN illustrator i ON i.id = c.illustrator_id
         WHERE c.serie_id = ?1
         ORDER BY CAST(c.position AS INTEGER), c.position",
    )?;
    let rows = stmt.query_map(params![set_id, language_id], |row| {
        Ok(SetCardRow {
            card: row_to_card(row)?,
            name: row.get(7)?,
            illustrator_known: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Pokémon detail fields of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonCardRow {
    pub card_id: i64,
    pub pokemon_id: i64,
    pub hp: i64,
    pub level: String,
}

/// Pokémon detail rows of every card in a set.
pub fn pokemon_cards_in_set(
    conn: &Connection,
    set_id: i64,
) -> Result<Vec<PokemonCardRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT pc.card_id, pc.pokemon_id, pc.hp, pc.level
         FROM pokemon_card pc
         JOIN card c ON c.id = pc.card_id
         WHERE c.serie_id = ?1",
    )?;
    let rows = stmt.query_map(params![set_id], |row| {
        Ok(PokemonCardRow {
            card_id: row.get(0)?,
            pokemon_id: row.get(1)?,
            hp: row.get(2)?,
            level: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Ids of the cards in a set that have a detail row of `kind`.
pub fn cards_with_detail(
    conn: &Connection,
    kind: CardKind,
    set_id: i64,
) -> Result<HashSet<i64>, OperationError> {
    let sql = format!(
        "SELECT d.card_id FROM {} d
         JOIN card c ON c.id = d.card_id
         WHERE c.serie_id = ?1",
        kind.detail_table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![set_id], |row| row.get(0))?;
    rows.collect::<Result<HashSet<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        Ok(conn.query_row(&sql, [], |r| r.get(0))?)
    };

    Ok(CatalogStats {
        blocs: count("bloc")?,
        sets: count("serie")?,
        cards: count("card")?,
        card_translations: count("card_translation")?,
        pokemon: count("pokemon")?,
        pokemon_cards: count("pokemon_card")?,
        energy_cards: count("energy_card")?,
        trainer_cards: count("trainer_card")?,
        card_variants: count("card_variant")?,
        illustrators: count("illustrator")?,
        rarities: count("rarity")?,
        elements: count("element")?,
        import_runs: count("import_log")?,
    })
}

/// Row counts per catalog table.
#[derive(Debug, Default)]
pub struct CatalogStats {
    pub blocs: i64,
    pub sets: i64,
    pub cards: i64,
    pub card_translations: i64,
    pub pokemon: i64,
    pub pokemon_cards: i64,
    pub energy_cards: i64,
    pub trainer_cards: i64,
    pub card_variants: i64,
    pub illustrators: i64,
    pub rarities: i64,
    pub elements: i64,
    pub import_runs: i64,
}

impl CatalogStats {
    /// Cards that have no detail row of any kind.
    pub fn cards_without_detail(&self) -> i64 {
        self.cards - self.pokemon_cards - self.energy_cards - self.trainer_cards
    }
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_name, language, imported_at,
                records_created, records_skipped, errors
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            language: row.get(2)?,
            imported_at: row.get(3)?,
            records_created: row.get(4)?,
            records_skipped: row.get(5)?,
            errors: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        slug: row.get(1)?,
        position: row.get(2)?,
        category_id: row.get(3)?,
        rarity_id: row.get(4)?,
        set_id: row.get(5)?,
        illustrator_id: row.get(6)?,
    })
}
