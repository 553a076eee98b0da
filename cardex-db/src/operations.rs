//! Insert-or-fetch operations for every catalog entity.
//!
//! Every `insert_*` function follows the same contract: look the row up by its
//! slug (or natural key), return the existing id untouched if it is there, and
//! insert it otherwise. Each call runs in its own transaction, so a failure
//! part-way through leaves nothing behind. Nothing here ever updates or
//! deletes an existing row.

use cardex_catalog::slug::{SeoContext, build_seo_path};
use cardex_catalog::types::*;
use rusqlite::{Connection, ToSql, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with key '{key}'")]
    NotFound { entity_type: String, key: String },
}

/// Result of an insert-or-fetch: the row id and whether this call created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub id: i64,
    pub created: bool,
}

impl Upserted {
    fn existing(id: i64) -> Self {
        Self { id, created: false }
    }

    fn created(id: i64) -> Self {
        Self { id, created: true }
    }
}

/// The unique column a row is looked up by before it is inserted.
///
/// `table` and `column` are always compile-time constants; only `value` comes
/// from the data and it is always bound as a parameter.
pub struct EntityKey<'a> {
    pub table: &'static str,
    pub column: &'static str,
    pub value: &'a dyn ToSql,
}

impl<'a> EntityKey<'a> {
    pub fn slug(table: &'static str, slug: &'a String) -> Self {
        Self {
            table,
            column: "slug",
            value: slug,
        }
    }
}

/// Find the id of the row matching `key`.
pub fn find_id(conn: &Connection, key: &EntityKey<'_>) -> Result<Option<i64>, OperationError> {
    let sql = format!(
        "SELECT id FROM {} WHERE {} = ?1 LIMIT 1",
        key.table, key.column
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let result = stmt.query_row(params![key.value], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look up `key`; if absent, run `insert` and return the id it produced.
///
/// The lookup and the insert share one transaction. Any error rolls the
/// transaction back before it is returned.
pub fn find_or_insert<F>(
    conn: &Connection,
    key: EntityKey<'_>,
    insert: F,
) -> Result<Upserted, OperationError>
where
    F: FnOnce(&Connection) -> Result<i64, OperationError>,
{
    let tx = conn.unchecked_transaction()?;
    let outcome = match find_id(&tx, &key)? {
        Some(id) => Upserted::existing(id),
        None => Upserted::created(insert(&tx)?),
    };
    tx.commit()?;
    Ok(outcome)
}

// ── Bloc Operations ─────────────────────────────────────────────────────────

pub fn insert_bloc(conn: &Connection, bloc: &NewBloc) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("bloc", &bloc.slug), |tx| {
        tx.execute(
            "INSERT INTO bloc (slug, tcg_language_id, serie_number, position)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                bloc.slug,
                bloc.tcg_language_id,
                bloc.set_number,
                bloc.position
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

pub fn insert_bloc_translation(
    conn: &Connection,
    t: &NewBlocTranslation,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("bloc_translation", &t.slug), |tx| {
        tx.execute(
            "INSERT INTO bloc_translation (slug, bloc_id, name, description, translation_language_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![t.slug, t.bloc_id, t.name, t.description, t.language_id],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

// ── Set Operations ──────────────────────────────────────────────────────────

pub fn insert_set(conn: &Connection, set: &NewSet) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("serie", &set.slug), |tx| {
        tx.execute(
            "INSERT INTO serie (slug, card_number, position, bloc_id) VALUES (?1, ?2, ?3, ?4)",
            params![set.slug, set.card_count, set.position, set.bloc_id],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

pub fn insert_set_translation(
    conn: &Connection,
    t: &NewSetTranslation,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("serie_translation", &t.slug), |tx| {
        tx.execute(
            "INSERT INTO serie_translation (slug, serie_id, name, description, translation_language_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![t.slug, t.set_id, t.name, t.description, t.language_id],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

// ── Card Operations ─────────────────────────────────────────────────────────

pub fn insert_card(conn: &Connection, card: &NewCard) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("card", &card.slug), |tx| {
        tx.execute(
            "INSERT INTO card (slug, position, category_id, rarity_id, serie_id, illustrator_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                card.slug,
                card.position,
                card.category_id,
                card.rarity_id,
                card.set_id,
                card.illustrator_id,
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

/// Insert a card translation. The SEO path is derived from the card's set
/// and bloc only when the row is actually created.
pub fn insert_card_translation(
    conn: &Connection,
    t: &NewCardTranslation,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("card_translation", &t.slug), |tx| {
        let context = seo_context(tx, t.card_id, t.language_id)?;
        if context.is_none() {
            log::debug!("No set/bloc context for {}, using bare SEO name", t.slug);
        }
        let seo_path = build_seo_path(&t.name, context.as_ref());
        tx.execute(
            "INSERT INTO card_translation (slug, seo_path, card_id, translation_language_id, name, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                t.slug,
                seo_path,
                t.card_id,
                t.language_id,
                t.name,
                t.description
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

/// Gather the set and bloc names a card's SEO path is built from.
///
/// Returns `None` when the card is unknown or its set or bloc has no
/// translation in `language_id`.
pub fn seo_context(
    conn: &Connection,
    card_id: i64,
    language_id: i64,
) -> Result<Option<SeoContext>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT c.position, s.card_number, st.name, bt.name, tl.slug
         FROM card c
         JOIN serie s ON s.id = c.serie_id
         JOIN bloc b ON b.id = s.bloc_id
         JOIN tcg_language tl ON tl.id = b.tcg_language_id
         LEFT JOIN serie_translation st
             ON st.serie_id = s.id AND st.translation_language_id = ?2
         LEFT JOIN bloc_translation bt
             ON bt.bloc_id = b.id AND bt.translation_language_id = ?2
         WHERE c.id = ?1",
    )?;
    let result = stmt.query_row(params![card_id, language_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
        ))
    });
    match result {
        Ok((position, set_card_count, Some(set_name), Some(bloc_name), tcg_slug)) => {
            Ok(Some(SeoContext {
                position,
                set_card_count,
                set_name,
                bloc_name,
                tcg_slug,
            }))
        }
        Ok(_) => Ok(None),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Record that a card exists in a print variant. Adding the same pair twice
/// is not an error; the return value tells whether a row was added.
pub fn insert_card_variant(
    conn: &Connection,
    card_id: i64,
    variant_name: &str,
) -> Result<bool, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let key = EntityKey {
        table: "variant",
        column: "name",
        value: &variant_name,
    };
    let variant_id = match find_id(&tx, &key)? {
        Some(id) => id,
        None => {
            tx.execute("INSERT INTO variant (name) VALUES (?1)", params![variant_name])?;
            tx.last_insert_rowid()
        }
    };
    let added = tx.execute(
        "INSERT OR IGNORE INTO card_variant (card_id, variant_id) VALUES (?1, ?2)",
        params![card_id, variant_id],
    )?;
    tx.commit()?;
    Ok(added > 0)
}

// ── Card Detail Operations ──────────────────────────────────────────────────

pub fn insert_pokemon_card(
    conn: &Connection,
    card: &NewPokemonCard,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("pokemon_card", &card.slug), |tx| {
        tx.execute(
            "INSERT INTO pokemon_card (slug, card_id, pokemon_id, hp, level)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![card.slug, card.card_id, card.pokemon_id, card.hp, card.level],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

/// Attach an element to a pokémon card. Duplicates are absorbed.
pub fn insert_pokemon_card_element(
    conn: &Connection,
    pokemon_card_id: i64,
    element_id: i64,
) -> Result<bool, OperationError> {
    let added = conn.execute(
        "INSERT OR IGNORE INTO pokemon_card_element (pokemon_card_id, element_id) VALUES (?1, ?2)",
        params![pokemon_card_id, element_id],
    )?;
    Ok(added > 0)
}

pub fn insert_energy_card(
    conn: &Connection,
    card: &NewEnergyCard,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("energy_card", &card.slug), |tx| {
        tx.execute(
            "INSERT INTO energy_card (slug, card_id, element_id) VALUES (?1, ?2, ?3)",
            params![card.slug, card.card_id, card.element_id],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

pub fn insert_trainer_card(
    conn: &Connection,
    card: &NewTrainerCard,
) -> Result<Upserted, OperationError> {
    find_or_insert(conn, EntityKey::slug("trainer_card", &card.slug), |tx| {
        tx.execute(
            "INSERT INTO trainer_card (slug, card_id) VALUES (?1, ?2)",
            params![card.slug, card.card_id],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

// ── Pokémon Operations ──────────────────────────────────────────────────────

/// Insert a species keyed by its dex id, plus its name in one language.
///
/// The dex id is the primary key, so the returned id is always
/// `pokemon.dex_id`. `created` reports whether the species row is new; a
/// missing translation for an existing species is still added.
pub fn insert_pokemon(conn: &Connection, pokemon: &NewPokemon) -> Result<Upserted, OperationError> {
    let tx = conn.unchecked_transaction()?;

    let key = EntityKey {
        table: "pokemon",
        column: "id",
        value: &pokemon.dex_id,
    };
    let created = match find_id(&tx, &key)? {
        Some(_) => false,
        None => {
            tx.execute("INSERT INTO pokemon (id) VALUES (?1)", params![pokemon.dex_id])?;
            true
        }
    };

    let translation_key = EntityKey::slug("pokemon_translation", &pokemon.translation_slug);
    if find_id(&tx, &translation_key)?.is_none() {
        tx.execute(
            "INSERT OR IGNORE INTO pokemon_translation (slug, pokemon_id, name, translation_language_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                pokemon.translation_slug,
                pokemon.dex_id,
                pokemon.name,
                pokemon.language_id
            ],
        )?;
    }

    tx.commit()?;
    Ok(Upserted {
        id: pokemon.dex_id,
        created,
    })
}

/// Find a species by its name in one language.
pub fn find_pokemon_by_name(
    conn: &Connection,
    name: &str,
    language_id: i64,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT pokemon_id FROM pokemon_translation
         WHERE name = ?1 AND translation_language_id = ?2 LIMIT 1",
    )?;
    let result = stmt.query_row(params![name, language_id], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Illustrator Operations ──────────────────────────────────────────────────

/// Insert an illustrator keyed by name.
pub fn insert_illustrator(conn: &Connection, name: &str) -> Result<Upserted, OperationError> {
    let key = EntityKey {
        table: "illustrator",
        column: "name",
        value: &name,
    };
    find_or_insert(conn, key, |tx| {
        tx.execute("INSERT INTO illustrator (name) VALUES (?1)", params![name])?;
        Ok(tx.last_insert_rowid())
    })
}

// ── Localized Lookup Operations ─────────────────────────────────────────────

/// Lookup tables whose rows are created on first sight of a new name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Rarity,
    Element,
}

impl LookupTable {
    fn table(&self) -> &'static str {
        match self {
            Self::Rarity => "rarity",
            Self::Element => "element",
        }
    }

    fn translation_table(&self) -> &'static str {
        match self {
            Self::Rarity => "rarity_translation",
            Self::Element => "element_translation",
        }
    }

    fn owner_column(&self) -> &'static str {
        match self {
            Self::Rarity => "rarity_id",
            Self::Element => "element_id",
        }
    }
}

/// Find a rarity or element by its exact name in one language.
pub fn find_lookup_by_name(
    conn: &Connection,
    table: LookupTable,
    name: &str,
    language_id: i64,
) -> Result<Option<i64>, OperationError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE name = ?1 AND translation_language_id = ?2 LIMIT 1",
        table.owner_column(),
        table.translation_table()
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let result = stmt.query_row(params![name, language_id], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a rarity or element keyed by slug, together with its name in one
/// language.
///
/// Two languages can spell a value so that both fold to the same slug; the
/// second one then reuses the existing row and only gains its translation.
pub fn insert_lookup(
    conn: &Connection,
    table: LookupTable,
    lookup: &NewLookup,
) -> Result<Upserted, OperationError> {
    let tx = conn.unchecked_transaction()?;

    let key = EntityKey::slug(table.table(), &lookup.slug);
    let outcome = match find_id(&tx, &key)? {
        Some(id) => Upserted::existing(id),
        None => {
            let sql = format!("INSERT INTO {} (slug) VALUES (?1)", table.table());
            tx.execute(&sql, params![lookup.slug])?;
            Upserted::created(tx.last_insert_rowid())
        }
    };

    let sql = format!(
        "INSERT OR IGNORE INTO {} ({}, name, translation_language_id) VALUES (?1, ?2, ?3)",
        table.translation_table(),
        table.owner_column()
    );
    tx.execute(&sql, params![outcome.id, lookup.name, lookup.language_id])?;

    tx.commit()?;
    Ok(outcome)
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, language, imported_at,
             records_created, records_skipped, errors)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source_name,
            log.language,
            log.imported_at,
            log.records_created,
            log.records_skipped,
            log.errors,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
