//! SQLite schema creation, seeding, and version tracking.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version {found} is newer than this build supports ({expected})")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist, then seed the static
/// lookup rows (languages, categories, variants).
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute_batch(SEED_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    if version < CURRENT_VERSION {
        log::debug!(
            "Initializing schema at {} (found version {})",
            path.display(),
            version
        );
        create_schema(&conn)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version)
         SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM schema_version WHERE version = ?1)",
        [version],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Languages a translation can be written in
CREATE TABLE IF NOT EXISTS translation_language (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE
);

-- One catalog tree per language (poke-fr, poke-en, poke-jp)
CREATE TABLE IF NOT EXISTS tcg_language (
    id INTEGER PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id)
);

-- Blocs (series) and sets
CREATE TABLE IF NOT EXISTS bloc (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    tcg_language_id INTEGER NOT NULL REFERENCES tcg_language(id),
    serie_number INTEGER NOT NULL DEFAULT 0,
    position INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS bloc_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    bloc_id INTEGER NOT NULL REFERENCES bloc(id),
    name TEXT NOT NULL,
    description TEXT,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(bloc_id, translation_language_id)
);

CREATE TABLE IF NOT EXISTS serie (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    card_number INTEGER NOT NULL DEFAULT 0,
    position INTEGER NOT NULL,
    bloc_id INTEGER NOT NULL REFERENCES bloc(id)
);
CREATE INDEX IF NOT EXISTS idx_serie_bloc ON serie(bloc_id);

CREATE TABLE IF NOT EXISTS serie_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    serie_id INTEGER NOT NULL REFERENCES serie(id),
    name TEXT NOT NULL,
    description TEXT,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(serie_id, translation_language_id)
);

-- Lookup tables
CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS category_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES category(id),
    name TEXT NOT NULL,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(category_id, translation_language_id)
);

CREATE TABLE IF NOT EXISTS rarity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS rarity_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rarity_id INTEGER NOT NULL REFERENCES rarity(id),
    name TEXT NOT NULL,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(rarity_id, translation_language_id)
);
CREATE INDEX IF NOT EXISTS idx_rarity_translation_name ON rarity_translation(name, translation_language_id);

CREATE TABLE IF NOT EXISTS element (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS element_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    element_id INTEGER NOT NULL REFERENCES element(id),
    name TEXT NOT NULL,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(element_id, translation_language_id)
);
CREATE INDEX IF NOT EXISTS idx_element_translation_name ON element_translation(name, translation_language_id);

CREATE TABLE IF NOT EXISTS illustrator (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS variant (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Cards
CREATE TABLE IF NOT EXISTS card (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    position TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES category(id),
    rarity_id INTEGER REFERENCES rarity(id),
    serie_id INTEGER NOT NULL REFERENCES serie(id),
    illustrator_id INTEGER REFERENCES illustrator(id)
);
CREATE INDEX IF NOT EXISTS idx_card_serie ON card(serie_id);

CREATE TABLE IF NOT EXISTS card_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    seo_path TEXT NOT NULL,
    card_id INTEGER NOT NULL REFERENCES card(id),
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    name TEXT NOT NULL,
    description TEXT,
    UNIQUE(card_id, translation_language_id)
);

CREATE TABLE IF NOT EXISTS card_variant (
    card_id INTEGER NOT NULL REFERENCES card(id),
    variant_id INTEGER NOT NULL REFERENCES variant(id),
    PRIMARY KEY (card_id, variant_id)
);

-- Pokémon species, keyed by national dex id
CREATE TABLE IF NOT EXISTS pokemon (
    id INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS pokemon_translation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
    name TEXT NOT NULL,
    translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
    UNIQUE(pokemon_id, translation_language_id)
);
CREATE INDEX IF NOT EXISTS idx_pokemon_translation_name ON pokemon_translation(name, translation_language_id);

-- Category-specific card details (one row per card, matching its category)
CREATE TABLE IF NOT EXISTS pokemon_card (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    card_id INTEGER NOT NULL UNIQUE REFERENCES card(id),
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
    hp INTEGER NOT NULL DEFAULT 0,
    level TEXT NOT NULL DEFAULT '0'
);

CREATE TABLE IF NOT EXISTS pokemon_card_element (
    pokemon_card_id INTEGER NOT NULL REFERENCES pokemon_card(id),
    element_id INTEGER NOT NULL REFERENCES element(id),
    PRIMARY KEY (pokemon_card_id, element_id)
);

CREATE TABLE IF NOT EXISTS energy_card (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    card_id INTEGER NOT NULL UNIQUE REFERENCES card(id),
    element_id INTEGER NOT NULL REFERENCES element(id)
);

CREATE TABLE IF NOT EXISTS trainer_card (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    card_id INTEGER NOT NULL UNIQUE REFERENCES card(id)
);

-- Ingestion run tracking
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_name TEXT NOT NULL,
    language TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    records_created INTEGER DEFAULT 0,
    records_skipped INTEGER DEFAULT 0,
    errors INTEGER DEFAULT 0
);
"#;

const SEED_SQL: &str = r#"
INSERT OR IGNORE INTO translation_language (id, code) VALUES
    (1, 'fr'), (2, 'en'), (3, 'jp');

INSERT OR IGNORE INTO tcg_language (id, slug, translation_language_id) VALUES
    (1, 'poke-fr', 1), (2, 'poke-en', 2), (3, 'poke-jp', 3);

INSERT OR IGNORE INTO category (id, slug) VALUES
    (1, 'category-pokemon'), (2, 'category-energy'), (3, 'category-trainer');

INSERT OR IGNORE INTO category_translation (category_id, name, translation_language_id) VALUES
    (1, 'Pokémon', 1), (2, 'Énergie', 1), (3, 'Dresseur', 1),
    (1, 'Pokémon', 2), (2, 'Energy', 2), (3, 'Trainer', 2),
    (1, 'ポケモン', 3), (2, 'エネルギー', 3), (3, 'トレーナーズ', 3);

INSERT OR IGNORE INTO variant (name) VALUES
    ('firstEdition'), ('holo'), ('normal'), ('reverse'), ('wPromo');
"#;
