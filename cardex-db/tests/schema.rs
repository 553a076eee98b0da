use cardex_db::open_memory;
use cardex_db::schema::{CURRENT_VERSION, SchemaError, create_schema, open_database};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();

    let variants: i64 = conn
        .query_row("SELECT COUNT(*) FROM variant", [], |row| row.get(0))
        .unwrap();
    assert_eq!(variants, 5, "reseeding must not duplicate variants");
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "translation_language",
        "tcg_language",
        "bloc",
        "bloc_translation",
        "serie",
        "serie_translation",
        "category",
        "category_translation",
        "rarity",
        "rarity_translation",
        "element",
        "element_translation",
        "illustrator",
        "variant",
        "card",
        "card_translation",
        "card_variant",
        "pokemon",
        "pokemon_translation",
        "pokemon_card",
        "pokemon_card_element",
        "energy_card",
        "trainer_card",
        "import_log",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn seeds_languages_and_categories() {
    let conn = open_memory().unwrap();

    let tcg: String = conn
        .query_row(
            "SELECT slug FROM tcg_language WHERE translation_language_id = 3",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tcg, "poke-jp");

    let energy_fr: String = conn
        .query_row(
            "SELECT ct.name FROM category_translation ct
             JOIN category c ON c.id = ct.category_id
             WHERE c.slug = 'category-energy' AND ct.translation_language_id = 1",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(energy_fr, "Énergie");
}

#[test]
fn open_database_on_disk_then_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO illustrator (name) VALUES ('Mitsuhiro Arita')", [])
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM illustrator", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }

    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {other:?}"),
    }
}
