//! SQLite persistence layer for the card catalog.
//!
//! Provides schema creation and seeding, the insert-or-fetch operations the
//! ingestion pipeline writes through, and read queries, backed by SQLite
//! (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    EntityKey, LookupTable, OperationError, Upserted, find_id, find_or_insert,
    find_lookup_by_name, find_pokemon_by_name, insert_bloc, insert_bloc_translation, insert_card,
    insert_card_translation, insert_card_variant, insert_energy_card, insert_illustrator,
    insert_import_log, insert_lookup, insert_pokemon, insert_pokemon_card,
    insert_pokemon_card_element, insert_set, insert_set_translation, insert_trainer_card,
    seo_context,
};
pub use queries::{
    CatalogStats, PokemonCardRow, SetCardRow, cards_in_set, cards_with_detail, catalog_stats,
    category_names, detail_exists, elements_for_card, find_card_by_slug, find_set_by_slug,
    list_categories, list_import_logs, pokemon_cards_in_set, variants_for_card,
};
pub use schema::{SchemaError, open_database, open_memory};
