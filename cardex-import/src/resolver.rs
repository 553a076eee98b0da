//! Map free-text names from the source to catalog row ids.
//!
//! Categories are a closed, seeded set and are resolved from an in-memory
//! [`CatalogContext`] built once per run. Rarities and elements are looked up
//! by exact name in the run's language and, when allowed, created on first
//! sight. Pokémon species are looked up through their translated names.

use std::collections::HashMap;

use cardex_catalog::slug::{element_slug, rarity_slug};
use cardex_catalog::species::species_candidates;
use cardex_catalog::types::{CardKind, Language, NewLookup};
use cardex_db::operations::{self, LookupTable, OperationError};
use cardex_db::queries;
use rusqlite::Connection;

/// Element used for energy cards whose name names no known element.
pub const SPECIAL_ELEMENT: &str = "Special";

/// Per-run lookup state: the category names of one language and the kind
/// each category id stands for.
#[derive(Debug, Clone)]
pub struct CatalogContext {
    language: Language,
    category_ids: HashMap<String, i64>,
    kinds: HashMap<i64, CardKind>,
}

impl CatalogContext {
    /// Read the category tables once.
    pub fn load(conn: &Connection, language: Language) -> Result<Self, OperationError> {
        let category_ids = queries::category_names(conn, language.id())?
            .into_iter()
            .map(|(name, id)| (name.to_lowercase(), id))
            .collect();

        let kinds = queries::list_categories(conn)?
            .into_iter()
            .filter_map(|(id, slug)| CardKind::from_category_slug(&slug).map(|k| (id, k)))
            .collect();

        Ok(Self {
            language,
            category_ids,
            kinds,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Category id for a category name as the source spells it.
    ///
    /// Returns `None` when the name matches no category in this language.
    pub fn resolve_category_id(&self, raw_name: &str) -> Option<i64> {
        let name = category_alias(self.language, raw_name.trim());
        self.category_ids.get(&name.to_lowercase()).copied()
    }

    /// The card kind a category id stands for.
    pub fn kind_of(&self, category_id: i64) -> Option<CardKind> {
        self.kinds.get(&category_id).copied()
    }
}

/// Map the source's spelling of a category to the catalog's name for it.
fn category_alias(language: Language, raw: &str) -> &str {
    match (language, raw) {
        (Language::Fr, "Energy" | "Energie") => "Énergie",
        (Language::Fr, "Trainer") => "Dresseur",
        (Language::Fr | Language::En, "Pokemon") => "Pokémon",
        (Language::Jp, "Pokemon" | "Pokémon") => "ポケモン",
        (Language::Jp, "Energy") => "エネルギー",
        (Language::Jp, "Trainer" | "トレーナー") => "トレーナーズ",
        _ => raw,
    }
}

/// Rarity id for a rarity name, creating the rarity when `auto_create` is
/// set and the name is unknown.
pub fn resolve_rarity_id(
    conn: &Connection,
    language: Language,
    raw_name: &str,
    auto_create: bool,
) -> Result<Option<i64>, OperationError> {
    resolve_lookup(
        conn,
        LookupTable::Rarity,
        language,
        raw_name,
        auto_create,
        rarity_slug,
    )
}

/// Element id for an element name, creating the element when `auto_create`
/// is set and the name is unknown. "Énergie Feu" and "Feu" share a slug.
pub fn resolve_element_id(
    conn: &Connection,
    language: Language,
    raw_name: &str,
    auto_create: bool,
) -> Result<Option<i64>, OperationError> {
    resolve_lookup(
        conn,
        LookupTable::Element,
        language,
        raw_name,
        auto_create,
        element_slug,
    )
}

fn resolve_lookup(
    conn: &Connection,
    table: LookupTable,
    language: Language,
    raw_name: &str,
    auto_create: bool,
    make_slug: fn(&str) -> String,
) -> Result<Option<i64>, OperationError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(id) = operations::find_lookup_by_name(conn, table, name, language.id())? {
        return Ok(Some(id));
    }

    if !auto_create {
        log::warn!("{:?} '{}' not found for language {}", table, name, language);
        return Ok(None);
    }

    let slug = make_slug(name);
    let upserted = operations::insert_lookup(
        conn,
        table,
        &NewLookup {
            slug: slug.clone(),
            name: name.to_string(),
            language_id: language.id(),
        },
    )?;
    if upserted.created {
        log::info!("Created {:?} {} ('{}')", table, slug, name);
    }
    Ok(Some(upserted.id))
}

/// Names tried, in order, to find the element of an energy card.
pub fn energy_element_candidates(card_name: &str) -> Vec<&str> {
    let mut tokens = card_name.split_whitespace();
    let mut candidates = Vec::with_capacity(3);
    if let Some(first) = tokens.next() {
        candidates.push(first);
    }
    if let Some(second) = tokens.next() {
        candidates.push(second);
    }
    candidates.push(SPECIAL_ELEMENT);
    candidates
}

/// Element of an energy card, from its name.
///
/// Tries the first word, then the second, then "Special", and stops at the
/// first existing element. Only "Special" may be created, and only with
/// `auto_create`.
pub fn resolve_energy_element(
    conn: &Connection,
    language: Language,
    card_name: &str,
    auto_create: bool,
) -> Result<Option<i64>, OperationError> {
    for candidate in energy_element_candidates(card_name) {
        if let Some(id) =
            operations::find_lookup_by_name(conn, LookupTable::Element, candidate, language.id())?
        {
            log::debug!("Energy '{}' resolved to element '{}'", card_name, candidate);
            return Ok(Some(id));
        }
    }
    resolve_element_id(conn, language, SPECIAL_ELEMENT, auto_create)
}

/// Species id for a card without a dex id, found through translated names.
///
/// Never guesses: `None` means no candidate name matched.
pub fn resolve_pokemon_by_name(
    conn: &Connection,
    language: Language,
    card_name: &str,
) -> Result<Option<i64>, OperationError> {
    for candidate in species_candidates(card_name) {
        if let Some(id) = operations::find_pokemon_by_name(conn, &candidate, language.id())? {
            log::debug!("'{}' matched species #{} via '{}'", card_name, id, candidate);
            return Ok(Some(id));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_per_language() {
        assert_eq!(category_alias(Language::Fr, "Energy"), "Énergie");
        assert_eq!(category_alias(Language::Fr, "Trainer"), "Dresseur");
        assert_eq!(category_alias(Language::En, "Energy"), "Energy");
        assert_eq!(category_alias(Language::Jp, "Trainer"), "トレーナーズ");
        assert_eq!(category_alias(Language::En, "Item"), "Item");
    }

    #[test]
    fn energy_candidates_keep_order() {
        assert_eq!(
            energy_element_candidates("Énergie Feu"),
            vec!["Énergie", "Feu", "Special"]
        );
        assert_eq!(
            energy_element_candidates("Fire Energy"),
            vec!["Fire", "Energy", "Special"]
        );
        assert_eq!(energy_element_candidates("Darkness"), vec!["Darkness", "Special"]);
        assert_eq!(energy_element_candidates(""), vec!["Special"]);
    }
}
