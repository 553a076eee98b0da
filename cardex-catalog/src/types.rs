//! Data model types for the card catalog.
//!
//! These types represent the persistent catalog schema: blocs, sets, cards,
//! their translations, category-specific detail rows, and the lookup tables
//! (categories, rarities, elements, illustrators, variants) they reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Language ────────────────────────────────────────────────────────────────

/// A catalog language. Each language is ingested as its own TCG tree
/// (`poke-fr`, `poke-en`, `poke-jp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Jp,
}

#[derive(Debug, Error)]
#[error("Unknown language '{0}' (expected fr, en, or jp)")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Jp];

    /// Row id in the `translation_language` table.
    pub fn id(&self) -> i64 {
        match self {
            Self::Fr => 1,
            Self::En => 2,
            Self::Jp => 3,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Jp => "jp",
        }
    }

    /// Root slug of this language's catalog tree.
    pub fn tcg_slug(&self) -> &'static str {
        match self {
            Self::Fr => "poke-fr",
            Self::En => "poke-en",
            Self::Jp => "poke-jp",
        }
    }

    /// Language segment used by the TCGdex API.
    pub fn api_code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Jp => "ja",
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" => Ok(Self::Fr),
            "en" | "english" => Ok(Self::En),
            "jp" | "ja" | "japanese" => Ok(Self::Jp),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── Category ────────────────────────────────────────────────────────────────

/// The closed set of card categories. The category decides which detail
/// table holds the card's category-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Pokemon,
    Energy,
    Trainer,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Pokemon, CardKind::Energy, CardKind::Trainer];

    /// Slug of the matching `category` row.
    pub fn category_slug(&self) -> &'static str {
        match self {
            Self::Pokemon => "category-pokemon",
            Self::Energy => "category-energy",
            Self::Trainer => "category-trainer",
        }
    }

    pub fn from_category_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.category_slug() == slug)
    }

    /// Table holding this kind's detail rows.
    pub fn detail_table(&self) -> &'static str {
        match self {
            Self::Pokemon => "pokemon_card",
            Self::Energy => "energy_card",
            Self::Trainer => "trainer_card",
        }
    }

    /// Last slug segment of a detail row (`{card_slug}/{suffix}`).
    pub fn detail_suffix(&self) -> &'static str {
        match self {
            Self::Pokemon => "pokemon",
            Self::Energy => "energy",
            Self::Trainer => "trainer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pokemon => "Pokemon",
            Self::Energy => "Energy",
            Self::Trainer => "Trainer",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Variants ────────────────────────────────────────────────────────────────

/// Print variants a card can exist in, in the order they are recorded.
pub const VARIANT_NAMES: [&str; 5] = ["firstEdition", "holo", "normal", "reverse", "wPromo"];

/// Illustrator recorded when the source has none.
pub const UNKNOWN_ILLUSTRATOR: &str = "Unknown";

// ── Insert payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewBloc {
    pub slug: String,
    pub tcg_language_id: i64,
    pub set_number: i64,
    /// 1-based position among the blocs of a run.
    pub position: i64,
}

#[derive(Debug, Clone)]
pub struct NewBlocTranslation {
    pub slug: String,
    pub bloc_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewSet {
    pub slug: String,
    pub card_count: i64,
    pub position: i64,
    pub bloc_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewSetTranslation {
    pub slug: String,
    pub set_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub slug: String,
    /// Local id within the set as printed on the card ("001", "TG05").
    pub position: String,
    pub category_id: i64,
    pub rarity_id: Option<i64>,
    pub set_id: i64,
    pub illustrator_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewCardTranslation {
    pub slug: String,
    pub card_id: i64,
    pub language_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A pokémon species and its name in one language. The dex id is the
/// species' primary key across all languages.
#[derive(Debug, Clone)]
pub struct NewPokemon {
    pub dex_id: i64,
    pub translation_slug: String,
    pub name: String,
    pub language_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewPokemonCard {
    pub slug: String,
    pub card_id: i64,
    pub pokemon_id: i64,
    pub hp: i64,
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct NewEnergyCard {
    pub slug: String,
    pub card_id: i64,
    pub element_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewTrainerCard {
    pub slug: String,
    pub card_id: i64,
}

/// A localized lookup row (rarity or element) created on first sight.
#[derive(Debug, Clone)]
pub struct NewLookup {
    pub slug: String,
    pub name: String,
    pub language_id: i64,
}

// ── Rows ────────────────────────────────────────────────────────────────────

/// A card as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub id: i64,
    pub slug: String,
    pub position: String,
    pub category_id: i64,
    pub rarity_id: Option<i64>,
    pub set_id: i64,
    pub illustrator_id: Option<i64>,
}

/// A set as stored, with its name in one language when available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRow {
    pub id: i64,
    pub slug: String,
    pub card_count: i64,
    pub position: i64,
    pub bloc_id: i64,
    pub name: Option<String>,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one ingestion run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub language: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_skipped: i64,
    pub errors: i64,
}
