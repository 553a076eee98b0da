//! Data integrity report for one set.
//!
//! Every card of the set is checked for the rows an ingestion run should
//! have written: its translation, its illustrator, and the detail row of its
//! category with sensible values. The report can be rendered as JSON or
//! turned into SQL statements that stub out the missing detail rows.

use std::collections::{BTreeMap, HashMap};

use cardex_catalog::types::{CardKind, Language};
use cardex_db::operations::OperationError;
use cardex_db::queries::{self, PokemonCardRow, SetCardRow};
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

use crate::resolver::CatalogContext;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Set not found: {0}")]
    SetNotFound(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingTranslation,
    MissingIllustrator,
    InvalidIllustrator,
    UnknownCategory,
    MissingPokemonCard,
    InvalidPokemonId,
    InvalidHp,
    InvalidLevel,
    MissingEnergyCard,
    MissingTrainerCard,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingTranslation
            | Self::MissingIllustrator
            | Self::InvalidIllustrator
            | Self::UnknownCategory
            | Self::MissingPokemonCard => Severity::Critical,
            Self::InvalidPokemonId
            | Self::InvalidHp
            | Self::InvalidLevel
            | Self::MissingEnergyCard => Severity::Warning,
            Self::MissingTrainerCard => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTranslation => "missing_translation",
            Self::MissingIllustrator => "missing_illustrator",
            Self::InvalidIllustrator => "invalid_illustrator",
            Self::UnknownCategory => "unknown_category",
            Self::MissingPokemonCard => "missing_pokemon_card",
            Self::InvalidPokemonId => "invalid_pokemon_id",
            Self::InvalidHp => "invalid_hp",
            Self::InvalidLevel => "invalid_level",
            Self::MissingEnergyCard => "missing_energy_card",
            Self::MissingTrainerCard => "missing_trainer_card",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingTranslation => "Missing card_translation entry",
            Self::MissingIllustrator => "Card has no illustrator",
            Self::InvalidIllustrator => "Illustrator does not exist",
            Self::UnknownCategory => "Category is not pokemon, energy or trainer",
            Self::MissingPokemonCard => "Missing pokemon_card entry (species, hp, level)",
            Self::InvalidPokemonId => "pokemon_id is 0",
            Self::InvalidHp => "HP is 0",
            Self::InvalidLevel => "Level is empty",
            Self::MissingEnergyCard => "Missing energy_card entry",
            Self::MissingTrainerCard => "Missing trainer_card entry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: &'static str,
}

impl From<IssueKind> for Issue {
    fn from(kind: IssueKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: kind.message(),
        }
    }
}

/// A card with at least one issue.
#[derive(Debug, Clone, Serialize)]
pub struct CardIssues {
    pub card_id: i64,
    pub slug: String,
    pub position: String,
    pub name: Option<String>,
    pub category: Option<CardKind>,
    pub issues: Vec<Issue>,
}

impl CardIssues {
    pub fn worst(&self) -> Severity {
        self.issues
            .iter()
            .map(|i| i.severity)
            .max()
            .unwrap_or(Severity::Info)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub set_id: i64,
    pub set_slug: String,
    pub set_name: Option<String>,
    pub expected_cards: i64,
    pub actual_cards: usize,
    pub cards_with_issues: usize,
    pub cards_ok: usize,
    pub issues_by_category: BTreeMap<String, usize>,
    pub issues_by_type: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetReport {
    pub summary: Summary,
    pub cards: Vec<CardIssues>,
    pub generated_at: String,
}

impl SetReport {
    pub fn is_clean(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_critical(&self) -> bool {
        self.cards.iter().any(|c| c.worst() == Severity::Critical)
    }

    pub fn to_json(&self) -> Result<String, VerifyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// SQL statements that insert placeholder detail rows for the cards
    /// missing one. Inserts that need a value only a human can supply are
    /// left commented out with placeholders.
    pub fn fix_suggestions(&self) -> Vec<String> {
        let mut fixes = Vec::new();
        for card in &self.cards {
            let name = card
                .name
                .as_deref()
                .unwrap_or("unnamed")
                .replace(['\n', '\r'], " ");
            let label = format!("-- Card #{} ({})", card.position, name);
            let slug = card.slug.replace('\'', "''");
            for issue in &card.issues {
                let sql = match issue.kind {
                    IssueKind::MissingPokemonCard => format!(
                        "{label}: missing pokemon_card\n\
                         -- fill in the dex id, hp and level, then uncomment\n\
                         -- INSERT INTO pokemon_card (slug, card_id, pokemon_id, hp, level)\n\
                         -- VALUES ('{slug}/pokemon', {id}, <dex id>, <hp>, '<level>');",
                        id = card.card_id
                    ),
                    IssueKind::MissingEnergyCard => format!(
                        "{label}: missing energy_card\n\
                         -- fill in the element id, then uncomment\n\
                         -- INSERT INTO energy_card (slug, card_id, element_id)\n\
                         -- VALUES ('{slug}/energy', {id}, <element id>);",
                        id = card.card_id
                    ),
                    IssueKind::MissingTrainerCard => format!(
                        "{label}: missing trainer_card\n\
                         INSERT INTO trainer_card (slug, card_id)\n\
                         VALUES ('{slug}/trainer', {id});",
                        id = card.card_id
                    ),
                    _ => continue,
                };
                fixes.push(sql);
            }
        }
        fixes
    }
}

/// Check every card of the set with slug `set_slug`.
pub fn verify_set(
    conn: &Connection,
    set_slug: &str,
    language: Language,
) -> Result<SetReport, VerifyError> {
    let set = queries::find_set_by_slug(conn, set_slug, language.id())?
        .ok_or_else(|| VerifyError::SetNotFound(set_slug.to_string()))?;
    let ctx = CatalogContext::load(conn, language)?;

    let cards = queries::cards_in_set(conn, set.id, language.id())?;
    let pokemon: HashMap<i64, PokemonCardRow> = queries::pokemon_cards_in_set(conn, set.id)?
        .into_iter()
        .map(|row| (row.card_id, row))
        .collect();
    let energy = queries::cards_with_detail(conn, CardKind::Energy, set.id)?;
    let trainer = queries::cards_with_detail(conn, CardKind::Trainer, set.id)?;

    let mut flagged = Vec::new();
    for row in &cards {
        let category = ctx.kind_of(row.card.category_id);
        let mut kinds = check_common(row);
        match category {
            Some(CardKind::Pokemon) => kinds.extend(check_pokemon(pokemon.get(&row.card.id))),
            Some(CardKind::Energy) if !energy.contains(&row.card.id) => {
                kinds.push(IssueKind::MissingEnergyCard)
            }
            Some(CardKind::Trainer) if !trainer.contains(&row.card.id) => {
                kinds.push(IssueKind::MissingTrainerCard)
            }
            Some(_) => {}
            None => kinds.push(IssueKind::UnknownCategory),
        }
        let issues: Vec<Issue> = kinds.into_iter().map(Issue::from).collect();

        if !issues.is_empty() {
            flagged.push(CardIssues {
                card_id: row.card.id,
                slug: row.card.slug.clone(),
                position: row.card.position.clone(),
                name: row.name.clone(),
                category,
                issues,
            });
        }
    }

    let mut issues_by_category = BTreeMap::new();
    let mut issues_by_type = BTreeMap::new();
    for card in &flagged {
        let label = card.category.map_or("Unknown", |k| k.label());
        *issues_by_category.entry(label.to_string()).or_insert(0) += 1;
        for issue in &card.issues {
            *issues_by_type.entry(issue.kind.as_str()).or_insert(0) += 1;
        }
    }

    let summary = Summary {
        set_id: set.id,
        set_slug: set.slug,
        set_name: set.name,
        expected_cards: set.card_count,
        actual_cards: cards.len(),
        cards_with_issues: flagged.len(),
        cards_ok: cards.len() - flagged.len(),
        issues_by_category,
        issues_by_type,
    };

    Ok(SetReport {
        summary,
        cards: flagged,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn check_common(row: &SetCardRow) -> Vec<IssueKind> {
    let mut issues = Vec::new();
    if row.name.is_none() {
        issues.push(IssueKind::MissingTranslation);
    }
    match row.card.illustrator_id {
        None => issues.push(IssueKind::MissingIllustrator),
        Some(_) if !row.illustrator_known => issues.push(IssueKind::InvalidIllustrator),
        Some(_) => {}
    }
    issues
}

fn check_pokemon(detail: Option<&PokemonCardRow>) -> Vec<IssueKind> {
    let Some(detail) = detail else {
        return vec![IssueKind::MissingPokemonCard];
    };
    let mut issues = Vec::new();
    if detail.pokemon_id == 0 {
        issues.push(IssueKind::InvalidPokemonId);
    }
    if detail.hp == 0 {
        issues.push(IssueKind::InvalidHp);
    }
    if detail.level.trim().is_empty() {
        issues.push(IssueKind::InvalidLevel);
    }
    issues
}
