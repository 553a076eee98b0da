#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use cardex_catalog::types::Language;
use cardex_import::IngestOptions;
use cardex_tcgdex::*;

/// In-memory card source that records which cards were fetched.
pub struct FakeSource {
    pub language: Language,
    pub series: Vec<SerieBrief>,
    pub serie_details: HashMap<String, SerieDetail>,
    pub sets: HashMap<String, SetDetail>,
    pub cards: HashMap<String, CardDetail>,
    pub fetched_cards: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            series: Vec::new(),
            serie_details: HashMap::new(),
            sets: HashMap::new(),
            cards: HashMap::new(),
            fetched_cards: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bloc(mut self, id: &str, name: &str, sets: &[(&str, &str, i64)]) -> Self {
        self.series.push(SerieBrief {
            id: id.to_string(),
            name: name.to_string(),
        });
        let sets = sets
            .iter()
            .map(|(set_id, set_name, total)| SetBrief {
                id: set_id.to_string(),
                name: set_name.to_string(),
                card_count: CardCount {
                    total: *total,
                    official: *total,
                },
            })
            .collect();
        self.serie_details.insert(
            id.to_string(),
            SerieDetail {
                id: id.to_string(),
                name: name.to_string(),
                sets,
            },
        );
        self
    }

    /// Add a card to a set. `json` is the card detail as the API returns it;
    /// pass `None` to list the card without any detail behind it.
    pub fn with_card(mut self, set_id: &str, card_id: &str, local_id: &str, name: &str, json: Option<&str>) -> Self {
        let set = self
            .sets
            .entry(set_id.to_string())
            .or_insert_with(|| SetDetail {
                id: set_id.to_string(),
                name: set_id.to_string(),
                card_count: CardCount::default(),
                cards: Vec::new(),
            });
        set.cards.push(CardBrief {
            id: card_id.to_string(),
            local_id: local_id.to_string(),
            name: name.to_string(),
        });
        if let Some(json) = json {
            let detail: CardDetail = serde_json::from_str(json).unwrap();
            self.cards.insert(card_id.to_string(), detail);
        }
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched_cards.borrow().len()
    }
}

impl CardSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    fn language(&self) -> Language {
        self.language
    }

    fn series(&self) -> Result<Vec<SerieBrief>, SourceError> {
        Ok(self.series.clone())
    }

    fn serie(&self, id: &str) -> Result<SerieDetail, SourceError> {
        self.serie_details
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    fn set(&self, id: &str) -> Result<SetDetail, SourceError> {
        self.sets
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    fn card(&self, id: &str) -> Result<CardDetail, SourceError> {
        self.fetched_cards.borrow_mut().push(id.to_string());
        self.cards
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}

pub fn options() -> IngestOptions {
    IngestOptions {
        throttle: std::time::Duration::ZERO,
        ..IngestOptions::default()
    }
}

pub const PIKACHU: &str = r#"{
    "id": "sv1-025", "localId": "025", "name": "Pikachu", "category": "Pokemon",
    "illustrator": "Naoki Saito", "rarity": "Common",
    "dexId": [25], "hp": 60, "types": ["Electric"],
    "description": "It stores electricity in its cheeks.",
    "variants": {"firstEdition": false, "holo": false, "normal": true, "reverse": false, "wPromo": false}
}"#;

#[allow(dead_code)]
pub fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}
