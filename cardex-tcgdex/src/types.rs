use cardex_catalog::types::{UNKNOWN_ILLUSTRATOR, VARIANT_NAMES};
use serde::{Deserialize, Deserializer};

/// Entry of `GET /series`.
#[derive(Debug, Clone, Deserialize)]
pub struct SerieBrief {
    pub id: String,
    pub name: String,
}

/// Response of `GET /series/{id}`: a bloc with its sets.
#[derive(Debug, Clone, Deserialize)]
pub struct SerieDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetBrief>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBrief {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub card_count: CardCount,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CardCount {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub official: i64,
}

/// Response of `GET /sets/{id}`: a set with its card list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub card_count: CardCount,
    #[serde(default)]
    pub cards: Vec<CardBrief>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBrief {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub local_id: String,
    pub name: String,
}

/// Response of `GET /cards/{id}`. Only the fields the catalog stores.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub local_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub illustrator: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub dex_id: Vec<i64>,
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub level: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub variants: Variants,
}

impl CardDetail {
    /// The illustrator, or the "Unknown" sentinel when absent or blank.
    pub fn illustrator_or_unknown(&self) -> &str {
        match self.illustrator.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_ILLUSTRATOR,
        }
    }

    /// Flavor text for pokémon, rule text (`effect`) for the rest.
    pub fn description_or_effect(&self) -> Option<&str> {
        non_empty(self.description.as_deref()).or_else(|| non_empty(self.effect.as_deref()))
    }

    /// Level as stored: "0" when the card has none.
    pub fn level_or_default(&self) -> String {
        non_empty(self.level.as_deref())
            .unwrap_or("0")
            .to_string()
    }

    pub fn hp_or_default(&self) -> i64 {
        self.hp.unwrap_or(0)
    }

    /// First national dex id, if the card lists any.
    pub fn first_dex_id(&self) -> Option<i64> {
        self.dex_id.first().copied()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// The five print-variant flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variants {
    #[serde(default)]
    pub first_edition: bool,
    #[serde(default)]
    pub holo: bool,
    #[serde(default)]
    pub normal: bool,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub w_promo: bool,
}

impl Variants {
    /// Names of the flags that are set, in catalog order.
    pub fn enabled(&self) -> Vec<&'static str> {
        let flags = [
            self.first_edition,
            self.holo,
            self.normal,
            self.reverse,
            self.w_promo,
        ];
        VARIANT_NAMES
            .iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(d).map(|v| v.map(String::from))
}
