//! Slug and SEO path construction.
//!
//! Every catalog row is keyed by a path-like slug:
//! ```text
//! poke-fr/sv/sv1/25/pokemon
//! {tcg}/{bloc}/{set}/{localId}/{suffix}
//! ```
//! Source ids are zero-padded inconsistently ("sv01" vs "sv1", "001" vs "1"),
//! so each segment is canonicalized by dropping leading zeros from its
//! numeric runs before it becomes part of a slug.

/// Join already-normalized parts with `/`.
///
/// ```
/// use cardex_catalog::slug::build_slug;
///
/// assert_eq!(build_slug(&["poke-fr", "sv", "sv1"]), "poke-fr/sv/sv1");
/// ```
pub fn build_slug<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip leading zeros from every run of digits in a single path segment.
///
/// Alphabetic prefixes are kept and a run made only of zeros collapses to
/// a single `0`.
///
/// ```
/// use cardex_catalog::slug::clean_slug_segment;
///
/// assert_eq!(clean_slug_segment("sv01"), "sv1");
/// assert_eq!(clean_slug_segment("001"), "1");
/// assert_eq!(clean_slug_segment("sv1"), "sv1");
/// ```
pub fn clean_slug_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            out.push(c);
            continue;
        }

        let mut run = String::from(c);
        while let Some(&next) = chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            run.push(next);
            chars.next();
        }

        let trimmed = run.trim_start_matches('0');
        out.push_str(if trimmed.is_empty() { "0" } else { trimmed });
    }

    out
}

/// Apply [`clean_slug_segment`] to each `/`-delimited segment of a slug.
pub fn clean_slug(slug: &str) -> String {
    slug.split('/')
        .map(clean_slug_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Characters folded to an ASCII replacement before hyphenation.
const FOLDS: &[(char, &str)] = &[
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ä', "a"),
    ('ã', "a"),
    ('å', "a"),
    ('æ', "ae"),
    ('ç', "c"),
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ñ', "n"),
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('ö', "o"),
    ('õ', "o"),
    ('ø', "o"),
    ('œ', "oe"),
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ü', "u"),
    ('ý', "y"),
    ('ÿ', "y"),
    ('ß', "ss"),
    ('★', "star"),
    ('☆', "star"),
    ('♀', "f"),
    ('♂', "m"),
    ('δ', "delta"),
];

/// Punctuation removed outright, so "Farfetch'd" stays one word.
const STRIPPED: &[char] = &['\'', '’', '`', '"', '.', ',', ':', ';', '!', '?', '(', ')', '[', ']'];

/// Reduce a display name to `[a-z0-9-]`, suitable for URLs.
///
/// Lower-cases, folds accents and symbols through a fixed table, removes a
/// fixed punctuation set, turns every other run of non-alphanumerics into a
/// single hyphen, and trims hyphens at both ends. Applying it twice gives the
/// same result as applying it once.
///
/// ```
/// use cardex_catalog::slug::clean_seo_name;
///
/// assert_eq!(clean_seo_name("Méga-Diancie ★"), "mega-diancie-star");
/// assert_eq!(clean_seo_name("Professor's Research"), "professors-research");
/// ```
pub fn clean_seo_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if STRIPPED.contains(&c) {
            continue;
        }
        match FOLDS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => folded.push_str(to),
            None => folded.push(c),
        }
    }

    let mut out = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Set and bloc context a card's SEO path is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoContext {
    /// The card's local id within its set.
    pub position: String,
    pub set_card_count: i64,
    pub set_name: String,
    pub bloc_name: String,
    pub tcg_slug: String,
}

/// Languages whose `-poke-{lang}` path ending is spelled out as `-pokemon-{lang}`.
const SEO_LANGUAGES: [&str; 3] = ["fr", "en", "jp"];

/// Build the SEO path of a card translation.
///
/// With context the path is
/// `{card}-{position}-{setCardCount}-{setName}-{blocName}-{tcgSlug}`, each
/// component cleaned with [`clean_seo_name`], and a trailing `-poke-{lang}`
/// becomes `-pokemon-{lang}`. Only the end of the path is rewritten, so a card
/// named "Poke Ball" keeps its name. Without context the cleaned card name is
/// the whole path.
///
/// ```
/// use cardex_catalog::slug::{SeoContext, build_seo_path};
///
/// let ctx = SeoContext {
///     position: "025".into(),
///     set_card_count: 198,
///     set_name: "Écarlate et Violet".into(),
///     bloc_name: "Écarlate et Violet".into(),
///     tcg_slug: "poke-fr".into(),
/// };
/// assert_eq!(
///     build_seo_path("Pikachu", Some(&ctx)),
///     "pikachu-25-198-ecarlate-et-violet-ecarlate-et-violet-pokemon-fr"
/// );
/// assert_eq!(build_seo_path("Pikachu", None), "pikachu");
/// ```
pub fn build_seo_path(card_name: &str, context: Option<&SeoContext>) -> String {
    let Some(ctx) = context else {
        return clean_seo_name(card_name);
    };

    let components = [
        clean_seo_name(card_name),
        clean_seo_name(&clean_slug_segment(&ctx.position)),
        ctx.set_card_count.to_string(),
        clean_seo_name(&ctx.set_name),
        clean_seo_name(&ctx.bloc_name),
        clean_seo_name(&ctx.tcg_slug),
    ];
    let path = components
        .iter()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("-");

    spell_out_pokemon_suffix(path)
}

fn spell_out_pokemon_suffix(path: String) -> String {
    for lang in SEO_LANGUAGES {
        let suffix = format!("-poke-{lang}");
        if let Some(head) = path.strip_suffix(&suffix) {
            return format!("{head}-pokemon-{lang}");
        }
    }
    path
}

/// Slug of a rarity created from its display name ("Peu Commune" → "rarity-peu-commune").
pub fn rarity_slug(name: &str) -> String {
    format!("rarity-{}", clean_seo_name(name))
}

/// Localized prefixes dropped from element names before slugging.
const ENERGY_PREFIXES: [&str; 3] = ["Energy ", "Énergie ", "Energie "];

/// Slug of an element created from its display name.
///
/// A leading "Energy "/"Énergie " is dropped first, so "Énergie Feu" and
/// "Feu" share `element-feu`.
pub fn element_slug(name: &str) -> String {
    let trimmed = name.trim();
    let bare = ENERGY_PREFIXES
        .iter()
        .find_map(|p| trimmed.strip_prefix(p))
        .unwrap_or(trimmed);
    format!("element-{}", clean_seo_name(bare))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_rewrite_only_matches_at_end() {
        assert_eq!(
            spell_out_pokemon_suffix("poke-ball-1-poke-en".to_string()),
            "poke-ball-1-pokemon-en"
        );
        assert_eq!(
            spell_out_pokemon_suffix("poke-fr-ball".to_string()),
            "poke-fr-ball"
        );
        assert_eq!(
            spell_out_pokemon_suffix("x-poke-de".to_string()),
            "x-poke-de"
        );
    }

    #[test]
    fn empty_components_do_not_leave_double_hyphens() {
        let ctx = SeoContext {
            position: "1".into(),
            set_card_count: 10,
            set_name: String::new(),
            bloc_name: "Base".into(),
            tcg_slug: "poke-en".into(),
        };
        assert_eq!(build_seo_path("Bulbasaur", Some(&ctx)), "bulbasaur-1-10-base-pokemon-en");
    }
}
