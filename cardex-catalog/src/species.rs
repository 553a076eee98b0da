//! Species-name extraction from card names.
//!
//! Card names decorate the species name with mechanics and forms:
//! ```text
//! Méga-Dracaufeu X-ex   →  Dracaufeu
//! Pikachu VMAX          →  Pikachu
//! M Charizard-EX        →  Charizard
//! ```
//! When a card carries no dex id, these helpers produce the names worth
//! looking up in the pokémon translation table.

/// Mega-evolution prefixes, compared case-insensitively and followed by a
/// space or hyphen.
const MEGA_PREFIXES: [&str; 3] = ["méga", "mega", "m"];

/// Mechanic markers. A marker must start after a space or hyphen and end at
/// a word boundary; the marker and everything after it is dropped.
const SUFFIX_MARKERS: [&str; 10] = [
    "VMAX",
    "VSTAR",
    "BREAK",
    "Prism Star",
    "Prism-Star",
    "PrismStar",
    "ex",
    "EX",
    "GX",
    "V",
];

/// Star symbols end the species name wherever they appear.
const STAR_MARKERS: [char; 2] = ['☆', '★'];

const SEPARATORS: [char; 2] = [' ', '-'];

/// Extract the base species name from a card name.
///
/// Removes a Mega prefix, then a mechanic suffix (ex, GX, V, VMAX, VSTAR,
/// BREAK, Prism Star, star symbols), then a trailing X/Y form letter.
///
/// ```
/// use cardex_catalog::species::clean_pokemon_name;
///
/// assert_eq!(clean_pokemon_name("Méga-Dracaufeu X-ex"), "Dracaufeu");
/// assert_eq!(clean_pokemon_name("Pikachu"), "Pikachu");
/// ```
pub fn clean_pokemon_name(card_name: &str) -> String {
    let name = strip_mega_prefix(card_name.trim());
    let name = strip_mechanic_suffix(name);
    strip_form_letter(name).to_string()
}

fn strip_mega_prefix(name: &str) -> &str {
    for prefix in MEGA_PREFIXES {
        let head: String = name.chars().take(prefix.chars().count()).collect();
        if head.to_lowercase() != prefix {
            continue;
        }
        let rest = &name[head.len()..];
        if rest.starts_with(SEPARATORS) {
            return rest[1..].trim();
        }
    }
    name
}

fn strip_mechanic_suffix(name: &str) -> &str {
    for (i, c) in name.char_indices() {
        if STAR_MARKERS.contains(&c) {
            return name[..i].trim_end_matches(SEPARATORS).trim();
        }
        if i == 0 || !SEPARATORS.contains(&c) {
            continue;
        }
        let rest = name[i..].trim_start_matches(SEPARATORS);
        if SUFFIX_MARKERS.iter().any(|m| starts_with_marker(rest, m)) {
            return name[..i].trim();
        }
    }
    name.trim()
}

fn starts_with_marker(s: &str, marker: &str) -> bool {
    s.strip_prefix(marker)
        .is_some_and(|after| after.is_empty() || after.starts_with(SEPARATORS))
}

fn strip_form_letter(name: &str) -> &str {
    let Some(last) = name.chars().last() else {
        return name;
    };
    if !matches!(last, 'X' | 'Y' | 'x' | 'y') {
        return name;
    }
    let head = &name[..name.len() - last.len_utf8()];
    if head.ends_with(SEPARATORS) && !head.trim_end_matches(SEPARATORS).is_empty() {
        head.trim_end_matches(SEPARATORS).trim()
    } else {
        name
    }
}

/// Names to try, in order, when identifying a species from a card name.
///
/// 1. the first whitespace token
/// 2. the second token, if any
/// 3. the name without a trailing `-ex`
/// 4. the fully cleaned species name
///
/// Duplicates are dropped while keeping the first occurrence.
///
/// ```
/// use cardex_catalog::species::species_candidates;
///
/// assert_eq!(species_candidates("Pikachu-ex"), vec!["Pikachu-ex", "Pikachu"]);
/// assert_eq!(species_candidates("Team Rocket's Mewtwo"), vec![
///     "Team",
///     "Rocket's",
///     "Team Rocket's Mewtwo",
/// ]);
/// ```
pub fn species_candidates(card_name: &str) -> Vec<String> {
    let name = card_name.trim();
    let mut tokens = name.split_whitespace();

    let mut candidates = Vec::with_capacity(4);
    if let Some(first) = tokens.next() {
        candidates.push(first.to_string());
    }
    if let Some(second) = tokens.next() {
        candidates.push(second.to_string());
    }
    candidates.push(name.strip_suffix("-ex").unwrap_or(name).to_string());
    candidates.push(clean_pokemon_name(name));

    let mut seen = Vec::with_capacity(candidates.len());
    for c in candidates {
        if !c.is_empty() && !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}
