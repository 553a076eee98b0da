use cardex_catalog::species::{clean_pokemon_name, species_candidates};

#[test]
fn mega_prefixes_and_form_letters() {
    let cases = [
        ("Méga-Scarhino-ex", "Scarhino"),
        ("Méga-Dracaufeu X-ex", "Dracaufeu"),
        ("Méga-Dracaufeu Y-ex", "Dracaufeu"),
        ("Mega-Charizard X-EX", "Charizard"),
        ("Mega-Charizard Y-EX", "Charizard"),
        ("M-Mewtwo X-EX", "Mewtwo"),
        ("M-Mewtwo Y-EX", "Mewtwo"),
        ("Méga-Dracaufeu X", "Dracaufeu"),
        ("Charizard X", "Charizard"),
        ("Mewtwo Y", "Mewtwo"),
    ];
    for (input, expected) in cases {
        assert_eq!(clean_pokemon_name(input), expected, "input: {input}");
    }
}

#[test]
fn english_mega_spellings() {
    assert_eq!(clean_pokemon_name("Mega-Charizard-EX"), "Charizard");
    assert_eq!(clean_pokemon_name("M-Charizard-EX"), "Charizard");
    assert_eq!(clean_pokemon_name("M Charizard-EX"), "Charizard");
    assert_eq!(clean_pokemon_name("Mega Charizard VMAX"), "Charizard");
}

#[test]
fn mechanic_suffixes() {
    assert_eq!(clean_pokemon_name("Pikachu-ex"), "Pikachu");
    assert_eq!(clean_pokemon_name("Charizard-GX"), "Charizard");
    assert_eq!(clean_pokemon_name("Pikachu V"), "Pikachu");
    assert_eq!(clean_pokemon_name("Pikachu VMAX"), "Pikachu");
    assert_eq!(clean_pokemon_name("Pikachu VSTAR"), "Pikachu");
    assert_eq!(clean_pokemon_name("Zoroark BREAK"), "Zoroark");
    assert_eq!(clean_pokemon_name("Méga-Rayquaza-GX"), "Rayquaza");
    assert_eq!(clean_pokemon_name("M-Tyranitar ex"), "Tyranitar");
    assert_eq!(clean_pokemon_name("Ampharos ☆"), "Ampharos");
    assert_eq!(clean_pokemon_name("Latios Prism Star"), "Latios");
}

#[test]
fn plain_names_are_untouched() {
    for name in ["Pikachu", "Dracaufeu", "Scarhino", "Mewtwo", "Vulpix", "Alexandrite"] {
        assert_eq!(clean_pokemon_name(name), name);
    }
}

#[test]
fn candidates_follow_lookup_order() {
    assert_eq!(
        species_candidates("Dracaufeu de Sacha"),
        vec!["Dracaufeu", "de", "Dracaufeu de Sacha"]
    );
    assert_eq!(
        species_candidates("Méga-Diancie-ex"),
        vec!["Méga-Diancie-ex", "Méga-Diancie", "Diancie"]
    );
}

#[test]
fn candidates_for_empty_name() {
    assert!(species_candidates("   ").is_empty());
}
