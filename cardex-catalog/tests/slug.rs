use cardex_catalog::slug::*;

#[test]
fn segment_strips_zero_padding() {
    assert_eq!(clean_slug_segment("sv01"), "sv1");
    assert_eq!(clean_slug_segment("001"), "1");
    assert_eq!(clean_slug_segment("sv1"), "sv1");
}

#[test]
fn segment_keeps_single_zero() {
    assert_eq!(clean_slug_segment("000"), "0");
    assert_eq!(clean_slug_segment("base0"), "base0");
}

#[test]
fn segment_cleans_every_numeric_run() {
    assert_eq!(clean_slug_segment("sv03.5"), "sv3.5");
    assert_eq!(clean_slug_segment("tg05"), "tg5");
    assert_eq!(clean_slug_segment("swsh10"), "swsh10");
}

#[test]
fn slug_cleans_segments_independently() {
    assert_eq!(clean_slug("poke-fr/sv/sv01/007"), "poke-fr/sv/sv1/7");
    assert_eq!(clean_slug("poke-en/base/base1/10"), "poke-en/base/base1/10");
}

#[test]
fn build_slug_joins_with_slashes() {
    assert_eq!(build_slug(&["poke-fr", "sv"]), "poke-fr/sv");
    assert_eq!(
        build_slug(&["poke-fr/sv/sv1/25".to_string(), "pokemon".to_string()]),
        "poke-fr/sv/sv1/25/pokemon"
    );
}

#[test]
fn seo_name_folds_accents_and_symbols() {
    assert_eq!(clean_seo_name("Méga-Diancie ★"), "mega-diancie-star");
    assert_eq!(clean_seo_name("Nidoran♀"), "nidoranf");
    assert_eq!(clean_seo_name("Énergie Électrique"), "energie-electrique");
}

#[test]
fn seo_name_strips_punctuation() {
    assert_eq!(clean_seo_name("Farfetch'd"), "farfetchd");
    assert_eq!(clean_seo_name("Mr. Mime"), "mr-mime");
    assert_eq!(clean_seo_name("Pokémon Center (Kanto)"), "pokemon-center-kanto");
}

#[test]
fn seo_name_trims_and_collapses_hyphens() {
    assert_eq!(clean_seo_name("  --Porygon-Z--  "), "porygon-z");
    assert_eq!(clean_seo_name("Ho  -  Oh"), "ho-oh");
    assert_eq!(clean_seo_name("!!!"), "");
}

#[test]
fn seo_name_output_alphabet() {
    for name in ["Méga-Diancie ★", "Lugia V (Alt Art)", "ポケモン", "Œil & Cœur", "Ça  va?"] {
        let cleaned = clean_seo_name(name);
        assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "{name} -> {cleaned}"
        );
        assert!(!cleaned.starts_with('-') && !cleaned.ends_with('-'));
        assert!(!cleaned.contains("--"));
    }
}

#[test]
fn seo_name_is_idempotent() {
    for name in [
        "Méga-Diancie ★",
        "Professor's Research",
        "Poke Ball",
        "Énergie Feu",
        "  Ho-Oh GX  ",
        "M Charizard-EX",
        "",
        "Œuf Chance",
    ] {
        let once = clean_seo_name(name);
        assert_eq!(clean_seo_name(&once), once, "not idempotent for {name:?}");
    }
}

fn context() -> SeoContext {
    SeoContext {
        position: "001".into(),
        set_card_count: 102,
        set_name: "Set de Base".into(),
        bloc_name: "Base".into(),
        tcg_slug: "poke-fr".into(),
    }
}

#[test]
fn seo_path_spells_out_pokemon_suffix() {
    assert_eq!(
        build_seo_path("Dracaufeu", Some(&context())),
        "dracaufeu-1-102-set-de-base-base-pokemon-fr"
    );
}

#[test]
fn seo_path_leaves_poke_in_card_name() {
    let path = build_seo_path("Poke Ball", Some(&context()));
    assert_eq!(path, "poke-ball-1-102-set-de-base-base-pokemon-fr");
    assert!(path.starts_with("poke-ball-"));
}

#[test]
fn seo_path_rewrites_each_language_suffix() {
    for (tcg, expected) in [
        ("poke-fr", "-pokemon-fr"),
        ("poke-en", "-pokemon-en"),
        ("poke-jp", "-pokemon-jp"),
    ] {
        let ctx = SeoContext {
            tcg_slug: tcg.into(),
            ..context()
        };
        assert!(build_seo_path("Pikachu", Some(&ctx)).ends_with(expected));
    }
}

#[test]
fn seo_path_without_context_is_clean_name() {
    assert_eq!(build_seo_path("Méga-Diancie ★", None), "mega-diancie-star");
}

#[test]
fn lookup_slugs() {
    assert_eq!(rarity_slug("Peu Commune"), "rarity-peu-commune");
    assert_eq!(rarity_slug("Rare Holo"), "rarity-rare-holo");
    assert_eq!(element_slug("Énergie Feu"), "element-feu");
    assert_eq!(element_slug("Energy Fire"), "element-fire");
    assert_eq!(element_slug("Électrique"), "element-electrique");
}
