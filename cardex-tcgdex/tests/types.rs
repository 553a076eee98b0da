use cardex_tcgdex::*;

const PIKACHU: &str = r#"{
    "category": "Pokemon",
    "id": "sv01-063",
    "illustrator": "Naoki Saito",
    "localId": "063",
    "name": "Pikachu",
    "rarity": "Commune",
    "set": {"cardCount": {"official": 198, "total": 258}, "id": "sv01", "name": "Écarlate et Violet"},
    "variants": {"firstEdition": false, "holo": false, "normal": true, "reverse": true, "wPromo": false},
    "dexId": [25],
    "hp": 60,
    "types": ["Électrique"],
    "description": "Il stocke de l'électricité dans ses joues.",
    "stage": "De base",
    "attacks": [{"cost": ["Électrique"], "name": "Éclair", "damage": 20}],
    "retreat": 1,
    "regulationMark": "G",
    "legal": {"standard": true, "expanded": true}
}"#;

#[test]
fn pokemon_card_detail() {
    let card: CardDetail = serde_json::from_str(PIKACHU).unwrap();

    assert_eq!(card.local_id, "063");
    assert_eq!(card.category, "Pokemon");
    assert_eq!(card.first_dex_id(), Some(25));
    assert_eq!(card.hp_or_default(), 60);
    assert_eq!(card.level_or_default(), "0");
    assert_eq!(card.types, vec!["Électrique"]);
    assert_eq!(card.illustrator_or_unknown(), "Naoki Saito");
    assert_eq!(
        card.description_or_effect(),
        Some("Il stocke de l'électricité dans ses joues.")
    );
    assert_eq!(card.variants.enabled(), vec!["normal", "reverse"]);
}

#[test]
fn trainer_card_uses_effect_and_unknown_illustrator() {
    let card: CardDetail = serde_json::from_str(
        r#"{
            "category": "Trainer",
            "id": "sv01-172",
            "localId": "172",
            "name": "Arven",
            "rarity": "Uncommon",
            "effect": "Search your deck for an Item card.",
            "trainerType": "Supporter",
            "variants": {"firstEdition": false, "holo": false, "normal": true, "reverse": false, "wPromo": false}
        }"#,
    )
    .unwrap();

    assert_eq!(card.illustrator_or_unknown(), "Unknown");
    assert_eq!(
        card.description_or_effect(),
        Some("Search your deck for an Item card.")
    );
    assert_eq!(card.first_dex_id(), None);
    assert_eq!(card.hp_or_default(), 0);
}

#[test]
fn numeric_level_and_local_id_become_text() {
    let card: CardDetail = serde_json::from_str(
        r#"{"category": "Pokemon", "id": "pl1-1", "localId": 1, "name": "Mewtwo LV.X",
            "level": 58, "hp": 110, "dexId": [150]}"#,
    )
    .unwrap();
    assert_eq!(card.local_id, "1");
    assert_eq!(card.level_or_default(), "58");

    let card: CardDetail = serde_json::from_str(
        r#"{"category": "Pokemon", "id": "pl1-2", "localId": "2", "name": "Dialga LV.X", "level": "X"}"#,
    )
    .unwrap();
    assert_eq!(card.level_or_default(), "X");
    assert_eq!(card.variants, Variants::default());
}

#[test]
fn serie_and_set_detail() {
    let serie: SerieDetail = serde_json::from_str(
        r#"{"id": "sv", "name": "Écarlate et Violet", "sets": [
            {"id": "sv01", "name": "Écarlate et Violet", "cardCount": {"official": 198, "total": 258}},
            {"id": "sv02", "name": "Évolutions à Paldea", "cardCount": {"official": 193, "total": 279}}
        ]}"#,
    )
    .unwrap();
    assert_eq!(serie.sets.len(), 2);
    assert_eq!(serie.sets[0].card_count.total, 258);

    let set: SetDetail = serde_json::from_str(
        r#"{"id": "sv01", "name": "Écarlate et Violet", "cardCount": {"total": 2},
            "cards": [{"id": "sv01-001", "localId": "001", "name": "Pomdepik"},
                      {"id": "sv01-002", "localId": "002", "name": "Foretress ex", "image": "x"}]}"#,
    )
    .unwrap();
    assert_eq!(set.cards[1].local_id, "002");
}

#[test]
fn all_variant_flags_in_order() {
    let variants = Variants {
        first_edition: true,
        holo: true,
        normal: true,
        reverse: true,
        w_promo: true,
    };
    assert_eq!(
        variants.enabled(),
        vec!["firstEdition", "holo", "normal", "reverse", "wPromo"]
    );
}
