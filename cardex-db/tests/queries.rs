use cardex_catalog::types::*;
use cardex_db::*;

fn setup_db() -> (rusqlite::Connection, i64) {
    let conn = open_memory().unwrap();
    let bloc = insert_bloc(
        &conn,
        &NewBloc {
            slug: "poke-en/swsh".to_string(),
            tcg_language_id: 2,
            set_number: 1,
            position: 1,
        },
    )
    .unwrap();
    let set = insert_set(
        &conn,
        &NewSet {
            slug: "poke-en/swsh/swsh1".to_string(),
            card_count: 3,
            position: 1,
            bloc_id: bloc.id,
        },
    )
    .unwrap();
    insert_set_translation(
        &conn,
        &NewSetTranslation {
            slug: "poke-en/swsh/swsh1/en".to_string(),
            set_id: set.id,
            name: "Sword & Shield".to_string(),
            description: None,
            language_id: 2,
        },
    )
    .unwrap();
    let illustrator = insert_illustrator(&conn, "Ryota Murayama").unwrap();

    for (local_id, category_id) in [("10", 1), ("2", 3), ("1", 2)] {
        let card = insert_card(
            &conn,
            &NewCard {
                slug: format!("poke-en/swsh/swsh1/{local_id}"),
                position: local_id.to_string(),
                category_id,
                rarity_id: None,
                set_id: set.id,
                illustrator_id: illustrator.id,
            },
        )
        .unwrap();
        if local_id != "1" {
            insert_card_translation(
                &conn,
                &NewCardTranslation {
                    slug: format!("poke-en/swsh/swsh1/{local_id}/en"),
                    card_id: card.id,
                    language_id: 2,
                    name: format!("Card {local_id}"),
                    description: None,
                },
            )
            .unwrap();
        }
    }

    (conn, set.id)
}

#[test]
fn find_card_by_slug_found_and_missing() {
    let (conn, set_id) = setup_db();
    let card = find_card_by_slug(&conn, "poke-en/swsh/swsh1/2")
        .unwrap()
        .unwrap();
    assert_eq!(card.position, "2");
    assert_eq!(card.category_id, 3);
    assert_eq!(card.set_id, set_id);
    assert_eq!(card.rarity_id, None);

    assert!(find_card_by_slug(&conn, "poke-en/swsh/swsh1/99").unwrap().is_none());
}

#[test]
fn category_names_per_language() {
    let (conn, _) = setup_db();
    let fr = category_names(&conn, 1).unwrap();
    assert!(fr.contains(&("Dresseur".to_string(), 3)));
    let en = category_names(&conn, 2).unwrap();
    assert_eq!(en.len(), 3);

    let categories = list_categories(&conn).unwrap();
    assert_eq!(categories[0], (1, "category-pokemon".to_string()));
}

#[test]
fn find_set_with_and_without_translation() {
    let (conn, set_id) = setup_db();
    let set = find_set_by_slug(&conn, "poke-en/swsh/swsh1", 2)
        .unwrap()
        .unwrap();
    assert_eq!(set.id, set_id);
    assert_eq!(set.card_count, 3);
    assert_eq!(set.name.as_deref(), Some("Sword & Shield"));

    let untranslated = find_set_by_slug(&conn, "poke-en/swsh/swsh1", 1)
        .unwrap()
        .unwrap();
    assert_eq!(untranslated.name, None);
}

#[test]
fn cards_in_set_ordered_numerically() {
    let (conn, set_id) = setup_db();
    let cards = cards_in_set(&conn, set_id, 2).unwrap();
    let positions: Vec<&str> = cards.iter().map(|c| c.card.position.as_str()).collect();
    assert_eq!(positions, vec!["1", "2", "10"]);

    assert_eq!(cards[0].name, None);
    assert_eq!(cards[1].name.as_deref(), Some("Card 2"));
    assert!(cards.iter().all(|c| c.illustrator_known));
}

#[test]
fn detail_sets_for_set() {
    let (conn, set_id) = setup_db();
    let trainer = find_card_by_slug(&conn, "poke-en/swsh/swsh1/2")
        .unwrap()
        .unwrap();
    insert_trainer_card(
        &conn,
        &NewTrainerCard {
            slug: "poke-en/swsh/swsh1/2/trainer".to_string(),
            card_id: trainer.id,
        },
    )
    .unwrap();

    let with_trainer = cards_with_detail(&conn, CardKind::Trainer, set_id).unwrap();
    assert!(with_trainer.contains(&trainer.id));
    assert!(cards_with_detail(&conn, CardKind::Energy, set_id).unwrap().is_empty());
    assert!(pokemon_cards_in_set(&conn, set_id).unwrap().is_empty());
}

#[test]
fn variants_listed_by_name() {
    let (conn, _) = setup_db();
    let card = find_card_by_slug(&conn, "poke-en/swsh/swsh1/10")
        .unwrap()
        .unwrap();
    insert_card_variant(&conn, card.id, "reverse").unwrap();
    insert_card_variant(&conn, card.id, "holo").unwrap();

    assert_eq!(
        variants_for_card(&conn, card.id).unwrap(),
        vec!["holo".to_string(), "reverse".to_string()]
    );
}

#[test]
fn stats_count_every_table() {
    let (conn, _) = setup_db();
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.blocs, 1);
    assert_eq!(stats.sets, 1);
    assert_eq!(stats.cards, 3);
    assert_eq!(stats.card_translations, 2);
    assert_eq!(stats.illustrators, 1);
    assert_eq!(stats.pokemon_cards, 0);
    assert_eq!(stats.cards_without_detail(), 3);
    assert_eq!(stats.import_runs, 0);
}
