mod common;

use cardex_catalog::types::{Language, NewTrainerCard};
use cardex_db::*;
use cardex_import::*;
use rusqlite::params;

use common::{FakeSource, PIKACHU, options};

const RAICHU_NO_DEX: &str = r#"{
    "id": "sv1-026", "localId": "026", "name": "Raichu", "category": "Pokemon",
    "illustrator": "Kagemaru Himeno", "hp": 120
}"#;

const SUPER_ROD: &str = r#"{
    "id": "sv1-188", "localId": "188", "name": "Super Canne", "category": "Trainer",
    "illustrator": "Toyste Beach"
}"#;

fn ingested() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    let source = FakeSource::new(Language::Fr)
        .with_bloc("sv", "Écarlate et Violet", &[("sv01", "Écarlate et Violet", 198)])
        .with_card("sv01", "sv1-025", "025", "Pikachu", Some(PIKACHU))
        .with_card("sv01", "sv1-026", "026", "Raichu", Some(RAICHU_NO_DEX))
        .with_card("sv01", "sv1-188", "188", "Super Canne", Some(SUPER_ROD));
    ingest(
        &conn,
        &source,
        &options(),
        &mut DeferFallback::new(),
        &SilentProgress,
    )
    .unwrap();
    conn
}

#[test]
fn missing_set_is_an_error() {
    let conn = open_memory().unwrap();
    let result = verify_set(&conn, "poke-fr/sv/sv9", Language::Fr);
    assert!(matches!(result, Err(VerifyError::SetNotFound(slug)) if slug == "poke-fr/sv/sv9"));
}

#[test]
fn flags_deferred_pokemon_card_as_critical() {
    let conn = ingested();
    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();

    assert_eq!(report.summary.expected_cards, 198);
    assert_eq!(report.summary.actual_cards, 3);
    assert_eq!(report.summary.cards_with_issues, 1);
    assert_eq!(report.summary.cards_ok, 2);
    assert!(report.has_critical());
    assert!(!report.is_clean());

    let raichu = &report.cards[0];
    assert_eq!(raichu.slug, "poke-fr/sv/sv1/26");
    assert_eq!(raichu.name.as_deref(), Some("Raichu"));
    assert_eq!(raichu.worst(), Severity::Critical);
    assert_eq!(
        raichu.issues.iter().map(|i| i.kind).collect::<Vec<_>>(),
        vec![IssueKind::MissingPokemonCard]
    );
    assert_eq!(report.summary.issues_by_type.get("missing_pokemon_card"), Some(&1));
}

#[test]
fn missing_trainer_detail_is_info() {
    let conn = ingested();
    let trainer = queries::find_card_by_slug(&conn, "poke-fr/sv/sv1/188")
        .unwrap()
        .unwrap();
    conn.execute("DELETE FROM trainer_card WHERE card_id = ?1", params![trainer.id])
        .unwrap();

    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();
    let flagged = report
        .cards
        .iter()
        .find(|c| c.card_id == trainer.id)
        .unwrap();
    assert_eq!(flagged.worst(), Severity::Info);
    assert_eq!(flagged.issues[0].kind, IssueKind::MissingTrainerCard);

    operations::insert_trainer_card(
        &conn,
        &NewTrainerCard {
            slug: "poke-fr/sv/sv1/188/trainer".to_string(),
            card_id: trainer.id,
        },
    )
    .unwrap();
    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();
    assert!(report.cards.iter().all(|c| c.card_id != trainer.id));
}

#[test]
fn zero_values_are_warnings() {
    let conn = ingested();
    conn.execute("UPDATE pokemon_card SET hp = 0, level = ''", [])
        .unwrap();

    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();
    let pikachu = report
        .cards
        .iter()
        .find(|c| c.slug == "poke-fr/sv/sv1/25")
        .unwrap();
    assert_eq!(pikachu.worst(), Severity::Warning);
    let kinds: Vec<_> = pikachu.issues.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![IssueKind::InvalidHp, IssueKind::InvalidLevel]);
}

#[test]
fn report_renders_json_and_fixes() {
    let conn = ingested();
    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["summary"]["set_slug"], "poke-fr/sv/sv1");
    assert_eq!(json["cards"][0]["issues"][0]["type"], "missing_pokemon_card");
    assert_eq!(json["cards"][0]["issues"][0]["severity"], "critical");

    let fixes = report.fix_suggestions();
    assert_eq!(fixes.len(), 1);
    assert!(fixes[0].contains("INSERT INTO pokemon_card"));
    assert!(fixes[0].contains("'poke-fr/sv/sv1/26/pokemon'"));
}

#[test]
fn fixes_never_insert_unknown_references() {
    let conn = ingested();
    conn.execute(
        "UPDATE card_translation SET name = 'Rai\nchu\r' WHERE slug LIKE 'poke-fr/sv/sv1/26/%'",
        [],
    )
    .unwrap();
    let trainer = queries::find_card_by_slug(&conn, "poke-fr/sv/sv1/188")
        .unwrap()
        .unwrap();
    conn.execute("DELETE FROM trainer_card WHERE card_id = ?1", params![trainer.id])
        .unwrap();

    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();
    let fixes = report.fix_suggestions();
    assert_eq!(fixes.len(), 2);

    let pokemon = fixes.iter().find(|f| f.contains("pokemon_card")).unwrap();
    assert!(pokemon.starts_with("-- Card #026 (Rai chu ): missing pokemon_card"));
    assert!(pokemon.lines().all(|line| line.starts_with("--")));
    assert!(pokemon.contains("<dex id>"));

    let trainer_fix = fixes.iter().find(|f| f.contains("trainer_card")).unwrap();
    assert!(trainer_fix.lines().any(|line| line.starts_with("INSERT INTO trainer_card")));

    // The trainer insert is the only executable statement and must apply cleanly
    let runnable: String = fixes
        .iter()
        .flat_map(|f| f.lines())
        .filter(|line| !line.starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    conn.execute_batch(&runnable).unwrap();
    let report = verify_set(&conn, "poke-fr/sv/sv1", Language::Fr).unwrap();
    assert!(report.cards.iter().all(|c| c.card_id != trainer.id));
}
