//! Loading match files from disk.

mod common;

use common::{empty_store, sample_match};
use cricket_qa::ingest::LoadOutcome;
use cricket_qa::QaError;
use serde_json::json;

fn count(fixture: &common::Fixture, table: &str) -> i64 {
    fixture
        .loader()
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

#[test]
fn test_load_file() {
    let fixture = empty_store();
    let file = fixture.dir.path().join("1000001.json");
    std::fs::write(&file, sample_match().to_string()).unwrap();

    let outcome = fixture.loader().load_file(&file).unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Inserted {
            match_id: "ICC Intercontinental Shield_0".to_string(),
            deliveries: 3
        }
    );

    let again = fixture.loader().load_file(&file).unwrap();
    assert!(matches!(again, LoadOutcome::Skipped { .. }));
    assert_eq!(count(&fixture, "Deliveries"), 3);
}

#[test]
fn test_load_file_rejects_non_match_json() {
    let fixture = empty_store();
    let file = fixture.dir.path().join("broken.json");
    std::fs::write(&file, r#"{"meta": {"data_version": "1.0.0"}}"#).unwrap();

    let err = fixture.loader().load_file(&file).unwrap_err();
    assert!(matches!(err, QaError::IngestError(_)), "{}", err);
}

#[test]
fn test_load_dir() {
    let fixture = empty_store();
    let matches_dir = fixture.dir.path().join("matches");
    std::fs::create_dir(&matches_dir).unwrap();

    let mut second = sample_match();
    second["info"]["event"] = json!({"name": "ICC Intercontinental Shield", "match_number": 2});
    second["info"]["outcome"] = json!({"result": "tie"});

    std::fs::write(matches_dir.join("a.json"), sample_match().to_string()).unwrap();
    std::fs::write(matches_dir.join("b.json"), second.to_string()).unwrap();
    std::fs::write(matches_dir.join("c.json"), sample_match().to_string()).unwrap();
    std::fs::write(matches_dir.join("d.json"), "not json").unwrap();
    std::fs::write(matches_dir.join("README.md"), "# matches").unwrap();

    let summary = fixture.loader().load_dir(&matches_dir).unwrap();
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.deliveries, 6);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("d.json"));

    let winner: String = fixture
        .loader()
        .connection()
        .query_row(
            "SELECT winner FROM Matches WHERE match_id = 'ICC Intercontinental Shield_2'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(winner, "Tie");
    assert_eq!(count(&fixture, "Teams"), 4);
}

#[test]
fn test_loaded_store_is_readable() {
    let fixture = empty_store();
    common::load_value(&fixture, sample_match());

    let conn = fixture.store().connect().unwrap();
    let row = conn
        .query_first("SELECT player_id FROM Players WHERE player_name = ?1", &[
            rusqlite::types::Value::Text("AN Kervezee".to_string()),
        ])
        .unwrap()
        .unwrap();
    assert_eq!(row.text("player_id").as_deref(), Some("dc36a6a5"));
}
