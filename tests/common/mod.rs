//! Shared fixtures: a temporary store seeded with one small match.

#![allow(dead_code)]

use cricket_qa::ingest::CricsheetMatch;
use cricket_qa::{DataStore, MatchLoader};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Netherlands v Kenya, match number absent (stored as 0).
pub fn sample_match() -> Value {
    json!({
        "info": {
            "dates": ["2011-01-28"],
            "venue": "Sportpark Westvliet",
            "city": "The Hague",
            "event": {"name": "ICC Intercontinental Shield"},
            "gender": "male",
            "match_type": "ODI",
            "season": "2010/11",
            "team_type": "international",
            "toss": {"winner": "Netherlands", "decision": "bat"},
            "outcome": {"winner": "Kenya", "by": {"wickets": 4}},
            "teams": ["Netherlands", "Kenya"],
            "players": {
                "Netherlands": ["AN Kervezee", "ES Szwarczynski"],
                "Kenya": ["NN Odhiambo"]
            },
            "registry": {"people": {
                "AN Kervezee": "dc36a6a5",
                "ES Szwarczynski": "b8d490fd",
                "NN Odhiambo": "5b3a6b0c"
            }}
        },
        "innings": [{
            "team": "Netherlands",
            "overs": [{
                "over": 0,
                "deliveries": [
                    {"batter": "AN Kervezee", "bowler": "NN Odhiambo", "non_striker": "ES Szwarczynski",
                     "runs": {"batter": 1, "extras": 0, "total": 1}},
                    {"batter": "ES Szwarczynski", "bowler": "NN Odhiambo", "non_striker": "AN Kervezee",
                     "runs": {"batter": 0, "extras": 0, "total": 0}},
                    {"batter": "ES Szwarczynski", "bowler": "NN Odhiambo", "non_striker": "AN Kervezee",
                     "runs": {"batter": 0, "extras": 1, "total": 1}, "extras": {"wides": 1}}
                ]
            }]
        }]
    })
}

pub struct Fixture {
    pub dir: TempDir,
    pub db_path: PathBuf,
}

impl Fixture {
    pub fn store(&self) -> DataStore {
        DataStore::open(&self.db_path)
    }

    pub fn loader(&self) -> MatchLoader {
        MatchLoader::open(&self.db_path).unwrap()
    }
}

/// Empty store with the tables created.
pub fn empty_store() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cricket_data.db");
    MatchLoader::open(&db_path).unwrap().create_schema().unwrap();
    Fixture { dir, db_path }
}

/// Store holding [`sample_match`].
pub fn seeded_store() -> Fixture {
    let fixture = empty_store();
    load_value(&fixture, sample_match());
    fixture
}

pub fn load_value(fixture: &Fixture, value: Value) {
    let record: CricsheetMatch = serde_json::from_value(value).unwrap();
    fixture.loader().load_match(&record).unwrap();
}
