//! Match file loader.
//!
//! Each file is loaded in its own transaction. A match whose id is already
//! present is skipped whole, so reloading a directory is a no-op.

use crate::ingest::cricsheet::CricsheetMatch;
use crate::ingest::schema::CREATE_TABLES;
use crate::telemetry::{db_span, DbOperation};
use crate::types::{QaError, Result};
use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};

/// What happened to one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Inserted { match_id: String, deliveries: usize },
    /// Match id already stored
    Skipped { match_id: String },
}

/// Totals for a directory load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub deliveries: usize,
    /// Files that failed to parse or insert, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl LoadSummary {
    fn record(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Inserted { deliveries, .. } => {
                self.inserted += 1;
                self.deliveries += deliveries;
            }
            LoadOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Writes matches into a store; the only component that opens it read-write.
pub struct MatchLoader {
    conn: Connection,
}

impl MatchLoader {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `QaError::StorageError` if the file cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (in-memory stores in tests).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the five tables if missing.
    pub fn create_schema(&self) -> Result<()> {
        let span = db_span(DbOperation::CreateSchema, None);
        let _guard = span.enter();
        self.conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    /// Insert one parsed match.
    pub fn load_match(&mut self, record: &CricsheetMatch) -> Result<LoadOutcome> {
        let match_id = record.match_id();
        let span = db_span(DbOperation::Load, Some(&match_id));
        let _guard = span.enter();

        let tx = self.conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO Matches (match_id, date, venue, city, event_name, \
             match_number, gender, match_type, season, team_type, toss_winner, \
             toss_decision, winner) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                match_id,
                record.first_date(),
                record.info.venue,
                record.city(),
                record.event_name(),
                record.match_number(),
                record.info.gender,
                record.info.match_type,
                record.season(),
                record.info.team_type,
                record.info.toss.as_ref().and_then(|t| t.winner.as_deref()),
                record.info.toss.as_ref().and_then(|t| t.decision.as_deref()),
                record.winner(),
            ],
        )?;

        if inserted == 0 {
            tracing::info!(match_id = %match_id, "match already loaded, skipping");
            return Ok(LoadOutcome::Skipped { match_id });
        }

        insert_teams(&tx, record, &match_id)?;
        let deliveries = insert_innings(&tx, record, &match_id)?;
        tx.commit()?;

        tracing::info!(match_id = %match_id, deliveries, "match loaded");
        Ok(LoadOutcome::Inserted {
            match_id,
            deliveries,
        })
    }

    /// Parse and insert one JSON file.
    ///
    /// # Errors
    ///
    /// Returns `QaError::IngestError` if the file is not a valid match
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let record: CricsheetMatch = serde_json::from_str(&text)
            .map_err(|e| QaError::IngestError(format!("{}: {}", path.display(), e)))?;
        self.load_match(&record)
    }

    /// Load every `*.json` file in `dir`, in file name order.
    ///
    /// A bad file is recorded in the summary and does not stop the load;
    /// a store failure does.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<LoadSummary> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut summary = LoadSummary::default();
        for file in files {
            match self.load_file(&file) {
                Ok(outcome) => summary.record(&outcome),
                Err(QaError::IngestError(reason)) => {
                    tracing::warn!(file = %file.display(), %reason, "skipping unreadable match file");
                    summary.failed.push((file, reason));
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "directory loaded"
        );
        Ok(summary)
    }
}

fn insert_teams(tx: &Transaction<'_>, record: &CricsheetMatch, match_id: &str) -> Result<()> {
    for team in &record.info.teams {
        tx.execute(
            "INSERT INTO Teams (match_id, team_name) VALUES (?1, ?2)",
            params![match_id, team],
        )?;
        let team_id = tx.last_insert_rowid();

        let Some(players) = record.info.players.get(team) else {
            continue;
        };
        let mut insert = tx.prepare_cached(
            "INSERT INTO Players (player_id, team_id, player_name) VALUES (?1, ?2, ?3)",
        )?;
        for player in players {
            insert.execute(params![record.registry_id(player), team_id, player])?;
        }
    }
    Ok(())
}

fn insert_innings(tx: &Transaction<'_>, record: &CricsheetMatch, match_id: &str) -> Result<usize> {
    let mut count = 0;
    for innings in &record.innings {
        tx.execute(
            "INSERT INTO Innings (match_id, team_batting) VALUES (?1, ?2)",
            params![match_id, innings.team],
        )?;
        let innings_id = tx.last_insert_rowid();

        let mut insert = tx.prepare_cached(
            "INSERT INTO Deliveries (innings_id, \"over\", ball, batter, bowler, non_striker, \
             runs_batter, runs_extras, runs_total, extras_type) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for over in &innings.overs {
            for (index, delivery) in over.deliveries.iter().enumerate() {
                insert.execute(params![
                    innings_id,
                    over.over,
                    index as i64 + 1,
                    delivery.batter,
                    delivery.bowler,
                    delivery.non_striker,
                    delivery.runs.batter,
                    delivery.runs.extras,
                    delivery.runs.total,
                    delivery.extras_type(),
                ])?;
                count += 1;
            }
        }
    }
    Ok(count)
}
