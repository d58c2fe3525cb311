//! Cricsheet JSON match format (the subset the loader reads).
//!
//! Unknown fields are ignored. Absent optional fields load as NULL, except
//! `city` (`"unavailable"`) and extras runs (0).

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One match file.
#[derive(Debug, Clone, Deserialize)]
pub struct CricsheetMatch {
    pub info: MatchInfo,
    #[serde(default)]
    pub innings: Vec<InningsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchInfo {
    #[serde(default)]
    pub dates: Vec<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub event: Option<EventInfo>,
    pub gender: Option<String>,
    pub match_type: Option<String>,
    /// `"2009/10"` or `2010` depending on the competition
    pub season: Option<Value>,
    pub team_type: Option<String>,
    pub toss: Option<TossInfo>,
    pub outcome: Option<OutcomeInfo>,
    #[serde(default)]
    pub teams: Vec<String>,
    /// Team name to player names
    #[serde(default)]
    pub players: HashMap<String, Vec<String>>,
    pub registry: Option<Registry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventInfo {
    pub name: Option<String>,
    pub match_number: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TossInfo {
    pub winner: Option<String>,
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeInfo {
    pub winner: Option<String>,
    /// `"tie"`, `"draw"`, `"no result"`
    pub result: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    /// Player name to registry id
    #[serde(default)]
    pub people: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InningsRecord {
    pub team: String,
    #[serde(default)]
    pub overs: Vec<OverRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverRecord {
    pub over: i64,
    #[serde(default)]
    pub deliveries: Vec<DeliveryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryRecord {
    pub batter: String,
    pub bowler: String,
    pub non_striker: Option<String>,
    pub runs: RunsRecord,
    /// Extras kind to runs, in document order
    pub extras: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RunsRecord {
    pub batter: i64,
    #[serde(default)]
    pub extras: i64,
    pub total: i64,
}

/// Sentinel stored in `winner` for tied matches.
pub const TIE_WINNER: &str = "Tie";

/// Stored in `city` when the file has none.
pub const UNKNOWN_CITY: &str = "unavailable";

impl CricsheetMatch {
    /// `"{event_name}_{match_number}"`; match number 0 when absent.
    pub fn match_id(&self) -> String {
        format!("{}_{}", self.event_name().unwrap_or(""), self.match_number())
    }

    pub fn event_name(&self) -> Option<&str> {
        self.info.event.as_ref().and_then(|e| e.name.as_deref())
    }

    pub fn match_number(&self) -> i64 {
        self.info
            .event
            .as_ref()
            .and_then(|e| e.match_number)
            .unwrap_or(0)
    }

    /// Outcome winner, `"Tie"` for ties, otherwise `None`.
    pub fn winner(&self) -> Option<String> {
        let outcome = self.info.outcome.as_ref()?;
        if let Some(winner) = &outcome.winner {
            return Some(winner.clone());
        }
        match outcome.result.as_deref() {
            Some("tie") => Some(TIE_WINNER.to_string()),
            _ => None,
        }
    }

    /// Season as text whatever its JSON type.
    pub fn season(&self) -> Option<String> {
        match self.info.season.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn city(&self) -> &str {
        self.info.city.as_deref().unwrap_or(UNKNOWN_CITY)
    }

    pub fn first_date(&self) -> Option<&str> {
        self.info.dates.first().map(String::as_str)
    }

    pub fn registry_id(&self, player: &str) -> Option<&str> {
        self.info
            .registry
            .as_ref()
            .and_then(|r| r.people.get(player))
            .map(String::as_str)
    }
}

impl DeliveryRecord {
    /// First extras kind listed, if any.
    pub fn extras_type(&self) -> Option<&str> {
        self.extras.as_ref()?.keys().next().map(String::as_str)
    }
}
