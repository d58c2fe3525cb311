//! DDL for the cricket store.

/// Creates the five tables if they do not exist.
///
/// `over` is quoted because it is an SQLite keyword.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS Matches (
    match_id      TEXT PRIMARY KEY,
    date          TEXT,
    venue         TEXT,
    city          TEXT,
    event_name    TEXT,
    match_number  INTEGER,
    gender        TEXT,
    match_type    TEXT,
    season        TEXT,
    team_type     TEXT,
    toss_winner   TEXT,
    toss_decision TEXT,
    winner        TEXT
);

CREATE TABLE IF NOT EXISTS Teams (
    team_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id  TEXT REFERENCES Matches(match_id),
    team_name TEXT
);

CREATE TABLE IF NOT EXISTS Players (
    player_id   TEXT,
    team_id     INTEGER REFERENCES Teams(team_id),
    player_name TEXT
);

CREATE TABLE IF NOT EXISTS Innings (
    innings_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id     TEXT REFERENCES Matches(match_id),
    team_batting TEXT
);

CREATE TABLE IF NOT EXISTS Deliveries (
    delivery_id INTEGER PRIMARY KEY AUTOINCREMENT,
    innings_id  INTEGER REFERENCES Innings(innings_id),
    "over"      INTEGER,
    ball        INTEGER,
    batter      TEXT,
    bowler      TEXT,
    non_striker TEXT,
    runs_batter INTEGER,
    runs_extras INTEGER,
    runs_total  INTEGER,
    extras_type TEXT
);
"#;
