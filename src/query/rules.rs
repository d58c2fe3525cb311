//! Keyword intent rules.
//!
//! An ordered table of `(trigger, intent)` pairs. The first rule whose
//! trigger holds wins, so table order is the precedence order. Each intent
//! owns its SQL template and its answer template (see `query::format`).

use crate::query::analyzer::{Entities, Keywords, ORDINAL};
use rusqlite::types::Value as SqlValue;

/// Maximum entries shown by list answers.
pub const LIST_CAP: usize = 11;

/// Reply when no rule matches.
pub const DEFAULT_HELP: &str = "I couldn't find an answer to that. \n\
    Could you provide more context or rephrase your question?\n\
    You may try below samples: \n\
    Which player has scored the most runs?\n\
    List of teams";

/// Recognized question types, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Winner of a match identified by an ordinal
    MatchWinner,
    /// Most frequent batter score above 50
    ScoreAfterFifty,
    /// Batter with the most runs
    MostRuns,
    /// Bowler with the most dot balls (wicket proxy)
    MostWickets,
    /// Count of tied matches
    TiedMatches,
    /// Batter with the most sixes
    MostSixes,
    /// Count of matches
    MatchCount,
    /// Distinct team names
    TeamList,
    /// Distinct player names
    PlayerList,
}

impl Intent {
    /// SQL template for this intent. Parameters are positional (`?1`).
    pub fn sql(&self) -> &'static str {
        match self {
            // Entity text is compared as bound, without numeric coercion, so an
            // ordinal word never equals an integer match number.
            Self::MatchWinner => {
                "SELECT winner FROM Matches \
                 WHERE match_number = ?1 AND typeof(match_number) = typeof(?1);"
            }
            Self::ScoreAfterFifty => {
                "SELECT runs_batter, COUNT(*) AS dismissal_count \
                 FROM Deliveries \
                 WHERE runs_batter > 50 \
                 GROUP BY runs_batter \
                 ORDER BY dismissal_count DESC \
                 LIMIT 1;"
            }
            Self::MostRuns => {
                "SELECT batter, SUM(runs_batter) AS total_runs \
                 FROM Deliveries \
                 GROUP BY batter \
                 ORDER BY total_runs DESC \
                 LIMIT 1;"
            }
            // No extras and no bat runs stands in for a wicket; the store has
            // no dismissal column.
            Self::MostWickets => {
                "SELECT bowler, COUNT(*) AS wickets \
                 FROM Deliveries \
                 WHERE extras_type IS NULL AND runs_batter = 0 \
                 GROUP BY bowler \
                 ORDER BY wickets DESC \
                 LIMIT 1;"
            }
            Self::TiedMatches => {
                "SELECT COUNT(*) AS ties \
                 FROM Matches \
                 WHERE winner IS NULL AND toss_decision = 'tie';"
            }
            Self::MostSixes => {
                "SELECT batter, COUNT(*) AS sixes \
                 FROM Deliveries \
                 WHERE runs_batter = 6 \
                 GROUP BY batter \
                 ORDER BY sixes DESC \
                 LIMIT 1;"
            }
            Self::MatchCount => "SELECT COUNT(*) AS count FROM Matches;",
            Self::TeamList => "SELECT DISTINCT team_name FROM Teams;",
            Self::PlayerList => "SELECT DISTINCT player_name FROM Players;",
        }
    }

    /// Rows to fetch for this intent.
    pub fn row_cap(&self) -> usize {
        match self {
            Self::TeamList | Self::PlayerList => LIST_CAP,
            _ => 1,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::TeamList | Self::PlayerList)
    }
}

/// A resolved keyword query: SQL, bound parameters, and the intent that renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub intent: Intent,
    pub sql: &'static str,
    pub params: Vec<SqlValue>,
    /// Entity text the question referred to (match ordinal), echoed in answers
    pub subject: Option<String>,
}

impl QueryPlan {
    fn for_intent(intent: Intent, entities: &Entities) -> Self {
        let subject = match intent {
            Intent::MatchWinner => entities.get(ORDINAL).cloned(),
            _ => None,
        };
        let params = subject
            .iter()
            .map(|s| SqlValue::Text(s.clone()))
            .collect();

        Self {
            intent,
            sql: intent.sql(),
            params,
            subject,
        }
    }

    pub fn row_cap(&self) -> usize {
        self.intent.row_cap()
    }
}

/// One entry of the rule table.
pub struct IntentRule {
    pub intent: Intent,
    pub trigger: fn(&Keywords, &Entities) -> bool,
}

fn has(keywords: &Keywords, word: &str) -> bool {
    keywords.contains(word)
}

fn asks_match_winner(k: &Keywords, e: &Entities) -> bool {
    has(k, "winner") && has(k, "match") && e.contains_key(ORDINAL)
}

fn asks_score_after_fifty(k: &Keywords, _: &Entities) -> bool {
    has(k, "score after 50") && has(k, "batsmen")
}

fn asks_most_runs(k: &Keywords, _: &Entities) -> bool {
    has(k, "player") && has(k, "runs")
}

fn asks_most_wickets(k: &Keywords, _: &Entities) -> bool {
    has(k, "bowler") && has(k, "wickets")
}

fn asks_tied_matches(k: &Keywords, _: &Entities) -> bool {
    has(k, "tie") && has(k, "match")
}

fn asks_most_sixes(k: &Keywords, _: &Entities) -> bool {
    has(k, "player") && has(k, "sixes")
}

fn mentions_matches(k: &Keywords, _: &Entities) -> bool {
    has(k, "match") || has(k, "matches")
}

fn mentions_teams(k: &Keywords, _: &Entities) -> bool {
    has(k, "team") || has(k, "teams")
}

fn mentions_players(k: &Keywords, _: &Entities) -> bool {
    has(k, "player") || has(k, "players")
}

/// Rule table in precedence order.
pub static RULES: [IntentRule; 9] = [
    IntentRule { intent: Intent::MatchWinner, trigger: asks_match_winner },
    IntentRule { intent: Intent::ScoreAfterFifty, trigger: asks_score_after_fifty },
    IntentRule { intent: Intent::MostRuns, trigger: asks_most_runs },
    IntentRule { intent: Intent::MostWickets, trigger: asks_most_wickets },
    IntentRule { intent: Intent::TiedMatches, trigger: asks_tied_matches },
    IntentRule { intent: Intent::MostSixes, trigger: asks_most_sixes },
    IntentRule { intent: Intent::MatchCount, trigger: mentions_matches },
    IntentRule { intent: Intent::TeamList, trigger: mentions_teams },
    IntentRule { intent: Intent::PlayerList, trigger: mentions_players },
];

/// Resolve keywords and entities to the first matching rule's plan.
///
/// # Returns
///
/// `None` when no rule matches; the caller answers with [`DEFAULT_HELP`]
pub fn resolve_via_keywords(keywords: &Keywords, entities: &Entities) -> Option<QueryPlan> {
    let rule = RULES.iter().find(|rule| (rule.trigger)(keywords, entities))?;
    tracing::debug!(intent = ?rule.intent, "keyword rule matched");
    Some(QueryPlan::for_intent(rule.intent, entities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kw(words: &[&str]) -> Keywords {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn intent_of(words: &[&str]) -> Option<Intent> {
        resolve_via_keywords(&kw(words), &Entities::new()).map(|p| p.intent)
    }

    #[test]
    fn test_each_rule_alone() {
        let mut ordinal = Entities::new();
        ordinal.insert(ORDINAL.to_string(), "first".to_string());
        let plan = resolve_via_keywords(&kw(&["winner", "match"]), &ordinal).unwrap();
        assert_eq!(plan.intent, Intent::MatchWinner);
        assert_eq!(plan.params, vec![SqlValue::Text("first".to_string())]);
        assert_eq!(plan.subject.as_deref(), Some("first"));

        assert_eq!(intent_of(&["score after 50", "batsmen"]), Some(Intent::ScoreAfterFifty));
        assert_eq!(intent_of(&["player", "runs"]), Some(Intent::MostRuns));
        assert_eq!(intent_of(&["bowler", "wickets"]), Some(Intent::MostWickets));
        assert_eq!(intent_of(&["tie", "match"]), Some(Intent::TiedMatches));
        assert_eq!(intent_of(&["player", "sixes"]), Some(Intent::MostSixes));
        assert_eq!(intent_of(&["matches"]), Some(Intent::MatchCount));
        assert_eq!(intent_of(&["teams"]), Some(Intent::TeamList));
        assert_eq!(intent_of(&["players"]), Some(Intent::PlayerList));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(intent_of(&[]), None);
        assert_eq!(intent_of(&["umpire", "weather"]), None);
    }

    #[test]
    fn test_winner_without_ordinal_falls_to_match_count() {
        assert_eq!(intent_of(&["winner", "match"]), Some(Intent::MatchCount));
    }

    #[test]
    fn test_runs_beats_sixes() {
        assert_eq!(intent_of(&["player", "runs", "sixes"]), Some(Intent::MostRuns));
    }

    #[test]
    fn test_tie_beats_match_count() {
        assert_eq!(intent_of(&["tie", "match", "matches"]), Some(Intent::TiedMatches));
    }

    #[test]
    fn test_list_caps() {
        assert_eq!(Intent::TeamList.row_cap(), LIST_CAP);
        assert_eq!(Intent::PlayerList.row_cap(), LIST_CAP);
        assert_eq!(Intent::MostRuns.row_cap(), 1);
    }

    #[test]
    fn test_tie_sql_requires_null_winner() {
        let sql = Intent::TiedMatches.sql();
        assert!(sql.contains("winner IS NULL"));
        assert!(sql.contains("toss_decision = 'tie'"));
    }

    const VOCAB: &[&str] = &[
        "winner", "match", "matches", "score after 50", "batsmen", "player", "players", "runs",
        "bowler", "wickets", "tie", "sixes", "team", "teams", "venue", "toss",
    ];

    proptest! {
        #[test]
        fn prop_first_matching_rule_wins(
            picks in proptest::collection::vec(0..VOCAB.len(), 0..8),
            with_ordinal in any::<bool>(),
        ) {
            let keywords: Keywords = picks.iter().map(|&i| VOCAB[i].to_string()).collect();
            let mut entities = Entities::new();
            if with_ordinal {
                entities.insert(ORDINAL.to_string(), "second".to_string());
            }

            let expected = RULES
                .iter()
                .position(|r| (r.trigger)(&keywords, &entities))
                .map(|i| RULES[i].intent);
            let got = resolve_via_keywords(&keywords, &entities).map(|p| p.intent);
            prop_assert_eq!(got, expected);

            // Nothing earlier in the table may also match.
            if let Some(intent) = got {
                let index = RULES.iter().position(|r| r.intent == intent).unwrap();
                for earlier in &RULES[..index] {
                    prop_assert!(!(earlier.trigger)(&keywords, &entities));
                }
            }
        }
    }
}
