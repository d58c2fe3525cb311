//! Answer formatting.
//!
//! Every function here returns a non-empty sentence; an empty result set
//! gets its own message rather than a blank answer.

use crate::query::rules::{Intent, QueryPlan, LIST_CAP};
use crate::types::ResultRow;

/// Render a model-path answer: the explanation, then the first row flattened.
///
/// # Returns
///
/// `None` when there are no rows (the orchestrator then falls back)
pub fn render_model_answer(explanation: &str, rows: &[ResultRow]) -> Option<String> {
    let first = rows.first()?;
    Some(format!("{}\nResult: {}.", explanation, first.flatten()))
}

/// Render a keyword-path answer for `plan`.
pub fn render_plan(plan: &QueryPlan, rows: &[ResultRow]) -> String {
    let subject = plan.subject.as_deref().unwrap_or("");

    if plan.intent.is_list() {
        return render_list(plan.intent, rows);
    }

    let rendered = rows.first().and_then(|row| render_row(plan.intent, subject, row));
    rendered.unwrap_or_else(|| no_data(plan.intent, subject))
}

fn render_row(intent: Intent, subject: &str, row: &ResultRow) -> Option<String> {
    let answer = match intent {
        Intent::MatchWinner => match row.get("winner") {
            Some(rusqlite::types::Value::Null) | None => {
                format!("Match {} has no recorded winner.", subject)
            }
            Some(_) => format!("The winner of match {} is {}.", subject, row.text("winner")?),
        },
        Intent::ScoreAfterFifty => format!(
            "The score after 50 that batsmen have gotten out most often is {} with {} dismissals.",
            row.text("runs_batter")?,
            row.text("dismissal_count")?
        ),
        Intent::MostRuns => format!(
            "The player with the most runs is {} with {} runs.",
            row.text("batter")?,
            row.text("total_runs")?
        ),
        Intent::MostWickets => format!(
            "The bowler with the most wickets is {} with {} wickets.",
            row.text("bowler")?,
            row.text("wickets")?
        ),
        Intent::TiedMatches => {
            format!("There are {} matches that ended in a tie.", row.text("ties")?)
        }
        Intent::MostSixes => format!(
            "The player with the most sixes is {} with {} sixes.",
            row.text("batter")?,
            row.text("sixes")?
        ),
        Intent::MatchCount => {
            format!("There are a total of {} matches recorded.", row.text("count")?)
        }
        Intent::TeamList | Intent::PlayerList => return None,
    };
    Some(answer)
}

fn render_list(intent: Intent, rows: &[ResultRow]) -> String {
    let (label, column) = match intent {
        Intent::TeamList => ("Teams", "team_name"),
        _ => ("Players", "player_name"),
    };

    let names: Vec<String> = rows
        .iter()
        .filter_map(|row| row.text(column))
        .take(LIST_CAP)
        .collect();

    if names.is_empty() {
        return no_data(intent, "");
    }
    format!("{} in the dataset include: {}.", label, names.join(", "))
}

fn no_data(intent: Intent, subject: &str) -> String {
    match intent {
        Intent::MatchWinner => format!("No data found for match {}.", subject),
        Intent::ScoreAfterFifty => "No batter scores above 50 were found.".to_string(),
        Intent::MostRuns => "No batting data found.".to_string(),
        Intent::MostWickets => "No bowling data found.".to_string(),
        Intent::TiedMatches | Intent::MatchCount => "No match data found.".to_string(),
        Intent::MostSixes => "No sixes found.".to_string(),
        Intent::TeamList => "No teams found in the dataset.".to_string(),
        Intent::PlayerList => "No players found in the dataset.".to_string(),
    }
}
