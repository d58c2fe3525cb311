//! Question normalization: keywords and entities.
//!
//! `RuleAnalyzer` is a small deterministic stand-in for a statistical NLP
//! pipeline. It case-folds the question, drops function words, lemmatizes
//! plural nouns, and tags ordinal, cardinal and year spans.
//!
//! There is no part-of-speech tagging: verbs and adjectives are kept as
//! keywords along with nouns.
//!
//! Both the surface form and the lemma of every content word go into the
//! keyword set, so rules keyed on plural forms ("runs", "wickets",
//! "batsmen") and rules keyed on singular forms ("match", "team") both see
//! their trigger.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Normalized keywords extracted from a question.
pub type Keywords = BTreeSet<String>;

/// Entity label (e.g. `ORDINAL`) to the matched span text.
pub type Entities = BTreeMap<String, String>;

pub const ORDINAL: &str = "ORDINAL";
pub const CARDINAL: &str = "CARDINAL";
pub const DATE: &str = "DATE";

/// Result of analyzing one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub keywords: Keywords,
    pub entities: Entities,
}

/// Turns a question into keywords and entities.
pub trait QuestionAnalyzer: Send + Sync {
    fn analyze(&self, question: &str) -> Analysis;
}

/// Dictionary and suffix based analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnalyzer;

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "against", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "during", "each", "ever", "every", "few", "for", "from", "get",
    "give", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "less", "many", "may", "me", "might", "more",
    "most", "much", "my", "no", "not", "of", "on", "or", "our", "please", "shall", "she",
    "should", "show", "so", "some", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "us", "very", "was", "we",
    "were", "what", "when", "where", "whether", "which", "while", "who", "whom", "whose",
    "why", "will", "with", "would", "you", "your",
];

const ORDINAL_WORDS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth",
    "seventeenth", "eighteenth", "nineteenth", "twentieth",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "fifty", "hundred",
];

/// Plural forms that suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("people", "person"),
    ("children", "child"),
    ("series", "series"),
    ("innings", "innings"),
];

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").expect("Invalid regex"));

static NUMERIC_ORDINAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:st|nd|rd|th)$").expect("Invalid regex"));

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}$").expect("Invalid regex"));

/// Reduce a plural noun to its singular lemma.
///
/// # Examples
///
/// - "matches" → "match"
/// - "batsmen" → "batsman"
/// - "centuries" → "century"
/// - "runs" → "run"
/// - "toss" → "toss"
pub fn lemmatize(word: &str) -> String {
    for (plural, singular) in IRREGULAR_PLURALS {
        if let Some(stem) = word.strip_suffix(plural) {
            if stem.is_empty() || *plural == "men" {
                return format!("{}{}", stem, singular);
            }
        }
    }

    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
    }

    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

impl RuleAnalyzer {
    fn entity_label(token: &str) -> Option<&'static str> {
        if ORDINAL_WORDS.contains(&token) || NUMERIC_ORDINAL_PATTERN.is_match(token) {
            Some(ORDINAL)
        } else if YEAR_PATTERN.is_match(token) {
            Some(DATE)
        } else if token.chars().all(|c| c.is_ascii_digit()) || NUMBER_WORDS.contains(&token) {
            Some(CARDINAL)
        } else {
            None
        }
    }
}

impl QuestionAnalyzer for RuleAnalyzer {
    fn analyze(&self, question: &str) -> Analysis {
        let lowered = question.to_lowercase();
        let mut analysis = Analysis::default();

        for token in TOKEN_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
            if let Some(label) = Self::entity_label(token) {
                // Later spans overwrite earlier ones with the same label.
                analysis.entities.insert(label.to_string(), token.to_string());
                // "six" is also a cricket noun.
                if label != CARDINAL || token.chars().any(|c| c.is_ascii_digit()) {
                    continue;
                }
            }

            let token = token.strip_suffix("'s").unwrap_or(token);
            if token.len() < 2 || STOPWORDS.contains(&token) {
                continue;
            }

            analysis.keywords.insert(token.to_string());
            analysis.keywords.insert(lemmatize(token));
        }

        tracing::debug!(
            keywords = ?analysis.keywords,
            entities = ?analysis.entities,
            "question analyzed"
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(question: &str) -> Vec<String> {
        RuleAnalyzer.analyze(question).keywords.into_iter().collect()
    }

    #[test]
    fn test_lemmatize() {
        assert_eq!(lemmatize("matches"), "match");
        assert_eq!(lemmatize("sixes"), "six");
        assert_eq!(lemmatize("batsmen"), "batsman");
        assert_eq!(lemmatize("centuries"), "century");
        assert_eq!(lemmatize("runs"), "run");
        assert_eq!(lemmatize("wickets"), "wicket");
        assert_eq!(lemmatize("toss"), "toss");
        assert_eq!(lemmatize("innings"), "innings");
        assert_eq!(lemmatize("team"), "team");
    }

    #[test]
    fn test_keywords_keep_surface_and_lemma() {
        assert_eq!(
            keywords("Which player has scored the most runs?"),
            ["player", "run", "runs", "scored"]
        );
        assert_eq!(keywords("List of teams"), ["list", "team", "teams"]);
    }

    #[test]
    fn test_question_is_case_folded() {
        let analysis = RuleAnalyzer.analyze("HOW MANY MATCHES ENDED IN A TIE?");
        assert!(analysis.keywords.contains("matches"));
        assert!(analysis.keywords.contains("match"));
        assert!(analysis.keywords.contains("tie"));
    }

    #[test]
    fn test_ordinal_entity() {
        let analysis = RuleAnalyzer.analyze("Who was the winner of the first match?");
        assert_eq!(analysis.entities.get(ORDINAL).map(String::as_str), Some("first"));
        assert!(analysis.keywords.contains("winner"));
        assert!(!analysis.keywords.contains("first"));

        let analysis = RuleAnalyzer.analyze("winner of the 3rd match");
        assert_eq!(analysis.entities.get(ORDINAL).map(String::as_str), Some("3rd"));
    }

    #[test]
    fn test_numbers_and_years() {
        let analysis = RuleAnalyzer.analyze("matches played in 2010 with 50 runs");
        assert_eq!(analysis.entities.get(DATE).map(String::as_str), Some("2010"));
        assert_eq!(analysis.entities.get(CARDINAL).map(String::as_str), Some("50"));
        assert!(!analysis.keywords.contains("50"));
    }

    #[test]
    fn test_six_is_both_number_and_keyword() {
        let analysis = RuleAnalyzer.analyze("who hit a six");
        assert_eq!(analysis.entities.get(CARDINAL).map(String::as_str), Some("six"));
        assert!(analysis.keywords.contains("six"));
    }

    #[test]
    fn test_verbs_are_not_filtered() {
        // No part-of-speech tagging: "runs" as a verb still reaches the runs rule.
        assert_eq!(
            keywords("Which player runs the fastest?"),
            ["fastest", "player", "run", "runs"]
        );
    }

    #[test]
    fn test_possessive_is_stripped() {
        assert!(keywords("Kenya's players").contains(&"kenya".to_string()));
    }
}
