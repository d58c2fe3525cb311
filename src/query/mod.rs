//! Keyword resolution: question analysis, the intent rule table, and answer formatting.

pub mod analyzer;
pub mod format;
pub mod rules;

pub use analyzer::{Analysis, Entities, Keywords, QuestionAnalyzer, RuleAnalyzer};
pub use format::{render_model_answer, render_plan};
pub use rules::{resolve_via_keywords, Intent, IntentRule, QueryPlan, DEFAULT_HELP, LIST_CAP, RULES};
