//! cricq: ask questions about cricket match data.

use clap::{Parser, Subcommand};
use cricket_qa::ingest::LoadOutcome;
use cricket_qa::telemetry::init_tracing;
use cricket_qa::{Config, DataStore, Engine, MatchLoader, SchemaDescriptor};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cricket match question answering over SQLite
#[derive(Parser)]
#[command(name = "cricq")]
#[command(about = "Answer natural-language questions about cricket match data", long_about = None)]
#[command(version)]
struct Cli {
    /// Database path (overrides CRICKET_QA_DB)
    #[arg(long, global = true, env = "CRICKET_QA_DB")]
    db: Option<String>,

    /// LLM model name (overrides CRICKET_QA_LLM)
    #[arg(long, global = true)]
    model: Option<String>,

    /// LLM timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question
    Ask {
        /// Question in natural language
        question: String,

        /// Keyword rules only, no model call
        #[arg(long)]
        offline: bool,
    },

    /// Load Cricsheet JSON match files (a file or a directory)
    Load {
        path: PathBuf,
    },

    /// Print the schema description given to the model
    Schema,

    /// Run a read-only SQL statement
    Sql {
        statement: String,

        /// Maximum rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing("warn", cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(secs) = cli.timeout {
        anyhow::ensure!(secs > 0, "--timeout must be positive");
        config = config.with_timeout(Duration::from_secs(secs));
    }

    match cli.command {
        Commands::Ask { question, offline } => cmd_ask(&config, &question, offline).await?,
        Commands::Load { path } => cmd_load(&config.db_path, &path)?,
        Commands::Schema => print!("{}", SchemaDescriptor::cricket().prompt_context()),
        Commands::Sql { statement, limit } => cmd_sql(&config.db_path, &statement, limit)?,
    }

    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, offline: bool) -> anyhow::Result<()> {
    let engine = if offline {
        Engine::keyword_only(DataStore::open(&config.db_path))
    } else {
        Engine::from_config(config)?
    };
    println!("{}", engine.answer(question).await);
    Ok(())
}

fn cmd_load(db_path: &Path, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut loader = MatchLoader::open(db_path)?;
    loader.create_schema()?;

    if path.is_dir() {
        let summary = loader.load_dir(path)?;
        println!(
            "Loaded {} matches ({} deliveries), skipped {} already present",
            summary.inserted, summary.deliveries, summary.skipped
        );
        for (file, reason) in &summary.failed {
            eprintln!("  failed: {}: {}", file.display(), reason);
        }
    } else {
        match loader.load_file(path)? {
            LoadOutcome::Inserted {
                match_id,
                deliveries,
            } => println!("Loaded {} ({} deliveries)", match_id, deliveries),
            LoadOutcome::Skipped { match_id } => println!("{} already loaded", match_id),
        }
    }
    Ok(())
}

fn cmd_sql(db_path: &Path, statement: &str, limit: usize) -> anyhow::Result<()> {
    let conn = DataStore::open(db_path).connect()?.with_source("cli");
    let rows = conn.query_rows(statement, &[], limit)?;
    if rows.is_empty() {
        println!("(no rows)");
    }
    for row in &rows {
        println!("{}", row.flatten());
    }
    Ok(())
}
