//! rankedge CLI
//!
//! Thin wrapper over the engine: reads JSON inputs, prints JSON results.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rankedge::{
    canonicalize,
    config::EngineConfig,
    types::{MediaKind, TitleRecord},
    Engine, EvaluationRequest, OutcomeMatcher,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rankedge")]
#[command(about = "Match market outcomes to streaming titles and price their odds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "rankedge.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a title
    Canonicalize {
        title: String,
        /// show or movie
        #[arg(short, long, default_value = "show")]
        kind: MediaKind,
    },
    /// Match an outcome name against a title snapshot
    Match {
        outcome: String,
        /// JSON array of {id, canonical_name, aliases}
        #[arg(short, long)]
        snapshot: String,
    },
    /// Run the full pipeline over an evaluation request
    Evaluate {
        /// JSON evaluation request
        #[arg(short, long)]
        input: String,
        /// Evaluation date (defaults to today, UTC)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = EngineConfig::load(&cli.config)?;

    match cli.command {
        Commands::Canonicalize { title, kind } => print_json(&canonicalize(&title, kind)),
        Commands::Match { outcome, snapshot } => {
            let snapshot: Vec<TitleRecord> = read_json(&snapshot)?;
            let matcher = OutcomeMatcher::new(config.matcher.clone(), &snapshot);
            print_json(&matcher.match_outcome(&outcome))
        }
        Commands::Evaluate { input, date } => {
            let request: EvaluationRequest = read_json(&input)?;
            let engine = Engine::new(config)?;
            let evaluated_on = date.unwrap_or_else(|| Utc::now().date_naive());
            tracing::info!(outcome = %request.outcome_name, %evaluated_on, "Evaluating outcome");
            print_json(&engine.evaluate(&request, evaluated_on))
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
