use aggeditor::config::LoggingConfig;
use aggeditor::{Catalog, EditorConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "aggeditor")]
#[command(about = "Aggregation editor tools - inspect the catalog and replay editor actions")]
#[command(version)]
struct Cli {
    /// Editor config file (.toml, .yaml or .yml)
    #[arg(short, long, global = true, env = "AGGEDITOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List aggregation types with their capability flags
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the initial query (one default metric, one default bucket)
    Init,

    /// Replay an action script against a query and print the result
    Replay {
        /// Action script: JSON array, JSON lines (.jsonl) or YAML list
        #[arg(short, long)]
        actions: PathBuf,

        /// Starting query as JSON; defaults to the initial query
        #[arg(short, long)]
        query: Option<PathBuf>,

        /// Print the state after every action as JSON lines
        #[arg(long)]
        steps: bool,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output, logs go to stderr
    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EditorConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    init_logging(&config.logging);

    let catalog = Arc::new(Catalog::from_config(&config.catalog).context("Invalid catalog config")?);

    match cli.command {
        Commands::Catalog { json } => commands::run_catalog(&catalog, json)?,
        Commands::Init => commands::run_init(&catalog)?,
        Commands::Replay {
            actions,
            query,
            steps,
        } => {
            tracing::info!("Replaying {:?}", actions);
            commands::run_replay(catalog, &actions, query.as_deref(), steps)?;
        }
    }

    Ok(())
}
