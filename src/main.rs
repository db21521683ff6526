use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod db;
mod error;
mod models;
mod report;
mod routes;
mod server;
mod state;
mod stats;
mod validation;

use config::ServerConfig;
use db::SurveyStore;

#[derive(Parser)]
#[command(name = "lifestyle-survey")]
#[command(about = "Collects lifestyle surveys and reports aggregate results", long_about = None)]
struct Cli {
    /// SQLite database holding the surveys table
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://survey.db", global = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the survey API
    Serve(ServerConfig),
    /// Create the surveys table if it does not exist
    InitDb,
    /// Load a few sample surveys
    Seed,
    /// Import surveys from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Write the survey results as markdown
    Report {
        #[arg(long, default_value = "survey_report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = SurveyStore::connect(&cli.database_url).await?;
    store
        .ping()
        .await
        .context("database connectivity check failed")?;
    store
        .init()
        .await
        .context("failed to create the surveys table")?;
    info!("Database ready at {}", cli.database_url);

    let outcome = run(cli.command, &store).await;
    store.close().await;
    outcome
}

async fn run(command: Commands, store: &SurveyStore) -> anyhow::Result<()> {
    match command {
        Commands::Serve(config) => {
            server::serve(&config, store.clone()).await?;
        }
        Commands::InitDb => {
            println!("Schema ready.");
        }
        Commands::Seed => {
            let inserted = store.seed().await?;
            println!("Inserted {inserted} sample surveys.");
        }
        Commands::Import { csv } => {
            let inserted = store.import_csv(&csv).await?;
            println!("Inserted {inserted} surveys from {}.", csv.display());
        }
        Commands::Report { out } => {
            let records = store.list_all().await?;
            let summary = stats::summarize_now(&records);
            let report = report::build_report(&summary, Local::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
