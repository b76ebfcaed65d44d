use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use namebook_core::AppConfig;
use namebook_storage::PgStorage;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "namebook")]
#[command(version, about = "Register, search, rank and export names", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web application.
    Serve {
        /// Port to listen on. Defaults to $PORT, then 5000.
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Replace every record with the contents of a semicolon-delimited file.
    Load {
        file: PathBuf,
    },
    /// Connect to the database and print the server version.
    Check,
    /// Write all records as CSV.
    Export {
        /// Output file. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print record count, top 10 and origin breakdown as JSON.
    Stats,
}

/// Connect to PostgreSQL and ensure the schema. Failure here is fatal.
pub(crate) async fn connect(config: &AppConfig) -> Result<PgStorage> {
    PgStorage::new(&config.database_url, Duration::from_secs(config.acquire_timeout_secs))
        .await
        .context("could not connect to the database or prepare its schema")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries command output (CSV, JSON); logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&config, port, &host).await,
        Commands::Load { file } => commands::load::run(&config, &file).await,
        Commands::Check => commands::admin::run_check(&config).await,
        Commands::Export { output } => commands::admin::run_export(&config, output.as_deref()).await,
        Commands::Stats => commands::admin::run_stats(&config).await,
    }
}
