use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use namebook_core::export::to_csv;
use namebook_core::{AppConfig, ORIGIN_BREAKDOWN_SLOTS, TOP_RANKING_LIMIT, fold_origins};
use namebook_storage::{NameStore, PgStorage};

use crate::connect;

pub(crate) async fn run_check(config: &AppConfig) -> Result<()> {
    let storage =
        PgStorage::connect(&config.database_url, Duration::from_secs(config.acquire_timeout_secs))
            .await
            .context("could not connect to the database")?;
    let version = storage.server_version().await?;
    storage.close().await;
    println!("Connected: {version}");
    Ok(())
}

pub(crate) async fn run_export(config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let storage = connect(config).await?;
    let records = storage.export_all().await?;
    storage.close().await;

    let csv = to_csv(&records);
    match output {
        Some(path) => {
            std::fs::write(path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(rows = records.len(), "exported to {}", path.display());
        },
        None => print!("{csv}"),
    }
    Ok(())
}

pub(crate) async fn run_stats(config: &AppConfig) -> Result<()> {
    let storage = connect(config).await?;
    let mut report = storage.overview(TOP_RANKING_LIMIT).await?;
    storage.close().await;
    report.origins = fold_origins(report.origins, ORIGIN_BREAKDOWN_SLOTS);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
