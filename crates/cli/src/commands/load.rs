//! Bulk replacement of the `names` table from a semicolon-delimited file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use namebook_core::AppConfig;
use namebook_core::import::{ImportBatch, parse_import};
use namebook_storage::StorageError;
use thiserror::Error;

use crate::connect;

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no usable rows ({skipped} skipped); the table was left untouched", .path.display())]
    NoRows { path: PathBuf, skipped: usize },

    #[error("bulk load failed, nothing was changed: {0}")]
    Storage(#[from] StorageError),
}

/// Read and parse the file. Nothing touches the database here.
pub(crate) fn read_batch(path: &Path) -> Result<ImportBatch, LoadError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    let batch = parse_import(&contents);
    if batch.rows.is_empty() {
        return Err(LoadError::NoRows { path: path.to_path_buf(), skipped: batch.skipped });
    }
    Ok(batch)
}

pub(crate) async fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let batch = read_batch(path)?;
    if let Some(header) = &batch.header {
        tracing::debug!(?header, "import header");
    }
    tracing::info!(rows = batch.rows.len(), skipped = batch.skipped, "parsed {}", path.display());

    let storage = connect(config).await?;
    let report = storage.replace_all(&batch.rows).await.map_err(LoadError::from)?;
    storage.close().await;

    println!(
        "Loaded {} names ({} duplicates dropped, {} rows skipped). Table now holds {} names.",
        report.inserted, report.duplicates, batch.skipped, report.total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rows_and_counts_skips() {
        let file = file_with(
            "\u{feff}id;name;meaning;origin;reason;count\n1;Ana;grace;Hebrew;;4\n2;Bia\n3;Caio;happy;Latin;family;x\n",
        );
        let batch = read_batch(file.path()).unwrap();
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.rows[0].search_count, 4);
        assert_eq!(batch.rows[1].search_count, 0);
    }

    #[test]
    fn header_only_file_is_rejected() {
        let file = file_with("id;name;meaning;origin;reason;count\n");
        let err = read_batch(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoRows { skipped: 0, .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_batch(Path::new("/nonexistent/names.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("failed to read /nonexistent/names.csv"));
    }
}
