//! End-to-end run over a backup directory.
//!
//! # Error Handling Strategy
//!
//! - **Backup-level errors**: A backup that cannot be opened or queried is logged and skipped,
//!   so the remaining backups are still processed.
//! - **Failure threshold**: If more than half of the discovered backups fail, the run fails,
//!   since that points at a systematic problem (wrong directory, wrong file format).
//! - **Record-level errors**: Delegated to [`super::batch`], which isolates each record.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};

use super::batch::{BatchOutput, process_records};
use crate::analyzers::MetadataGenerator;
use crate::config::{Config, Formatters};
use crate::models::RawRecord;
use crate::parsers::SchemaNormalizer;
use crate::store::{BackupStore, discover_backups};

/// Records collected from every readable backup
#[derive(Debug, Clone, Default)]
pub struct CollectedRecords {
    pub records: Vec<RawRecord>,
    pub backups_read: usize,
    pub backups_failed: usize,
}

/// Read chat records from every backup in `backup_dir`
pub fn collect_records(backup_dir: &Path, config: &Config) -> Result<CollectedRecords> {
    let backups = discover_backups(backup_dir, &config.files.backup_pattern)?;
    tracing::info!(count = backups.len(), "Found backup files for analysis");

    // Read each backup independently; one bad file must not stop the rest
    let mut collected = CollectedRecords::default();
    for backup in &backups {
        tracing::info!(path = %backup.display(), "Processing backup");
        let records = BackupStore::open(backup)
            .and_then(|store| store.read_records(&config.store.key_patterns));
        match records {
            Ok(records) => {
                collected.backups_read += 1;
                tracing::debug!(path = %backup.display(), count = records.len(), "Read records");
                collected.records.extend(records);
            }
            Err(e) => {
                collected.backups_failed += 1;
                tracing::warn!(
                    path = %backup.display(),
                    error = %format!("{:#}", e),
                    "Failed to read backup"
                );
            }
        }
    }

    // Fail the run if more than half of the backups could not be read
    let total = collected.backups_read + collected.backups_failed;
    if total > 0 {
        let failure_rate = collected.backups_failed as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "Processing failed: {}/{} backups could not be read ({}% failure rate)",
                collected.backups_failed,
                total,
                (failure_rate * 100.0) as u32
            );
        }
    }

    Ok(collected)
}

/// Collect, normalize and analyze every conversation under `backup_dir`
pub fn process_backups(
    backup_dir: &Path,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<(CollectedRecords, BatchOutput)> {
    let collected = collect_records(backup_dir, config)?;
    let normalizer = SchemaNormalizer::new(now, Formatters::default());
    let generator = MetadataGenerator::from_config(config);
    let output = process_records(
        &collected.records,
        &normalizer,
        &generator,
        config.analysis.min_text_length,
    );
    Ok((collected, output))
}
