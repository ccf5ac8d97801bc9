use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::RegexBuilder;
use walkdir::WalkDir;

use crate::utils::validate_path_not_symlink;

/// Maximum number of backups read in one run (prevent resource exhaustion)
const MAX_BACKUP_FILES: usize = 1000;

/// Find backup databases directly inside `backup_dir`
///
/// A file qualifies when its name matches `pattern` (case-insensitive regex). The result is
/// sorted by path. A missing directory yields an empty Vec.
///
/// # Errors
///
/// Returns an error if:
/// - `pattern` is not a valid regex
/// - The directory exists but cannot be read
/// - More than [`MAX_BACKUP_FILES`] backups are found
///
/// Symlinked entries are logged and skipped.
pub fn discover_backups(backup_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid backup pattern: {}", pattern))?;

    if !backup_dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for entry in WalkDir::new(backup_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| {
            format!("Failed to read backup directory: {}", backup_dir.display())
        })?;
        let path = entry.path();

        let file_name = entry.file_name().to_string_lossy();
        if !matcher.is_match(&file_name) {
            continue;
        }

        if let Err(e) = validate_path_not_symlink(path) {
            tracing::warn!(path = %path.display(), error = %e, "Skipping backup (symlink not allowed)");
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        if backups.len() >= MAX_BACKUP_FILES {
            bail!(
                "Resource limit exceeded: Found more than {} backup files in {}",
                MAX_BACKUP_FILES,
                backup_dir.display()
            );
        }

        backups.push(path.to_path_buf());
    }

    backups.sort();
    Ok(backups)
}

/// Create the backup and target directories if missing
pub fn ensure_directories(backup_dir: &Path, target_dir: &Path) -> Result<()> {
    for dir in [backup_dir, target_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}
