use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, params_from_iter};

use crate::models::RawRecord;
use crate::utils::{MAX_BACKUP_SIZE_BYTES, validate_file_size};

/// Read-only view of an editor state database (`ItemTable(key, value)`)
pub struct BackupStore {
    conn: Connection,
    path: PathBuf,
}

impl BackupStore {
    pub fn open(path: &Path) -> Result<Self> {
        validate_file_size(path, MAX_BACKUP_SIZE_BYTES)?;
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open backup database: {}", path.display()))?;
        Ok(Self { conn, path: path.to_path_buf() })
    }

    /// All records whose key contains any of `key_patterns`
    ///
    /// Matching uses SQL `LIKE`, which is case-insensitive for ASCII. TEXT and BLOB values are
    /// both accepted (BLOBs decoded as lossy UTF-8); NULL and numeric values are skipped.
    pub fn read_records(&self, key_patterns: &[String]) -> Result<Vec<RawRecord>> {
        if key_patterns.is_empty() {
            return Ok(Vec::new());
        }

        // One LIKE clause per pattern, OR-ed together
        let conditions = vec![r"key LIKE ? ESCAPE '\'"; key_patterns.len()].join(" OR ");
        let query = format!("SELECT key, value FROM ItemTable WHERE {}", conditions);
        let params: Vec<String> =
            key_patterns.iter().map(|p| format!("%{}%", escape_like(p))).collect();

        let mut stmt = self
            .conn
            .prepare(&query)
            .with_context(|| format!("Failed to query ItemTable in {}", self.path.display()))?;

        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            let key: String = row.get(0)?;
            let value = match row.get_ref(1)? {
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Some(String::from_utf8_lossy(bytes).into_owned())
                }
                // NULL, INTEGER, REAL
                _ => None,
            };
            Ok((key, value))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (key, value) = row.context("Failed to read ItemTable row")?;
            match value {
                Some(value) => records.push(RawRecord { key, value }),
                None => tracing::debug!(key = %key, "Skipping record without text value"),
            }
        }

        Ok(records)
    }
}

fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
