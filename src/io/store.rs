use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::Task;

/// Default store filename within the data directory.
pub const STORE_FILE: &str = "taskflow.json";

/// Error type for store writes. Loads never fail; see `load_tasks`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Load the stored tasks from `dir`.
///
/// A missing file is an empty list. An unreadable or unparseable file is
/// also an empty list: the raw content is appended to the recovery log and a
/// warning goes to stderr, then the app starts fresh. Loading never blocks
/// the user.
pub fn load_tasks(dir: &Path, file: &str) -> Vec<Task> {
    let path = dir.join(file);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            eprintln!(
                "warning: could not read {}: {} (starting empty)",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            recovery::log_recovery(
                dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Parse,
                    description: format!("{} would not parse: {}", file, e),
                    body: raw,
                },
            );
            eprintln!(
                "warning: {} is not valid task data; starting empty (content kept in the recovery log)",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Save the full task sequence to `dir`, atomically. A failed write leaves
/// any previous store intact and parks the unsaved content in the recovery
/// log.
pub fn save_tasks(dir: &Path, file: &str, tasks: &[Task]) -> Result<(), StoreError> {
    let path = dir.join(file);
    let content = serde_json::to_string_pretty(tasks)?;

    if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
        recovery::log_recovery(
            dir,
            RecoveryEntry {
                timestamp: Utc::now(),
                category: RecoveryCategory::Write,
                description: format!("{} write failed: {}", file, e),
                body: content,
            },
        );
        return Err(StoreError::Write { path, source: e });
    }
    Ok(())
}

/// Remove the store file. A missing file is already clear.
pub fn clear_store(dir: &Path, file: &str) -> io::Result<()> {
    match fs::remove_file(dir.join(file)) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
