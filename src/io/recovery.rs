use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Filename of the append-only recovery log, kept next to the store file.
const LOG_FILE: &str = ".recovery.log";

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- taskflow recovery log (append-only)
     Data taskflow could not load or save normally lands here.
     View with: tf recovery
     Safe to delete if empty or stale. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Stored content that would not parse
    Parse,
    /// A store write that failed
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parse => write!(f, "parse"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parse" => Some(RecoveryCategory::Parse),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} | {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Append an entry to the log. Errors are swallowed and printed to stderr:
/// recovery logging must never turn a bad situation into a fatal one.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(dir);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read entries from the log, most recent first.
pub fn read_entries(dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(recovery_log_path(dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    // Entries are stored oldest-first
    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.split_off(skip);
    }
    entries.reverse();
    entries
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut body = String::new();
        let mut in_code_block = false;
        for line in lines.by_ref() {
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
            } else if line == "```text" {
                in_code_block = true;
            } else if line == "---" {
                break;
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            body,
        });
    }

    entries
}

/// Parse `<rfc3339> | <category>: <description>`.
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (stamp, rest) = header.split_once(" | ")?;
    let timestamp = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    let (category, description) = rest.split_once(": ")?;
    Some((
        timestamp,
        RecoveryCategory::parse_category(category)?,
        description.to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
