use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::model::task::{Task, TaskStatus};
use crate::ops::deadline;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub overdue: bool,
}

pub fn task_to_json(task: &Task, now: NaiveDateTime) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        description: task.description.clone(),
        status: task.status,
        created_at: task.created_at,
        deadline: task.deadline,
        overdue: deadline::is_overdue(task, now),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary:
/// `[ ] 1754550000123-00c0ffee  Buy milk  (due 2026-08-20, 2d 13h 29m 59s left)`
pub fn format_task_line(task: &Task, now: NaiveDateTime) -> String {
    let deadline_note = match task.deadline {
        Some(d) if deadline::is_overdue(task, now) => format!("  (overdue since {})", d),
        Some(d) if task.status == TaskStatus::Completed => format!("  (was due {})", d),
        Some(d) => format!(
            "  (due {}, {} left)",
            d,
            deadline::format_remaining(deadline::remaining(d, now))
        ),
        None => String::new(),
    };
    format!(
        "[{}] {}  {}{}",
        task.status.checkbox_char(),
        task.id,
        task.description,
        deadline_note
    )
}

/// Format a listing, one task per line, with a friendly empty state.
pub fn format_task_listing(tasks: &[&Task], now: NaiveDateTime) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["no tasks".to_string()];
    }
    tasks.iter().map(|t| format_task_line(t, now)).collect()
}

/// Parse a status filter string into a TaskStatus
pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    match s {
        "pending" => Ok(TaskStatus::Pending),
        "completed" | "done" => Ok(TaskStatus::Completed),
        _ => Err(format!(
            "unknown status '{}' (expected: pending, completed)",
            s
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
