use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Pending => ' ',
            TaskStatus::Completed => 'x',
        }
    }

    /// The other state
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// Error type for description validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("description required")]
    MissingDescription,
    #[error("description cannot be empty")]
    EmptyDescription,
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, assigned by the list at creation
    pub id: String,
    /// Description text, always trimmed
    pub description: String,
    /// Completion state
    pub status: TaskStatus,
    /// Creation timestamp, never changes after construction
    pub created_at: DateTime<Utc>,
    /// Optional due date (a calendar date, no time component)
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Create a task stamped with the current time. The description is
    /// trimmed but not validated here; `TaskList::add` rejects empty
    /// descriptions before construction.
    pub fn new(
        id: String,
        description: &str,
        deadline: Option<NaiveDate>,
        status: TaskStatus,
    ) -> Self {
        Task {
            id,
            description: description.trim().to_string(),
            status,
            created_at: Utc::now(),
            deadline,
        }
    }

    /// Flip Pending <-> Completed. Returns the new status.
    pub fn toggle_status(&mut self) -> TaskStatus {
        self.status = self.status.toggled();
        self.status
    }

    /// Replace the description with the trimmed input.
    pub fn update_description(&mut self, text: &str) -> Result<(), ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        self.description = text.to_string();
        Ok(())
    }

    /// Set or clear the due date. A parsed `NaiveDate` is already
    /// well-formed; format checking lives at the input boundary.
    pub fn set_deadline(&mut self, deadline: Option<NaiveDate>) {
        self.deadline = deadline;
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
