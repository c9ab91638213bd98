use chrono::{NaiveDate, Utc};

use crate::model::task::{Task, TaskStatus, ValidationError};

/// In-memory owner of the ordered task sequence.
///
/// Insertion order is display order. The list hands out shared borrows and
/// clones only; every structural change goes through the methods below, so
/// callers can never splice the sequence from outside.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    /// Highest millisecond stamp issued so far, so ids stay non-decreasing
    /// even if the wall clock steps backwards.
    last_stamp: i64,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    /// Build a list from previously stored tasks, preserving their order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskList {
            tasks,
            last_stamp: 0,
        }
    }

    /// Create a task and append it to the end of the sequence.
    /// Returns a clone of the created task.
    pub fn add(
        &mut self,
        description: &str,
        deadline: Option<NaiveDate>,
        status: TaskStatus,
    ) -> Result<Task, ValidationError> {
        let text = description.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let id = self.next_id();
        let task = Task::new(id, text, deadline, status);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Remove the task with the given id. Returns whether a removal
    /// occurred; a missing id is a normal no-op, not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Flip a task's status in place, returning the updated task.
    /// `None` is a query miss, not a fault.
    pub fn toggle_status(&mut self, id: &str) -> Option<Task> {
        let task = self.find_mut(id)?;
        task.toggle_status();
        Some(task.clone())
    }

    /// Replace a task's description, returning the updated task.
    /// `None` is a query miss; an empty replacement propagates the task's
    /// validation error untouched.
    pub fn update_description(
        &mut self,
        id: &str,
        text: &str,
    ) -> Result<Option<Task>, ValidationError> {
        match self.find_mut(id) {
            Some(task) => {
                task.update_description(text)?;
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The ordered sequence. The slice is immutable; structural changes only
    /// happen through the methods above.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Generate a fresh id: a non-decreasing millisecond stamp plus a random
    /// 32-bit suffix. A candidate that collides with a live id is
    /// regenerated, so uniqueness within this list is guaranteed rather
    /// than merely overwhelmingly probable.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        if now > self.last_stamp {
            self.last_stamp = now;
        }
        loop {
            let id = format!("{}-{:08x}", self.last_stamp, rand::random::<u32>());
            if self.find_by_id(&id).is_none() {
                return id;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
