use crate::model::list::TaskList;
use crate::model::task::{TaskStatus, ValidationError};

/// One remote record, normalized at the adapter boundary to the shape
/// `TaskList::add` expects. Remote records never carry a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTodo {
    pub description: String,
    pub status: TaskStatus,
}

/// Result of a bulk import
#[derive(Debug)]
pub struct ImportOutcome {
    /// Ids assigned to the appended tasks, in append order
    pub added_ids: Vec<String>,
}

/// Append each record to the end of the list, preserving record order and
/// status. A validation failure aborts the batch at that record; earlier
/// appends stay in the list and the caller decides whether to persist.
pub fn import_todos(
    list: &mut TaskList,
    todos: Vec<ImportedTodo>,
) -> Result<ImportOutcome, ValidationError> {
    let mut added_ids = Vec::with_capacity(todos.len());
    for todo in todos {
        let task = list.add(&todo.description, None, todo.status)?;
        added_ids.push(task.id);
    }
    Ok(ImportOutcome { added_ids })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(description: &str, status: TaskStatus) -> ImportedTodo {
        ImportedTodo {
            description: description.to_string(),
            status,
        }
    }

    #[test]
    fn test_import_appends_in_order_after_existing() {
        let mut list = TaskList::new();
        list.add("Existing", None, TaskStatus::Pending).unwrap();

        let outcome = import_todos(
            &mut list,
            vec![
                todo("X", TaskStatus::Completed),
                todo("Y", TaskStatus::Pending),
            ],
        )
        .unwrap();

        assert_eq!(outcome.added_ids.len(), 2);
        assert_eq!(list.len(), 3);

        let tasks = list.tasks();
        assert_eq!(tasks[1].description, "X");
        assert_eq!(tasks[1].status, TaskStatus::Completed);
        assert_eq!(tasks[2].description, "Y");
        assert_eq!(tasks[2].status, TaskStatus::Pending);

        // Imported records never carry a deadline
        assert!(!tasks[1].has_deadline());
        assert!(!tasks[2].has_deadline());

        // The report matches the appended tasks
        assert_eq!(outcome.added_ids[0], tasks[1].id);
        assert_eq!(outcome.added_ids[1], tasks[2].id);
    }

    #[test]
    fn test_import_empty_batch_is_a_no_op() {
        let mut list = TaskList::new();
        let outcome = import_todos(&mut list, Vec::new()).unwrap();
        assert!(outcome.added_ids.is_empty());
        assert!(list.is_empty());
    }

    #[test]
    fn test_import_aborts_on_blank_record() {
        let mut list = TaskList::new();
        let err = import_todos(
            &mut list,
            vec![
                todo("Good", TaskStatus::Pending),
                todo("   ", TaskStatus::Pending),
                todo("Never reached", TaskStatus::Pending),
            ],
        )
        .unwrap_err();

        assert_eq!(err, ValidationError::MissingDescription);
        // The record before the blank one was appended
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].description, "Good");
    }
}
