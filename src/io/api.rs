use reqwest::blocking::Client;
use serde::Deserialize;

use crate::model::task::TaskStatus;
use crate::ops::import::ImportedTodo;

/// Error type for the remote import
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// One record as the demo API returns it. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct RemoteTodo {
    title: String,
    completed: bool,
}

impl From<RemoteTodo> for ImportedTodo {
    fn from(remote: RemoteTodo) -> Self {
        ImportedTodo {
            description: remote.title,
            status: if remote.completed {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            },
        }
    }
}

/// Fetch up to `limit` records from `url` and normalize them into the
/// internal input shape right here at the boundary, so the external record
/// shape never leaks inward. All-or-nothing: any transport failure or
/// non-success status yields no records at all.
pub fn fetch_todos(url: &str, limit: usize) -> Result<Vec<ImportedTodo>, SyncError> {
    let response = Client::new()
        .get(url)
        .query(&[("_limit", limit.to_string())])
        .send()?;

    if !response.status().is_success() {
        return Err(SyncError::Status(response.status()));
    }

    let records: Vec<RemoteTodo> = response.json()?;
    Ok(records.into_iter().map(ImportedTodo::from).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
