use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timestamp format used in the tasks table. Chosen so that lexical order
/// over the stored text matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel id for a task that has not been persisted yet. `save` replaces
/// it with a freshly assigned id.
pub const NEW_TASK_ID: i64 = 0;

/// A single tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique, assigned at creation, never reassigned on edit
    pub id: i64,
    /// Display text, non-empty for every persisted task
    pub name: String,
    /// Free-text due date, empty when unset
    pub due_date: String,
    pub completed: bool,
    /// Immutable after creation
    pub created_at: DateTime<Utc>,
    /// Advances on every save or completion toggle
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build an unsaved task with the given name. The store assigns the id
    /// and the authoritative timestamps when the task is first saved.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: NEW_TASK_ID,
            name: name.into(),
            due_date: String::new(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_TASK_ID
    }
}
