pub mod sqlite;

use std::path::PathBuf;

use crate::model::Task;

pub use sqlite::SqliteStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("task name must not be empty")]
    EmptyName,
    #[error("could not open task database at {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Durable CRUD surface over the task table.
///
/// Injected into the controller at construction rather than reached through
/// a global handle, so tests can substitute their own implementation. All
/// calls are synchronous; the single-threaded event loop is the only writer.
pub trait TaskStore {
    /// All tasks passing the visibility rule, newest first. Callers treat
    /// an error as "snapshot unchanged".
    fn list_visible(&self) -> Result<Vec<Task>, StorageError>;

    /// Atomic create-or-update keyed on id. A task with the sentinel "new"
    /// id gets a fresh id and creation timestamp; an existing id keeps its
    /// `created_at` and has everything else overwritten. Returns the task
    /// as persisted.
    fn save(&mut self, task: Task) -> Result<Task, StorageError>;

    /// Remove a task permanently, regardless of completion or age. No-op
    /// if the id does not exist.
    fn delete(&mut self, id: i64) -> Result<(), StorageError>;

    /// Update only `completed` and `updated_at`. No-op if the id does not
    /// exist.
    fn set_completion(&mut self, id: i64, completed: bool) -> Result<(), StorageError>;
}
