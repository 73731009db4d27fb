use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Params, params};

use crate::model::task::{TIMESTAMP_FORMAT, Task};

use super::{StorageError, TaskStore};

/// How long a completed task stays in the visible list, measured from its
/// creation time.
const VISIBILITY_WINDOW_HOURS: i64 = 24;

const TASK_COLUMNS: &str = "id, name, due_date, completed, created_at, updated_at";

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

/// SQLite-backed task store. One connection, one writer.
pub struct SqliteStore {
    conn: Connection,
    clock: Clock,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema
    /// exists. A schema-creation failure fails the open: the process must
    /// not run against a database it could not initialize.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| StorageError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_connection(conn)
    }

    /// Ephemeral in-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Open {
            path: PathBuf::from(":memory:"),
            source: e,
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = SqliteStore {
            conn,
            clock: Box::new(Utc::now),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Replace the wall clock. Tests use this to control "now" for the
    /// visibility filter and timestamp assertions.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;

            CREATE TABLE IF NOT EXISTS tasks (
              id         INTEGER PRIMARY KEY,
              name       TEXT NOT NULL,
              due_date   TEXT NOT NULL DEFAULT '',
              completed  INTEGER NOT NULL DEFAULT 0,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Next task id. Time-derived so ids stay unique across process
    /// restarts, and bumped past the current maximum so rapid creations
    /// within one millisecond cannot collide.
    fn next_id(&self, now: DateTime<Utc>) -> Result<i64, StorageError> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(id) FROM tasks", [], |row| row.get(0))?;
        Ok(now.timestamp_millis().max(max.unwrap_or(0) + 1))
    }

    /// All tasks regardless of visibility, newest first. Backs the CLI
    /// `list --all` flag; completed tasks older than the visibility window
    /// are only reachable here.
    pub fn list_all(&self) -> Result<Vec<Task>, StorageError> {
        self.query_tasks(
            &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"),
            params![],
        )
    }

    fn query_tasks(&self, sql: &str, params: impl Params) -> Result<Vec<Task>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, task_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl TaskStore for SqliteStore {
    fn list_visible(&self) -> Result<Vec<Task>, StorageError> {
        let cutoff = (self.now() - Duration::hours(VISIBILITY_WINDOW_HOURS))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        self.query_tasks(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks \
                 WHERE NOT (completed = 1 AND created_at < ?1) \
                 ORDER BY created_at DESC, id DESC"
            ),
            params![cutoff],
        )
    }

    fn save(&mut self, mut task: Task) -> Result<Task, StorageError> {
        if task.name.is_empty() {
            return Err(StorageError::EmptyName);
        }
        let now = self.now();
        if task.is_new() {
            task.id = self.next_id(now)?;
            task.created_at = now;
        }
        task.updated_at = now;
        // Upsert: the conflict arm deliberately leaves created_at alone.
        self.conn.execute(
            "INSERT INTO tasks (id, name, due_date, completed, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT(id) DO UPDATE SET \
               name = excluded.name, \
               due_date = excluded.due_date, \
               completed = excluded.completed, \
               updated_at = excluded.updated_at",
            params![
                task.id,
                task.name,
                task.due_date,
                task.completed,
                task.created_at.format(TIMESTAMP_FORMAT).to_string(),
                task.updated_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(task)
    }

    fn delete(&mut self, id: i64) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn set_completion(&mut self, id: i64, completed: bool) -> Result<(), StorageError> {
        let now = self.now().format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(
            "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3",
            params![completed, now, id],
        )?;
        Ok(())
    }
}

fn task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        due_date: row.get(2)?,
        completed: row.get(3)?,
        created_at: timestamp_from_row(row, 4)?,
        updated_at: timestamp_from_row(row, 5)?,
    })
}

fn timestamp_from_row(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn ts(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .unwrap()
            .and_utc()
    }

    /// In-memory store whose clock the test can move.
    fn test_store(start: &str) -> (SqliteStore, Arc<Mutex<DateTime<Utc>>>) {
        let now = Arc::new(Mutex::new(ts(start)));
        let handle = Arc::clone(&now);
        let store = SqliteStore::open_in_memory()
            .unwrap()
            .with_clock(move || *handle.lock().unwrap());
        (store, now)
    }

    fn advance(now: &Arc<Mutex<DateTime<Utc>>>, by: Duration) {
        let mut guard = now.lock().unwrap();
        *guard += by;
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        let saved = store.save(Task::new("Buy milk")).unwrap();
        assert!(!saved.is_new());
        assert_eq!(saved.created_at, ts("2025-06-01 10:00:00"));
        assert_eq!(saved.updated_at, saved.created_at);
        assert!(!saved.completed);

        let listed = store.list_visible().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Buy milk");
        assert_eq!(listed[0].id, saved.id);
    }

    #[test]
    fn save_same_values_twice_is_one_row_with_advanced_updated_at() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        let first = store.save(Task::new("Buy milk")).unwrap();
        advance(&now, Duration::seconds(5));
        let second = store.save(first.clone()).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(all[0].created_at, first.created_at);
        assert_eq!(all[0].updated_at, ts("2025-06-01 10:00:05"));
        assert_eq!(all[0].name, "Buy milk");
    }

    #[test]
    fn update_never_changes_id_or_created_at() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        let saved = store.save(Task::new("Buy milk")).unwrap();
        advance(&now, Duration::minutes(3));

        let mut renamed = saved.clone();
        renamed.name = "Buy oat milk".to_string();
        let updated = store.save(renamed).unwrap();

        assert_eq!(updated.id, saved.id);
        let row = &store.list_all().unwrap()[0];
        assert_eq!(row.id, saved.id);
        assert_eq!(row.name, "Buy oat milk");
        assert_eq!(row.created_at, saved.created_at);
        assert_eq!(row.updated_at, ts("2025-06-01 10:03:00"));
    }

    #[test]
    fn empty_name_is_rejected_and_nothing_persisted() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        let result = store.save(Task::new(""));
        assert!(matches!(result, Err(StorageError::EmptyName)));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn set_completion_touches_only_completed_and_updated_at() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        let mut task = Task::new("Water plants");
        task.due_date = "friday".to_string();
        let saved = store.save(task).unwrap();

        advance(&now, Duration::seconds(30));
        store.set_completion(saved.id, true).unwrap();

        let row = &store.list_all().unwrap()[0];
        assert!(row.completed);
        assert_eq!(row.name, "Water plants");
        assert_eq!(row.due_date, "friday");
        assert_eq!(row.created_at, saved.created_at);
        assert_eq!(row.updated_at, ts("2025-06-01 10:00:30"));
    }

    #[test]
    fn set_completion_on_unknown_id_is_a_noop() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        store.set_completion(12345, true).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn delete_on_unknown_id_is_a_noop() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        store.delete(12345).unwrap();
    }

    #[test]
    fn delete_removes_even_hidden_tasks() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        let saved = store.save(Task::new("Old chore")).unwrap();
        store.set_completion(saved.id, true).unwrap();
        advance(&now, Duration::hours(48));

        assert!(store.list_visible().unwrap().is_empty());
        store.delete(saved.id).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn completed_tasks_disappear_after_the_visibility_window() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        let saved = store.save(Task::new("Buy milk")).unwrap();
        store.set_completion(saved.id, true).unwrap();

        // 23 hours old: still visible
        advance(&now, Duration::hours(23));
        assert_eq!(store.list_visible().unwrap().len(), 1);

        // 25 hours old: hidden, but the row is retained
        advance(&now, Duration::hours(2));
        assert!(store.list_visible().unwrap().is_empty());
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
    }

    #[test]
    fn incomplete_tasks_stay_visible_no_matter_how_old() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        store.save(Task::new("Perennial chore")).unwrap();
        advance(&now, Duration::days(30));
        assert_eq!(store.list_visible().unwrap().len(), 1);
    }

    #[test]
    fn listing_is_newest_first() {
        let (mut store, now) = test_store("2025-06-01 10:00:00");
        store.save(Task::new("first")).unwrap();
        advance(&now, Duration::seconds(1));
        store.save(Task::new("second")).unwrap();
        advance(&now, Duration::seconds(1));
        store.save(Task::new("third")).unwrap();

        let visible = store.list_visible().unwrap();
        let names: Vec<&str> = visible
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[test]
    fn same_second_creations_order_by_id() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        let a = store.save(Task::new("a")).unwrap();
        let b = store.save(Task::new("b")).unwrap();
        assert!(b.id > a.id);

        let listed = store.list_visible().unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[test]
    fn rapid_creations_under_a_frozen_clock_get_distinct_ids() {
        let (mut store, _now) = test_store("2025-06-01 10:00:00");
        let a = store.save(Task::new("a")).unwrap();
        let b = store.save(Task::new("b")).unwrap();
        let c = store.save(Task::new("c")).unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn tasks_survive_reopening_the_database() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.db");

        let id = {
            let mut store = SqliteStore::open(&path).unwrap();
            store.save(Task::new("Buy milk")).unwrap().id
        };

        let store = SqliteStore::open(&path).unwrap();
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].name, "Buy milk");
    }
}
