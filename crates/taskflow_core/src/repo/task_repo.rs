//! Task-collection persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and restore the full task collection under the `tasks` key.
//!
//! # Invariants
//! - The collection is always written in full; there is no incremental diff.
//! - A malformed persisted collection is discarded (`None`), letting the
//!   store fall back to seed data.

use crate::model::task::Task;
use crate::repo::kv::{kv_get, kv_put, TASKS_KEY};
use crate::repo::{ensure_kv_ready, RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;

/// Persistence contract for the task collection.
pub trait TaskRepository {
    /// Restores the persisted collection.
    ///
    /// Returns `None` when nothing was persisted yet, or when the persisted
    /// value is malformed.
    fn load_all(&self) -> RepoResult<Option<Vec<Task>>>;
    /// Persists the full collection, replacing the previous snapshot.
    fn save_all(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_all(&self) -> RepoResult<Option<Vec<Task>>> {
        let Some(text) = kv_get(self.conn, TASKS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Task>>(&text) {
            Ok(tasks) => Ok(Some(tasks)),
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=error error_code=malformed_value action=discard error={err}"
                );
                Ok(None)
            }
        }
    }

    fn save_all(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks).map_err(|err| {
            RepoError::InvalidData(format!("failed to encode `{TASKS_KEY}`: {err}"))
        })?;
        kv_put(self.conn, TASKS_KEY, &encoded)
    }
}
