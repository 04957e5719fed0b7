//! Session persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and restore the current session user under the `user` key.
//!
//! # Invariants
//! - A malformed persisted session is discarded and its key cleared; restore
//!   then behaves as "no session".

use crate::model::user::User;
use crate::repo::kv::{kv_get, kv_put, kv_remove, SESSION_KEY};
use crate::repo::{ensure_kv_ready, RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;

/// Persistence contract for the current-session pointer.
pub trait SessionRepository {
    /// Restores the persisted session, or `None` when absent or malformed.
    fn load(&self) -> RepoResult<Option<User>>;
    /// Persists `user` as the current session.
    fn save(&self, user: &User) -> RepoResult<()>;
    /// Removes the persisted session record.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn load(&self) -> RepoResult<Option<User>> {
        let Some(text) = kv_get(self.conn, SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&text) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(
                    "event=session_load module=repo status=error error_code=malformed_value action=discard error={err}"
                );
                kv_remove(self.conn, SESSION_KEY)?;
                Ok(None)
            }
        }
    }

    fn save(&self, user: &User) -> RepoResult<()> {
        let encoded = serde_json::to_string(user).map_err(|err| {
            RepoError::InvalidData(format!("failed to encode `{SESSION_KEY}`: {err}"))
        })?;
        kv_put(self.conn, SESSION_KEY, &encoded)
    }

    fn clear(&self) -> RepoResult<()> {
        kv_remove(self.conn, SESSION_KEY)
    }
}
