//! Key-value access helpers shared by the entity repositories.
//!
//! # Invariants
//! - Writes replace the whole value for a key; there is no partial update.
//! - `updated_at` is refreshed on every write.

use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Key holding the current session user record.
pub(crate) const SESSION_KEY: &str = "user";
/// Key holding the full task collection.
pub(crate) const TASKS_KEY: &str = "tasks";

/// Key holding one user's notification feed.
pub(crate) fn feed_key(user_id: UserId) -> String {
    format!("notifications-{user_id}")
}

pub(crate) fn kv_get(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv_entries WHERE key = ?1;")?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(row.get(0)?));
    }
    Ok(None)
}

pub(crate) fn kv_put(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO kv_entries (key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![key, value],
    )?;
    Ok(())
}

pub(crate) fn kv_remove(conn: &Connection, key: &str) -> RepoResult<()> {
    conn.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
    Ok(())
}
