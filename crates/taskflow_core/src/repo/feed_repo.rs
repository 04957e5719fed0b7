//! Notification-feed persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and restore one notification feed per user, keyed
//!   `notifications-<user id>`.
//!
//! # Invariants
//! - An absent or malformed feed restores as empty.
//! - Feeds are written in full, newest entry first.

use crate::model::notification::Notification;
use crate::model::user::UserId;
use crate::repo::kv::{feed_key, kv_get, kv_put};
use crate::repo::{ensure_kv_ready, RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;

/// Persistence contract for per-user notification feeds.
pub trait FeedRepository {
    /// Restores the feed for `user_id`; absent or malformed feeds are empty.
    fn load(&self, user_id: UserId) -> RepoResult<Vec<Notification>>;
    /// Persists the full feed for `user_id`.
    fn save(&self, user_id: UserId, feed: &[Notification]) -> RepoResult<()>;
}

/// SQLite-backed feed repository.
pub struct SqliteFeedRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFeedRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_ready(conn)?;
        Ok(Self { conn })
    }
}

impl FeedRepository for SqliteFeedRepository<'_> {
    fn load(&self, user_id: UserId) -> RepoResult<Vec<Notification>> {
        let key = feed_key(user_id);
        let Some(text) = kv_get(self.conn, &key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Notification>>(&text) {
            Ok(feed) => Ok(feed),
            Err(err) => {
                warn!(
                    "event=feed_load module=repo status=error error_code=malformed_value action=discard key={key} error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, user_id: UserId, feed: &[Notification]) -> RepoResult<()> {
        let key = feed_key(user_id);
        let encoded = serde_json::to_string(feed)
            .map_err(|err| RepoError::InvalidData(format!("failed to encode `{key}`: {err}")))?;
        kv_put(self.conn, &key, &encoded)
    }
}
