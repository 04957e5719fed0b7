//! Notification domain model.
//!
//! # Responsibility
//! - Define the per-user feed entry created as a side effect of task
//!   mutations.
//!
//! # Invariants
//! - Entries start unread.
//! - `task_id` is a weak reference; deleting the task leaves the entry in
//!   place.

use crate::clock::now_epoch_ms;
use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a notification entry.
pub type NotificationId = Uuid;

/// Which task mutation produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    TaskAssigned,
    TaskUpdated,
    TaskCompleted,
    TaskDeleted,
}

/// One entry in a user's notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    /// Serialized as `type` to keep the persisted form stable.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub task_id: TaskId,
    /// Human-readable message, composed at emission time.
    pub message: String,
    pub read: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Notification {
    /// Creates a fresh unread entry stamped with the current time.
    pub fn new(kind: NotificationKind, task_id: TaskId, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            task_id,
            message: message.into(),
            read: false,
            created_at: now_epoch_ms(),
        }
    }
}
