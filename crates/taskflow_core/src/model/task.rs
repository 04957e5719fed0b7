//! Task domain model.
//!
//! # Responsibility
//! - Define the task record plus the draft/patch input shapes used by the
//!   task store's create and update operations.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `updated_at` must be refreshed by every mutation.
//! - Status transitions are free-form: any status may move to any other, and
//!   completed tasks may be reopened.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Urgency bucket for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Workflow state for a task.
///
/// Serialized with kebab-case tokens (`in-progress`) to keep the persisted
/// form stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

/// Canonical task record.
///
/// `created_by`/`assigned_to` carry user ids but are not validated against
/// the roster; lookups against unknown ids simply return nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Deadline in epoch milliseconds.
    pub due_date: i64,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Creator user id.
    pub created_by: UserId,
    /// Assignee user id.
    pub assigned_to: UserId,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last-mutation timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl Task {
    /// Returns whether this task counts as overdue at `now_ms`.
    ///
    /// Completed tasks are never overdue; the deadline comparison is strict.
    pub fn is_overdue_at(&self, now_ms: i64) -> bool {
        self.status != TaskStatus::Completed && self.due_date < now_ms
    }
}

/// Caller-supplied fields for task creation.
///
/// Identity and timestamps are assigned by the store; the initial status is
/// whatever the caller provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: i64,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_by: UserId,
    pub assigned_to: UserId,
}

/// Partial update over the mutable task fields.
///
/// `None` fields are left untouched. Identity, creator and creation timestamp
/// are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<i64>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<UserId>,
}

impl TaskPatch {
    /// Builds a status-only patch.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Builds an assignee-only patch.
    pub fn assignee(user_id: UserId) -> Self {
        Self {
            assigned_to: Some(user_id),
            ..Self::default()
        }
    }

    /// Merges the set fields into `task`. Does not touch `updated_at`.
    pub(crate) fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
    }
}
