//! Task side-effect events.
//!
//! # Responsibility
//! - Represent the notification-worthy outcomes of task mutations as plain
//!   values, so the task store never reaches into the notification store.
//!
//! # Invariants
//! - Events describe what already happened; consuming or dropping them does
//!   not affect the task collection.

use crate::model::notification::NotificationKind;
use crate::model::task::{Task, TaskId};

/// One notification-worthy outcome of a task mutation.
///
/// Routed by the application context into the current user's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    pub kind: NotificationKind,
    pub task_id: TaskId,
    /// Message composed at emission time, ready for the feed.
    pub message: String,
}

impl TaskEvent {
    pub(crate) fn assigned(task: &Task) -> Self {
        Self {
            kind: NotificationKind::TaskAssigned,
            task_id: task.id,
            message: format!("You've been assigned a new task: {}", task.title),
        }
    }

    pub(crate) fn reassigned(task: &Task) -> Self {
        Self {
            kind: NotificationKind::TaskUpdated,
            task_id: task.id,
            message: format!("You've been assigned a task: {}", task.title),
        }
    }

    pub(crate) fn completed(task: &Task) -> Self {
        Self {
            kind: NotificationKind::TaskCompleted,
            task_id: task.id,
            message: format!("Task completed: {}", task.title),
        }
    }

    pub(crate) fn deleted(task: &Task) -> Self {
        Self {
            kind: NotificationKind::TaskDeleted,
            task_id: task.id,
            message: format!("A task assigned to you was deleted: {}", task.title),
        }
    }
}

/// Outcome of one task mutation: the affected record plus any events.
///
/// For deletions, `task` is the removed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMutation {
    pub task: Task,
    pub events: Vec<TaskEvent>,
}
