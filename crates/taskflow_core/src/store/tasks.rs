//! Task store: the mutable task collection and derived queries.
//!
//! # Responsibility
//! - Hold the task collection in memory and mirror every change to durable
//!   storage in full.
//! - Emit task events for the notification-worthy outcomes of mutations.
//!
//! # Invariants
//! - Every mutation refreshes `updated_at` on the affected record.
//! - A failed mutation leaves the in-memory and persisted collection
//!   unchanged, publishes a failure notice and clears the loading flag.
//! - Queries are pure reads over the in-memory collection.

use crate::clock::now_epoch_ms;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::model::user::UserId;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::seed::seed_tasks;
use crate::store::event::{TaskEvent, TaskMutation};
use crate::store::notice::{Notice, NoticeSink};
use crate::store::{simulate_delay, StoreConfig};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Task store error.
#[derive(Debug)]
pub enum TaskStoreError {
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for TaskStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// The mutable task collection with persistence and event emission.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    is_loading: bool,
    config: StoreConfig,
    notices: Arc<dyn NoticeSink>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates the store from persisted state, seeding on first use.
    ///
    /// An absent or malformed persisted collection is replaced by the fixed
    /// sample set, which is immediately persisted.
    pub fn new(
        repo: R,
        config: StoreConfig,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, TaskStoreError> {
        let tasks = match repo.load_all()? {
            Some(tasks) => tasks,
            None => {
                let seeded = seed_tasks(now_epoch_ms());
                repo.save_all(&seeded)?;
                info!(
                    "event=tasks_seed module=store status=ok count={}",
                    seeded.len()
                );
                seeded
            }
        };

        Ok(Self {
            repo,
            tasks,
            is_loading: false,
            config,
            notices,
        })
    }

    /// Creates a task from `draft` with generated id and fresh timestamps.
    ///
    /// Emits `TaskAssigned` when the draft assigns someone other than the
    /// creator.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<TaskMutation, TaskStoreError> {
        self.is_loading = true;
        simulate_delay(self.config.task_delay);
        let outcome = self.apply_create(draft);
        self.settle("Task created successfully", "Failed to create task", outcome)
    }

    /// Merges `patch` into the task and refreshes `updated_at`.
    ///
    /// Emits `TaskUpdated` when the patch moves the task to a new assignee.
    pub fn update_task(
        &mut self,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<TaskMutation, TaskStoreError> {
        self.is_loading = true;
        simulate_delay(self.config.task_delay);
        let outcome = self.apply_update(id, &patch);
        self.settle("Task updated successfully", "Failed to update task", outcome)
    }

    /// Removes the task from the collection.
    ///
    /// Emits `TaskDeleted` when the removed task was assigned to someone
    /// other than `acting_user`.
    pub fn delete_task(
        &mut self,
        id: TaskId,
        acting_user: Option<UserId>,
    ) -> Result<TaskMutation, TaskStoreError> {
        self.is_loading = true;
        simulate_delay(self.config.task_delay);
        let outcome = self.apply_delete(id, acting_user);
        self.settle("Task deleted successfully", "Failed to delete task", outcome)
    }

    /// Convenience wrapper: reassigns the task to `user_id`.
    pub fn assign_task(
        &mut self,
        id: TaskId,
        user_id: UserId,
    ) -> Result<TaskMutation, TaskStoreError> {
        self.update_task(id, TaskPatch::assignee(user_id))
    }

    /// Convenience wrapper: moves the task to `status`.
    ///
    /// Additionally emits `TaskCompleted` when the task actually transitions
    /// to completed (not on re-setting an already-completed task) and its
    /// assignee differs from its creator.
    pub fn update_task_status(
        &mut self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<TaskMutation, TaskStoreError> {
        let prior_status = self.task_by_id(id).map(|task| task.status);

        let mut mutation = self.update_task(id, TaskPatch::status(status))?;

        let transitioned = status == TaskStatus::Completed && prior_status != Some(status);
        if transitioned && mutation.task.assigned_to != mutation.task.created_by {
            mutation.events.push(TaskEvent::completed(&mutation.task));
        }
        Ok(mutation)
    }

    /// The full in-memory collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// All tasks assigned to `user_id`.
    pub fn tasks_by_assignee(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.assigned_to == user_id)
            .collect()
    }

    /// All tasks created by `user_id`.
    pub fn tasks_by_creator(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.created_by == user_id)
            .collect()
    }

    /// All open tasks whose deadline has passed.
    pub fn overdue_tasks(&self) -> Vec<&Task> {
        let now_ms = now_epoch_ms();
        self.tasks
            .iter()
            .filter(|task| task.is_overdue_at(now_ms))
            .collect()
    }

    /// Whether a mutation is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn apply_create(&mut self, draft: TaskDraft) -> Result<TaskMutation, TaskStoreError> {
        let now_ms = now_epoch_ms();
        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            created_by: draft.created_by,
            assigned_to: draft.assigned_to,
            created_at: now_ms,
            updated_at: now_ms,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.repo.save_all(&next)?;
        self.tasks = next;

        let mut events = Vec::new();
        if task.assigned_to != task.created_by {
            events.push(TaskEvent::assigned(&task));
        }
        Ok(TaskMutation { task, events })
    }

    fn apply_update(
        &mut self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> Result<TaskMutation, TaskStoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;

        let prior_assignee = self.tasks[pos].assigned_to;
        let mut updated = self.tasks[pos].clone();
        patch.apply_to(&mut updated);
        updated.updated_at = now_epoch_ms();

        let mut next = self.tasks.clone();
        next[pos] = updated.clone();
        self.repo.save_all(&next)?;
        self.tasks = next;

        let mut events = Vec::new();
        let reassigned = patch
            .assigned_to
            .is_some_and(|assignee| assignee != prior_assignee);
        if reassigned {
            events.push(TaskEvent::reassigned(&updated));
        }
        Ok(TaskMutation {
            task: updated,
            events,
        })
    }

    fn apply_delete(
        &mut self,
        id: TaskId,
        acting_user: Option<UserId>,
    ) -> Result<TaskMutation, TaskStoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;

        let removed = self.tasks[pos].clone();
        let mut next = self.tasks.clone();
        next.remove(pos);
        self.repo.save_all(&next)?;
        self.tasks = next;

        let mut events = Vec::new();
        if acting_user != Some(removed.assigned_to) {
            events.push(TaskEvent::deleted(&removed));
        }
        Ok(TaskMutation {
            task: removed,
            events,
        })
    }

    /// Clears the loading flag and publishes the matching notice.
    fn settle(
        &mut self,
        ok_message: &str,
        failure_message: &str,
        outcome: Result<TaskMutation, TaskStoreError>,
    ) -> Result<TaskMutation, TaskStoreError> {
        self.is_loading = false;
        match &outcome {
            Ok(_) => self.notices.publish(Notice::success(ok_message)),
            Err(_) => self.notices.publish(Notice::error(failure_message)),
        }
        outcome
    }
}
