//! Application context: composition root for the three stores.
//!
//! # Responsibility
//! - Own the identity, task and notification stores and wire them at
//!   construction, replacing any global singleton state.
//! - Route task events into the notification feed and keep the feed in step
//!   with session changes.
//!
//! # Invariants
//! - Session changes always re-sync the notification feed before the call
//!   returns.
//! - Task events are routed to the feed of whoever is signed in at emission
//!   time; nobody signed in means the events are dropped.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::model::user::UserId;
use crate::repo::feed_repo::{FeedRepository, SqliteFeedRepository};
use crate::repo::session_repo::{SessionRepository, SqliteSessionRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoError;
use crate::store::event::TaskEvent;
use crate::store::identity::{IdentityStore, IdentityStoreError};
use crate::store::notice::NoticeSink;
use crate::store::notifications::{NotificationStore, NotificationStoreError};
use crate::store::tasks::{TaskStore, TaskStoreError};
use crate::store::StoreConfig;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Combined error for application-context operations.
#[derive(Debug)]
pub enum AppError {
    Identity(IdentityStoreError),
    Task(TaskStoreError),
    Notification(NotificationStoreError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::Notification(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Identity(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Notification(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<IdentityStoreError> for AppError {
    fn from(value: IdentityStoreError) -> Self {
        Self::Identity(value)
    }
}

impl From<TaskStoreError> for AppError {
    fn from(value: TaskStoreError) -> Self {
        Self::Task(value)
    }
}

impl From<NotificationStoreError> for AppError {
    fn from(value: NotificationStoreError) -> Self {
        Self::Notification(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Composition root owning the three stores.
///
/// Created once at application start; torn down never in this design.
pub struct AppContext<SR, TR, FR>
where
    SR: SessionRepository,
    TR: TaskRepository,
    FR: FeedRepository,
{
    identity: IdentityStore<SR>,
    tasks: TaskStore<TR>,
    notifications: NotificationStore<FR>,
}

/// Application context over the SQLite repositories on one shared connection.
pub type SqliteAppContext<'conn> = AppContext<
    SqliteSessionRepository<'conn>,
    SqliteTaskRepository<'conn>,
    SqliteFeedRepository<'conn>,
>;

impl<'conn>
    AppContext<
        SqliteSessionRepository<'conn>,
        SqliteTaskRepository<'conn>,
        SqliteFeedRepository<'conn>,
    >
{
    /// Builds the context over a migrated connection.
    pub fn open(
        conn: &'conn Connection,
        config: StoreConfig,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, AppError> {
        Self::new(
            SqliteSessionRepository::try_new(conn)?,
            SqliteTaskRepository::try_new(conn)?,
            SqliteFeedRepository::try_new(conn)?,
            config,
            notices,
        )
    }
}

impl<SR, TR, FR> AppContext<SR, TR, FR>
where
    SR: SessionRepository,
    TR: TaskRepository,
    FR: FeedRepository,
{
    /// Wires the stores: restores the session, syncs its feed, loads or
    /// seeds the task collection.
    pub fn new(
        session_repo: SR,
        task_repo: TR,
        feed_repo: FR,
        config: StoreConfig,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, AppError> {
        let identity = IdentityStore::new(session_repo, config, Arc::clone(&notices))?;
        let mut notifications = NotificationStore::new(feed_repo);
        notifications.sync_session(identity.session().map(|user| user.id))?;
        let tasks = TaskStore::new(task_repo, config, notices)?;

        Ok(Self {
            identity,
            tasks,
            notifications,
        })
    }

    /// Signs in and re-syncs the notification feed on success.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, AppError> {
        let ok = self.identity.login(email, password)?;
        if ok {
            self.sync_feed()?;
        }
        Ok(ok)
    }

    /// Registers, signs in and re-syncs the notification feed on success.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<bool, AppError> {
        let ok = self.identity.register(name, email, password)?;
        if ok {
            self.sync_feed()?;
        }
        Ok(ok)
    }

    /// Signs out and empties the in-memory feed.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.identity.logout()?;
        self.sync_feed()?;
        Ok(())
    }

    /// Creates a task and routes any resulting event into the feed.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        let mutation = self.tasks.create_task(draft)?;
        self.route(mutation.events)?;
        Ok(mutation.task)
    }

    /// Updates a task and routes any resulting event into the feed.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, AppError> {
        let mutation = self.tasks.update_task(id, patch)?;
        self.route(mutation.events)?;
        Ok(mutation.task)
    }

    /// Deletes a task, attributing the action to the signed-in user, and
    /// routes any resulting event into the feed.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, AppError> {
        let acting_user = self.identity.session().map(|user| user.id);
        let mutation = self.tasks.delete_task(id, acting_user)?;
        self.route(mutation.events)?;
        Ok(mutation.task)
    }

    /// Reassigns a task and routes any resulting event into the feed.
    pub fn assign_task(&mut self, id: TaskId, user_id: UserId) -> Result<Task, AppError> {
        let mutation = self.tasks.assign_task(id, user_id)?;
        self.route(mutation.events)?;
        Ok(mutation.task)
    }

    /// Moves a task to `status` and routes any resulting event into the feed.
    pub fn update_task_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task, AppError> {
        let mutation = self.tasks.update_task_status(id, status)?;
        self.route(mutation.events)?;
        Ok(mutation.task)
    }

    pub fn identity(&self) -> &IdentityStore<SR> {
        &self.identity
    }

    pub fn tasks(&self) -> &TaskStore<TR> {
        &self.tasks
    }

    pub fn notifications(&self) -> &NotificationStore<FR> {
        &self.notifications
    }

    /// Mutable feed access for read/clear operations, which need no routing.
    pub fn notifications_mut(&mut self) -> &mut NotificationStore<FR> {
        &mut self.notifications
    }

    fn sync_feed(&mut self) -> Result<(), AppError> {
        self.notifications
            .sync_session(self.identity.session().map(|user| user.id))?;
        Ok(())
    }

    fn route(&mut self, events: Vec<TaskEvent>) -> Result<(), AppError> {
        for event in events {
            self.notifications.record(event)?;
        }
        Ok(())
    }
}
