//! State layer for the TaskFlow task-management application.
//! This crate is the single source of truth for session, task and
//! notification state and its durable key-value persistence.

pub mod clock;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{Notification, NotificationId, NotificationKind};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};
pub use model::user::{User, UserId, UserRole};
pub use repo::feed_repo::{FeedRepository, SqliteFeedRepository};
pub use repo::session_repo::{SessionRepository, SqliteSessionRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use storage::{open_store, open_store_in_memory, StorageError};
pub use store::app::{AppContext, AppError, SqliteAppContext};
pub use store::event::{TaskEvent, TaskMutation};
pub use store::identity::{IdentityStore, IdentityStoreError};
pub use store::notice::{LogNoticeSink, Notice, NoticeLevel, NoticeSink};
pub use store::notifications::{NotificationStore, NotificationStoreError};
pub use store::tasks::{TaskStore, TaskStoreError};
pub use store::StoreConfig;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
