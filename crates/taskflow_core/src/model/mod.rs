//! Domain model for the task-management state layer.
//!
//! # Responsibility
//! - Define the canonical records held by the identity/task/notification
//!   stores and mirrored to durable storage.
//! - Own the persisted wire naming (camelCase fields, kebab-case tokens).
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - `Task.created_by`/`Task.assigned_to` are weak references into the user
//!   roster and are not validated at write time.
//! - `Notification.task_id` is a weak reference; it may outlive the task.

pub mod notification;
pub mod task;
pub mod user;
