//! Fixed fallback dataset used when no persisted state exists.
//!
//! # Responsibility
//! - Provide the demo roster and sample task set with stable identifiers.
//!
//! # Invariants
//! - Seed identifiers are constant across processes so persisted references
//!   stay valid after a restart.
//! - Sample deadlines are relative to the supplied seed time; one task is
//!   always seeded overdue.

use crate::clock::DAY_MS;
use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus};
use crate::model::user::{User, UserId, UserRole};
use uuid::Uuid;

/// Shared demo credential accepted for every roster account.
pub const DEMO_PASSWORD: &str = "password";

/// Seed roster ids, stable across runs.
pub const SEED_ADMIN_ID: UserId = Uuid::from_u128(0xA001);
pub const SEED_MANAGER_ID: UserId = Uuid::from_u128(0xA002);
pub const SEED_MEMBER_ID: UserId = Uuid::from_u128(0xA003);

const SEED_TASK_IDS: [TaskId; 5] = [
    Uuid::from_u128(0xB001),
    Uuid::from_u128(0xB002),
    Uuid::from_u128(0xB003),
    Uuid::from_u128(0xB004),
    Uuid::from_u128(0xB005),
];

/// Returns the fixed demo roster: one account per role.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: SEED_ADMIN_ID,
            name: "John Doe".to_string(),
            email: "admin@example.com".to_string(),
            role: UserRole::Admin,
            avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
        },
        User {
            id: SEED_MANAGER_ID,
            name: "Jane Smith".to_string(),
            email: "manager@example.com".to_string(),
            role: UserRole::Manager,
            avatar: Some("https://i.pravatar.cc/150?img=2".to_string()),
        },
        User {
            id: SEED_MEMBER_ID,
            name: "Bob Johnson".to_string(),
            email: "user@example.com".to_string(),
            role: UserRole::User,
            avatar: Some("https://i.pravatar.cc/150?img=3".to_string()),
        },
    ]
}

/// Returns the five sample tasks, stamped relative to `now_ms`.
pub fn seed_tasks(now_ms: i64) -> Vec<Task> {
    let task = |n: usize,
                title: &str,
                description: &str,
                due_offset_days: i64,
                priority: TaskPriority,
                status: TaskStatus,
                created_by: UserId,
                assigned_to: UserId| Task {
        id: SEED_TASK_IDS[n],
        title: title.to_string(),
        description: description.to_string(),
        due_date: now_ms + due_offset_days * DAY_MS,
        priority,
        status,
        created_by,
        assigned_to,
        created_at: now_ms,
        updated_at: now_ms,
    };

    vec![
        task(
            0,
            "Create project proposal",
            "Draft a comprehensive project proposal for the new client",
            3,
            TaskPriority::High,
            TaskStatus::Todo,
            SEED_ADMIN_ID,
            SEED_MANAGER_ID,
        ),
        task(
            1,
            "Design user interface mockups",
            "Create wireframes and mockups for the new application",
            5,
            TaskPriority::Medium,
            TaskStatus::InProgress,
            SEED_MANAGER_ID,
            SEED_MEMBER_ID,
        ),
        task(
            2,
            "Implement authentication system",
            "Develop the user authentication and authorization system",
            7,
            TaskPriority::High,
            TaskStatus::Todo,
            SEED_ADMIN_ID,
            SEED_ADMIN_ID,
        ),
        task(
            3,
            "Conduct code review",
            "Review and provide feedback on the latest pull request",
            -1,
            TaskPriority::Low,
            TaskStatus::Review,
            SEED_MANAGER_ID,
            SEED_ADMIN_ID,
        ),
        task(
            4,
            "Update documentation",
            "Update API documentation with the latest endpoints",
            2,
            TaskPriority::Medium,
            TaskStatus::Completed,
            SEED_MEMBER_ID,
            SEED_MANAGER_ID,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_tasks, seed_users};
    use crate::model::task::TaskStatus;
    use std::collections::HashSet;

    #[test]
    fn roster_emails_are_unique() {
        let users = seed_users();
        let emails: HashSet<String> = users
            .iter()
            .map(|user| user.email.to_ascii_lowercase())
            .collect();
        assert_eq!(emails.len(), users.len());
    }

    #[test]
    fn sample_set_has_one_overdue_open_task() {
        let now_ms = 1_700_000_000_000;
        let tasks = seed_tasks(now_ms);
        assert_eq!(tasks.len(), 5);

        let overdue: Vec<_> = tasks
            .iter()
            .filter(|task| task.is_overdue_at(now_ms))
            .collect();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Conduct code review");
    }

    #[test]
    fn sample_tasks_reference_roster_ids() {
        let roster_ids: HashSet<_> = seed_users().iter().map(|user| user.id).collect();
        for task in seed_tasks(0) {
            assert!(roster_ids.contains(&task.created_by));
            assert!(roster_ids.contains(&task.assigned_to));
        }
    }

    #[test]
    fn seed_timestamps_match_seed_time() {
        let now_ms = 42;
        for task in seed_tasks(now_ms) {
            assert_eq!(task.created_at, now_ms);
            assert_eq!(task.updated_at, now_ms);
        }
        assert_eq!(seed_tasks(now_ms)[4].status, TaskStatus::Completed);
    }
}
