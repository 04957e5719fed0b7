use rusqlite::Connection;
use std::cell::RefCell;
use std::sync::Arc;
use taskflow_core::clock::{now_epoch_ms, DAY_MS};
use taskflow_core::seed::{SEED_ADMIN_ID, SEED_MANAGER_ID, SEED_MEMBER_ID};
use taskflow_core::{
    open_store, open_store_in_memory, LogNoticeSink, Notice, NoticeLevel, NoticeSink,
    SqliteTaskRepository, StoreConfig, TaskDraft, TaskPatch, TaskPriority, TaskRepository,
    TaskStatus, TaskStore, TaskStoreError,
};
use uuid::Uuid;

struct RecordingSink {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            notices: RefCell::new(Vec::new()),
        })
    }

    fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl NoticeSink for RecordingSink {
    fn publish(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

fn task_store(conn: &Connection) -> TaskStore<SqliteTaskRepository<'_>> {
    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    TaskStore::new(repo, StoreConfig::default(), Arc::new(LogNoticeSink)).unwrap()
}

fn draft(assigned_to: Uuid) -> TaskDraft {
    TaskDraft {
        title: "Prepare sprint demo".to_string(),
        description: "Walk through the new board filters".to_string(),
        due_date: now_epoch_ms() + 2 * DAY_MS,
        priority: TaskPriority::High,
        status: TaskStatus::Todo,
        created_by: SEED_ADMIN_ID,
        assigned_to,
    }
}

#[test]
fn first_open_seeds_and_persists_the_sample_set() {
    let conn = open_store_in_memory().unwrap();
    let store = task_store(&conn);

    assert_eq!(store.tasks().len(), 5);

    // Seeding writes through immediately, so a second store sees the same set.
    let again = task_store(&conn);
    assert_eq!(again.tasks(), store.tasks());
}

#[test]
fn corrupt_persisted_collection_falls_back_to_seed() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('tasks', 'not an array');",
        [],
    )
    .unwrap();

    let store = task_store(&conn);
    assert_eq!(store.tasks().len(), 5);

    let persisted: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'tasks';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(persisted.starts_with('['));
}

#[test]
fn create_then_get_returns_identical_record() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);

    let mutation = store.create_task(draft(SEED_MANAGER_ID)).unwrap();
    let created = mutation.task;

    let fetched = store.task_by_id(created.id).unwrap();
    assert_eq!(fetched, &created);
    assert_eq!(fetched.title, "Prepare sprint demo");
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert!(!store.is_loading());
}

#[test]
fn update_merges_patch_and_refreshes_updated_at() {
    let conn = open_store_in_memory().unwrap();

    // Persist a collection with an old mutation stamp, then reload it.
    {
        let repo = SqliteTaskRepository::try_new(&conn).unwrap();
        let mut stale = taskflow_core::seed::seed_tasks(1_000);
        stale[0].updated_at = 1_000;
        repo.save_all(&stale).unwrap();
    }

    let mut store = task_store(&conn);
    let id = store.tasks()[0].id;

    let patch = TaskPatch {
        description: Some("Now with acceptance criteria".to_string()),
        priority: Some(TaskPriority::Low),
        ..TaskPatch::default()
    };
    let mutation = store.update_task(id, patch).unwrap();

    assert_eq!(mutation.task.description, "Now with acceptance criteria");
    assert_eq!(mutation.task.priority, TaskPriority::Low);
    assert_eq!(mutation.task.created_at, 1_000);
    assert!(mutation.task.updated_at > 1_000);

    // Unpatched fields are untouched.
    assert_eq!(mutation.task.title, "Create project proposal");
}

#[test]
fn update_unknown_id_fails_without_mutating_state() {
    let conn = open_store_in_memory().unwrap();
    let sink = RecordingSink::new();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut store = TaskStore::new(repo, StoreConfig::default(), sink.clone()).unwrap();

    let before = store.tasks().to_vec();
    let missing = Uuid::from_u128(0xDEAD);

    let err = store
        .update_task(missing, TaskPatch::status(TaskStatus::Review))
        .unwrap_err();
    assert!(matches!(err, TaskStoreError::TaskNotFound(id) if id == missing));
    assert_eq!(store.tasks(), before.as_slice());
    assert!(!store.is_loading());

    let notice = sink.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Failed to update task");
}

#[test]
fn delete_unknown_id_fails_without_mutating_state() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);

    let before = store.tasks().to_vec();
    let missing = Uuid::from_u128(0xBEEF);

    let err = store.delete_task(missing, Some(SEED_ADMIN_ID)).unwrap_err();
    assert!(matches!(err, TaskStoreError::TaskNotFound(id) if id == missing));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn delete_removes_record_and_returns_it() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);

    let id = store.tasks()[0].id;
    let mutation = store.delete_task(id, Some(SEED_ADMIN_ID)).unwrap();

    assert_eq!(mutation.task.id, id);
    assert_eq!(store.tasks().len(), 4);
    assert!(store.task_by_id(id).is_none());
}

#[test]
fn status_transitions_are_free_form() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);
    let id = store.tasks()[0].id;

    // Forward to completed, then reopen; no ordering is enforced.
    store.update_task_status(id, TaskStatus::Completed).unwrap();
    assert_eq!(store.task_by_id(id).unwrap().status, TaskStatus::Completed);

    store.update_task_status(id, TaskStatus::Todo).unwrap();
    assert_eq!(store.task_by_id(id).unwrap().status, TaskStatus::Todo);

    store.update_task_status(id, TaskStatus::Review).unwrap();
    assert_eq!(store.task_by_id(id).unwrap().status, TaskStatus::Review);
}

#[test]
fn assignee_and_creator_queries_filter_the_collection() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);

    store.create_task(draft(SEED_MEMBER_ID)).unwrap();

    for task in store.tasks_by_assignee(SEED_MEMBER_ID) {
        assert_eq!(task.assigned_to, SEED_MEMBER_ID);
    }
    assert_eq!(store.tasks_by_assignee(SEED_MEMBER_ID).len(), 2);

    for task in store.tasks_by_creator(SEED_ADMIN_ID) {
        assert_eq!(task.created_by, SEED_ADMIN_ID);
    }
    assert_eq!(store.tasks_by_creator(SEED_ADMIN_ID).len(), 3);

    // Unknown ids are never validated, they just match nothing.
    assert!(store.tasks_by_assignee(Uuid::from_u128(0xF00D)).is_empty());
}

#[test]
fn overdue_returns_open_tasks_with_past_deadlines_only() {
    let conn = open_store_in_memory().unwrap();
    let mut store = task_store(&conn);

    // Seed set carries exactly one overdue open task.
    assert_eq!(store.overdue_tasks().len(), 1);
    assert_eq!(store.overdue_tasks()[0].title, "Conduct code review");

    // Past deadline but completed: not overdue.
    let mut completed_late = draft(SEED_MANAGER_ID);
    completed_late.due_date = now_epoch_ms() - 3 * DAY_MS;
    completed_late.status = TaskStatus::Completed;
    store.create_task(completed_late).unwrap();
    assert_eq!(store.overdue_tasks().len(), 1);

    // Past deadline and still open: overdue.
    let mut open_late = draft(SEED_MANAGER_ID);
    open_late.due_date = now_epoch_ms() - DAY_MS;
    open_late.status = TaskStatus::InProgress;
    let mutation = store.create_task(open_late).unwrap();
    let overdue_ids: Vec<_> = store.overdue_tasks().iter().map(|task| task.id).collect();
    assert_eq!(overdue_ids.len(), 2);
    assert!(overdue_ids.contains(&mutation.task.id));
}

#[test]
fn collection_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskflow.db");

    let before = {
        let conn = open_store(&path).unwrap();
        let mut store = task_store(&conn);
        store.create_task(draft(SEED_MANAGER_ID)).unwrap();
        let second = store.tasks()[1].id;
        store
            .update_task_status(second, TaskStatus::Completed)
            .unwrap();
        store.tasks().to_vec()
    };

    let conn = open_store(&path).unwrap();
    let store = task_store(&conn);
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn mutation_notices_report_success() {
    let conn = open_store_in_memory().unwrap();
    let sink = RecordingSink::new();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut store = TaskStore::new(repo, StoreConfig::default(), sink.clone()).unwrap();

    store.create_task(draft(SEED_MANAGER_ID)).unwrap();
    assert_eq!(sink.last().unwrap().message, "Task created successfully");

    let id = store.tasks()[0].id;
    store
        .update_task(id, TaskPatch::status(TaskStatus::InProgress))
        .unwrap();
    assert_eq!(sink.last().unwrap().message, "Task updated successfully");

    store.delete_task(id, Some(SEED_ADMIN_ID)).unwrap();
    assert_eq!(sink.last().unwrap().message, "Task deleted successfully");
}
