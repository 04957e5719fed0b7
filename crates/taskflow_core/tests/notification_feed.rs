use rusqlite::Connection;
use std::sync::Arc;
use taskflow_core::clock::{now_epoch_ms, DAY_MS};
use taskflow_core::seed::{DEMO_PASSWORD, SEED_ADMIN_ID, SEED_MANAGER_ID, SEED_MEMBER_ID};
use taskflow_core::{
    open_store, open_store_in_memory, LogNoticeSink, NotificationKind, NotificationStore,
    SqliteAppContext, SqliteFeedRepository, StoreConfig, TaskDraft, TaskEvent, TaskPriority,
    TaskStatus,
};
use uuid::Uuid;

fn feed_store(conn: &Connection) -> NotificationStore<SqliteFeedRepository<'_>> {
    NotificationStore::new(SqliteFeedRepository::try_new(conn).unwrap())
}

fn event(task_id: Uuid, message: &str) -> TaskEvent {
    TaskEvent {
        kind: NotificationKind::TaskAssigned,
        task_id,
        message: message.to_string(),
    }
}

#[test]
fn recording_without_a_user_is_a_no_op() {
    let conn = open_store_in_memory().unwrap();
    let mut store = feed_store(&conn);

    let recorded = store.record(event(Uuid::from_u128(0x10), "ignored")).unwrap();
    assert!(recorded.is_none());
    assert!(store.feed().is_empty());
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn entries_are_prepended_newest_first() {
    let conn = open_store_in_memory().unwrap();
    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();

    store.record(event(Uuid::from_u128(0x10), "first")).unwrap();
    store.record(event(Uuid::from_u128(0x11), "second")).unwrap();

    let feed = store.feed();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].message, "second");
    assert_eq!(feed[1].message, "first");
    assert_eq!(store.unread_count(), 2);
}

#[test]
fn mark_as_read_flips_one_entry_and_tolerates_unknown_ids() {
    let conn = open_store_in_memory().unwrap();
    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();

    store.record(event(Uuid::from_u128(0x10), "a")).unwrap();
    let id = store
        .record(event(Uuid::from_u128(0x11), "b"))
        .unwrap()
        .unwrap();

    store.mark_as_read(id).unwrap();
    assert_eq!(store.unread_count(), 1);
    assert!(store.feed()[0].read);
    assert!(!store.feed()[1].read);

    // Unknown ids are ignored.
    store.mark_as_read(Uuid::from_u128(0xFFFF)).unwrap();
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn mark_all_as_read_clears_the_unread_count() {
    let conn = open_store_in_memory().unwrap();
    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();

    store.record(event(Uuid::from_u128(0x10), "a")).unwrap();
    store.record(event(Uuid::from_u128(0x11), "b")).unwrap();
    store.record(event(Uuid::from_u128(0x12), "c")).unwrap();

    store.mark_all_as_read().unwrap();
    assert_eq!(store.unread_count(), 0);
    assert!(store.feed().iter().all(|entry| entry.read));
}

#[test]
fn clear_removes_one_entry_and_tolerates_unknown_ids() {
    let conn = open_store_in_memory().unwrap();
    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();

    let keep = store
        .record(event(Uuid::from_u128(0x10), "keep"))
        .unwrap()
        .unwrap();
    let discard = store
        .record(event(Uuid::from_u128(0x11), "drop"))
        .unwrap()
        .unwrap();

    store.clear(discard).unwrap();
    assert_eq!(store.feed().len(), 1);
    assert_eq!(store.feed()[0].id, keep);

    store.clear(Uuid::from_u128(0xFFFF)).unwrap();
    assert_eq!(store.feed().len(), 1);
}

#[test]
fn feed_mutations_persist_per_user() {
    let conn = open_store_in_memory().unwrap();

    {
        let mut store = feed_store(&conn);
        store.sync_session(Some(SEED_ADMIN_ID)).unwrap();
        store.record(event(Uuid::from_u128(0x10), "for admin")).unwrap();
    }

    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_MANAGER_ID)).unwrap();
    assert!(store.feed().is_empty());

    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();
    assert_eq!(store.feed().len(), 1);
    assert_eq!(store.feed()[0].message, "for admin");
}

#[test]
fn corrupt_persisted_feed_restores_as_empty() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value)
         VALUES ('notifications-' || ?1, '[{broken');",
        [SEED_ADMIN_ID.to_string()],
    )
    .unwrap();

    let mut store = feed_store(&conn);
    store.sync_session(Some(SEED_ADMIN_ID)).unwrap();
    assert!(store.feed().is_empty());
}

#[test]
fn session_switches_swap_feeds_in_the_app_context() {
    let conn = open_store_in_memory().unwrap();
    let mut ctx =
        SqliteAppContext::open(&conn, StoreConfig::default(), Arc::new(LogNoticeSink)).unwrap();

    assert!(ctx.login("admin@example.com", DEMO_PASSWORD).unwrap());
    ctx.create_task(TaskDraft {
        title: "Review budget".to_string(),
        description: "Q3 spending".to_string(),
        due_date: now_epoch_ms() + DAY_MS,
        priority: TaskPriority::Low,
        status: TaskStatus::Todo,
        created_by: SEED_ADMIN_ID,
        assigned_to: SEED_MEMBER_ID,
    })
    .unwrap();
    assert_eq!(ctx.notifications().unread_count(), 1);

    ctx.logout().unwrap();
    assert!(ctx.notifications().feed().is_empty());

    assert!(ctx.login("manager@example.com", DEMO_PASSWORD).unwrap());
    assert!(ctx.notifications().feed().is_empty());

    assert!(ctx.login("admin@example.com", DEMO_PASSWORD).unwrap());
    assert_eq!(ctx.notifications().feed().len(), 1);
}

#[test]
fn read_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskflow.db");

    {
        let conn = open_store(&path).unwrap();
        let mut ctx =
            SqliteAppContext::open(&conn, StoreConfig::default(), Arc::new(LogNoticeSink)).unwrap();
        assert!(ctx.login("admin@example.com", DEMO_PASSWORD).unwrap());
        ctx.create_task(TaskDraft {
            title: "Draft announcement".to_string(),
            description: "Blog post for the launch".to_string(),
            due_date: now_epoch_ms() + DAY_MS,
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            created_by: SEED_ADMIN_ID,
            assigned_to: SEED_MANAGER_ID,
        })
        .unwrap();

        let id = ctx.notifications().feed()[0].id;
        ctx.notifications_mut().mark_as_read(id).unwrap();
        assert_eq!(ctx.notifications().unread_count(), 0);
    }

    let conn = open_store(&path).unwrap();
    let ctx =
        SqliteAppContext::open(&conn, StoreConfig::default(), Arc::new(LogNoticeSink)).unwrap();

    // Session and its feed restore together.
    assert_eq!(ctx.identity().session().unwrap().id, SEED_ADMIN_ID);
    assert_eq!(ctx.notifications().feed().len(), 1);
    assert!(ctx.notifications().feed()[0].read);
    assert_eq!(ctx.notifications().unread_count(), 0);
}
