//! Integration tests for the board running in a Store
//!
//! These drive the full loop: action → reducer → storage effect → feedback,
//! against the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use todo_board::storage::FileKeyValueStore;
use todo_board::{
    Key, TodoBoardAction, TodoBoardEnvironment, TodoBoardReducer, TodoBoardState, TodoBoardStore,
    TodoId, TodoItem, shell,
};
use todo_board_core::environment::TimestampIdGenerator;
use todo_board_core::storage::KeyValueStore;
use todo_board_runtime::Store;
use todo_board_testing::{InMemoryKeyValueStore, SequentialIdGenerator, test_clock};

// ============================================================================
// Test Fixtures
// ============================================================================

fn board_on(storage: Arc<dyn KeyValueStore>) -> TodoBoardStore {
    let env = TodoBoardEnvironment::new(storage, Arc::new(SequentialIdGenerator::new()));
    Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env)
}

async fn loaded_board(storage: &Arc<InMemoryKeyValueStore>) -> TodoBoardStore {
    let store = board_on(storage.clone());
    store.send(TodoBoardAction::Load).await.unwrap();
    store
}

async fn type_and_enter(store: &TodoBoardStore, text: &str) {
    store
        .send(TodoBoardAction::UpdateInput {
            text: text.to_string(),
        })
        .await
        .unwrap();
    store
        .send(TodoBoardAction::KeyDown { key: Key::Enter })
        .await
        .unwrap();
}

async fn lists(store: &TodoBoardStore) -> (Vec<TodoItem>, Vec<TodoItem>) {
    store
        .state(|s| (s.active.clone(), s.completed.clone()))
        .await
}

fn texts(items: &[TodoItem]) -> Vec<&str> {
    items.iter().map(|item| item.text.as_str()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn scenario_a_add_to_empty_board() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;

    type_and_enter(&store, "Buy milk").await;

    let (active, completed) = lists(&store).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text, "Buy milk");
    assert!(!active[0].completed);
    assert!(completed.is_empty());
    assert_eq!(
        storage.raw("todos").as_deref(),
        Some(r#"[{"id":1,"text":"Buy milk","completed":false}]"#)
    );
}

#[tokio::test]
async fn scenario_b_toggle_moves_to_completed() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    type_and_enter(&store, "Buy milk").await;
    let id = store.state(|s| s.active[0].id).await;

    store.send(TodoBoardAction::ToggleItem { id }).await.unwrap();

    let (active, completed) = lists(&store).await;
    assert!(active.is_empty());
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].text, "Buy milk");
    assert!(completed[0].completed);
    assert_eq!(
        storage.raw("todos").as_deref(),
        Some(r#"[{"id":1,"text":"Buy milk","completed":true}]"#)
    );
}

#[tokio::test]
async fn scenario_c_load_partitions_stored_list() {
    let storage = Arc::new(InMemoryKeyValueStore::with_value(
        "todos",
        r#"[{"id":1,"text":"A","completed":true},{"id":2,"text":"B","completed":false}]"#,
    ));
    let store = loaded_board(&storage).await;

    let (active, completed) = lists(&store).await;
    assert_eq!(active, vec![TodoItem::new(TodoId::new(2), "B")]);
    assert_eq!(completed, vec![TodoItem::new(TodoId::new(1), "A").toggled()]);
}

#[tokio::test]
async fn scenario_d_garbage_loads_empty() {
    let storage = Arc::new(InMemoryKeyValueStore::with_value("todos", "not json"));
    let store = board_on(storage.clone());

    let result = store.send(TodoBoardAction::Load).await;

    assert!(result.is_ok());
    let state = store.state(Clone::clone).await;
    assert!(state.loaded);
    assert!(state.is_empty());
    assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn persisted_list_reloads_to_same_partition() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    for text in ["one", "two", "three", "four"] {
        type_and_enter(&store, text).await;
    }
    let ids = store.state(|s| s.ids()).await;
    store.send(TodoBoardAction::ToggleItem { id: ids[1] }).await.unwrap();
    store.send(TodoBoardAction::ToggleItem { id: ids[3] }).await.unwrap();
    let before = lists(&store).await;

    let reloaded = loaded_board(&storage).await;

    assert_eq!(lists(&reloaded).await, before);
    assert_eq!(texts(&before.0), vec!["four", "two"]);
    assert_eq!(texts(&before.1), vec!["three", "one"]);
}

#[tokio::test]
async fn blank_submissions_change_nothing() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    let writes = storage.write_count();

    for blank in ["", "   "] {
        type_and_enter(&store, blank).await;
        store
            .send(TodoBoardAction::AddItem {
                text: blank.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.state(|s| s.input.clone()).await, blank);
    }

    assert!(store.state(TodoBoardState::is_empty).await);
    assert_eq!(storage.write_count(), writes);
}

#[tokio::test]
async fn reset_clears_board_and_storage() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    type_and_enter(&store, "a").await;
    type_and_enter(&store, "b").await;
    let id = store.state(|s| s.active[0].id).await;
    store.send(TodoBoardAction::ToggleItem { id }).await.unwrap();

    store.send(TodoBoardAction::Reset).await.unwrap();

    assert!(store.state(TodoBoardState::is_empty).await);
    assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
}

#[tokio::test]
async fn unreadable_storage_starts_empty_and_recovers() {
    let storage = Arc::new(InMemoryKeyValueStore::with_value("todos", "[]"));
    storage.fail_reads(true);
    let store = loaded_board(&storage).await;

    assert!(store.state(|s| s.loaded && s.is_empty()).await);
    assert_eq!(storage.write_count(), 0);

    type_and_enter(&store, "still works").await;
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test]
async fn failed_writes_keep_in_memory_state() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    storage.fail_writes(true);

    type_and_enter(&store, "kept").await;

    assert_eq!(store.state(|s| s.active_count()).await, 1);
    assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
}

#[tokio::test]
async fn custom_storage_key() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let env = TodoBoardEnvironment::new(storage.clone(), Arc::new(SequentialIdGenerator::new()))
        .with_storage_key("work");
    let store = Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env);
    store.send(TodoBoardAction::Load).await.unwrap();

    store
        .send(TodoBoardAction::AddItem {
            text: "ship it".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(storage.keys(), vec!["work".to_string()]);
}

#[tokio::test]
async fn timestamp_ids_stay_unique_within_one_tick() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let ids = Arc::new(TimestampIdGenerator::new(Arc::new(test_clock())));
    let env = TodoBoardEnvironment::new(storage, ids);
    let store = Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env);
    store.send(TodoBoardAction::Load).await.unwrap();

    for text in ["a", "b", "c"] {
        store
            .send(TodoBoardAction::AddItem {
                text: text.to_string(),
            })
            .await
            .unwrap();
    }

    let base = test_clock_millis();
    let ids: Vec<i64> = store
        .state(|s| s.ids().into_iter().map(TodoId::value).collect())
        .await;
    assert_eq!(ids, vec![base + 2, base + 1, base]);
}

#[tokio::test]
async fn timestamp_ids_step_past_ids_from_an_earlier_run() {
    let base = test_clock_millis();
    let storage = Arc::new(InMemoryKeyValueStore::with_value(
        "todos",
        &format!(
            r#"[{{"id":{base},"text":"from last run","completed":false}},{{"id":{},"text":"also last run","completed":true}}]"#,
            base + 1
        ),
    ));
    let ids = Arc::new(TimestampIdGenerator::new(Arc::new(test_clock())));
    let env = TodoBoardEnvironment::new(storage.clone(), ids);
    let store = Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env);
    store.send(TodoBoardAction::Load).await.unwrap();

    type_and_enter(&store, "Buy milk").await;

    let (active, completed) = lists(&store).await;
    assert_eq!(texts(&active), vec!["Buy milk", "from last run"]);
    assert_eq!(active[0].id, TodoId::new(base + 2));
    assert_eq!(texts(&completed), vec!["also last run"]);
    assert!(store.state(|s| s.input.is_empty()).await);
    assert!(storage.raw("todos").unwrap().contains("Buy milk"));
}

#[tokio::test]
async fn stored_list_replaces_changes_made_before_load() {
    let storage = Arc::new(InMemoryKeyValueStore::with_value(
        "todos",
        r#"[{"id":100,"text":"stored","completed":false}]"#,
    ));
    let store = board_on(storage.clone());

    store
        .send(TodoBoardAction::AddItem {
            text: "early".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(storage.write_count(), 0);

    store.send(TodoBoardAction::Load).await.unwrap();

    let (active, completed) = lists(&store).await;
    assert_eq!(texts(&active), vec!["stored"]);
    assert!(completed.is_empty());
    assert_eq!(
        storage.raw("todos").as_deref(),
        Some(r#"[{"id":100,"text":"stored","completed":false}]"#)
    );
}

fn test_clock_millis() -> i64 {
    use todo_board_core::environment::Clock;
    test_clock().now().timestamp_millis()
}

#[tokio::test]
async fn survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = board_on(Arc::new(FileKeyValueStore::open(dir.path()).unwrap()));
        store.send(TodoBoardAction::Load).await.unwrap();
        type_and_enter(&store, "persist me").await;
        type_and_enter(&store, "and me").await;
        let id = store.state(|s| s.active[1].id).await;
        store.send(TodoBoardAction::ToggleItem { id }).await.unwrap();
    }

    let store = board_on(Arc::new(FileKeyValueStore::open(dir.path()).unwrap()));
    store.send(TodoBoardAction::Load).await.unwrap();
    let (active, completed) = lists(&store).await;
    assert_eq!(texts(&active), vec!["and me"]);
    assert_eq!(texts(&completed), vec!["persist me"]);
}

// ============================================================================
// Shell
// ============================================================================

#[tokio::test]
async fn shell_session() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    let input: &[u8] = b"Buy milk\nWalk dog\n:t a2\n   \n:t z1\n:t a9\n:bogus\n:help\n:quit\nnever read\n";
    let mut out = Vec::new();

    shell::run(&store, input, &mut out).await.unwrap();

    let out = String::from_utf8(out).unwrap();
    let (active, completed) = lists(&store).await;
    assert_eq!(texts(&active), vec!["Walk dog"]);
    assert_eq!(texts(&completed), vec!["Buy milk"]);
    assert!(out.contains("  c1   ✔ Buy milk"));
    assert!(out.contains("Invalid row \"z1\""));
    assert!(out.contains("No row a9"));
    assert!(out.contains("Unknown command \"bogus\""));
    assert!(out.contains(":reset"));
    assert!(!texts(&active).contains(&"never read"));
}

#[tokio::test]
async fn shell_reset() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = loaded_board(&storage).await;
    let input: &[u8] = b"a\nb\n:reset\n";
    let mut out = Vec::new();

    shell::run(&store, input, &mut out).await.unwrap();

    assert!(store.state(TodoBoardState::is_empty).await);
    assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
}
