//! A todo board: one list of short text items split into "active" and
//! "completed", persisted as a single JSON array in a key-value store.
//!
//! The board is a reducer-driven state machine:
//!
//! - [`transitions`] holds the pure list rules (partition, add, toggle, reset)
//! - [`reducer`] turns commands into events and emits a storage write after
//!   every change
//! - [`view`] describes what a front end draws
//! - [`shell`] is a line-based front end used by the `todo-board` binary
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_board::{TodoBoardAction, TodoBoardEnvironment, TodoBoardReducer, TodoBoardState};
//! use todo_board::storage::FileKeyValueStore;
//! use todo_board_core::environment::{SystemClock, TimestampIdGenerator};
//! use todo_board_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Arc::new(FileKeyValueStore::open(".todo-board")?);
//! let ids = Arc::new(TimestampIdGenerator::new(Arc::new(SystemClock)));
//! let env = TodoBoardEnvironment::new(storage, ids);
//! let store = Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env);
//!
//! store.send(TodoBoardAction::Load).await?;
//! store.send(TodoBoardAction::AddItem { text: "Buy milk".to_string() }).await?;
//!
//! let active = store.state(|s| s.active_count()).await;
//! println!("Active: {active}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod reducer;
pub mod shell;
pub mod storage;
pub mod transitions;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use reducer::{DEFAULT_STORAGE_KEY, TodoBoardEnvironment, TodoBoardReducer};
pub use types::{Key, TodoBoardAction, TodoBoardState, TodoId, TodoItem};

/// A store running the board reducer
pub type TodoBoardStore =
    todo_board_runtime::Store<TodoBoardState, TodoBoardAction, TodoBoardEnvironment, TodoBoardReducer>;
