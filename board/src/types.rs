//! Domain types for the todo board.
//!
//! A board is two ordered lists of [`TodoItem`]s, partitioned by their
//! `completed` flag, plus the text currently typed into the entry field.

use serde::{Deserialize, Serialize};

/// Identifier of a todo item.
///
/// By default this is the creation time in milliseconds since the Unix
/// epoch. It serializes as a bare JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item, exactly as persisted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text as entered (never trimmed)
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// The same item with its `completed` flag flipped
    #[must_use]
    pub fn toggled(mut self) -> Self {
        self.completed = !self.completed;
        self
    }
}

/// State of the board
///
/// Every item with `completed == false` lives in `active` and every item
/// with `completed == true` lives in `completed`; an id is never in both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoBoardState {
    /// Active items in display order (newest first)
    pub active: Vec<TodoItem>,
    /// Completed items in the order they were completed
    pub completed: Vec<TodoItem>,
    /// Pending, not yet submitted input
    pub input: String,
    /// Whether the persisted list has been read
    pub loaded: bool,
}

impl TodoBoardState {
    /// Creates an empty board that has not loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded board from already partitioned lists
    #[must_use]
    pub fn with_lists(active: Vec<TodoItem>, completed: Vec<TodoItem>) -> Self {
        Self {
            active,
            completed,
            input: String::new(),
            loaded: true,
        }
    }

    /// Total number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    /// Whether both lists are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }

    /// Number of active items
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Returns an item by id from whichever list holds it
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.all().find(|item| item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// All items in persisted order: active first, then completed
    pub fn all(&self) -> impl Iterator<Item = &TodoItem> {
        self.active.iter().chain(self.completed.iter())
    }

    /// All ids in persisted order
    #[must_use]
    pub fn ids(&self) -> Vec<TodoId> {
        self.all().map(|item| item.id).collect()
    }
}

/// A key pressed while the entry field has focus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Commits the pending input
    Enter,
    /// Any other key, by name
    Other(String),
}

/// Actions representing commands and events for the board
///
/// Commands are user intent and may be rejected by the reducer. Events are
/// facts; reducing one always applies it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoBoardAction {
    // ========== Commands ==========
    /// Command: read the persisted list (on mount)
    Load,

    /// Command: the entry field now contains `text`
    UpdateInput {
        /// Field content, verbatim
        text: String,
    },

    /// Command: a key was pressed in the entry field
    KeyDown {
        /// The key
        key: Key,
    },

    /// Command: add an item with `text` as if Enter had been pressed
    AddItem {
        /// Raw text; must be non-blank after trimming
        text: String,
    },

    /// Command: flip an item's completion and move it to the other list
    ToggleItem {
        /// Item to toggle
        id: TodoId,
    },

    /// Command: clear both lists
    Reset,

    // ========== Events ==========
    /// Event: the persisted value was read (`None` when absent)
    Loaded {
        /// Raw stored value
        raw: Option<String>,
    },

    /// Event: the persisted value could not be read
    LoadFailed {
        /// Error message
        error: String,
    },

    /// Event: an item was created
    ItemAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: an item moved between lists
    ItemToggled {
        /// Item that moved
        id: TodoId,
        /// Its new flag
        completed: bool,
    },

    /// Event: both lists were cleared
    BoardReset,
}

impl TodoBoardAction {
    /// Returns true if this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Load
                | Self::UpdateInput { .. }
                | Self::KeyDown { .. }
                | Self::AddItem { .. }
                | Self::ToggleItem { .. }
                | Self::Reset
        )
    }

    /// Returns true if this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
