//! Reducer logic for the todo board.
//!
//! Commands are validated and turned into events; events are applied to
//! state. Every event that changes the lists is followed by a write of the
//! whole list to storage.

use crate::transitions;
use crate::types::{Key, TodoBoardAction, TodoBoardState, TodoId, TodoItem};
use std::sync::Arc;
use todo_board_core::{
    SmallVec,
    effect::{Effect, StorageOperation},
    environment::IdGenerator,
    reducer::Reducer,
    smallvec,
    storage::KeyValueStore,
};

/// Storage key the board is persisted under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Environment dependencies for the board reducer
#[derive(Clone)]
pub struct TodoBoardEnvironment {
    /// Where the list is persisted
    pub storage: Arc<dyn KeyValueStore>,
    /// Source of new item ids
    pub ids: Arc<dyn IdGenerator>,
    /// Key the list is stored under
    pub storage_key: String,
}

impl TodoBoardEnvironment {
    /// Creates an environment persisting under [`DEFAULT_STORAGE_KEY`]
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            storage,
            ids,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Persist under `key` instead
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl std::fmt::Debug for TodoBoardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoBoardEnvironment")
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

/// Reducer for the board
#[derive(Clone, Debug, Default)]
pub struct TodoBoardReducer;

type Effects = SmallVec<[Effect<TodoBoardAction>; 4]>;

impl TodoBoardReducer {
    /// Creates a new `TodoBoardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Write the whole list, once the persisted list has been read
    fn persist(state: &TodoBoardState, env: &TodoBoardEnvironment) -> Effects {
        if !state.loaded {
            tracing::trace!("Board not loaded yet, skipping persist");
            return SmallVec::new();
        }

        match transitions::encode(&state.active, &state.completed) {
            Ok(value) => smallvec![Effect::set(
                Arc::clone(&env.storage),
                env.storage_key.clone(),
                value,
            )],
            Err(error) => {
                tracing::warn!(error = %error, "Failed to serialize board, skipping persist");
                SmallVec::new()
            },
        }
    }

    /// Build the event for a submission, if the text may become an item
    fn submit(state: &TodoBoardState, text: String, env: &TodoBoardEnvironment) -> Option<TodoBoardAction> {
        if !transitions::is_submittable(&text) {
            tracing::debug!("Ignoring blank submission");
            return None;
        }

        // Ids are increasing, so this ends within `state.len() + 1` draws
        let mut id = TodoId::new(env.ids.next_id());
        while state.contains(id) {
            tracing::debug!(%id, "Id already on the board, drawing another");
            id = TodoId::new(env.ids.next_id());
        }

        Some(TodoBoardAction::ItemAdded {
            item: TodoItem::new(id, text),
        })
    }

    /// Applies an event to state. Returns whether the lists changed.
    fn apply_event(state: &mut TodoBoardState, action: &TodoBoardAction) -> bool {
        match action {
            TodoBoardAction::Loaded { raw } => {
                let (active, completed) = transitions::load(raw.as_deref());
                state.active = active;
                state.completed = completed;
                state.loaded = true;
                true
            },
            // Stored data may still be intact, so it is not overwritten here
            TodoBoardAction::LoadFailed { .. } => {
                let (active, completed) = transitions::reset();
                state.active = active;
                state.completed = completed;
                state.loaded = true;
                false
            },
            TodoBoardAction::ItemAdded { item } => {
                if state.contains(item.id) {
                    return false;
                }
                state.active = transitions::add_item(std::mem::take(&mut state.active), item.clone());
                state.input.clear();
                true
            },
            TodoBoardAction::ItemToggled { id, completed } => {
                let already = state.get(*id).is_none_or(|item| item.completed == *completed);
                if already {
                    return false;
                }
                match transitions::toggle_item(&state.active, &state.completed, *id) {
                    Some((active, completed)) => {
                        state.active = active;
                        state.completed = completed;
                        true
                    },
                    None => false,
                }
            },
            TodoBoardAction::BoardReset => {
                let (active, completed) = transitions::reset();
                state.active = active;
                state.completed = completed;
                true
            },
            // Commands are not applied to state
            TodoBoardAction::Load
            | TodoBoardAction::UpdateInput { .. }
            | TodoBoardAction::KeyDown { .. }
            | TodoBoardAction::AddItem { .. }
            | TodoBoardAction::ToggleItem { .. }
            | TodoBoardAction::Reset => false,
        }
    }

    /// Apply an event and persist if it changed the lists
    fn commit(state: &mut TodoBoardState, event: &TodoBoardAction, env: &TodoBoardEnvironment) -> Effects {
        if Self::apply_event(state, event) {
            Self::persist(state, env)
        } else {
            SmallVec::new()
        }
    }
}

impl Reducer for TodoBoardReducer {
    type State = TodoBoardState;
    type Action = TodoBoardAction;
    type Environment = TodoBoardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoBoardAction::Load => {
                if state.loaded {
                    tracing::debug!("Board already loaded, ignoring Load");
                    return SmallVec::new();
                }

                smallvec![Effect::Storage(StorageOperation::Get {
                    store: Arc::clone(&env.storage),
                    key: env.storage_key.clone(),
                    on_success: Box::new(|raw| Some(TodoBoardAction::Loaded { raw })),
                    on_error: Box::new(|error| {
                        Some(TodoBoardAction::LoadFailed {
                            error: error.to_string(),
                        })
                    }),
                })]
            },

            TodoBoardAction::UpdateInput { text } => {
                state.input = text;
                SmallVec::new()
            },

            TodoBoardAction::KeyDown { key } => {
                if key != Key::Enter {
                    return SmallVec::new();
                }
                match Self::submit(state, state.input.clone(), env) {
                    Some(event) => Self::commit(state, &event, env),
                    None => SmallVec::new(),
                }
            },

            TodoBoardAction::AddItem { text } => match Self::submit(state, text, env) {
                Some(event) => Self::commit(state, &event, env),
                None => SmallVec::new(),
            },

            TodoBoardAction::ToggleItem { id } => {
                let Some(item) = state.get(id) else {
                    tracing::debug!(%id, "Ignoring toggle of unknown item");
                    return SmallVec::new();
                };
                let event = TodoBoardAction::ItemToggled {
                    id,
                    completed: !item.completed,
                };
                Self::commit(state, &event, env)
            },

            TodoBoardAction::Reset => Self::commit(state, &TodoBoardAction::BoardReset, env),

            // ========== Events ==========
            TodoBoardAction::LoadFailed { ref error } => {
                tracing::warn!(error = %error, "Could not read persisted todos, starting empty");
                Self::commit(state, &action, env)
            },

            TodoBoardAction::Loaded { .. } => {
                let effects = Self::commit(state, &action, env);
                if let Some(max) = state.all().map(|item| item.id.value()).max() {
                    env.ids.observe(max);
                }
                effects
            },

            TodoBoardAction::ItemAdded { .. }
            | TodoBoardAction::ItemToggled { .. }
            | TodoBoardAction::BoardReset => Self::commit(state, &action, env),
        }
    }
}
