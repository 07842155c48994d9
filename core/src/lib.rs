//! # TodoBoard Core
//!
//! Core traits and types for the TodoBoard architecture.
//!
//! The board is modelled as a reducer-driven state machine:
//!
//! - **State**: Domain state owned by a single store
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! Persistence is reached only through the [`storage::KeyValueStore`] port,
//! and only as an [`effect::Effect::Storage`] description that the runtime
//! executes.
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_core::*;
//!
//! impl Reducer for BoardReducer {
//!     type State = BoardState;
//!     type Action = BoardAction;
//!     type Environment = BoardEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BoardState,
//!         action: BoardAction,
//!         env: &BoardEnvironment,
//!     ) -> SmallVec<[Effect<BoardAction>; 4]> {
//!         // Business logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Key-value storage port
pub mod storage;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce zero or one effect, so the return type keeps
        /// up to four effects inline.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution), so reducers stay pure and tests can
/// inspect exactly what would be written where.
pub mod effect {
    use crate::storage::{KeyValueStore, StorageError};
    use std::sync::Arc;

    /// Callback invoked with the value read by [`StorageOperation::Get`]
    pub type OnLoaded<Action> = Box<dyn FnOnce(Option<String>) -> Option<Action> + Send>;

    /// Callback invoked when a storage operation fails
    pub type OnStorageError<Action> = Box<dyn FnOnce(StorageError) -> Option<Action> + Send>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),

        /// Read or write the key-value store
        Storage(StorageOperation<Action>),
    }

    /// A single operation against a [`KeyValueStore`]
    pub enum StorageOperation<Action> {
        /// Read the value stored under `key`
        Get {
            /// Store to read from
            store: Arc<dyn KeyValueStore>,
            /// Key to read
            key: String,
            /// Maps the read value (absent = `None`) to a feedback action
            on_success: OnLoaded<Action>,
            /// Maps a read failure to a feedback action
            on_error: OnStorageError<Action>,
        },

        /// Overwrite the value stored under `key`
        ///
        /// Fire-and-forget: failures are logged by the runtime and never
        /// produce an action.
        Set {
            /// Store to write to
            store: Arc<dyn KeyValueStore>,
            /// Key to write
            key: String,
            /// Serialized value
            value: String,
        },
    }

    impl<Action> StorageOperation<Action> {
        /// Returns the key this operation targets
        #[must_use]
        pub fn key(&self) -> &str {
            match self {
                Self::Get { key, .. } | Self::Set { key, .. } => key,
            }
        }
    }

    // Manual Debug implementations since callbacks and trait objects don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Storage(op) => f.debug_tuple("Effect::Storage").field(op).finish(),
            }
        }
    }

    impl<Action> std::fmt::Debug for StorageOperation<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Get { key, .. } => f.debug_struct("Get").field("key", key).finish(),
                Self::Set { key, value, .. } => f
                    .debug_struct("Set")
                    .field("key", key)
                    .field("value", value)
                    .finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Describe a write of `value` under `key`
        #[must_use]
        pub fn set(store: Arc<dyn KeyValueStore>, key: impl Into<String>, value: String) -> Self {
            Effect::Storage(StorageOperation::Set {
                store,
                key: key.into(),
                value,
            })
        }

        /// Returns the value this effect writes, if it is a storage write
        #[must_use]
        pub fn written_value(&self) -> Option<&str> {
            match self {
                Effect::Storage(StorageOperation::Set { value, .. }) => Some(value),
                _ => None,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies (time, id allocation, storage) are abstracted
/// behind traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of item identifiers
    pub trait IdGenerator: Send + Sync {
        /// Allocate the next identifier
        fn next_id(&self) -> i64;

        /// Record an identifier allocated elsewhere (for example one read
        /// back from storage). Later ids are greater than `id`.
        fn observe(&self, id: i64);
    }

    /// Ids are creation timestamps in milliseconds since the Unix epoch.
    ///
    /// Two ids allocated within the same millisecond (or while the clock
    /// steps backwards) are bumped to `last + 1`, so ids from one generator
    /// are strictly increasing.
    pub struct TimestampIdGenerator {
        clock: Arc<dyn Clock>,
        last: AtomicI64,
    }

    impl TimestampIdGenerator {
        /// Create a generator reading time from `clock`
        #[must_use]
        pub fn new(clock: Arc<dyn Clock>) -> Self {
            Self {
                clock,
                last: AtomicI64::new(0),
            }
        }
    }

    impl std::fmt::Debug for TimestampIdGenerator {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TimestampIdGenerator")
                .field("last", &self.last.load(Ordering::Relaxed))
                .finish_non_exhaustive()
        }
    }

    impl IdGenerator for TimestampIdGenerator {
        fn next_id(&self) -> i64 {
            let now = self.clock.now().timestamp_millis();
            let previous = self
                .last
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                    Some(now.max(last.saturating_add(1)))
                })
                .unwrap_or_else(|last| last);
            now.max(previous.saturating_add(1))
        }

        fn observe(&self, id: i64) {
            self.last.fetch_max(id, Ordering::SeqCst);
        }
    }
}
