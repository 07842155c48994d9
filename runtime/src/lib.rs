//! # TodoBoard Runtime
//!
//! Runtime implementation for the TodoBoard architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Event Loop**: One action (and every action its effects produce) is
//!   processed to completion before the next `send` is admitted
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//!
//! // Send an action; its effects have run when this returns
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use todo_board_core::effect::{Effect, StorageOperation};
use todo_board_core::reducer::Reducer;
use tokio::sync::{Mutex, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept producing actions past the configured bound
        ///
        /// The state reflects every action reduced before the bound was hit;
        /// the remaining feedback actions are dropped.
        #[error("Feedback chain exceeded {0} actions")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_board_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of effect-produced actions reduced for one `send`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Default bound on feedback actions per `send`
    pub const DEFAULT_MAX_FEEDBACK_ACTIONS: usize = 64;

    /// Create a new configuration
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback bound
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, max: usize) -> Self {
        self.max_feedback_actions = max;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FEEDBACK_ACTIONS)
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent reads)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// Cloning a Store is cheap and yields a handle to the same state.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    /// Held for the whole of `send`, so events never interleave.
    dispatch: Arc<Mutex<()>>,
    config: StoreConfig,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            dispatch: Arc::clone(&self.dispatch),
            config: self.config,
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`StoreConfig::default`].
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new Store with custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            dispatch: Arc::new(Mutex::new(())),
            config,
        }
    }

    /// The configuration this store was built with
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Send an action to the store
    ///
    /// 1. Waits until no other `send` is in progress
    /// 2. Calls reducer with (state, action, environment)
    /// 3. Executes returned effects, in order, to completion
    /// 4. Reduces any actions those effects produced (FIFO), repeating 2-4
    ///
    /// When this returns, every effect of the action has run: a write
    /// described by the reducer is already in storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FeedbackLimitExceeded`] if effects produce more
    /// than [`StoreConfig::max_feedback_actions`] follow-up actions.
    ///
    /// # Panics
    ///
    /// If the reducer panics, the panic propagates to the caller.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        let _dispatch = self.dispatch.lock().await;
        metrics::counter!("store.actions.total").increment(1);

        let mut pending = VecDeque::from([action]);
        let mut processed = 0_usize;

        while let Some(action) = pending.pop_front() {
            if processed > self.config.max_feedback_actions {
                tracing::warn!(
                    limit = self.config.max_feedback_actions,
                    dropped = pending.len() + 1,
                    "Feedback limit exceeded, dropping remaining actions"
                );
                metrics::counter!("store.feedback.limit_exceeded").increment(1);
                return Err(StoreError::FeedbackLimitExceeded(
                    self.config.max_feedback_actions,
                ));
            }
            processed += 1;

            let effects = {
                let mut state = self.state.write().await;
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer.reduce(&mut *state, action, &self.environment)
            };

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            for effect in effects {
                Self::execute_effect(effect, &mut pending);
            }
        }

        tracing::debug!(actions = processed, "Action processing completed");
        Ok(())
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let active = store.state(|s| s.active.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    fn execute_effect(effect: Effect<A>, feedback: &mut VecDeque<A>) {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
            },
            Effect::Sequential(effects) => {
                tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                for effect in effects {
                    Self::execute_effect(effect, feedback);
                }
            },
            Effect::Storage(op) => {
                metrics::counter!("store.effects.executed", "type" => "storage").increment(1);
                if let Some(action) = Self::execute_storage(op) {
                    tracing::trace!("Storage effect produced an action, queueing it");
                    feedback.push_back(action);
                }
            },
        }
    }

    fn execute_storage(op: StorageOperation<A>) -> Option<A> {
        match op {
            StorageOperation::Get {
                store,
                key,
                on_success,
                on_error,
            } => match store.get(&key) {
                Ok(value) => {
                    tracing::debug!(key = %key, found = value.is_some(), "Storage get succeeded");
                    on_success(value)
                },
                Err(error) => {
                    tracing::warn!(key = %key, error = %error, "Storage get failed");
                    metrics::counter!("store.storage.failures", "op" => "get").increment(1);
                    on_error(error)
                },
            },
            StorageOperation::Set { store, key, value } => {
                match store.set(&key, &value) {
                    Ok(()) => {
                        tracing::debug!(key = %key, bytes = value.len(), "Storage set succeeded");
                    },
                    Err(error) => {
                        tracing::warn!(key = %key, error = %error, "Storage set failed");
                        metrics::counter!("store.storage.failures", "op" => "set").increment(1);
                    },
                }
                None
            },
        }
    }
}
