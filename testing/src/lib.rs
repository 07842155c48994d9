//! # TodoBoard Testing
//!
//! Testing utilities and helpers for the TodoBoard architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory [`KeyValueStore`](todo_board_core::storage::KeyValueStore) test double
//! - The [`ReducerTest`] Given-When-Then harness and effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_testing::{InMemoryKeyValueStore, SequentialIdGenerator};
//!
//! #[tokio::test]
//! async fn test_board_flow() {
//!     let storage = Arc::new(InMemoryKeyValueStore::new());
//!     let env = TodoBoardEnvironment::new(storage.clone(), Arc::new(SequentialIdGenerator::new()));
//!     let store = Store::new(TodoBoardState::new(), TodoBoardReducer::new(), env);
//!
//!     store.send(TodoBoardAction::AddItem { text: "Buy milk".into() }).await?;
//!     assert_eq!(store.state(|s| s.active.len()).await, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use todo_board_core::environment::{Clock, IdGenerator};


/// In-memory storage testing utilities
pub mod storage_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_board_testing::mocks::FixedClock;
    /// use todo_board_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: 1, 2, 3, ...
    ///
    /// # Example
    ///
    /// ```
    /// use todo_board_testing::mocks::SequentialIdGenerator;
    /// use todo_board_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), 1);
    /// assert_eq!(ids.next_id(), 2);
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        last: AtomicI64,
    }

    impl SequentialIdGenerator {
        /// Start counting from 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// The first id handed out will be `last + 1`
        #[must_use]
        pub const fn starting_after(last: i64) -> Self {
            Self {
                last: AtomicI64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> i64 {
            self.last.fetch_add(1, Ordering::SeqCst) + 1
        }

        fn observe(&self, id: i64) {
            self.last.fetch_max(id, Ordering::SeqCst);
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
pub use storage_mocks::InMemoryKeyValueStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_sequential_ids_resume_after_offset() {
        let ids = SequentialIdGenerator::starting_after(41);
        assert_eq!(ids.next_id(), 42);
        assert_eq!(ids.next_id(), 43);
    }

    #[test]
    fn test_sequential_ids_continue_after_observed() {
        let ids = SequentialIdGenerator::new();
        ids.observe(9);
        assert_eq!(ids.next_id(), 10);
    }
}
