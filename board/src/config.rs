//! Configuration management for the board.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::DEFAULT_STORAGE_KEY;
use crate::storage::is_valid_key;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use todo_board_runtime::StoreConfig;

/// Errors from validating a [`Config`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The storage key cannot name a file
    #[error("Invalid TODO_BOARD_STORAGE_KEY {0:?}: use letters, digits, '_', '-' or '.'")]
    InvalidStorageKey(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the persisted list (`TODO_BOARD_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Key the list is persisted under (`TODO_BOARD_STORAGE_KEY`)
    pub storage_key: String,
    /// Bound on effect-produced actions per event (`TODO_BOARD_MAX_FEEDBACK`)
    pub max_feedback_actions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".todo-board"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_feedback_actions: StoreConfig::DEFAULT_MAX_FEEDBACK_ACTIONS,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: lookup("TODO_BOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key: lookup("TODO_BOARD_STORAGE_KEY").unwrap_or(defaults.storage_key),
            max_feedback_actions: lookup("TODO_BOARD_MAX_FEEDBACK")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_feedback_actions),
        }
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStorageKey`] if the key cannot name a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_key(&self.storage_key) {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        Ok(())
    }

    /// Runtime settings for the store
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "todos");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_BOARD_DATA_DIR", "/tmp/board"),
            ("TODO_BOARD_STORAGE_KEY", "work"),
            ("TODO_BOARD_MAX_FEEDBACK", "8"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.store_config().max_feedback_actions, 8);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[("TODO_BOARD_MAX_FEEDBACK", "lots")]));
        assert_eq!(
            config.max_feedback_actions,
            StoreConfig::DEFAULT_MAX_FEEDBACK_ACTIONS
        );
    }

    #[test]
    fn rejects_unusable_key() {
        let config = Config::from_lookup(lookup(&[("TODO_BOARD_STORAGE_KEY", "../x")]));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStorageKey("../x".to_string()))
        );
    }
}
