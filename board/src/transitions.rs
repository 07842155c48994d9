//! Pure board transitions.
//!
//! Each function takes the current lists and returns the new ones. Nothing
//! here touches storage or the clock, so every rule of the board can be
//! exercised directly.

use crate::types::{TodoId, TodoItem};
use std::collections::HashSet;

/// Active and completed lists, in that order
pub type Lists = (Vec<TodoItem>, Vec<TodoItem>);

/// Split items by their flag, keeping relative order within each side
#[must_use]
pub fn partition(items: Vec<TodoItem>) -> Lists {
    items.into_iter().partition(|item| !item.completed)
}

/// Parse a persisted value.
///
/// An absent value, invalid JSON, or JSON of the wrong shape all decode to an
/// empty list. Repeated ids keep their first occurrence.
#[must_use]
pub fn decode(raw: Option<&str>) -> Vec<TodoItem> {
    let Some(raw) = raw else {
        tracing::debug!("No persisted todos");
        return Vec::new();
    };

    let items = match serde_json::from_str::<Vec<TodoItem>>(raw) {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(error = %error, "Ignoring unreadable persisted todos");
            return Vec::new();
        },
    };

    let mut seen = HashSet::with_capacity(items.len());
    let total = items.len();
    let unique: Vec<TodoItem> = items.into_iter().filter(|item| seen.insert(item.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Dropped persisted todos with repeated ids"
        );
    }
    unique
}

/// Decode and partition a persisted value
#[must_use]
pub fn load(raw: Option<&str>) -> Lists {
    partition(decode(raw))
}

/// Serialize `active ++ completed` as a JSON array
///
/// # Errors
///
/// Returns the serializer error; plain items always serialize.
pub fn encode(active: &[TodoItem], completed: &[TodoItem]) -> Result<String, serde_json::Error> {
    let all: Vec<&TodoItem> = active.iter().chain(completed).collect();
    serde_json::to_string(&all)
}

/// Whether `text` may become an item
#[must_use]
pub fn is_submittable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Put `item` at the front of the active list
#[must_use]
pub fn add_item(mut active: Vec<TodoItem>, item: TodoItem) -> Vec<TodoItem> {
    active.insert(0, item);
    active
}

/// Flip the item with `id` and move it to the other list.
///
/// The moved item is appended after the existing entries of its
/// destination. Returns `None` when neither list holds `id`.
#[must_use]
pub fn toggle_item(active: &[TodoItem], completed: &[TodoItem], id: TodoId) -> Option<Lists> {
    let moved = active
        .iter()
        .chain(completed)
        .find(|item| item.id == id)?
        .clone()
        .toggled();

    let mut next_active: Vec<TodoItem> = active.iter().filter(|item| item.id != id).cloned().collect();
    let mut next_completed: Vec<TodoItem> =
        completed.iter().filter(|item| item.id != id).cloned().collect();

    if moved.completed {
        next_completed.push(moved);
    } else {
        next_active.push(moved);
    }
    Some((next_active, next_completed))
}

/// Both lists emptied
#[must_use]
pub const fn reset() -> Lists {
    (Vec::new(), Vec::new())
}
