//! View model of the board.
//!
//! [`BoardView`] is what a front end draws: the title with its reset action,
//! the entry field, and the two lists. Rows carry short addresses (`a1`,
//! `c2`) so a text front end can refer to them when toggling.

use crate::types::{TodoBoardState, TodoId, TodoItem};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board title
pub const TITLE: &str = "TODO App";
/// Label of the reset action
pub const RESET_LABEL: &str = "Reset";
/// Placeholder shown while the entry field is empty
pub const INPUT_PLACEHOLDER: &str = "Enter a new TODO";
/// Heading of the active list
pub const ACTIVE_HEADING: &str = "Active Todos";
/// Heading of the completed list
pub const COMPLETED_HEADING: &str = "Completed Todos";

/// Which list a row belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// The active list
    Active,
    /// The completed list
    Completed,
}

impl Section {
    /// Status icon drawn in front of the row text
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Active => "◷",
            Self::Completed => "✔",
        }
    }

    const fn prefix(self) -> char {
        match self {
            Self::Active => 'a',
            Self::Completed => 'c',
        }
    }
}

/// Errors from parsing a row address
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Not of the form `a<n>` or `c<n>` with `n >= 1`
    #[error("Invalid row {0:?}: expected a1, a2, ... or c1, c2, ...")]
    InvalidRow(String),
}

/// Address of a row: a section and a 1-based position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRef {
    /// List the row is in
    pub section: Section,
    /// 1-based position in that list
    pub position: usize,
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.section.prefix(), self.position)
    }
}

impl FromStr for RowRef {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ViewError::InvalidRow(s.to_string());
        let mut chars = s.chars();
        let section = match chars.next().map(|c| c.to_ascii_lowercase()) {
            Some('a') => Section::Active,
            Some('c') => Section::Completed,
            _ => return Err(invalid()),
        };
        let position: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if position == 0 {
            return Err(invalid());
        }
        Ok(Self { section, position })
    }
}

/// One drawn row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Address used to toggle it
    pub reference: RowRef,
    /// Item behind the row
    pub id: TodoId,
    /// Item text
    pub text: String,
}

/// Everything a front end needs to draw the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    /// Current pending input
    pub input: String,
    /// Rows of the active list
    pub active: Vec<Row>,
    /// Rows of the completed list
    pub completed: Vec<Row>,
}

impl BoardView {
    /// Build the view of `state`
    #[must_use]
    pub fn from_state(state: &TodoBoardState) -> Self {
        Self {
            input: state.input.clone(),
            active: rows(Section::Active, &state.active),
            completed: rows(Section::Completed, &state.completed),
        }
    }

    /// The item behind a row address, if that row exists
    #[must_use]
    pub fn resolve(&self, reference: RowRef) -> Option<TodoId> {
        let rows = match reference.section {
            Section::Active => &self.active,
            Section::Completed => &self.completed,
        };
        rows.get(reference.position.checked_sub(1)?).map(|row| row.id)
    }
}

fn rows(section: Section, items: &[TodoItem]) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Row {
            reference: RowRef {
                section,
                position: index + 1,
            },
            id: item.id,
            text: item.text.clone(),
        })
        .collect()
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}  [{RESET_LABEL}]")?;
        if self.input.is_empty() {
            writeln!(f, "> ({INPUT_PLACEHOLDER})")?;
        } else {
            writeln!(f, "> {}", self.input)?;
        }
        for (heading, section, rows) in [
            (ACTIVE_HEADING, Section::Active, &self.active),
            (COMPLETED_HEADING, Section::Completed, &self.completed),
        ] {
            writeln!(f)?;
            writeln!(f, "{heading}")?;
            if rows.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for row in rows {
                writeln!(f, "  {:<4} {} {}", row.reference.to_string(), section.icon(), row.text)?;
            }
        }
        Ok(())
    }
}
