//! Line-based front end for the board.
//!
//! Each input line is either text typed into the entry field (committed with
//! Enter) or a `:` command. The board is redrawn after every line that
//! changed it.

use crate::TodoBoardStore;
use crate::types::{Key, TodoBoardAction};
use crate::view::{BoardView, RowRef, ViewError};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Usage text printed by `:help`
pub const HELP: &str = "\
Type a line and press Enter to add it. Start it with :: to add text that begins with ':'.
  :toggle <row>, :t <row>   move a row between lists (rows: a1, a2, ... c1, ...)
  :reset                    clear both lists
  :show                     redraw the board
  :help                     show this help
  :quit, :q                 exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Type this text and press Enter
    Submit(String),
    /// Click a row
    Toggle(RowRef),
    /// Click Reset
    Reset,
    /// Redraw
    Show,
    /// Print usage
    Help,
    /// Leave
    Quit,
}

/// Errors from parsing a line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellError {
    /// `:something` that is not a command
    #[error("Unknown command {0:?}, try :help")]
    UnknownCommand(String),
    /// A command missing its argument
    #[error(":{0} needs a row, e.g. :{0} a1")]
    MissingRow(&'static str),
    /// Bad row address
    #[error(transparent)]
    Row(#[from] ViewError),
}

impl Command {
    /// Parse one line (without its line terminator)
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] for unknown commands or bad row addresses.
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Ok(Self::Submit(line.to_string()));
        };
        // `::` escapes a leading colon: `::)` submits `:)`
        if command.starts_with(':') {
            return Ok(Self::Submit(command.to_string()));
        }

        let mut words = command.split_whitespace();
        match words.next().unwrap_or_default() {
            "toggle" | "t" => {
                let row = words.next().ok_or(ShellError::MissingRow("toggle"))?;
                Ok(Self::Toggle(row.parse()?))
            },
            "reset" => Ok(Self::Reset),
            "show" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

async fn render<W: Write>(store: &TodoBoardStore, out: &mut W) -> std::io::Result<()> {
    let view = store.state(BoardView::from_state).await;
    writeln!(out, "{view}")?;
    out.flush()
}

/// Drive `store` from `input` until EOF or `:quit`, drawing to `out`.
///
/// The store should already have processed [`TodoBoardAction::Load`].
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// store rejects an action.
pub async fn run<R, W>(store: &TodoBoardStore, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    render(store, out).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                writeln!(out, "{error}")?;
                continue;
            },
        };

        match command {
            Command::Submit(text) => {
                store.send(TodoBoardAction::UpdateInput { text }).await?;
                store.send(TodoBoardAction::KeyDown { key: Key::Enter }).await?;
            },
            Command::Toggle(row) => {
                let id = store
                    .state(|state| BoardView::from_state(state).resolve(row))
                    .await;
                let Some(id) = id else {
                    writeln!(out, "No row {row}")?;
                    continue;
                };
                store.send(TodoBoardAction::ToggleItem { id }).await?;
            },
            Command::Reset => store.send(TodoBoardAction::Reset).await?,
            Command::Show => {},
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            },
            Command::Quit => break,
        }
        render(store, out).await?;
    }

    tracing::debug!("Shell finished");
    Ok(())
}
