//! Interactive todo board.
//!
//! Persists to `$TODO_BOARD_DATA_DIR/<key>.json`. Logs go to stderr; set
//! `RUST_LOG` to change verbosity.

use std::sync::Arc;
use todo_board::config::Config;
use todo_board::storage::FileKeyValueStore;
use todo_board::{TodoBoardAction, TodoBoardEnvironment, TodoBoardReducer, TodoBoardState, shell};
use todo_board_core::environment::{SystemClock, TimestampIdGenerator};
use todo_board_runtime::Store;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_board=info,todo_board_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate()?;
    info!(
        data_dir = %config.data_dir.display(),
        storage_key = %config.storage_key,
        "Configuration loaded"
    );

    let storage = Arc::new(FileKeyValueStore::open(&config.data_dir)?);
    let ids = Arc::new(TimestampIdGenerator::new(Arc::new(SystemClock)));
    let env = TodoBoardEnvironment::new(storage, ids).with_storage_key(config.storage_key.clone());
    let store = Store::with_config(
        TodoBoardState::new(),
        TodoBoardReducer::new(),
        env,
        config.store_config(),
    );

    store.send(TodoBoardAction::Load).await?;
    let count = store.state(TodoBoardState::len).await;
    info!(count, "Board loaded");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();
    shell::run(&store, stdin, &mut stdout).await?;

    Ok(())
}
