//! CLI command implementations.
//!
//! Each command opens the file store, starts an [`App`] (which runs the seed
//! routine), replays the navigation and actions a visitor would perform and
//! prints the final page.

pub mod account;
pub mod browse;
pub mod cart;
pub mod checkout;
pub mod listing;
pub mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use craftify_market::app::{Action, App, Event, Screen};
use craftify_market::config::{ConfigError, MarketConfig};
use craftify_market::db::Db;
use craftify_market::error::AppError;
use craftify_market::storage::{FileStore, Storage, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A marketplace operation failed outside the event loop.
    #[error("{0}")]
    Market(#[from] AppError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration and open the file store.
///
/// # Errors
///
/// Returns `CliError` if configuration is invalid or the data directory
/// cannot be created.
pub fn open_db(data_dir: Option<PathBuf>) -> Result<(Db, MarketConfig), CliError> {
    let mut config = MarketConfig::from_env()?;
    if let Some(data_dir) = data_dir {
        config = config.with_data_dir(data_dir);
    }

    let store = FileStore::new(&config.data_dir)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Opened store");
    Ok((Db::new(Storage::new(Arc::new(store))), config))
}

/// Open the store and start the runtime.
///
/// # Errors
///
/// See [`open_db`].
pub fn open_app(data_dir: Option<PathBuf>) -> Result<App, CliError> {
    let (db, config) = open_db(data_dir)?;
    Ok(App::new(db, config))
}

/// Navigate to a fragment.
pub fn visit(app: &mut App, fragment: &str) -> Screen {
    app.handle(Event::Navigate(fragment.to_string()))
}

/// Perform an action.
pub fn act(app: &mut App, action: Action) -> Screen {
    app.handle(Event::Action(action))
}

/// Print a page to stdout and its toast to stderr.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn show(screen: &Screen) {
    if let Some(toast) = &screen.toast {
        eprintln!("» {toast}");
    }
    println!("{}", screen.html);
}

/// Print a progress line to stderr.
#[allow(clippy::print_stderr)]
pub fn progress(line: &str) {
    eprintln!("{line}");
}
