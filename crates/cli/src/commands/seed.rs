//! Seed and migrate the store.
//!
//! # Usage
//!
//! ```bash
//! craftify seed
//! craftify --data-dir /tmp/craftify seed
//! ```

use std::path::PathBuf;

use tracing::info;

use super::{CliError, open_db, progress};

/// Run the seed routine and report what it changed.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn run(data_dir: Option<PathBuf>) -> Result<(), CliError> {
    let (db, config) = open_db(data_dir)?;
    let report = craftify_market::seed::run(&db);

    info!(
        data_dir = %config.data_dir.display(),
        seeded = report.seeded,
        migrated = report.migrated,
        regions_normalized = report.regions_normalized,
        "Seed complete"
    );

    if report.changed() {
        progress(&format!(
            "Store ready: {} listings, {} users (version {})",
            db.listings().len(),
            db.users().len(),
            db.version()
        ));
    } else {
        progress("Store already up to date");
    }
    Ok(())
}
