//! Read-only browsing commands.
//!
//! # Usage
//!
//! ```bash
//! craftify visit '#/booking'
//! craftify market -q pottery -r Jaipur -s price-desc
//! craftify invoice --id ord_abc123 --out invoice.html
//! craftify slideshow --rounds 8
//! ```

use std::path::{Path, PathBuf};

use craftify_market::app::Action;
use craftify_market::router::Route;
use craftify_market::views::{MarketQuery, SortOrder};

use super::{CliError, act, open_app, progress, show, visit as navigate};

/// Render the view for a fragment.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn visit(data_dir: Option<PathBuf>, fragment: &str) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    show(&navigate(&mut app, fragment));
    Ok(())
}

/// Browse the market with a search, region filter and sort order.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened or the sort order is
/// unknown.
pub fn market(
    data_dir: Option<PathBuf>,
    query: String,
    region: String,
    sort: &str,
) -> Result<(), CliError> {
    let sort: SortOrder = sort.parse()?;

    let mut app = open_app(data_dir)?;
    navigate(&mut app, "#/market");
    show(&act(
        &mut app,
        Action::SetMarketQuery(MarketQuery {
            q: query,
            region,
            sort,
        }),
    ));
    Ok(())
}

/// Show an invoice, optionally exporting the page to a file.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened or the file cannot be
/// written.
pub async fn invoice(
    data_dir: Option<PathBuf>,
    id: Option<&str>,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    let route = Route::Invoice {
        id: id.map(Into::into),
    };
    let screen = navigate(&mut app, &route.fragment());

    match out {
        Some(path) if matches!(screen.route, Route::Invoice { .. }) => {
            tokio::fs::write(path, &screen.html).await?;
            tracing::info!(path = %path.display(), "Invoice exported");
            progress(&format!("Invoice written to {}", path.display()));
        }
        _ => show(&screen),
    }
    Ok(())
}

/// Rotate the home slideshow, printing the active image each period.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub async fn slideshow(data_dir: Option<PathBuf>, rounds: usize) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    navigate(&mut app, "#/");

    let screen = app
        .run_slideshow(rounds, |show, _| {
            progress(&format!(
                "slide {}/{}: {}",
                show.index() + 1,
                show.images().len(),
                show.current().unwrap_or_default()
            ));
        })
        .await;
    show(&screen);
    Ok(())
}
