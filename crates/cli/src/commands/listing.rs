//! Artist listing commands.
//!
//! # Usage
//!
//! ```bash
//! craftify listing publish -t "Blue Pottery Vase" -p 2400 -r Jaipur --image vase.jpg
//! craftify listing edit itm_abc123 -p 2600
//! craftify listing delete itm_abc123
//! ```

use std::path::PathBuf;

use craftify_core::ListingId;
use craftify_market::app::{Action, ListingForm};
use craftify_market::db::ListingRepository;
use craftify_market::media;

use super::{CliError, act, open_app, show, visit};

/// Publish arguments.
pub struct Publish {
    pub title: String,
    pub price: String,
    pub desc: String,
    pub region: String,
    pub image: Option<PathBuf>,
}

/// Publish a new listing from the artist dashboard.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened or the image cannot be
/// read.
pub async fn publish(data_dir: Option<PathBuf>, args: Publish) -> Result<(), CliError> {
    let img = media::optional_upload(args.image.as_deref()).await?;

    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/artist");
    show(&act(
        &mut app,
        Action::PublishListing(ListingForm {
            title: args.title,
            price: args.price,
            desc: args.desc,
            region: args.region,
            img,
        }),
    ));
    Ok(())
}

/// Open a listing in the edit form and save it.
///
/// Omitted fields keep the listing's current value, as the prefilled form
/// would.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn edit(
    data_dir: Option<PathBuf>,
    id: &str,
    title: Option<String>,
    price: Option<String>,
    desc: Option<String>,
) -> Result<(), CliError> {
    let id = ListingId::new(id);
    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/artist");

    let screen = act(&mut app, Action::BeginEdit(id.clone()));
    if app.ui().editing_listing.as_ref() != Some(&id) {
        // Not editable; the screen carries the reason
        show(&screen);
        return Ok(());
    }

    let current = ListingRepository::new(app.db()).get(&id);
    let (cur_title, cur_price, cur_desc) = current.map_or_else(Default::default, |l| {
        (l.title, l.price.amount().to_string(), l.desc)
    });

    show(&act(
        &mut app,
        Action::SaveEdit {
            id,
            title: title.unwrap_or(cur_title),
            price: price.unwrap_or(cur_price),
            desc: desc.unwrap_or(cur_desc),
        },
    ));
    Ok(())
}

/// Delete a listing.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn delete(data_dir: Option<PathBuf>, id: &str) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/artist");
    show(&act(&mut app, Action::DeleteListing(ListingId::new(id))));
    Ok(())
}
