//! Craftify CLI - browse and operate the marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create the demo catalogue
//! craftify seed
//!
//! # Browse
//! craftify market --query madhubani --sort price-asc
//! craftify visit '#/invoice?id=ord_abc123'
//!
//! # Buy something
//! craftify signup -e asha@example.com -p secret
//! craftify cart add itm_abc123
//! craftify checkout --method upi --upi-id asha@upi --full-name "Asha Rao" ...
//! craftify invoice --out invoice.html
//! ```
//!
//! Every command runs against the file store in the data directory, runs the
//! seed routine first and prints the resulting page to stdout. Toasts and
//! countdown ticks go to stderr.
//!
//! # Environment Variables
//!
//! - `CRAFTIFY_DATA_DIR` - store directory (default `.craftify`)
//! - `CRAFTIFY_UPI_COUNTDOWN_SECS` - UPI countdown length (default 10)
//! - `CRAFTIFY_SLIDESHOW_SECS` - slideshow period (default 3)
//! - `CRAFTIFY_TOAST_MS` - toast lifetime (default 1800)
//! - `RUST_LOG` - log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use craftify_core::{PaymentMethod, Role};

mod commands;

#[derive(Parser)]
#[command(name = "craftify")]
#[command(author, version, about = "Craftify handcrafted art marketplace")]
struct Cli {
    /// Store directory (overrides `CRAFTIFY_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create demo data and run pending migrations
    Seed,
    /// Render the view for a location fragment
    Visit {
        /// Fragment such as `#/market` or `#/invoice?id=ord_x`
        fragment: String,
    },
    /// Browse the market
    Market {
        /// Free-text search over title, description and region
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact region filter
        #[arg(short, long, default_value = "")]
        region: String,

        /// Sort order (`recent`, `price-asc`, `price-desc`)
        #[arg(short, long, default_value = "recent")]
        sort: String,
    },
    /// Log in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Signup(SignupArgs),
    /// Log out
    Logout,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage your listings (artists only)
    Listing {
        #[command(subcommand)]
        action: ListingAction,
    },
    /// Update the artist name and bio shown on the dashboard
    ArtistProfile {
        #[arg(short, long)]
        name: String,

        #[arg(long, default_value = "")]
        bio: String,
    },
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Place an order for the cart
    Checkout(CheckoutArgs),
    /// Show an invoice
    Invoice {
        /// Order ID; defaults to the most recent order
        #[arg(long)]
        id: Option<String>,

        /// Write the rendered invoice page to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Rotate the home slideshow
    Slideshow {
        #[arg(long, default_value_t = 4)]
        rounds: usize,
    },
}

#[derive(Args)]
struct SignupArgs {
    #[arg(short, long)]
    email: String,

    /// At least 4 characters
    #[arg(short, long)]
    password: String,

    /// Account role (`user` or `artist`)
    #[arg(short, long, default_value = "user")]
    role: Role,

    /// Display name
    #[arg(short, long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    bio: String,

    /// Avatar image file
    #[arg(long)]
    avatar: Option<PathBuf>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a listing
    Add { id: String },
    /// Increase a line by one
    Inc { id: String },
    /// Decrease a line by one, removing it at zero
    Dec { id: String },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ListingAction {
    /// Publish a new listing
    Publish {
        #[arg(short, long)]
        title: String,

        /// Price in whole rupees
        #[arg(short, long)]
        price: String,

        #[arg(short, long, default_value = "")]
        desc: String,

        #[arg(short, long, default_value = "")]
        region: String,

        /// Image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit one of your listings; omitted fields keep their value
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        price: Option<String>,

        #[arg(short, long)]
        desc: Option<String>,
    },
    /// Delete one of your listings
    Delete { id: String },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Edit your profile; omitted fields keep their value
    Edit {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        /// Avatar image file
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CheckoutArgs {
    /// Payment method (`cod` or `upi`)
    #[arg(short, long, default_value = "cod")]
    method: PaymentMethod,

    #[arg(long, default_value = "")]
    upi_id: String,

    #[arg(long, default_value = "")]
    full_name: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    street: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    state: String,

    #[arg(long, default_value = "")]
    zip: String,

    #[arg(long, default_value = "")]
    country: String,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered pages on stdout stay clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "craftify_market=info,craftify_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Seed => commands::seed::run(data_dir)?,
        Commands::Visit { fragment } => commands::browse::visit(data_dir, &fragment)?,
        Commands::Market {
            query,
            region,
            sort,
        } => commands::browse::market(data_dir, query, region, &sort)?,
        Commands::Login { email, password } => {
            commands::account::login(data_dir, email, password)?;
        }
        Commands::Signup(args) => {
            commands::account::signup(
                data_dir,
                commands::account::Signup {
                    email: args.email,
                    password: args.password,
                    role: args.role,
                    name: args.name,
                    bio: args.bio,
                    avatar: args.avatar,
                },
            )
            .await?;
        }
        Commands::Logout => commands::account::logout(data_dir)?,
        Commands::Cart { action } => {
            let action = match action {
                CartAction::Add { id } => commands::cart::Change::Add(id),
                CartAction::Inc { id } => commands::cart::Change::Increment(id),
                CartAction::Dec { id } => commands::cart::Change::Decrement(id),
                CartAction::Remove { id } => commands::cart::Change::Remove(id),
                CartAction::Clear => commands::cart::Change::Clear,
            };
            commands::cart::apply(data_dir, action)?;
        }
        Commands::Listing { action } => match action {
            ListingAction::Publish {
                title,
                price,
                desc,
                region,
                image,
            } => {
                commands::listing::publish(
                    data_dir,
                    commands::listing::Publish {
                        title,
                        price,
                        desc,
                        region,
                        image,
                    },
                )
                .await?;
            }
            ListingAction::Edit {
                id,
                title,
                price,
                desc,
            } => commands::listing::edit(data_dir, &id, title, price, desc)?,
            ListingAction::Delete { id } => commands::listing::delete(data_dir, &id)?,
        },
        Commands::ArtistProfile { name, bio } => {
            commands::account::artist_profile(data_dir, name, bio)?;
        }
        Commands::Profile { action } => match action {
            None => commands::account::show_profile(data_dir)?,
            Some(ProfileAction::Edit {
                name,
                email,
                bio,
                avatar,
            }) => {
                commands::account::edit_profile(
                    data_dir,
                    commands::account::ProfileEdit {
                        name,
                        email,
                        bio,
                        avatar,
                    },
                )
                .await?;
            }
        },
        Commands::Checkout(args) => {
            commands::checkout::place_order(
                data_dir,
                craftify_market::app::CheckoutForm {
                    full_name: args.full_name,
                    phone: args.phone,
                    street: args.street,
                    city: args.city,
                    state: args.state,
                    zip: args.zip,
                    country: args.country,
                    payment_method: args.method,
                    upi_id: args.upi_id,
                },
            )
            .await?;
        }
        Commands::Invoice { id, out } => {
            commands::browse::invoice(data_dir, id.as_deref(), out.as_deref()).await?;
        }
        Commands::Slideshow { rounds } => commands::browse::slideshow(data_dir, rounds).await?,
    }
    Ok(())
}
