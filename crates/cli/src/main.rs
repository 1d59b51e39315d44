//! Minimarket Roque CLI - storefront and back-office client.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and look around
//! mm-cli auth login -e rosa@minimarketroque.pe -p secret
//! mm-cli catalog list
//!
//! # Fill the cart and place the order
//! mm-cli cart add 3
//! mm-cli checkout submit --method 1
//!
//! # Back office
//! mm-cli admin categories list
//! mm-cli stats
//! ```
//!
//! # Commands
//!
//! - `auth` - Sign in, register, profile, sign out
//! - `catalog` - Browse the product catalog
//! - `cart` - Manage the pending purchase
//! - `checkout` - Place the order and save the receipt
//! - `orders` - The signed-in customer's order history
//! - `admin` - Back-office resource management
//! - `stats` - Dashboard statistics
//!
//! # Environment Variables
//!
//! - `MINIMARKET_API_URL` - Base URL of the REST backend (required)
//! - `MINIMARKET_FILES_URL` - Base URL for uploaded images (optional)
//! - `MINIMARKET_STATE_DIR` - Where session and cart are persisted
//! - `SENTRY_DSN` - Error tracking (optional)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use minimarket_api::ApiConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod output;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "Minimarket Roque client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, register, and manage the account
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the pending purchase
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Place the order and save the receipt
    Checkout {
        #[command(subcommand)]
        action: commands::checkout::CheckoutAction,
    },
    /// The signed-in customer's order history
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Back-office resource management
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
    /// Dashboard statistics
    Stats,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Sentry needs the DSN before the subscriber is installed
    let config = ApiConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "minimarket_cli=info,minimarket_api=info,minimarket_storefront=info,minimarket_admin=info"
            .into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = context::AppContext::new(&config).await;

    match cli.command {
        Commands::Auth { action } => commands::auth::run(&ctx, action).await?,
        Commands::Catalog { action } => commands::catalog::run(&ctx, action).await?,
        Commands::Cart { action } => commands::cart::run(&ctx, action).await?,
        Commands::Checkout { action } => commands::checkout::run(&ctx, action).await?,
        Commands::Orders { action } => commands::orders::run(&ctx, action).await?,
        Commands::Admin { action } => commands::admin::run(&ctx, action).await?,
        Commands::Stats => commands::stats::run(&ctx).await?,
    }
    Ok(())
}
