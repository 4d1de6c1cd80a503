//! Presensi client
//!
//! Headless front end for the PKL attendance backend: session storage, API
//! access, record filtering, document export and per-screen controllers.

mod api;
mod cli;
mod config;
mod db;
mod errors;
mod export;
mod filter;
mod models;
mod platform;
mod screens;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::ApiClient;
use cli::Cli;
use config::Config;
use db::SessionStore;
use platform::{Capabilities, ConsoleAlerts};

/// Everything a screen controller needs.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub session: SessionStore,
    pub config: Arc<Config>,
    pub caps: Capabilities,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();

    // Initialize logging; stdout is reserved for the user
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Backend: {}", config.api_base_url);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Document directory: {:?}", config.document_dir);

    // Initialize session storage
    let pool = db::init_database(&config.db_path).await?;
    let session = SessionStore::new(pool);

    let alerts = Arc::new(ConsoleAlerts::new(cli.export_action()));
    let caps = Capabilities::for_platform(&config, alerts);

    let state = AppState {
        api: Arc::new(ApiClient::new(&config.api_base_url)),
        session,
        config: Arc::new(config),
        caps,
    };

    let policy = cli.stale_policy();
    if !cli::run(state, cli.command, policy).await {
        std::process::exit(1);
    }

    Ok(())
}
