//! medlookup: symptom to disease lookup service.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, reads the CSV reference tables, builds the
//! selector, sets up the Axum router and starts the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use medlookup::config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use medlookup::data::DataStore;
use medlookup::http::start_server;
use medlookup::selector::{RandomSelector, Selector};
use medlookup::{create_router, AppState};

/// medlookup: symptom to disease lookup service
#[derive(Parser, Debug)]
#[command(name = "medlookup", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "medlookup=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Directory containing the CSV sources (overrides data.dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Configuration comes first since it selects the log format
    let mut config = AppConfig::load(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let fmt_layer = match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .init();

    tracing::info!(path = %args.config, "Loaded configuration");

    // Load reference tables; missing sources are logged and skipped
    tracing::info!(dir = %config.data.dir.display(), "Loading data tables");
    let store = DataStore::load(&config.data.dir);
    tracing::info!(
        tables = ?store.table_names().collect::<Vec<_>>(),
        diseases = store.descriptions().labels().len(),
        symptoms = store.vocabulary().len(),
        "Setup complete"
    );

    let selector: Arc<dyn Selector> = Arc::new(RandomSelector::from_store(&store));
    tracing::info!(selector = selector.name(), "Initialized disease selector");

    // Create application state
    let state = AppState::new(config.clone(), store, selector);

    // Create router
    let app = create_router(state);

    // Start server
    start_server(app, &config).await?;

    Ok(())
}
