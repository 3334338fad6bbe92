use spamcheck_rs::analysis::AnalysisEngine;
use spamcheck_rs::api::{ApiServer, AppState};
use spamcheck_rs::config::Config;
use spamcheck_rs::history::ScanStore;
use spamcheck_rs::model::ModelRegistry;
use sqlx::sqlite::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration before logging so the subscriber can honor [logging]
    let config_path = "spamcheck.toml";
    let from_file = Path::new(config_path).exists();
    let config = if from_file {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    // Initialize logging
    let level = match config.logging.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    if config.logging.format == "json" {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }

    info!("Starting spamcheck-rs server");

    if from_file {
        info!("Configuration loaded from {}", config_path);
    } else {
        info!("No config file found, using defaults");
    }
    info!("  API listening on: {}", config.server.listen_addr);
    info!("  Model directory: {}", config.models.dir);
    info!("  Primary model: {}", config.models.primary);
    info!("  Database: {}", config.storage.database_url);

    // Load model artifacts; a missing model directory is not fatal
    let engine = match ModelRegistry::load(Path::new(&config.models.dir), &config.models.primary) {
        Ok(registry) => {
            info!("Loaded {} model(s) from {}", registry.len(), config.models.dir);
            Some(Arc::new(AnalysisEngine::new(
                Arc::new(registry),
                (&config.analysis).into(),
            )?))
        }
        Err(e) => {
            warn!("Failed to load model artifacts: {}", e);
            warn!("Running degraded: prediction routes will answer 503");
            None
        }
    };

    // Initialize scan history storage
    let pool = SqlitePool::connect(&config.storage.database_url).await?;
    let store = ScanStore::new(pool);
    store.init_db().await?;

    let state = Arc::new(AppState {
        engine,
        store,
        batch_limit: config.server.batch_limit,
    });

    let server = ApiServer::new(state, config.server.listen_addr.clone());
    server.run().await?;

    Ok(())
}
