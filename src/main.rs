use tracing::{error, info};

use filecat::db::seed::seed;
use filecat::{CatalogService, Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = filecat::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filecat::logging::init_console_only(&config.logging.level);
    }

    info!("filecat - virtual file catalog");

    if let Err(e) = run(config).await {
        error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> filecat::Result<()> {
    let db = Database::open(&config.database.path).await?;

    if std::env::args().skip(1).any(|arg| arg == "--seed") {
        let inserted = seed(&db).await?;
        info!(inserted, "Seeded sample catalog");
    }

    let catalog = CatalogService::from_database(&db).with_policy(config.catalog.policy());
    info!(
        "Server configured on {}:{}",
        config.web.host, config.web.port
    );

    WebServer::new(&config.web, catalog)?.run().await
}
