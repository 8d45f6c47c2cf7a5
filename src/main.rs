mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use stockpile::config::{Config, DatabaseConfig, ServerConfig};
use stockpile::server;
use stockpile_db::pool::init_pool;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "stockpile=trace,stockpile_db=debug,tower_http=debug".to_string()
        } else {
            "stockpile=debug,stockpile_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let config = Config {
        server: ServerConfig {
            host: cli.host,
            port: cli.port,
            cache_dir: cli.cache,
        },
        database: DatabaseConfig::from_env(),
    };
    config.validate()?;

    tracing::info!(
        "Initializing database at {}",
        config.database.path.display()
    );
    let db_pool = init_pool(&config.database.path.to_string_lossy())?;

    // Create tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::start_server(config, db_pool))
}
