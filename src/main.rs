#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use ownincome::errors::Result;
use ownincome::{config, db, demo};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Resolve the application configuration
    let app_config = config::load_app_configuration()?;
    info!(
        "Using database path: {}",
        app_config.database_path
    );

    // 4. Initialize the database
    let db_pool = db::init_db(&app_config.database_path)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Run the seed-and-report sequence and print its output
    let output = demo::run_demo(&db_pool)
        .await
        .inspect_err(|e| error!("Seed-and-report run failed: {}", e))?;
    for line in &output {
        println!("{}", line);
    }

    // 6. Close the session
    db::close_db(db_pool)?;

    Ok(())
}
