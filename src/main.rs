//! Schema bootstrap for `FoodBox`.
//!
//! Connects to the configured database and creates the reservation tables
//! from the entity definitions. Run once before starting the services that
//! embed the reservation core.

use dotenvy::dotenv;
use foodbox::config;
use foodbox::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Env vars can also be set externally, so a missing .env is fine
    dotenv().ok();

    let db = config::database::create_connection().await?;
    info!("connected to {}", config::database::get_database_url());

    config::database::create_tables(&db).await?;
    info!("database schema ready");

    Ok(())
}
