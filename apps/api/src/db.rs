use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}...",
        config.db_host, config.db_port, config.db_name
    );

    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
