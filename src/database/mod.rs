use anyhow::Result;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

pub mod models;
pub mod repositories;

pub async fn init_database(database_url: &str) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}
