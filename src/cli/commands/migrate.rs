use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager};

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("unable to connect to the database")?;

    schema::sync(&pool).await.context("schema sync failed")?;
    info!("Database schema is up to date");

    DatabaseManager::close(&pool).await;
    Ok(())
}
