use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager, PgStore};
use crate::router;
use crate::state::AppState;

/// Connect, sync the schema, then serve. Any failure before the listener is
/// bound aborts startup.
pub async fn handle(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("unable to connect to the database")?;
    info!("Connection has been established successfully");

    if config.database.sync_schema {
        schema::sync(&pool).await.context("schema sync failed")?;
    }

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let app = router::build(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
