use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

// GET /
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "todo-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "register": "POST /register (public)",
            "create": "POST /create (api key)",
            "delete": "POST /delete (api key)",
            "done": "GET /done/:id (api key)",
            "undone": "GET /undone/:id (api key)",
            "health": "GET /health (public)",
        }
    }))
}

// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
