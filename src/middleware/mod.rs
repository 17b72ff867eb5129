//! API key gates, applied in order to every protected route:
//! `require_api_key` → `validate_api_key` → `attach_current_user`.

pub mod auth;
pub mod current_user;
pub mod response;
pub mod validate_key;

pub use auth::{require_api_key, ApiKeyHeader};
pub use current_user::attach_current_user;
pub use response::{ApiResponse, ApiResult};
pub use validate_key::{validate_api_key, ValidatedKey};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::Extension,
        http::{header::AUTHORIZATION, Request, StatusCode},
        middleware::{from_fn, from_fn_with_state},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tower::{ServiceBuilder, ServiceExt};

    use super::*;
    use crate::database::{models::CurrentUser, MemoryStore, Store};
    use crate::state::AppState;

    async fn whoami(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
        Json(user)
    }

    fn gated_router(store: MemoryStore) -> Router {
        let state = AppState::new(Arc::new(store));
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(
                ServiceBuilder::new()
                    .layer(from_fn(require_api_key))
                    .layer(from_fn_with_state(state.clone(), validate_api_key))
                    .layer(from_fn(attach_current_user)),
            )
            .with_state(state)
    }

    async fn call(app: Router, key: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(key) = key {
            builder = builder.header(AUTHORIZATION, key);
        }
        let resp = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_lookup() {
        let store = MemoryStore::new();
        // An offline store proves the presence gate never reaches it
        store.set_unavailable(true);

        let (status, body) = call(gated_router(store), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"code": 403, "data": "No api token"}));
    }

    #[tokio::test]
    async fn empty_header_counts_as_missing() {
        let (status, body) = call(gated_router(MemoryStore::new()), Some("")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"], "No api token");
    }

    #[tokio::test]
    async fn unknown_key_is_invalid() {
        let unknown = uuid::Uuid::now_v7().to_string();
        let (status, body) = call(gated_router(MemoryStore::new()), Some(&unknown)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"code": 403, "data": "Invalid api token"}));

        let (status, body) = call(gated_router(MemoryStore::new()), Some("garbage")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"], "Invalid api token");
    }

    #[tokio::test]
    async fn bearer_prefix_is_not_stripped() {
        let store = MemoryStore::new();
        let user = store.create_user(Some("ada")).await.unwrap();
        let key = format!("Bearer {}", user.api_key);

        let (status, body) = call(gated_router(store), Some(&key)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"], "Invalid api token");
    }

    #[tokio::test]
    async fn lookup_failure_is_internal_error() {
        let store = MemoryStore::new();
        let user = store.create_user(Some("ada")).await.unwrap();
        store.set_unavailable(true);

        let (status, body) = call(gated_router(store), Some(&user.api_key.to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"code": 500, "data": "Internal server error"}));
    }

    #[tokio::test]
    async fn valid_key_attaches_matching_identity() {
        let store = MemoryStore::new();
        store.create_user(Some("someone")).await.unwrap();
        let user = store.create_user(Some("grace")).await.unwrap();

        let (status, body) = call(gated_router(store), Some(&user.api_key.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": user.id,
                "username": "grace",
                "api_key": user.api_key.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn identity_gate_requires_validity_gate() {
        let store = MemoryStore::new();
        let user = store.create_user(Some("ada")).await.unwrap();
        let app = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn(attach_current_user));

        let (status, body) = call(app, Some(&user.api_key.to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 500);
    }
}
