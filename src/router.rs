//! Axum router construction.

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::{AllowOrigin, CorsLayer}, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::{attach_current_user, require_api_key, validate_api_key};
use crate::state::AppState;

/// Build the application [`Router`] with all routes and layers attached.
pub fn build(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root).fallback(handlers::method_not_allowed))
        .route("/health", get(handlers::health).fallback(handlers::method_not_allowed))
        .route("/register", post(handlers::register).fallback(handlers::method_not_allowed))
        .merge(protected_routes(state.clone()))
        .fallback(handlers::not_found)
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app = app.layer(cors_layer(config));
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

/// Todo routes. The gates run outermost-first in the order listed and also
/// wrap each path's wrong-method fallback, so an unkeyed `POST /done/1` is
/// rejected for its key before its method.
fn protected_routes(state: AppState) -> Router<AppState> {
    let gates = ServiceBuilder::new()
        .layer(from_fn(require_api_key))
        .layer(from_fn_with_state(state, validate_api_key))
        .layer(from_fn(attach_current_user));

    let gated = |route: MethodRouter<AppState>| -> MethodRouter<AppState> {
        route
            .fallback(handlers::method_not_allowed)
            .layer(gates.clone())
    };

    Router::new()
        .route("/create", gated(post(handlers::create_todo)))
        .route("/delete", gated(post(handlers::delete_todo)))
        .route("/done/:id", gated(get(handlers::mark_done)))
        .route("/undone/:id", gated(get(handlers::mark_undone)))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build(AppState::default(), &AppConfig::from_env())
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn register_is_public() {
        let req = Request::builder()
            .method("POST")
            .uri("/register")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"ada"}"#))
            .unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "ada");
    }

    #[tokio::test]
    async fn every_todo_route_is_gated() {
        let routes = [
            ("POST", "/create"),
            ("POST", "/delete"),
            ("GET", "/done/1"),
            ("GET", "/undone/1"),
        ];
        for (method, uri) in routes {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let (status, body) = send(app(), req).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
            assert_eq!(body["data"], "No api token", "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn health_reports_store_state() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_returns_404_envelope() {
        let req = Request::builder().uri("/unknown").body(Body::empty()).unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"code": 404, "data": "Not found"}));
    }

    #[tokio::test]
    async fn wrong_method_on_public_route_is_405_envelope() {
        let req = Request::builder().uri("/register").body(Body::empty()).unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, serde_json::json!({"code": 405, "data": "Method not allowed"}));
    }

    #[tokio::test]
    async fn wrong_method_on_todo_route_still_needs_a_key() {
        for (method, uri) in [("POST", "/done/1"), ("GET", "/create")] {
            let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let (status, body) = send(app(), req).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
            assert_eq!(body, serde_json::json!({"code": 403, "data": "No api token"}));
        }
    }
}
