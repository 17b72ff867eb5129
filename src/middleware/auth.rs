use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Raw `Authorization` header value, left in request extensions by the
/// presence gate for the validity gate to check.
#[derive(Clone, Debug)]
pub struct ApiKeyHeader(pub HeaderValue);

/// Gate 1: the `Authorization` header must be present and non-empty.
/// Nothing else about the request is inspected.
pub async fn require_api_key(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let value = extract_api_key(&headers).ok_or_else(|| {
        tracing::debug!("Rejected request to {}: no api token", request.uri().path());
        ApiError::MissingApiKey
    })?;

    request.extensions_mut().insert(ApiKeyHeader(value));

    Ok(next.run(request).await)
}

/// The whole header value is the key; no `Bearer ` prefix is stripped.
fn extract_api_key(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .cloned()
}
