use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;
use super::auth::ApiKeyHeader;

/// User whose `api_key` matched the request header. Inserted by the
/// validity gate so the identity gate does not query the store again.
#[derive(Clone, Debug)]
pub struct ValidatedKey(pub User);

/// Gate 2: the header value must equal some user's `api_key`.
/// This is the only store lookup in the chain.
pub async fn validate_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ApiKeyHeader(header) = request
        .extensions()
        .get::<ApiKeyHeader>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("validate_api_key ran without require_api_key");
            ApiError::internal("api key presence gate did not run")
        })?;

    // A non UTF-8 header cannot equal any issued key
    let key = header.to_str().map_err(|_| {
        tracing::warn!("Rejected api token: header is not valid UTF-8");
        ApiError::InvalidApiKey
    })?;

    let user = state
        .store
        .find_user_by_api_key(key)
        .await
        .map_err(|e| {
            tracing::error!("Database error validating api token: {}", e);
            ApiError::internal(e.to_string())
        })?
        .ok_or_else(|| {
            tracing::warn!("Rejected request to {}: invalid api token", request.uri().path());
            ApiError::InvalidApiKey
        })?;

    request.extensions_mut().insert(ValidatedKey(user));

    Ok(next.run(request).await)
}
