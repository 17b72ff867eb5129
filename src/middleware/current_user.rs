use axum::{extract::Request, middleware::Next, response::Response};

use crate::database::models::CurrentUser;
use crate::error::ApiError;
use super::validate_key::ValidatedKey;

/// Gate 3: expose the validated user to handlers as `CurrentUser`
/// (`id`, `username`, `api_key` only).
pub async fn attach_current_user(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let current_user = request
        .extensions()
        .get::<ValidatedKey>()
        .map(|ValidatedKey(user)| CurrentUser::from(user))
        .ok_or_else(|| {
            tracing::error!("attach_current_user ran without validate_api_key");
            ApiError::internal("api key validity gate did not run")
        })?;

    tracing::debug!("Authenticated user {} ({})", current_user.username, current_user.id);

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
