// POST /register

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::User;
use crate::extract::Payload;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Not checked here; a missing username is rejected by the store
    pub username: Option<String>,
}

/// Create a user and return it, including the newly issued `api_key`.
/// This response is the only place the key is ever revealed.
///
/// Every failure (duplicate or over-long username, missing field, storage
/// error) is reported as a 500 envelope.
pub async fn register(
    State(state): State<AppState>,
    Payload(body): Payload<RegisterRequest>,
) -> ApiResult<User> {
    let user = state.store.create_user(body.username.as_deref()).await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);
    Ok(ApiResponse::success(user))
}
