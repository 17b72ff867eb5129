use axum::extract::{Extension, Path, State};

use crate::database::models::CurrentUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /done/:id
pub async fn mark_done(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    set_done(&state, &user, &id, true).await?;
    Ok(ApiResponse::success(format!("Task {} is done.", id)))
}

/// GET /undone/:id
pub async fn mark_undone(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    set_done(&state, &user, &id, false).await?;
    Ok(ApiResponse::success(format!("Task {} is undone.", id)))
}

// Zero matched rows is not an error: the confirmation is unconditional.
async fn set_done(state: &AppState, user: &CurrentUser, raw_id: &str, done: bool) -> Result<(), ApiError> {
    let id: i32 = raw_id
        .parse()
        .map_err(|_| ApiError::internal(format!("invalid todo id: {}", raw_id)))?;

    let updated = state.store.set_todo_done(id, done).await?;

    tracing::debug!("User {} set todo {} done={} ({} rows)", user.id, id, done, updated);
    Ok(())
}
