use axum::extract::{Extension, State};
use serde::Deserialize;

use crate::database::models::{CurrentUser, Todo};
use crate::error::ApiError;
use crate::extract::{flexible_id, Payload};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTodoRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<Option<i32>>,
}

/// POST /create - insert a todo owned by the caller, `done = false`
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Payload(body): Payload<CreateTodoRequest>,
) -> ApiResult<Todo> {
    let todo = state
        .store
        .create_todo(user.id, body.content.as_deref())
        .await?;

    tracing::debug!("User {} created todo {}", user.id, todo.id);
    Ok(ApiResponse::success(todo))
}

/// POST /delete - remove a todo by id, whoever owns it.
///
/// Responds with the number of rows deleted; 0 is still a success. A null
/// id names no row, so nothing is deleted.
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Payload(body): Payload<DeleteTodoRequest>,
) -> ApiResult<u64> {
    let id = body
        .id
        .ok_or_else(|| ApiError::internal("delete request without id"))?;

    let Some(id) = id else {
        tracing::debug!("User {} deleted todo null (0 rows)", user.id);
        return Ok(ApiResponse::success(0));
    };

    let deleted = state.store.delete_todo(id).await?;

    tracing::debug!("User {} deleted todo {} ({} rows)", user.id, id, deleted);
    Ok(ApiResponse::success(deleted))
}
