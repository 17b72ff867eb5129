use axum::http::StatusCode;

use crate::middleware::ApiResponse;

// Any path with no route
pub async fn not_found() -> ApiResponse<&'static str> {
    ApiResponse::with_status("Not found", StatusCode::NOT_FOUND)
}

// Known path, wrong method. On todo paths this sits behind the key gates.
pub async fn method_not_allowed() -> ApiResponse<&'static str> {
    ApiResponse::with_status("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
}
