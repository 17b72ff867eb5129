//! Request body extraction shared by the POST handlers.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::error::ApiError;

/// JSON or URL-encoded form body. A body that cannot be read as `T` is an
/// internal error; the API has no 400 category.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::warn!("Rejected form body: {}", e);
                ApiError::internal(e.body_text())
            })?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
                tracing::warn!("Rejected JSON body: {}", e);
                ApiError::internal(e.body_text())
            })?;
            Ok(Payload(value))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Accepts `5` or `"5"`; form bodies only carry strings. An explicit `null`
/// is `Some(None)`, a target that no row can have. Use with
/// `#[serde(default)]` so an absent field stays `None`. Anything else,
/// including values outside the integer column range, is an error.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Option::<RawId>::deserialize(deserializer)?;
    let wide = match raw {
        None => return Ok(Some(None)),
        Some(RawId::Number(n)) => n,
        Some(RawId::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid id: {}", s)))?,
    };
    i32::try_from(wide)
        .map(|id| Some(Some(id)))
        .map_err(|_| D::Error::custom(format!("id out of range: {}", wide)))
}
