use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const USERNAME_MAX_LEN: usize = 20;

/// A registered API client. `api_key` is issued by the store at creation time
/// and returned only in the registration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub api_key: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Time-ordered key, unique per user
    pub fn generate_api_key() -> Uuid {
        Uuid::now_v7()
    }

    /// Parse a presented key. Only the lowercase hyphenated form that
    /// registration hands out is accepted; other spellings of the same
    /// UUID are not the issued key.
    pub fn parse_api_key(presented: &str) -> Option<Uuid> {
        let key = Uuid::try_parse(presented).ok()?;
        (key.hyphenated().to_string() == presented).then_some(key)
    }
}

/// Identity attached to a request once its API key has been validated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub api_key: Uuid,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            api_key: user.api_key,
        }
    }
}
