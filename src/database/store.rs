use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Todo, User};

/// Persistence operations the API needs. Each call is a single atomic
/// operation; nothing here spans more than one statement.
///
/// Inputs that the HTTP layer does not validate (a missing username or
/// content) are passed through as `None` and rejected by the store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user and issue its API key
    async fn create_user(&self, username: Option<&str>) -> Result<User, DatabaseError>;

    async fn find_user_by_api_key(&self, api_key: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a todo with `done = false`
    async fn create_todo(&self, owner_id: i32, content: Option<&str>) -> Result<Todo, DatabaseError>;

    async fn find_todo(&self, id: i32) -> Result<Option<Todo>, DatabaseError>;

    /// Returns the number of rows removed (0 or 1)
    async fn delete_todo(&self, id: i32) -> Result<u64, DatabaseError>;

    /// Returns the number of rows updated, which may be 0
    async fn set_todo_done(&self, id: i32, done: bool) -> Result<u64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
