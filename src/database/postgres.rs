use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Todo, User};
use super::store::Store;

const USER_COLUMNS: &str = "id, username, api_key, created_at, updated_at";
const TODO_COLUMNS: &str = "id, content, done, owner_id, created_at, updated_at";

/// `Store` backed by PostgreSQL. Column limits and uniqueness are enforced
/// by the table definitions in `schema`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: Option<&str>) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (username, api_key) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(User::generate_api_key())
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_api_key(&self, api_key: &str) -> Result<Option<User>, DatabaseError> {
        // Anything but the issued spelling cannot match the api_key column
        let Some(api_key) = User::parse_api_key(api_key) else {
            return Ok(None);
        };

        let query = format!("SELECT {} FROM users WHERE api_key = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_todo(&self, owner_id: i32, content: Option<&str>) -> Result<Todo, DatabaseError> {
        let query = format!(
            "INSERT INTO todos (content, owner_id) VALUES ($1, $2) RETURNING {}",
            TODO_COLUMNS
        );
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(content)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn find_todo(&self, id: i32) -> Result<Option<Todo>, DatabaseError> {
        let query = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn delete_todo(&self, id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn set_todo_done(&self, id: i32, done: bool) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE todos SET done = $1, updated_at = now() WHERE id = $2")
            .bind(done)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
