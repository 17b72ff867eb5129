use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{Todo, User, CONTENT_MAX_LEN, USERNAME_MAX_LEN};
use super::store::Store;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    todos: BTreeMap<i32, Todo>,
    next_user_id: i32,
    next_todo_id: i32,
}

/// In-process `Store` with the same constraints as the PostgreSQL tables.
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable database: every operation fails until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

fn required<'a>(value: Option<&'a str>, column: &str, max_len: usize) -> Result<&'a str, DatabaseError> {
    let value = value.ok_or_else(|| DatabaseError::Constraint(format!("{} cannot be null", column)))?;
    if value.chars().count() > max_len {
        return Err(DatabaseError::Constraint(format!(
            "{} exceeds {} characters",
            column, max_len
        )));
    }
    Ok(value)
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: Option<&str>) -> Result<User, DatabaseError> {
        self.check_available()?;
        let username = required(username, "username", USERNAME_MAX_LEN)?;

        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(DatabaseError::Constraint(format!(
                "username '{}' already exists",
                username
            )));
        }

        let mut api_key = User::generate_api_key();
        while tables.users.values().any(|u| u.api_key == api_key) {
            api_key = User::generate_api_key();
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            api_key,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_api_key(&self, api_key: &str) -> Result<Option<User>, DatabaseError> {
        self.check_available()?;
        let Some(api_key) = User::parse_api_key(api_key) else {
            return Ok(None);
        };

        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.api_key == api_key).cloned())
    }

    async fn create_todo(&self, owner_id: i32, content: Option<&str>) -> Result<Todo, DatabaseError> {
        self.check_available()?;
        let content = required(content, "content", CONTENT_MAX_LEN)?;

        let mut tables = self.tables.write().await;
        tables.next_todo_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: tables.next_todo_id,
            content: content.to_string(),
            done: false,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_todo(&self, id: i32) -> Result<Option<Todo>, DatabaseError> {
        self.check_available()?;
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn delete_todo(&self, id: i32) -> Result<u64, DatabaseError> {
        self.check_available()?;
        let removed = self.tables.write().await.todos.remove(&id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn set_todo_done(&self, id: i32, done: bool) -> Result<u64, DatabaseError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.todos.get_mut(&id) {
            Some(todo) => {
                todo.done = done;
                todo.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}
