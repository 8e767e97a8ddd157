use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, Task, User};

/// In-process `TaskStore`, used by the test suites and for running without a database.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(AppError::BadRequest("Record already exists".into()));
        }
        tasks.insert(task.id, task.clone());
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: i32,
        text_filter: Option<&str>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.is_owned_by(owner_id))
            .filter(|task| text_filter.map_or(true, |text| task.matches(text)))
            .cloned()
            .collect();
        owned.sort_by(Task::listing_order);
        Ok(owned)
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(stored) => {
                stored.title = task.title.clone();
                stored.description = task.description.clone();
                stored.due_date = task.due_date;
                stored.category = task.category.clone();
                stored.updated_at = task.updated_at;
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}

#[derive(Default)]
struct UserTable {
    rows: Vec<User>,
    next_id: i32,
}

/// In-process `UserStore`. Enforces the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User, AppError> {
        let mut table = self.table.write().await;
        if table
            .rows
            .iter()
            .any(|row| row.email == user.email || row.username == user.username)
        {
            return Err(AppError::BadRequest("Record already exists".into()));
        }

        table.next_id += 1;
        let created = User {
            id: table.next_id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.username == username).cloned())
    }
}
