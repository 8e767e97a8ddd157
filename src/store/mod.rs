//! Persistence ports for tasks and users.
//!
//! Stores are trusted backends: they execute whatever the caller asks and never
//! make access-control decisions. Ownership checks live in [`crate::tasks`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, User};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: &Task) -> Result<Task, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Tasks owned by `owner_id`, optionally narrowed to those whose title or
    /// description contains `text_filter` (case-insensitive), in listing order:
    /// due date ascending, undated tasks last.
    async fn find_by_owner(
        &self,
        owner_id: i32,
        text_filter: Option<&str>,
    ) -> Result<Vec<Task>, AppError>;

    /// Persists the editable fields of `task`. Returns `None` if the task no longer exists.
    async fn update(&self, task: &Task) -> Result<Option<Task>, AppError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
