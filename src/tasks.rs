//! Task ownership and authorization.
//!
//! Every operation takes the caller explicitly. Mutations (update, delete) are
//! allowed only when the caller's id equals the task's owner id. Reading a single
//! task by id is deliberately open to anyone holding the id, so task links can be
//! shared. Listing and search are always scoped to the caller's own tasks.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Caller;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use crate::store::TaskStore;

/// A mutation that requires ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Update,
    Delete,
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskAction::Update => f.write_str("update"),
            TaskAction::Delete => f.write_str("delete"),
        }
    }
}

/// Permits `action` on `task` iff `caller` owns it.
pub fn authorize(caller: &Caller, task: &Task, action: TaskAction) -> Result<(), AppError> {
    if task.is_owned_by(caller.user_id) {
        return Ok(());
    }
    log::warn!(
        "user {} attempted to {} task {} owned by user {}",
        caller.user_id,
        action,
        task.id,
        task.user_id
    );
    Err(AppError::Forbidden(format!(
        "You are not authorized to {} this task.",
        action
    )))
}

pub fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Applies task operations against a `TaskStore` on behalf of a caller.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// The caller's tasks ordered by due date, optionally filtered by `query`.
    ///
    /// A blank query is the same as no query.
    pub async fn list_tasks(
        &self,
        caller: &Caller,
        query: Option<&str>,
    ) -> Result<Vec<Task>, AppError> {
        let filter = query.filter(|q| !q.trim().is_empty());
        self.store.find_by_owner(caller.user_id, filter).await
    }

    pub async fn get_task(&self, task_id: Uuid) -> Result<Task, AppError> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or_else(task_not_found)
    }

    pub async fn create_task(&self, caller: &Caller, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let task = self.store.insert(&Task::new(input, caller.user_id)).await?;
        log::info!("user {} created task {}", caller.user_id, task.id);
        Ok(task)
    }

    /// Overwrites the supplied fields. Fails with `NotFound`, then `Forbidden`,
    /// then `ValidationError`, in that order of precedence.
    pub async fn update_task(
        &self,
        caller: &Caller,
        task_id: Uuid,
        changes: TaskUpdate,
    ) -> Result<Task, AppError> {
        let mut task = self.get_task(task_id).await?;
        authorize(caller, &task, TaskAction::Update)?;

        let merged = changes.merge(&task);
        merged.validate()?;
        task.revise(merged);

        let updated = self.store.update(&task).await?.ok_or_else(task_not_found)?;
        log::info!("user {} updated task {}", caller.user_id, task_id);
        Ok(updated)
    }

    pub async fn delete_task(&self, caller: &Caller, task_id: Uuid) -> Result<(), AppError> {
        let task = self.get_task(task_id).await?;
        authorize(caller, &task, TaskAction::Delete)?;

        if !self.store.delete(task.id).await? {
            return Err(task_not_found());
        }
        log::info!("user {} deleted task {}", caller.user_id, task_id);
        Ok(())
    }
}
