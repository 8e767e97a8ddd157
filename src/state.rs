use std::sync::Arc;

use crate::auth::SessionKeys;
use crate::store::{TaskStore, UserStore};
use crate::tasks::TaskService;

/// Shared application state, registered once as `web::Data<AppState>`.
pub struct AppState {
    pub tasks: TaskService,
    pub users: Arc<dyn UserStore>,
    pub keys: SessionKeys,
    /// bcrypt work factor for newly registered passwords.
    pub password_cost: u32,
}

impl AppState {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        keys: SessionKeys,
        password_cost: u32,
    ) -> Self {
        Self {
            tasks: TaskService::new(tasks),
            users,
            keys,
            password_cost,
        }
    }
}
