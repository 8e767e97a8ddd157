#![doc = "The `taskbook` library crate."]
#![doc = ""]
#![doc = "A personal task tracker: accounts, sessions, and owner-scoped task management."]
#![doc = "The binary (`main.rs`) wires configuration, the PostgreSQL stores and the routes"]
#![doc = "defined here into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod tasks;

pub use crate::error::AppError;
pub use crate::state::AppState;
pub use crate::tasks::TaskService;
