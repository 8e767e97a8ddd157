pub mod account;
pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, web};

use crate::{auth::AuthMiddleware, error::AppError, state::AppState, tasks::task_not_found};

/// Routes under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::logout),
    )
    .service(account::account)
    .service(
        web::scope("/tasks")
            // An id that is not a UUID cannot name a task.
            .app_data(web::PathConfig::default().error_handler(|_err, _req| task_not_found().into()))
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// Mounts the whole application: shared state, JSON error handling, the health
/// check, and every identity-aware route behind `AuthMiddleware`.
pub fn mount(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let keys = state.keys.clone();
        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| json_error(err).into()))
            .service(health::health)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::new(keys))
                    .service(health::entrance)
                    .service(web::scope("/api").configure(config)),
            );
    }
}

/// Well-formed JSON whose fields have the wrong type or value (`"due_date": "2024-13-45"`)
/// is invalid input. Broken syntax, a wrong content type and oversized bodies stay 400.
fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::Deserialize(ref inner) if inner.is_data() => {
            AppError::ValidationError(err.to_string())
        }
        _ => AppError::BadRequest(err.to_string()),
    }
}
