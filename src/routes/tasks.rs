use crate::{
    auth::Caller,
    error::AppError,
    models::{TaskInput, TaskQuery, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, route, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Lists the authenticated user's tasks.
///
/// Tasks are ordered by due date ascending; tasks without a due date come last.
///
/// ## Query Parameters:
/// - `q` (optional): case-insensitive text searched for in titles and descriptions.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: no valid session.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    caller: Caller,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = state
        .tasks
        .list_tasks(&caller, query_params.q.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-blank, at most 200 characters.
/// - `description` (optional): at most 1000 characters.
/// - `due_date` (optional): `YYYY-MM-DD`.
/// - `category` (optional): at most 50 characters.
///
/// ## Responses:
/// - `201 Created`: `{"message": "Your task has been created!", "task": {...}}`.
/// - `401 Unauthorized`: no valid session.
/// - `422 Unprocessable Entity`: validation failed, or a field had the wrong type; nothing was stored.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .create_task(&caller, task_data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Your task has been created!",
        "task": task,
    })))
}

/// Retrieves a task by id.
///
/// No session is required and ownership is not checked: a task id works as a shareable link.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: no task has this id, or the id is not a UUID.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.get_task(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates the supplied fields of a task the authenticated user owns.
///
/// Absent fields are left unchanged; `null` clears `description`, `due_date` or `category`.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Your task has been updated!", "task": {...}}`.
/// - `401 Unauthorized`: no valid session.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task has this id.
/// - `422 Unprocessable Entity`: the resulting task would be invalid.
#[route("/{id}", method = "PUT", method = "PATCH")]
pub async fn update_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .update_task(&caller, task_id.into_inner(), task_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Your task has been updated!",
        "task": task,
    })))
}

/// Deletes a task the authenticated user owns.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Your task has been deleted!"}`.
/// - `401 Unauthorized`: no valid session.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task has this id (including one already deleted).
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state
        .tasks
        .delete_task(&caller, task_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Your task has been deleted!" })))
}
