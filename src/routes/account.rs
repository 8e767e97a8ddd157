use actix_web::{get, web, HttpResponse, Responder};

use crate::{auth::Caller, error::AppError, state::AppState};

/// Returns the profile of the logged-in user.
#[get("/account")]
pub async fn account(
    state: web::Data<AppState>,
    caller: Caller,
) -> Result<impl Responder, AppError> {
    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".into()))?;

    Ok(HttpResponse::Ok().json(user))
}
