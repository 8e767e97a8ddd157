use crate::{
    auth::{
        begin_session, check_credentials, end_session, hash_password, AuthResponse, Identity,
        LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::NewUser,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// Creates the account only; the client logs in afterwards.
///
/// ## Responses:
/// - `201 Created`: `{"message": ..., "user": {...}}`.
/// - `400 Bad Request`: the email or username is already taken.
/// - `422 Unprocessable Entity`: the payload failed validation.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    if state.users.find_by_email(&register_data.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }
    if state
        .users
        .find_by_username(&register_data.username)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Username already taken".into()));
    }

    let RegisterRequest {
        username,
        email,
        password,
    } = register_data.into_inner();
    let password_hash = hash_password(&password, state.password_cost)?;

    let user = state
        .users
        .insert(&NewUser {
            username,
            email,
            password_hash,
        })
        .await?;
    log::info!("registered user {} ({})", user.id, user.username);

    Ok(HttpResponse::Created().json(json!({
        "message": "Your account has been created!",
        "user": user,
    })))
}

/// Login user
///
/// Verifies the credentials and starts a session. The token is returned in the body
/// and set as the session cookie; `remember` makes the cookie persistent.
///
/// ## Responses:
/// - `200 OK`: `AuthResponse`.
/// - `401 Unauthorized`: unknown email or wrong password.
/// - `422 Unprocessable Entity`: the payload failed validation.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = state.users.find_by_email(&login_data.email).await?;
    let verified = check_credentials(
        &login_data.password,
        user.as_ref().map(|user| user.password_hash.as_str()),
        state.password_cost,
    )?;
    let user = match user {
        Some(user) if verified => user,
        // Unknown email and wrong password answer identically, after the same bcrypt work.
        _ => {
            log::info!("failed login for {}", login_data.email);
            return Err(AppError::Unauthorized(
                "Login Unsuccessful. Please check email and password".into(),
            ));
        }
    };

    let (session, cookie) = begin_session(&state.keys, user.id, login_data.remember)?;

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        token: session.token,
        user_id: user.id,
        expires_at: session.expires_at,
    }))
}

/// Logout user
///
/// Clears the session cookie. Bearer-token clients simply discard their token.
#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    if let Some(caller) = identity.caller() {
        log::info!("user {} logged out", caller.user_id);
    }

    HttpResponse::Ok()
        .cookie(end_session())
        .json(json!({ "message": "You have been logged out." }))
}
