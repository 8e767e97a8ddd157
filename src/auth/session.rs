//! Browser sessions: the signed token is carried in an HTTP-only cookie.
//!
//! API clients may instead send the same token as `Authorization: Bearer <token>`.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use super::token::{generate_token, SessionKeys, SessionToken, REMEMBER_TTL_DAYS};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "taskbook_session";

/// Starts a session for `user_id`.
///
/// Without `remember` the cookie lives until the browser closes; with it the cookie
/// persists for as long as the token is valid.
pub fn begin_session(
    keys: &SessionKeys,
    user_id: i32,
    remember: bool,
) -> Result<(SessionToken, Cookie<'static>), AppError> {
    let session = generate_token(keys, user_id, remember)?;

    let mut cookie = Cookie::build(SESSION_COOKIE, session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    if remember {
        cookie.set_max_age(Duration::days(REMEMBER_TTL_DAYS));
    }

    Ok((session, cookie))
}

/// A cookie that instructs the browser to drop the session cookie.
pub fn end_session() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
