use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use super::token::Claims;
use crate::error::AppError;

/// The authenticated user on whose behalf a task operation runs.
///
/// Authorization compares `user_id` by value against a task's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
}

impl Caller {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }
}

/// Who is making the request: an authenticated caller or nobody in particular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Authenticated(Caller),
    Anonymous,
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn caller(&self) -> Option<Caller> {
        match self {
            Identity::Authenticated(caller) => Some(*caller),
            Identity::Anonymous => None,
        }
    }
}

/// Reads the identity `AuthMiddleware` established for this request.
pub fn current_identity(req: &HttpRequest) -> Identity {
    match req.extensions().get::<Claims>() {
        Some(claims) => Identity::Authenticated(Caller::new(claims.sub)),
        None => Identity::Anonymous,
    }
}

/// Never fails; anonymous requests yield `Identity::Anonymous`.
impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(current_identity(req)))
    }
}

/// Rejects anonymous requests with `401 Unauthorized`.
impl FromRequest for Caller {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match current_identity(req).caller() {
            Some(caller) => ready(Ok(caller)),
            None => {
                let err = AppError::Unauthorized("Please log in to access this page.".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
