use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use super::session::SESSION_COOKIE;
use super::token::{verify_token, SessionKeys};

/// Establishes the request identity from a bearer token or the session cookie.
///
/// Requests without credentials pass through anonymously; handlers that need a
/// logged-in user ask for the `Caller` extractor. A bearer token that fails
/// verification is rejected outright, whereas a stale session cookie is ignored.
pub struct AuthMiddleware {
    keys: SessionKeys,
}

impl AuthMiddleware {
    pub fn new(keys: SessionKeys) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            keys: self.keys.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    keys: SessionKeys,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        if let Some(token) = bearer {
            match verify_token(&self.keys, &token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                }
                Err(app_err) => {
                    log::debug!("rejecting bearer token on {}: {}", req.path(), app_err);
                    let err: Error = app_err.into();
                    return Box::pin(async move { Err(err) });
                }
            }
        } else if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            match verify_token(&self.keys, cookie.value()) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                }
                Err(app_err) => log::debug!("ignoring stale session cookie: {}", app_err),
            }
        }

        Box::pin(self.service.call(req))
    }
}
