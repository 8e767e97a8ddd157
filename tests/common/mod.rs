#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    test, web, App,
};
use serde_json::json;
use std::sync::Arc;
use taskbook::{
    auth::{AuthResponse, SessionKeys},
    store::{MemoryTaskStore, MemoryUserStore},
    AppState,
};

pub const PASSWORD: &str = "Password123!";
// bcrypt's minimum work factor keeps the suites fast.
const TEST_PASSWORD_COST: u32 = 4;

pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryTaskStore::new()),
        Arc::new(MemoryUserStore::new()),
        SessionKeys::new(b"integration-test-secret"),
        TEST_PASSWORD_COST,
    ))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(App::new().configure(taskbook::routes::mount(state))).await
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    email: &str,
    password: &str,
) -> ServiceResponse<impl MessageBody> {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    test::call_service(app, req).await
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
    remember: bool,
) -> ServiceResponse<impl MessageBody> {
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": email,
            "password": password,
            "remember": remember
        }))
        .to_request();
    test::call_service(app, req).await
}

/// Registers `username` (with `<username>@example.com`) and logs in.
pub async fn sign_up(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
) -> TestUser {
    let email = format!("{}@example.com", username);

    let resp = register(app, username, &email, PASSWORD).await;
    assert!(
        resp.status().is_success(),
        "registration of {} failed: {}",
        username,
        resp.status()
    );

    let resp = login(app, &email, PASSWORD, false).await;
    assert!(resp.status().is_success(), "login of {} failed", username);
    let auth: AuthResponse = test::read_body_json(resp).await;

    TestUser {
        id: auth.user_id,
        email,
        token: auth.token,
    }
}
