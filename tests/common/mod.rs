#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use uuid::Uuid;

use rolegate::router::init_router;
use rolegate::rolegate_config::{AuthConfig, CorsConfig, JwtConfig};
use rolegate::rolegate_core::{BcryptHasher, PasswordHasher};
use rolegate::rolegate_db::{MemoryUserStore, UserStore};
use rolegate::rolegate_models::{NewUser, Role, User};
use rolegate::state::AppState;

pub const PASSWORD: &str = "Str0ng!pw";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryUserStore,
    pub jwt_config: JwtConfig,
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::default()
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_auth_config())
}

pub fn setup_test_app_with(auth_config: AuthConfig) -> TestApp {
    let store = MemoryUserStore::new();
    let jwt_config = test_jwt_config();
    let state = AppState::new(
        Arc::new(store.clone()),
        auth_config,
        jwt_config.clone(),
        CorsConfig::default(),
    );

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

pub async fn create_test_user(store: &MemoryUserStore, email: &str, role: Role) -> User {
    store
        .insert(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: BcryptHasher::new(4).hash(PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A JSON body from a client that expects a page back.
pub fn browser_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "text/html")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// An HTML form submission: urlencoded body, page expected back.
pub fn form_post(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "text/html")
        .body(Body::from(body))
        .unwrap()
}

fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

pub fn browser_get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::ACCEPT, "text/html");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// `name=value` pairs from every Set-Cookie header, ready for a Cookie header.
pub fn set_cookie_value<B>(response: &Response<B>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
