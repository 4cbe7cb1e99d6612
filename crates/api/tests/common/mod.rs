#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use esante_api::auth::jwt::JwtConfig;
use esante_api::auth::password::hash_password;
use esante_api::config::ServerConfig;
use esante_api::router::build_app_router;
use esante_api::state::AppState;
use esante_core::roles::{ROLE_HEALTH_WORKER, ROLE_MINISTRY};
use esante_db::models::user::{CreateUser, User};
use esante_db::repositories::UserRepo;

/// Password given to every seeded staff account.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults, storing media under
/// `media_root`.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        media_root: media_root.to_path_buf(),
        public_base_url: "http://testserver".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-length".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The application under test plus the temporary media directory it writes
/// card images to. The directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub media: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router, with the production middleware
/// stack, against the given database pool. E-mail delivery is disabled.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let media = tempfile::tempdir().expect("temp media dir");
    let config = test_config(media.path());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        email: None,
    };
    TestApp {
        router: build_app_router(state, &config),
        media,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a staff account with [`TEST_PASSWORD`].
pub async fn create_staff(pool: &PgPool, badge_id: &str, role: &str) -> User {
    let input = CreateUser {
        badge_id: badge_id.to_string(),
        email: format!("{}@test.sn", badge_id.to_lowercase()),
        first_name: "Test".to_string(),
        last_name: badge_id.to_string(),
        phone: String::new(),
        role: role.to_string(),
        health_center_id: None,
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, badge_id: &str) -> String {
    let body = serde_json::json!({ "badge_id": badge_id, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Seed a ministry account and return its access token.
pub async fn ministry_token(pool: &PgPool, app: Router) -> String {
    create_staff(pool, "MIN-001", ROLE_MINISTRY).await;
    login(app, "MIN-001").await
}

/// Seed a health worker account and return its access token.
pub async fn worker_token(pool: &PgPool, app: Router) -> String {
    create_staff(pool, "AGENT-001", ROLE_HEALTH_WORKER).await;
    login(app, "AGENT-001").await
}

/// Print a card and validate it for a new mother. Returns the card code.
pub async fn registered_mother(app: Router, worker_token: &str, full_name: &str) -> String {
    let response = post_auth(app.clone(), "/api/v1/qr-cards", worker_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let code = body_json(response).await["code"]
        .as_str()
        .unwrap()
        .to_string();

    let body = serde_json::json!({
        "code": code,
        "full_name": full_name,
        "address": "Dakar, Medina",
        "phone": "770000000",
        "birth_date": "1995-04-12",
        "profession": "Couturiere",
    });
    let response = post_json_auth(app, "/api/v1/qr-cards/validate", body, worker_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    code
}
