//! Integration tests for the staff directory and the caller's own profile.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, delete_auth, get_auth, ministry_token, patch_json_auth,
    post_auth, post_json_auth, worker_token,
};

fn new_worker(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "first_name": "Fatou",
        "last_name": "Ndiaye",
        "phone": "771112233",
        "role": "HEALTH_WORKER",
        "password": "secure_pass_1",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ministry_creates_worker_with_generated_badge(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let response = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("Fatou.Ndiaye@Test.sn"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let badge = json["badge_id"].as_str().unwrap();
    assert!(badge.starts_with("AGENT-"), "unexpected badge {badge}");
    assert_eq!(badge.len(), "AGENT-".len() + 8);
    assert_eq!(json["email"], "fatou.ndiaye@test.sn");
    assert_eq!(json["full_name"], "Fatou Ndiaye");
    assert_eq!(json["is_active"], true);
    assert!(json.get("password_hash").is_none());

    // The new account can log in with its generated badge.
    let login = common::post_json(
        t.app(),
        "/api/v1/auth/login",
        json!({ "badge_id": badge, "password": "secure_pass_1" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_user_rejects_short_password(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let mut body = new_worker("short@test.sn");
    body["password"] = json!("abc");
    let response = post_json_auth(t.app(), "/api/v1/accounts/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_user_rejects_unknown_role(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let mut body = new_worker("role@test.sn");
    body["role"] = json!("SUPERUSER");
    let response = post_json_auth(t.app(), "/api/v1/accounts/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let first = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("dup@test.sn"),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("DUP@test.sn"),
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_badge_must_be_free(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let mut body = new_worker("taken@test.sn");
    body["badge_id"] = json!("MIN-001");
    let response = post_json_auth(t.app(), "/api/v1/accounts/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_worker_cannot_manage_staff(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let list = get_auth(t.app(), "/api/v1/accounts/users", &token).await;
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let create = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("nope@test.sn"),
        &token,
    )
    .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(create).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_users_searches_and_reports_stats(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;
    for email in ["a@test.sn", "b@test.sn"] {
        let response =
            post_json_auth(t.app(), "/api/v1/accounts/users", new_worker(email), &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(t.app(), "/api/v1/accounts/users?search=ndiaye", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["stats"]["total"], 3);
    assert_eq!(json["stats"]["ministry"], 1);
    assert_eq!(json["stats"]["health_workers"], 2);

    let response = get_auth(t.app(), "/api/v1/accounts/users?role=MINISTRY", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["badge_id"], "MIN-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_stays_retrievable(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let created = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("gone@test.sn"),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/accounts/users/{id}");

    let response = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "User deactivated");

    let response = get_auth(t.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_active"], false);

    let response = get_auth(t.app(), "/api/v1/accounts/users?is_active=false", &token).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![id]);
    assert_eq!(json["stats"]["active"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_user_is_not_found(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let response = get_auth(t.app(), "/api/v1/accounts/users/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(t.app(), "/api/v1/accounts/users/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_edit_their_own_profile(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let response = patch_json_auth(
        t.app(),
        "/api/v1/accounts/me",
        json!({ "first_name": "Aminata", "phone": "780000000" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["first_name"], "Aminata");
    assert_eq!(json["phone"], "780000000");
    assert_eq!(json["role"], "HEALTH_WORKER");

    let response = get_auth(t.app(), "/api/v1/accounts/me", &token).await;
    assert_eq!(body_json(response).await["full_name"], "Aminata AGENT-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivating_twice_is_not_an_error(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let created = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("twice@test.sn"),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/accounts/users/{id}");

    let first = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["detail"], "User deactivated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_worker_loses_access_immediately(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let ministry = ministry_token(&pool, t.app()).await;
    let worker = worker_token(&pool, t.app()).await;

    let me = get_auth(t.app(), "/api/v1/accounts/me", &worker).await;
    let id = body_json(me).await["id"].as_i64().unwrap();

    let response = delete_auth(t.app(), &format!("/api/v1/accounts/users/{id}"), &ministry).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(t.app(), "/api/v1/accounts/me", &worker).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_auth(t.app(), "/api/v1/qr-cards", &worker).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_update_keeps_the_old_password(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    post_json_auth(t.app(), "/api/v1/accounts/users", new_worker("taken@test.sn"), &token).await;
    let created = post_json_auth(
        t.app(),
        "/api/v1/accounts/users",
        new_worker("owner@test.sn"),
        &token,
    )
    .await;
    let json = body_json(created).await;
    let id = json["id"].as_i64().unwrap();
    let badge = json["badge_id"].as_str().unwrap().to_string();

    let response = patch_json_auth(
        t.app(),
        &format!("/api/v1/accounts/users/{id}"),
        json!({ "password": "brand-new-password", "email": "taken@test.sn" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let rejected = common::post_json(
        t.app(),
        "/api/v1/auth/login",
        json!({ "badge_id": badge, "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    let accepted = common::post_json(
        t.app(),
        "/api/v1/auth/login",
        json!({ "badge_id": badge, "password": "secure_pass_1" }),
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::OK);
}
