//! Integration tests for the mothers' mobile gateway under `/mobile`.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get, get_auth, ministry_token, patch_json_auth, post_auth,
    post_json, post_json_auth, registered_mother, worker_token,
};

/// Log a mother in with her card and return `(access, refresh)`.
async fn mother_login(app: axum::Router, code: &str) -> (String, String) {
    let response = post_json(app, "/api/v1/mobile/auth/qr-login", json!({ "qr_code": code })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_qr_reports_card_state(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let active = registered_mother(t.app(), &token, "Awa Diop").await;
    let created = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    let pending = body_json(created).await["code"].as_str().unwrap().to_string();

    let response = get(t.app(), &format!("/api/v1/mobile/verify-qr?qr_code={active}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["status"], "active");
    assert_eq!(json["mother_name"], "Awa Diop");

    let response = get(t.app(), &format!("/api/v1/mobile/verify-qr?qr_code={pending}")).await;
    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
    assert_eq!(json["status"], "pending");
    assert!(json.get("mother_name").is_none());

    let response = get(t.app(), "/api/v1/mobile/verify-qr?qr_code=QR-NOPE0000").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "unknown");
    assert_eq!(json["message"], "Unknown QR code");

    let response = get(t.app(), "/api/v1/mobile/verify-qr").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn qr_login_issues_mother_tokens(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;

    let response = post_json(
        t.app(),
        "/api/v1/mobile/auth/qr-login",
        json!({ "qr_code": format!(" {code} ") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Bienvenue Awa Diop !");
    assert_eq!(json["mother"]["qr_code"], code);
    assert!(json["access_token"].as_str().is_some());
    assert!(json["refresh_token"].as_str().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn qr_login_rejects_unusable_cards(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let created = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    let pending = body_json(created).await["code"].as_str().unwrap().to_string();

    let response =
        post_json(t.app(), "/api/v1/mobile/auth/qr-login", json!({ "qr_code": pending })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        post_json(t.app(), "/api/v1/mobile/auth/qr-login", json!({ "qr_code": "QR-NOPE0000" }))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(t.app(), "/api/v1/mobile/auth/qr-login", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_by_token_or_by_code(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let (access, _) = mother_login(t.app(), &code).await;

    let response = get_auth(t.app(), "/api/v1/mobile/profile", &access).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["full_name"], "Awa Diop");

    let response = get(t.app(), &format!("/api/v1/mobile/profile?qr_code={code}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["qr_status"], "validated");

    let response = get(t.app(), "/api/v1/mobile/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A staff token is not a mother identity.
    let response = get_auth(t.app(), "/api/v1/mobile/profile", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mother_token_is_refused_on_staff_routes(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let (access, _) = mother_login(t.app(), &code).await;

    let response = get_auth(t.app(), "/api/v1/mothers", &access).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_needs_a_mother_token(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let (access, _) = mother_login(t.app(), &code).await;

    let response = patch_json_auth(
        t.app(),
        "/api/v1/mobile/profile",
        json!({ "phone": "781234567" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response =
        patch_json_auth(t.app(), "/api/v1/mobile/profile", json!({ "phone": " " }), &access).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        t.app(),
        "/api/v1/mobile/profile",
        json!({ "phone": "781234567", "full_name": "Someone Else" }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["phone"], "781234567");
    assert_eq!(json["full_name"], "Awa Diop");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn entries_are_empty_without_a_pregnancy(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let (access, _) = mother_login(t.app(), &code).await;

    let response = get_auth(t.app(), "/api/v1/mobile/consultations", &access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
    assert!(json["pregnancy_id"].is_null());

    let response = get_auth(t.app(), "/api/v1/mobile/health-record", &access).await;
    let json = body_json(response).await;
    assert_eq!(json["has_record"], false);
    assert!(json["record"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn appointments_are_split_around_today(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let response = post_json_auth(
        t.app(),
        &format!("/api/v1/carnet/{code}/pregnancies"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let today = Utc::now().date_naive();
    for (title, offset) in [("Later", 30), ("Soon", 3), ("Before", -10), ("Long ago", -40)] {
        let response = post_json_auth(
            t.app(),
            &format!("/api/v1/carnet/{code}/appointments"),
            json!({ "type": "cpn", "title": title, "date": today + Duration::days(offset) }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (access, _) = mother_login(t.app(), &code).await;
    let response = get_auth(t.app(), "/api/v1/mobile/appointments", &access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 4);
    assert_eq!(json["upcoming_count"], 2);
    assert_eq!(json["upcoming"][0]["title"], "Soon");
    assert_eq!(json["past"][0]["title"], "Before");
    assert_eq!(json["past"][1]["title"], "Long ago");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn another_mothers_pregnancy_is_forbidden(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let awa = registered_mother(t.app(), &token, "Awa Diop").await;
    let khady = registered_mother(t.app(), &token, "Khady Fall").await;

    let response = post_json_auth(
        t.app(),
        &format!("/api/v1/carnet/{khady}/pregnancies"),
        json!({}),
        &token,
    )
    .await;
    let khady_pregnancy = body_json(response).await["id"].as_i64().unwrap();

    let (access, _) = mother_login(t.app(), &awa).await;
    let uri = format!("/api/v1/mobile/pregnancies/{khady_pregnancy}");
    let response = get_auth(t.app(), &uri, &access).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(t.app(), "/api/v1/mobile/pregnancies/999999", &access).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (khady_access, _) = mother_login(t.app(), &khady).await;
    let response = get_auth(t.app(), &uri, &khady_access).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["numero"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn messages_show_published_mother_content_only(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let ministry = ministry_token(&pool, t.app()).await;
    let worker = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &worker, "Awa Diop").await;

    let messages = [
        ("Vaccinez vos enfants", "published", "mothers"),
        ("Info generale", "published", "all"),
        ("Note aux agents", "published", "agents"),
        ("Brouillon", "draft", "mothers"),
    ];
    for (title, status, target) in messages {
        let response = post_json_auth(
            t.app(),
            "/api/v1/messages",
            json!({ "title": title, "content": "...", "status": status, "target": target }),
            &ministry,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(t.app(), &format!("/api/v1/mobile/messages?qr_code={code}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    let mut titles: Vec<&str> = json["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Info generale", "Vaccinez vos enfants"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mother_refresh_rotates_the_session(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;
    let (_, refresh) = mother_login(t.app(), &code).await;

    let response = post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["mother"]["full_name"], "Awa Diop");
    let access = json["access_token"].as_str().unwrap().to_string();

    let response = get_auth(t.app(), "/api/v1/mobile/profile", &access).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
