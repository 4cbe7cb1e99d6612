//! Integration tests for card printing, card validation, the mother
//! directory, booklet opening and health centers.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get_auth, ministry_token, post_auth, post_json_auth,
    registered_mother, worker_token,
};

fn booklet_body(code: &str) -> serde_json::Value {
    json!({
        "code": code,
        "father_name": "Moussa Diop",
        "father_phone": "771234567",
        "father_profession": "Chauffeur",
        "pere_carnet_center": "Centre de Sante Medina",
        "identification_code": "ID-2026-0001",
        "mother_center_of_birth": "Hopital Principal",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_card_is_pending_with_an_image(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let response = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let code = json["code"].as_str().unwrap();
    assert!(code.starts_with("QR-"));
    assert_eq!(json["status"], "pending");
    assert!(json["mother_id"].is_null());
    assert_eq!(
        json["image_url"],
        format!("http://testserver/media/qr_codes/{code}.png")
    );

    let file = t.media.path().join(format!("qr_codes/{code}.png"));
    let png = std::fs::read(&file).expect("card image written to the media root");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn card_list_filters_by_status(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    registered_mother(t.app(), &token, "Awa Diop").await;
    let response = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(t.app(), "/api/v1/qr-cards?status=pending", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["stats"]["total"], 2);

    let response = get_auth(t.app(), "/api/v1/qr-cards?status=validated", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["mother_name"], "Awa Diop");

    let response = get_auth(t.app(), "/api/v1/qr-cards?status=lost", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_requires_every_identity_field(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let created = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    let code = body_json(created).await["code"].as_str().unwrap().to_string();

    let body = json!({
        "code": code,
        "full_name": "Awa Diop",
        "address": "Dakar",
        "birth_date": "1995-04-12",
        "profession": "Couturiere",
    });
    let response = post_json_auth(t.app(), "/api/v1/qr-cards/validate", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("phone"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validating_unknown_code_is_not_found(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let body = json!({
        "code": "QR-NOPE0000",
        "full_name": "Awa Diop",
        "address": "Dakar",
        "phone": "770000000",
        "birth_date": "1995-04-12",
        "profession": "Couturiere",
    });
    let response = post_json_auth(t.app(), "/api/v1/qr-cards/validate", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ministry_cannot_validate_cards(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = ministry_token(&pool, t.app()).await;

    let created = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let code = body_json(created).await["code"].as_str().unwrap().to_string();

    let body = json!({
        "code": code,
        "full_name": "Awa Diop",
        "address": "Dakar",
        "phone": "770000000",
        "birth_date": "1995-04-12",
        "profession": "Couturiere",
    });
    let response = post_json_auth(t.app(), "/api/v1/qr-cards/validate", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revalidation_updates_the_same_mother(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;

    let body = json!({
        "code": code,
        "full_name": "Awa Diop Sarr",
        "address": "Thies",
        "phone": "771110000",
        "birth_date": "1995-04-12",
        "profession": "Commercante",
    });
    let response = post_json_auth(t.app(), "/api/v1/qr-cards/validate", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["card"]["status"], "validated");
    assert_eq!(json["mother"]["full_name"], "Awa Diop Sarr");
    assert_eq!(json["mother"]["address"], "Thies");

    let response = get_auth(t.app(), "/api/v1/mothers", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["stats"]["validated"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mother_directory_search_and_detail(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let awa = registered_mother(t.app(), &token, "Awa Diop").await;
    registered_mother(t.app(), &token, "Khady Fall").await;

    let response = get_auth(t.app(), "/api/v1/mothers?search=awa", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["full_name"], "Awa Diop");
    assert_eq!(data[0]["qr_code"], awa);
    assert_eq!(data[0]["has_record"], false);
    assert_eq!(json["stats"]["total"], 2);

    let id = data[0]["id"].as_i64().unwrap();
    let response = get_auth(t.app(), &format!("/api/v1/mothers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["qr_status"], "validated");

    let response = get_auth(t.app(), "/api/v1/mothers/recent", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["full_name"], "Khady Fall");

    let response = get_auth(t.app(), "/api/v1/mothers/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booklet_needs_a_validated_card(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;

    let created = post_auth(t.app(), "/api/v1/qr-cards", &token).await;
    let code = body_json(created).await["code"].as_str().unwrap().to_string();

    let response =
        post_json_auth(t.app(), "/api/v1/mothers/add-record", booklet_body(&code), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booklet_is_opened_once(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;

    let response =
        post_json_auth(t.app(), "/api/v1/mothers/add-record", booklet_body(&code), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["record"]["father_name"], "Moussa Diop");
    // No registered center carries that name, so the free text is kept.
    assert_eq!(json["record"]["birth_center_name"], "Hopital Principal");
    assert!(json["record"]["birth_center_id"].is_null());

    let response =
        post_json_auth(t.app(), "/api/v1/mothers/add-record", booklet_body(&code), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(t.app(), "/api/v1/mothers?search=awa", &token).await;
    assert_eq!(body_json(response).await["data"][0]["has_record"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booklet_requires_father_name(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    let code = registered_mother(t.app(), &token, "Awa Diop").await;

    let mut body = booklet_body(&code);
    body["father_name"] = json!("  ");
    let response = post_json_auth(t.app(), "/api/v1/mothers/add-record", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn centers_are_created_by_the_ministry(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let ministry = ministry_token(&pool, t.app()).await;
    let worker = worker_token(&pool, t.app()).await;

    let body = json!({ "name": "Centre de Sante Medina", "code": "CS-MED", "city": "Dakar" });
    let response = post_json_auth(t.app(), "/api/v1/centers", body.clone(), &ministry).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["address"], "");

    let response = post_json_auth(t.app(), "/api/v1/centers", body.clone(), &ministry).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(t.app(), "/api/v1/centers", body, &worker).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(t.app(), "/api/v1/centers", &worker).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["code"], "CS-MED");
    assert_eq!(json["data"][0]["mothers_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_far_past_the_end_is_empty(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let token = worker_token(&pool, t.app()).await;
    registered_mother(t.app(), &token, "Awa Diop").await;

    let response = get_auth(t.app(), "/api/v1/mothers?page=9223372036854775807", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total"], 1);
}
