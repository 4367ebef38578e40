// ==============================
// tests/payments_flow_tests.rs
// ==============================
//! Payment creation, validation, and status transitions through the router.

mod common;

use axum::http::StatusCode;
use common::{login_token, spawn_app, test_settings};
use serde_json::json;

fn valid_payment() -> serde_json::Value {
    json!({
        "accountNumber": "1234567890",
        "amount": "2500.50",
        "currency": "ZAR",
        "swift": "ABSAZAJJ",
        "payee": "Jane Doe"
    })
}

#[tokio::test]
async fn test_create_and_list_payments() {
    let app = spawn_app(test_settings());
    let token = login_token(&app, "alice_01", "Tr0ub4dor&3!").await;

    let (status, created) = app
        .post("/payments", Some(&token), &valid_payment())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["amount"], "2500.50");

    let (status, listed) = app.get("/payments", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_each_field_is_validated_by_name() {
    let app = spawn_app(test_settings());
    let token = login_token(&app, "alice_01", "Tr0ub4dor&3!").await;

    let cases = [
        ("accountNumber", json!("ZA123")),
        // exceeds the 9-integer-digit bound
        ("amount", json!("1000000000.00")),
        ("currency", json!("BTC")),
        // the 4-letter frontend variant is not accepted
        ("swift", json!("ABCD")),
        ("payee", json!("<Jane>")),
    ];

    for (field, bad_value) in cases {
        let mut payment = valid_payment();
        payment[field] = bad_value;
        let (status, body) = app.post("/payments", Some(&token), &payment).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(body["field"], field);
    }
}

#[tokio::test]
async fn test_verify_and_submit_transitions() {
    let app = spawn_app(test_settings());
    let token = login_token(&app, "alice_01", "Tr0ub4dor&3!").await;

    let (_, created) = app
        .post("/payments", Some(&token), &valid_payment())
        .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, verified) = app
        .post(&format!("/payments/{id}/verify"), Some(&token), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["status"], "VERIFIED");
    assert!(verified["verifiedAt"].is_string());

    let (status, submitted) = app
        .post(&format!("/payments/{id}/submit"), Some(&token), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["status"], "SUBMITTED");
    assert!(submitted["submittedAt"].is_string());
}

#[tokio::test]
async fn test_bad_and_unknown_payment_ids() {
    let app = spawn_app(test_settings());
    let token = login_token(&app, "alice_01", "Tr0ub4dor&3!").await;

    let (status, body) = app
        .post("/payments/not-a-uuid/verify", Some(&token), &json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");

    let (status, _) = app
        .post(
            "/payments/00000000-0000-4000-8000-000000000000/verify",
            Some(&token),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_payments_require_authentication() {
    let app = spawn_app(test_settings());

    let (status, _) = app.post("/payments", None, &valid_payment()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
