use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use engine::Store;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::ServerConfig;
use tower::ServiceExt;

fn app() -> Router {
    let config = ServerConfig {
        allow_reset: true,
        ..ServerConfig::default()
    };
    server::router(Arc::new(Store::new()), &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn responses_are_not_cached() {
    let app = app();
    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = app();
    let req = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn categories_are_seeded_and_extended() {
    let app = app();
    let (status, body) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 9);
    assert!(categories.contains(&json!("Rent")));

    let (status, body) = post(&app, "/api/categories", json!({ "name": "  Pets " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "name": "Pets" }));

    let (_, body) = get(&app, "/api/categories").await;
    assert!(body["categories"].as_array().unwrap().contains(&json!("Pets")));
}

#[tokio::test]
async fn empty_category_is_rejected() {
    let app = app();
    let (status, body) = post(&app, "/api/categories", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "empty name" }));
}

#[tokio::test]
async fn link_flow_creates_default_accounts() {
    let app = app();
    let (_, body) = post(&app, "/api/link/token/create", json!({})).await;
    assert_eq!(body["link_token"], "mock-link-token");

    let (_, body) = get(&app, "/api/balances").await;
    assert_eq!(body["accounts"], json!([]));

    let (status, body) = post(&app, "/api/public_token/exchange", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access_token"], "mock-access-token");

    let (_, body) = get(&app, "/api/balances").await;
    let parsed: server::types::account::BalancesResponse =
        serde_json::from_value(body.clone()).unwrap();
    assert_eq!(parsed.accounts.len(), 2);
    let accounts = body["accounts"].as_array().unwrap();
    let checking = accounts.iter().find(|a| a["id"] == "acc_chk").unwrap();
    assert_eq!(checking["type"], "depository");
    assert_eq!(checking["balance"], 2500.0);
}

#[tokio::test]
async fn expense_debits_checking() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/expenses",
        json!({ "name": "Coffee", "category": "Dining", "amount": 4.5, "date": "2025-03-02" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expense"]["amount"], 4.5);
    let txn_id = body["created_txn_id"].as_str().unwrap().to_string();
    assert!(txn_id.starts_with("txn_"));

    let (_, body) = get(&app, "/api/transactions").await;
    let txn = &body["transactions"][0];
    assert_eq!(txn["id"], txn_id.as_str());
    assert_eq!(txn["amount"], -4.5);
    assert_eq!(txn["category"], "Dining");
    assert_eq!(txn["date"], "2025-03-02");

    let (_, body) = get(&app, "/api/balances").await;
    let checking = body["accounts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "acc_chk")
        .unwrap()
        .clone();
    assert_eq!(checking["balance"], 2495.5);

    let (_, body) = get(&app, "/api/expenses").await;
    assert_eq!(body["expenses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn expense_validation_errors_are_400() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/expenses", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad json");

    let (status, _) = post(
        &app,
        "/api/expenses",
        json!({ "name": "", "category": "Dining", "amount": 4.5, "date": "2025-03-02" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/expenses",
        json!({ "name": "Coffee", "category": "Dining", "amount": -1, "date": "2025-03-02" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/expenses").await;
    assert_eq!(body["expenses"], json!([]));
}

#[tokio::test]
async fn rent_and_payroll_post_alerts() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/autopay/rent", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["expense_id"].as_str().unwrap().starts_with("exp_"));

    let (status, body) = post(
        &app,
        "/api/autopay/payroll",
        json!({ "amount": 2000, "date": "2025-03-15" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let payroll_txn = body["txn_id"].as_str().unwrap().to_string();

    let (_, body) = get(&app, "/api/alerts").await;
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    let rent = alerts.iter().find(|a| a["kind"] == "rent_paid").unwrap();
    assert_eq!(rent["message"], "Rent paid (-$1200).");
    assert_eq!(rent["amount"], -1200.0);
    assert_eq!(rent["balance"], 1300.0);
    let payroll = alerts.iter().find(|a| a["kind"] == "payroll_posted").unwrap();
    assert_eq!(payroll["message"], "Payroll deposited (+$2000).");
    assert_eq!(payroll["txn_id"], payroll_txn.as_str());
    assert_eq!(payroll["balance"], 3300.0);
}

#[tokio::test]
async fn malformed_autopay_body_uses_defaults() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/autopay/payroll", Some("oops")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/transactions").await;
    assert_eq!(body["transactions"][0]["amount"], 1500.0);
}

#[tokio::test]
async fn invalid_autopay_date_is_rejected() {
    let app = app();
    let (status, _) = post(&app, "/api/autopay/rent", json!({ "date": "03/01/2025" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alerts_can_be_created_directly() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/alerts",
        json!({
            "kind": "low_balance",
            "message": "Balance is low.",
            "severity": "high",
            "amount": -12.5,
            "balance": 80,
            "created_at": "2025-03-01T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_str().unwrap().starts_with("alt_"));
    assert_eq!(body["txn_id"], "");
    assert_eq!(body["amount"], -12.5);
    assert_eq!(body["created_at"], "2025-03-01T10:00:00Z");

    let (_, body) = get(&app, "/api/alerts").await;
    assert_eq!(body["alerts"].as_array().unwrap().len(), 1);

    let (status, _) = post(&app, "/api/alerts", json!({ "created_at": "yesterday" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transactions_without_category_omit_the_field() {
    let store = Arc::new(Store::new());
    store.connect();
    store
        .add_transaction(
            engine::CHECKING_ID,
            "Refund",
            engine::MoneyCents::new(1000),
            engine::parse_date("2025-03-01").unwrap(),
            None,
        )
        .unwrap();
    let app = server::router(store, &ServerConfig::default());

    let (_, body) = get(&app, "/api/transactions").await;
    let txn = body["transactions"][0].as_object().unwrap();
    assert!(!txn.contains_key("category"));
    assert_eq!(txn["amount"], 10.0);
}

#[tokio::test]
async fn reset_clears_state_when_enabled() {
    let app = app();
    post(&app, "/api/public_token/exchange", json!({})).await;
    let (status, body) = post(&app, "/api/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, body) = get(&app, "/api/balances").await;
    assert_eq!(body["accounts"], json!([]));
}

#[tokio::test]
async fn reset_is_absent_by_default() {
    let app = server::router(Arc::new(Store::new()), &ServerConfig::default());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/reset")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = app();
    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/api/expenses")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn setup_preferences_drive_autopay() {
    let app = app();
    let (_, body) = get(&app, "/api/prefs").await;
    assert_eq!(body, json!({ "prefs": {} }));

    let (status, body) = post(&app, "/api/setup/rent", json!({ "amount": 1850 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "rent": 1850.0 }));
    let (_, body) = post(&app, "/api/setup/payroll", json!({ "amount": 2100 })).await;
    assert_eq!(body["payroll"], 2100.0);
    let (_, body) = post(&app, "/api/setup/checking", json!({ "balance": 4000 })).await;
    assert_eq!(body, json!({ "ok": true, "balance": 4000.0 }));

    let (_, body) = get(&app, "/api/prefs").await;
    assert_eq!(
        body,
        json!({ "prefs": { "rent": 1850.0, "payroll": 2100.0, "checking": 4000.0 } })
    );

    send(&app, Method::POST, "/api/autopay/rent", None).await;
    let (_, body) = get(&app, "/api/alerts").await;
    assert_eq!(body["alerts"][0]["message"], "Rent paid (-$1850).");
    assert_eq!(body["alerts"][0]["balance"], 2150.0);
}

#[tokio::test]
async fn clearing_rent_preference_reports_null() {
    let app = app();
    post(&app, "/api/setup/rent", json!({ "amount": 1850 })).await;
    let (status, body) = post(&app, "/api/setup/rent", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "rent": null }));

    let (status, body) = send(&app, Method::POST, "/api/setup/checking", Some("[")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad json");
}

#[tokio::test]
async fn json_bodies_without_content_type_are_accepted() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/categories")
        .body(Body::from(r#"{"name":"Pets"}"#))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, body) = get(&app, "/api/categories").await;
    assert!(body["categories"].as_array().unwrap().contains(&json!("Pets")));
}
