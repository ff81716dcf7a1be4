//! HTTP tests for the REST surface, driven through the router with `oneshot`

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use back_office::api::rest::routes::register_routes;
use common::{period, TestEnv};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(env: &TestEnv) -> Router {
    register_routes(Router::new(), env.services.clone())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let env = TestEnv::new();
    let (status, body) = send(&router(&env), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn settings_round_trip_over_http() {
    let env = TestEnv::new();
    let app = router(&env);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/settings/maintenance_mode",
        Some(json!({ "value": "on" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], "maintenance_mode");

    let (status, body) = send(&app, Method::GET, "/settings/maintenance_mode", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "on");

    let (status, body) = send(&app, Method::GET, "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, _) = send(&app, Method::DELETE, "/settings/maintenance_mode", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_setting_is_a_problem_document() {
    let env = TestEnv::new();
    let request = Request::builder()
        .uri("/settings/unknown_key")
        .body(Body::empty())
        .unwrap();

    let response = router(&env).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let problem: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(problem["status"], 404);
    assert!(problem["detail"].as_str().unwrap().contains("unknown_key"));
}

#[tokio::test]
async fn contract_workflow_over_http() {
    let env = TestEnv::new();
    let app = router(&env);

    let (status, creator) = send(
        &app,
        Method::POST,
        "/creators",
        Some(json!({ "name": "Alice", "commission_rate": 20.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = creator["id"].as_i64().unwrap();

    let (status, issued) = send(
        &app,
        Method::POST,
        &format!("/creators/{}/contracts", id),
        Some(json!({
            "action": "generate_link",
            "commission_rate": 15.0,
            "commission_per_item": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(issued["contract"]["version"], 1);
    assert_eq!(issued["contract"]["status"], "pending");
    assert_eq!(issued["contract"]["previous_terms"]["commission_rate"], 20.0);
    let token = issued["contract"]["token"].as_str().unwrap().to_string();
    assert!(issued["agreement_url"].as_str().unwrap().ends_with(&token));

    let (status, agreed) = send(
        &app,
        Method::POST,
        &format!("/contracts/{}/agree", token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(agreed["status"], "agreed");

    let (status, history) = send(
        &app,
        Method::GET,
        &format!("/creators/{}/contracts", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["success"], true);
    assert_eq!(history["data"].as_array().unwrap().len(), 1);

    let (status, effective) = send(
        &app,
        Method::GET,
        &format!("/creators/{}/contracts/effective", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(effective["terms"]["commission_rate"], 15.0);
    assert_eq!(effective["terms"]["commission_per_item"], 100);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/contracts/{}/agree", token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_contract_action_is_rejected() {
    let env = TestEnv::new();
    let alice = env.creator("Alice", None).await;

    let (status, problem) = send(
        &router(&env),
        Method::POST,
        &format!("/creators/{}/contracts", alice.id),
        Some(json!({ "action": "fax", "commission_rate": 10.0, "commission_per_item": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["status"], 422);
    assert_eq!(problem["title"], "Invalid Request Body");
    assert!(problem["detail"].as_str().unwrap().contains("fax"));
    assert!(env.contracts.all().is_empty());
}

#[tokio::test]
async fn malformed_path_parameter_is_a_problem_document() {
    let env = TestEnv::new();
    let request = Request::builder()
        .uri("/creators/abc")
        .body(Body::empty())
        .unwrap();

    let response = router(&env).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let problem: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["title"], "Invalid Path Parameter");
}

#[tokio::test]
async fn body_without_json_content_type_is_a_problem_document() {
    let env = TestEnv::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/creators")
        .body(Body::from(r#"{"name":"Alice"}"#))
        .unwrap();

    let response = router(&env).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let problem: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(problem["status"], 415);
    assert_eq!(problem["title"], "Invalid Request Body");
}

#[tokio::test]
async fn malformed_period_is_a_validation_error() {
    let env = TestEnv::new();
    let (status, problem) = send(&router(&env), Method::GET, "/sales?period=2024-13", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["title"], "Validation Error");
}

#[tokio::test]
async fn payment_notices_over_http() {
    let env = TestEnv::new();
    let app = router(&env);
    let alice = env.creator("Alice", None).await;
    env.sales.set(alice.id, period("2024-03"), 100_000, 1);

    let (status, preview) = send(
        &app,
        Method::GET,
        &format!("/payments/preview?creator_id={}&period=2024-03", alice.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["status"], "draft");
    assert_eq!(preview["net_payment"], 71_832);

    let (status, report) = send(&app, Method::GET, "/sales?period=2024-03", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_gross_sales"], 100_000);

    let (status, notice) = send(
        &app,
        Method::POST,
        "/payments/notices",
        Some(json!({ "creator_id": alice.id, "period": "2024-03" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(notice["status"], "issued");
    let notice_id = notice["id"].as_i64().unwrap();

    let (status, list) = send(&app, Method::GET, "/payments/notices?period=2024-03", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);

    let (status, problem) = send(
        &app,
        Method::POST,
        &format!("/payments/notices/{}/archive", notice_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(problem["title"], "Archive Unavailable");

    let (status, paid) = send(
        &app,
        Method::POST,
        &format!("/payments/notices/{}/paid", notice_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
}

#[tokio::test]
async fn catalog_reorder_over_http() {
    let env = TestEnv::new();
    let app = router(&env);

    let mut ids = Vec::new();
    for title in ["Shipping", "Refunds"] {
        let (status, entry) = send(
            &app,
            Method::POST,
            "/catalog/faq",
            Some(json!({ "title": title })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(entry["id"].as_i64().unwrap());
    }

    let (status, reordered) = send(
        &app,
        Method::PUT,
        "/catalog/faq/order",
        Some(json!({ "ids": [ids[1], ids[0]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reordered["items"][0]["title"], "Refunds");
    assert_eq!(reordered["items"][0]["sort_order"], 0);
    assert_eq!(reordered["items"][1]["title"], "Shipping");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/catalog/faq/{}", ids[0]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, list) = send(&app, Method::GET, "/catalog/faq", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn unknown_collection_is_not_found() {
    let env = TestEnv::new();
    let (status, problem) = send(&router(&env), Method::GET, "/catalog/banners", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["status"], 404);
}
