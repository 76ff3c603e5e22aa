//! API tests - routes exercised in-process through the router

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Local};
use ekejaksaan_deadline::api::{create_router, AppState};
use ekejaksaan_deadline::{format_iso, ClassificationTelemetry};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(api_key: Option<&str>) -> Router {
    let telemetry = Arc::new(ClassificationTelemetry::new());
    let state = Arc::new(AppState::new(telemetry, api_key.map(String::from)));
    create_router(state)
}

fn iso_days_ago(days: i64) -> String {
    format_iso(Local::now().date_naive() - Duration::days(days))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(None), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_classify_overdue() {
    let request = post_json(
        "/v1/deadline/classify",
        json!({ "date": iso_days_ago(10), "field": "tahap_2", "category": "Dewasa" }),
    );
    let (status, body) = send(app(None), request).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["overdue"], true);
    assert_eq!(data["style_hint"], "overdue-cell");
    assert_eq!(data["status"], "evaluated");
    assert_eq!(data["elapsed_days"], 10);
    assert_eq!(data["limit_days"], 7);
}

#[tokio::test]
async fn test_classify_distinguishes_fail_open_causes() {
    let (_, body) = send(
        app(None),
        post_json("/v1/deadline/classify", json!({ "date": "invalid", "field": "p21" })),
    )
    .await;
    assert_eq!(body["data"]["overdue"], false);
    assert_eq!(body["data"]["style_hint"], "");
    assert_eq!(body["data"]["status"], "date_unavailable");
    assert!(body["data"]["reason"]
        .as_str()
        .unwrap()
        .starts_with("[DATE_UNPARSEABLE]"));

    let (_, body) = send(
        app(None),
        post_json("/v1/deadline/classify", json!({ "date": "15-01-24", "field": "p21" })),
    )
    .await;
    assert_eq!(body["data"]["overdue"], false);
    assert_eq!(body["data"]["status"], "date_unavailable");

    let (_, body) = send(
        app(None),
        post_json("/v1/deadline/classify", json!({ "date": 20240115, "field": "p21" })),
    )
    .await;
    assert_eq!(body["data"]["status"], "date_unavailable");

    let (_, body) = send(
        app(None),
        post_json(
            "/v1/deadline/classify",
            json!({ "date": iso_days_ago(60), "field": "unknown_field" }),
        ),
    )
    .await;
    assert_eq!(body["data"]["overdue"], false);
    assert_eq!(body["data"]["status"], "unknown_field");
}

#[tokio::test]
async fn test_classify_rejects_empty_field() {
    let (status, body) = send(
        app(None),
        post_json("/v1/deadline/classify", json!({ "date": "2024-01-15", "field": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
}

#[tokio::test]
async fn test_render_rows() {
    let request = post_json(
        "/v1/cases/render",
        json!({
            "cases": [
                {
                    "id": 1,
                    "nama_tersangka": "Dashboard Test 1",
                    "kategori_umur": "Anak",
                    "spdp_tgl_terima": iso_days_ago(30),
                    "berkas_tahap_1": iso_days_ago(4),
                    "p18_p19": null,
                    "p21": "invalid",
                    "tahap_2": iso_days_ago(5)
                },
                {
                    "id": 2,
                    "berkas_tahap_1": iso_days_ago(4)
                }
            ]
        }),
    );
    let (status, body) = send(app(None), request).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["total_rows"], 2);
    assert_eq!(data["total_overdue_cells"], 2);

    let minor = &data["rows"][0];
    assert_eq!(minor["kategori_umur"], "Anak");
    assert_eq!(minor["cells"]["spdp_tgl_terima"], "overdue-cell");
    assert_eq!(minor["cells"]["berkas_tahap_1"], "overdue-cell");
    assert_eq!(minor["cells"]["p18_p19"], "");
    assert_eq!(minor["cells"]["p21"], "");
    assert_eq!(minor["cells"]["tahap_2"], "");
    assert_eq!(minor["overdue_count"], 2);

    // No kategori_umur means Dewasa: 4 days is within the 6 day limit
    let adult = &data["rows"][1];
    assert_eq!(adult["kategori_umur"], "Dewasa");
    assert_eq!(adult["cells"]["berkas_tahap_1"], "");
    assert_eq!(adult["overdue_count"], 0);
}

#[tokio::test]
async fn test_update_check_milestone() {
    let request = post_json(
        "/v1/cases/update-check",
        json!({ "id": 7, "field": "berkas_tahap_1", "value": iso_days_ago(10) }),
    );
    let (status, body) = send(app(None), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["overdue"], true);
    assert_eq!(body["data"]["style_hint"], "overdue-cell");
}

#[tokio::test]
async fn test_update_check_plain_field_has_no_annotation() {
    let request = post_json(
        "/v1/cases/update-check",
        json!({ "id": 7, "field": "nama_tersangka", "value": "Updated Tersangka" }),
    );
    let (status, body) = send(app(None), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("overdue").is_none());
    assert_eq!(body["data"]["style_hint"], "");
}

#[tokio::test]
async fn test_update_check_forbidden_field() {
    let request = post_json(
        "/v1/cases/update-check",
        json!({ "id": 1, "field": "created_at", "value": "2024-01-01" }),
    );
    let (status, body) = send(app(None), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_FORBIDDEN_FIELD");
}

#[tokio::test]
async fn test_limits_table() {
    let (status, body) = send(app(None), get("/v1/deadline/limits")).await;
    assert_eq!(status, StatusCode::OK);

    let limits = body["data"]["limits"].as_array().unwrap();
    assert_eq!(limits.len(), 5);
    let stage_1 = limits
        .iter()
        .find(|l| l["field"] == "FILE_STAGE_1")
        .unwrap();
    assert_eq!(stage_1["adult_days"], 6);
    assert_eq!(stage_1["minor_days"], 3);
    assert_eq!(stage_1["case_column"], "berkas_tahap_1");
}

#[tokio::test]
async fn test_stats_count_outcomes() {
    let router = app(None);

    for body in [
        json!({ "date": iso_days_ago(30), "field": "spdp" }),
        json!({ "date": "", "field": "spdp" }),
        json!({ "date": iso_days_ago(1), "field": "nope" }),
    ] {
        let (status, _) = send(router.clone(), post_json("/v1/deadline/classify", body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(router, get("/v1/stats")).await;
    let data = &body["data"];
    assert_eq!(data["total_classified"], 3);
    assert_eq!(data["total_overdue"], 1);
    assert_eq!(data["date_unavailable"], 1);
    assert_eq!(data["unknown_field"], 1);
    assert_eq!(data["overdue_by_field"]["SPDP_RECEIPT"], 1);
}

#[tokio::test]
async fn test_api_key_gate() {
    let (status, body) = send(app(Some("sk_test")), get("/v1/stats")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "API_UNAUTHORIZED");
    assert!(body["latency_ms"].as_f64().is_some());

    let wrong = Request::builder()
        .uri("/v1/stats")
        .header("X-API-Key", "sk_wrong")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(Some("sk_test")), wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "API_UNAUTHORIZED");

    let ok = Request::builder()
        .uri("/v1/stats")
        .header("X-API-Key", "sk_test")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(Some("sk_test")), ok).await;
    assert_eq!(status, StatusCode::OK);

    // Health stays open
    let (status, _) = send(app(Some("sk_test")), get("/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
}
