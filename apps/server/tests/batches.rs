use std::collections::HashMap;
use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use filingscope_core::utils::time_utils::market_date_today;
use filingscope_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

const SECRET: &str = "trigger-secret";

const FILING_PAGE: &str = r#"{
    "status": "000",
    "message": "정상",
    "list": [
        {
            "corp_code": "00126380",
            "corp_name": "삼성전자",
            "stock_code": "005930",
            "corp_cls": "Y",
            "report_nm": "단일판매ㆍ공급계약체결",
            "rcept_no": "20250314000001",
            "rcept_dt": "20250314",
            "rm": "유"
        },
        {
            "corp_code": "00999999",
            "corp_name": "기타법인",
            "stock_code": "",
            "corp_cls": "E",
            "report_nm": "임원ㆍ주요주주특정증권등소유상황보고서",
            "rcept_no": "20250314000002",
            "rcept_dt": "20250314",
            "rm": ""
        }
    ]
}"#;

async fn build_test_router(dir: &Path, filing_source: Option<&Path>) -> Router {
    build_router_with(dir, filing_source, &[]).await
}

async fn build_router_with(
    dir: &Path,
    filing_source: Option<&Path>,
    extra: &[(&str, String)],
) -> Router {
    let mut vars = HashMap::new();
    vars.insert(
        "FS_DB_PATH".to_string(),
        dir.join("test.db").to_string_lossy().to_string(),
    );
    vars.insert("FS_INTERNAL_SECRET".to_string(), SECRET.to_string());
    if let Some(path) = filing_source {
        vars.insert(
            "FS_FILING_SOURCE_PATH".to_string(),
            path.to_string_lossy().to_string(),
        );
    }
    for (key, value) in extra {
        vars.insert(key.to_string(), value.clone());
    }
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn get_json(app: &Router, uri: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

fn trigger(uri: &str, secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(secret) = secret {
        builder = builder.header("X-Internal-Secret", secret);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn liveness_needs_no_secret() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(tmp.path(), None).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn manual_trigger_requires_the_internal_secret() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(tmp.path(), None).await;

    for secret in [None, Some("wrong")] {
        let response = app
            .clone()
            .oneshot(trigger("/api/v1/batches/filing", secret))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let health = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/batches/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let health = json_body(health).await;
    assert_eq!(health["recentRuns"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn filing_run_without_a_source_fails() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(tmp.path(), None).await;

    let response = app
        .oneshot(trigger("/api/v1/batches/filing", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result = json_body(response).await;
    assert_eq!(result["status"], "failed");
    assert_eq!(result["processed"], 0);
}

#[tokio::test]
async fn filing_run_ingests_tracked_filings_once() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("list.json");
    std::fs::write(&source, FILING_PAGE).unwrap();
    let app = build_test_router(tmp.path(), Some(&source)).await;

    let first = app
        .clone()
        .oneshot(trigger("/api/v1/batches/filing?budgetMs=60000", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = json_body(first).await;
    assert_eq!(first["batchType"], "filing");
    assert_eq!(first["status"], "success");
    assert_eq!(first["processed"], 1);
    assert_eq!(first["skipped"], 1);

    let second = app
        .clone()
        .oneshot(trigger("/api/v1/batches/filing", Some(SECRET)))
        .await
        .unwrap();
    let second = json_body(second).await;
    assert_eq!(second["processed"], 0);
    assert_eq!(second["skipped"], 2);

    let health = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/batches/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let health = json_body(health).await;
    assert_eq!(health["filingCount"], 1);
    assert_eq!(health["activeCompanyCount"], 1);
    assert_eq!(health["recentRuns"].as_array().unwrap().len(), 2);
    assert_eq!(health["lastFilingSuccess"]["id"], second["runId"]);
}

#[tokio::test]
async fn invalid_budget_is_a_bad_request() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(tmp.path(), None).await;

    let response = app
        .oneshot(trigger("/api/v1/batches/valuation?budgetMs=soon", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn valuation_run_with_default_mock_prices_succeeds() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(tmp.path(), None).await;

    let response = app
        .clone()
        .oneshot(trigger("/api/v1/batches/valuation", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result = json_body(response).await;
    assert_eq!(result["status"], "success", "{}", result);
    assert!(result["processed"].as_u64().unwrap() > 0);

    let again = app
        .clone()
        .oneshot(trigger("/api/v1/batches/valuation", Some(SECRET)))
        .await
        .unwrap();
    let again = json_body(again).await;
    assert_eq!(again["processed"], 0);

    let health = get_json(&app, "/api/v1/batches/health").await;
    assert_eq!(health["snapshotCount"], result["processed"]);
}

#[tokio::test]
async fn priced_filer_is_scored_once() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("list.json");
    std::fs::write(&source, FILING_PAGE).unwrap();

    let prices = tmp.path().join("prices");
    std::fs::create_dir(&prices).unwrap();
    let today = market_date_today();
    for day in [today, today.succ_opt().unwrap()] {
        std::fs::write(
            prices.join(format!("{}.json", day.format("%Y%m%d"))),
            r#"{"OutBlock_1":[{"ISU_SRT_CD":"005930","ISU_NM":"삼성전자","TDD_CLSPRC":"71,200","MKTCAP":"425,000,000,000,000"}]}"#,
        )
        .unwrap();
    }

    let app = build_router_with(
        tmp.path(),
        Some(&source),
        &[
            ("FS_PRICE_SOURCE", "file".to_string()),
            (
                "FS_PRICE_SOURCE_DIR",
                prices.to_string_lossy().to_string(),
            ),
        ],
    )
    .await;

    for uri in ["/api/v1/batches/filing", "/api/v1/batches/valuation"] {
        let response = app
            .clone()
            .oneshot(trigger(uri, Some(SECRET)))
            .await
            .unwrap();
        let result = json_body(response).await;
        assert_eq!(result["status"], "success", "{}: {}", uri, result);
    }

    let health = get_json(&app, "/api/v1/batches/health").await;
    assert_eq!(health["activeCompanyCount"], 1);
    assert_eq!(health["snapshotCount"], 1);
}
