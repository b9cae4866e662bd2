use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use dsa_sheets::catalog::FsCatalog;
use dsa_sheets::server::{router, AppState};
use serde_json::Value;
use tower::ServiceExt;

use test_data::*;

fn app_for(root: &std::path::Path) -> Router {
    let state = AppState::new(Arc::new(FsCatalog::new(root)));
    router(state, Duration::from_secs(60))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_companies_lists_each_directory_once() {
    let root = sample_data_root();
    let (status, body) = get(app_for(root.path()), "/api/companies").await;

    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["accenture", "google", "meta"]);
}

#[tokio::test]
async fn test_companies_missing_root_is_server_error() {
    let root = sample_data_root();
    let missing = root.path().join("does-not-exist");
    let (status, body) = get(app_for(&missing), "/api/companies").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Data folder not found"));
}

#[tokio::test]
async fn test_questions_rows_in_file_order() {
    let root = sample_data_root();
    let (status, body) = get(
        app_for(root.path()),
        "/api/questions?company=accenture&timeframe=six-months",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);

    let titles: Vec<&str> = rows.iter().map(|r| r["Title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec!["Two Sum", "Reverse Linked List", "LRU Cache", "Trapping Rain Water"]
    );

    let first = rows[0].as_object().unwrap();
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(keys, HEADER.split(',').collect::<Vec<_>>());
    assert_eq!(first["Acceptance %"], "49.1%");
    assert_eq!(first["Frequency %"], "100.0%");
}

#[tokio::test]
async fn test_row_keys_follow_header_order() {
    let root = sample_data_root();
    std::fs::write(
        root.path().join("meta").join("three-months.csv"),
        "URL,Title,Difficulty\nhttps://example.com,Zigzag Conversion,Medium\n",
    )
    .unwrap();

    let response = app_for(root.path())
        .oneshot(
            Request::builder()
                .uri("/api/questions?company=meta&timeframe=three-months")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"[{"URL":"https://example.com","Title":"Zigzag Conversion","Difficulty":"Medium"}]"#
    );
}

#[tokio::test]
async fn test_invalid_utf8_sheet_still_served() {
    let root = sample_data_root();
    std::fs::create_dir(root.path().join("acme")).unwrap();
    std::fs::write(
        root.path().join("acme").join("all.csv"),
        b"Title,Difficulty\nCaf\xe9 Orders,Easy\n",
    )
    .unwrap();

    let (status, body) = get(app_for(root.path()), "/api/questions?company=acme&timeframe=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Title"], "Caf\u{FFFD} Orders");
    assert_eq!(body[0]["Difficulty"], "Easy");
}

#[tokio::test]
async fn test_quoted_titles_survive() {
    let root = sample_data_root();
    let (status, body) = get(
        app_for(root.path()),
        "/api/questions?company=accenture&timeframe=thirty-days",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Title"], "Pow(x, n)");
}

#[tokio::test]
async fn test_missing_parameters_are_client_errors() {
    let root = sample_data_root();

    for uri in [
        "/api/questions",
        "/api/questions?company=accenture",
        "/api/questions?timeframe=six-months",
        "/api/questions?company=&timeframe=six-months",
    ] {
        let (status, body) = get(app_for(root.path()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "company and timeframe are required");
    }
}

#[tokio::test]
async fn test_absent_sheets_are_not_found() {
    let root = sample_data_root();

    for uri in [
        "/api/questions?company=google&timeframe=six-months",
        "/api/questions?company=accenture&timeframe=all",
        "/api/questions?company=amazon&timeframe=six-months",
        "/api/questions?company=accenture&timeframe=last-week",
        "/api/questions?company=..&timeframe=six-months",
        "/api/questions?company=..%2Faccenture&timeframe=six-months",
    ] {
        let (status, body) = get(app_for(root.path()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "CSV file not found");
    }
}

#[tokio::test]
async fn test_reads_fresh_from_disk() {
    let root = sample_data_root();
    let app = app_for(root.path());
    let uri = "/api/questions?company=meta&timeframe=all";

    let (_, before) = get(app.clone(), uri).await;
    assert_eq!(before.as_array().unwrap().len(), 2);

    std::fs::write(
        root.path().join("meta").join("all.csv"),
        format!("{HEADER}\nOnly One,Hard,10%,5%,https://example.com\n"),
    )
    .unwrap();

    let (_, after) = get(app, uri).await;
    assert_eq!(after.as_array().unwrap().len(), 1);
    assert_eq!(after[0]["Difficulty"], "Hard");
}
