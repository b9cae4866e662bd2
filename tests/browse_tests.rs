use std::sync::Arc;
use std::time::Duration;

use dsa_sheets::browse::{
    CatalogClient, CompaniesPage, CompanyPage, DifficultyFilter, SheetSource,
};
use dsa_sheets::catalog::{Difficulty, FsCatalog, Timeframe};
use dsa_sheets::config::ClientConfig;
use dsa_sheets::server::{router, AppState};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_data::*;

fn client(base_url: String) -> Arc<dyn SheetSource> {
    let config = ClientConfig {
        base_url,
        ..ClientConfig::default()
    };
    Arc::new(CatalogClient::new(&config).unwrap())
}

async fn spawn_server(root: &std::path::Path) -> String {
    let app = router(
        AppState::new(Arc::new(FsCatalog::new(root))),
        Duration::from_secs(60),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

#[tokio::test]
async fn test_browse_against_running_server() {
    let root = sample_data_root();
    let source = client(spawn_server(root.path()).await);

    let mut companies = CompaniesPage::new(source.clone());
    companies.load().await;
    assert_eq!(companies.companies().len(), 3);
    companies.set_search("ACC");
    let visible: Vec<&str> = companies.visible().into_iter().map(|c| c.name()).collect();
    assert_eq!(visible, vec!["accenture"]);

    let page = CompanyPage::new(source, "accenture");
    assert!(page.refresh().await);
    assert_eq!(page.visible().len(), 4);

    page.set_difficulty(DifficultyFilter::Only(Difficulty::Hard));
    let hard = page.visible();
    assert_eq!(hard.len(), 1);
    assert_eq!(hard[0]["Title"], "Trapping Rain Water");

    page.set_difficulty(DifficultyFilter::All);
    assert!(page.set_timeframe(Timeframe::ThirtyDays).await);
    assert_eq!(page.visible()[0]["Title"], "Pow(x, n)");

    // no sheet for this window: the page shows nothing instead of failing
    assert!(page.set_timeframe(Timeframe::All).await);
    assert!(page.visible().is_empty());
    assert!(!page.is_loading());
}

#[tokio::test]
async fn test_local_and_remote_sources_agree() {
    let root = sample_data_root();
    let remote = client(spawn_server(root.path()).await);
    let local: Arc<dyn SheetSource> = Arc::new(FsCatalog::new(root.path()));

    let from_server = remote.questions("meta", Timeframe::All).await;
    let from_disk = local.questions("meta", Timeframe::All).await;
    assert_eq!(from_server, from_disk);
    assert_eq!(from_disk.len(), 2);
}

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/questions"))
        .and(query_param("timeframe", "three-months"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"Title": "Slow and stale", "Difficulty": "Easy"}]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/questions"))
        .and(query_param("timeframe", "thirty-days"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"Title": "Fast and fresh", "Difficulty": "Hard"}])),
        )
        .mount(&server)
        .await;

    let page = CompanyPage::new(client(server.uri()), "google");

    let (older, newer) = tokio::join!(
        page.set_timeframe(Timeframe::ThreeMonths),
        page.set_timeframe(Timeframe::ThirtyDays),
    );

    assert!(!older, "slow response for the earlier selection must be dropped");
    assert!(newer);
    assert_eq!(page.timeframe(), Timeframe::ThirtyDays);

    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["Title"], "Fast and fresh");
}

#[tokio::test]
async fn test_wrapped_payload_and_bad_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "questions": [
                {"Title": "Kept", "Difficulty": "Medium"},
                "junk",
                42
            ]
        })))
        .mount(&server)
        .await;

    let page = CompanyPage::new(client(server.uri()), "acme");
    page.refresh().await;

    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["Title"], "Kept");
}
