use httpmock::prelude::*;
use httpmock::Method::HEAD;
use profile_resolver::core::export::{write_report, CSV_REPORT_FILE, JSON_REPORT_FILE};
use profile_resolver::{
    build_resolver, BatchReport, BatchRequest, CreditLedger, InMemoryReportStore, Layer,
    LocalStorage, ResolutionEngine, ResolverConfig,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const API_PATH: &str = "/v1/mixed_people/search";

fn config_for(server: &MockServer, credits: u32) -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.network.profile_base_url = server.url("/in");
    config.search.endpoint = server.url("/search");
    config.paid_api.endpoint = server.url(API_PATH);
    config.paid_api.initial_credits = credits;
    config.pacing.inter_item_delay_ms = 0;
    config.http.timeout_seconds = 5;
    config
}

fn engine_for(config: &ResolverConfig) -> ResolutionEngine<InMemoryReportStore> {
    let ledger = Arc::new(CreditLedger::new(config.paid_api.initial_credits));
    let resolver = build_resolver(config, ledger).unwrap();
    ResolutionEngine::new(resolver, InMemoryReportStore::new())
}

fn request(emails: &[&str], api_key: Option<&str>) -> BatchRequest {
    BatchRequest::new(
        emails.iter().map(|e| e.to_string()).collect(),
        api_key.map(str::to_string),
    )
}

#[tokio::test]
async fn test_first_resolves_by_probe_second_by_paid_api() {
    let server = MockServer::start();

    let probe_mock = server.mock(|when, then| {
        when.method(HEAD).path("/in/janedoe");
        then.status(200);
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body("<html><p>No results</p></html>");
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body(json!({"q_emails": ["bob@acme.com"], "per_page": 1}));
        then.status(200).json_body(json!({
            "people": [{"linkedin_url": "https://www.linkedin.com/in/bob-smith"}]
        }));
    });

    let config = config_for(&server, 50);
    let engine = engine_for(&config);

    let report = engine
        .check_emails(&request(&["jane.doe@acme.com", "bob@acme.com"], Some("test-key")))
        .await;

    probe_mock.assert();
    // jane 在 layer 1 命中，只有 bob 走到搜尋
    search_mock.assert_hits(1);
    api_mock.assert_hits(1);

    assert_eq!(report.results.len(), 2);
    let jane = &report.results[0];
    assert_eq!(jane.email, "jane.doe@acme.com");
    assert_eq!(jane.profile_url, Some(server.url("/in/janedoe")));
    assert_eq!(jane.confidence, 30);
    assert_eq!(jane.succeeded_layers, vec![Layer::DirectCheck]);

    let bob = &report.results[1];
    assert_eq!(bob.email, "bob@acme.com");
    assert_eq!(
        bob.profile_url.as_deref(),
        Some("https://www.linkedin.com/in/bob-smith")
    );
    assert_eq!(bob.confidence, 40);
    assert_eq!(
        bob.failed_layers,
        vec![Layer::DirectCheck, Layer::SearchScrape, Layer::DomainHeuristic]
    );

    assert_eq!(report.remaining_credits, 49);
    assert_eq!(engine.last_report().await, report);
}

#[tokio::test]
async fn test_every_layer_misses() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(
            r#"<a href="https://www.linkedin.com/company/acme">Acme</a>"#,
        );
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(API_PATH);
        then.status(200).json_body(json!({"people": []}));
    });

    let config = config_for(&server, 50);
    let engine = engine_for(&config);

    let report = engine
        .check_emails(&request(&["ghost@acme.com"], Some("test-key")))
        .await;

    // layer 2 與 layer 4 各查一次
    search_mock.assert_hits(2);
    api_mock.assert_hits(1);

    let record = &report.results[0];
    assert!(record.profile_url.is_none());
    assert_eq!(record.confidence, 0);
    assert!(record.succeeded_layers.is_empty());
    assert_eq!(record.failed_layers, Layer::ALL.to_vec());
    assert_eq!(report.remaining_credits, 49);
}

#[tokio::test]
async fn test_credits_shared_across_batches() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body("<html></html>");
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(API_PATH);
        then.status(500);
    });

    let config = config_for(&server, 2);
    let engine = engine_for(&config);

    let first = engine
        .check_emails(&request(&["a@acme.com"], Some("test-key")))
        .await;
    assert_eq!(first.remaining_credits, 1);

    let second = engine
        .check_emails(&request(&["b@acme.com", "c@acme.com", "d@acme.com"], Some("test-key")))
        .await;
    assert_eq!(second.remaining_credits, 0);
    assert_eq!(second.results.len(), 3);

    // 失敗的呼叫也扣 credit，用完後不再呼叫
    api_mock.assert_hits(2);
    assert_eq!(engine.remaining_credits(), 0);
}

#[tokio::test]
async fn test_without_key_paid_api_is_never_called() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "acme linkedin");
        then.status(200)
            .body(r#"<a href="https://www.linkedin.com/in/acme-ceo">CEO</a>"#);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "\"who@acme.com\" site:linkedin.com");
        then.status(200).body("<html></html>");
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(API_PATH);
        then.status(200).json_body(json!({"people": []}));
    });

    let config = config_for(&server, 50);
    let engine = engine_for(&config);

    let report = engine.check_emails(&request(&["who@acme.com"], None)).await;

    api_mock.assert_hits(0);
    assert_eq!(report.remaining_credits, 50);
    assert_eq!(report.results[0].confidence, 20);
    assert_eq!(report.results[0].succeeded_layers, vec![Layer::DomainHeuristic]);
}

#[tokio::test]
async fn test_last_report_before_any_batch() {
    let server = MockServer::start();
    let config = config_for(&server, 7);
    let engine = engine_for(&config);

    let report = engine.last_report().await;
    assert!(report.results.is_empty());
    assert_eq!(report.remaining_credits, 7);
}

#[tokio::test]
async fn test_report_export_to_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/in/jane.doe");
        then.status(200);
    });

    let config = config_for(&server, 50);
    let engine = engine_for(&config);
    let report = engine
        .check_emails(&request(&["jane.doe@acme.com", "broken"], None))
        .await;

    let storage = LocalStorage::new(output_path.clone());
    let formats = vec!["json".to_string(), "csv".to_string()];
    write_report(&storage, &report, &formats).await.unwrap();

    let json_path = temp_dir.path().join(JSON_REPORT_FILE);
    let saved: BatchReport = serde_json::from_slice(&std::fs::read(json_path).unwrap()).unwrap();
    assert_eq!(saved, report);

    let csv = std::fs::read_to_string(temp_dir.path().join(CSV_REPORT_FILE)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("jane.doe@acme.com,"));
    assert!(lines[1].contains(",30,"));
    assert!(lines[2].starts_with("broken,,,"));
    assert!(lines[2].contains("Invalid email"));
}
