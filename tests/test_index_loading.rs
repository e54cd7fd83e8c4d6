//! Integration tests for loading search indexes from files and over HTTP.

use mockito::Server;
use std::io::Write;
use std::sync::Arc;
use stomata_docs_mcp::client::{AsyncIndexClient, AsyncIndexClientImpl};
use stomata_docs_mcp::domain::Category;
use stomata_docs_mcp::models::parse_search_index;
use stomata_docs_mcp::repositories::{DocsRepository, SourceDocsRepository};
use stomata_docs_mcp::{IndexClient, IndexError, IndexSource, Violation};

mod mocks;
use mocks::FIXTURE;

#[test]
fn test_fixture_parses_leniently() {
    let parsed = parse_search_index(FIXTURE, false).unwrap();

    assert_eq!(parsed.document.len(), 71);
    assert_eq!(parsed.report.record_count, 71);
    assert_eq!(parsed.report.count_of(Category::Page), 34);
    assert_eq!(parsed.report.count_of(Category::Type), 22);
    assert_eq!(parsed.report.count_of(Category::Function), 9);
    assert_eq!(parsed.report.count_of(Category::Section), 6);

    // The Home page record has an empty location
    assert_eq!(
        parsed.report.violations,
        vec![Violation::EmptyLocation { index: 2 }]
    );
    assert_eq!(parsed.document.docs[2].location, "");
    assert_eq!(parsed.document.docs[2].title, "Home");
}

#[test]
fn test_fixture_rejected_in_strict_mode() {
    match parse_search_index(FIXTURE, true) {
        Err(IndexError::Invalid { violations }) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].record_index(), Some(2));
        }
        other => panic!("expected strict rejection, got {:?}", other.map(|p| p.report)),
    }
}

#[test]
fn test_records_keep_index_order() {
    let parsed = parse_search_index(FIXTURE, false).unwrap();
    let docs = &parsed.document.docs;

    assert_eq!(docs[0].title, "StomtaModels.jl");
    assert_eq!(docs[16].title, "StomataModels.ESMMedlyn");
    assert_eq!(docs[34].title, "StomataModels.β_factor");
    assert_eq!(docs[70].location, "API/");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let client = IndexClient::with_options(5, false);
    let parsed = client
        .load(&IndexSource::File(file.path().to_path_buf()))
        .unwrap();

    assert_eq!(parsed.document.len(), 71);
    assert_eq!(client.metrics().index_loads_total(), 1);
    assert_eq!(client.metrics().index_load_errors_total(), 0);
}

#[test]
fn test_load_missing_file() {
    let client = IndexClient::with_options(5, false);
    let result = client.load(&IndexSource::parse("/nonexistent/search_index.js"));

    assert!(matches!(result, Err(IndexError::NotFound(_))));
    assert_eq!(client.metrics().index_load_errors_total(), 1);
}

#[test]
fn test_load_from_url() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/dev/search_index.js")
        .with_status(200)
        .with_header("content-type", "application/javascript")
        .with_body(FIXTURE)
        .create();

    let client = IndexClient::with_options(5, false);
    let source = IndexSource::parse(&format!("{}/dev/search_index.js", server.url()));
    let parsed = client.load(&source).unwrap();

    mock.assert();
    assert_eq!(parsed.document.len(), 71);
    assert!(!parsed.report.is_valid());
}

#[test]
fn test_load_from_url_strict() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/search_index.js")
        .with_status(200)
        .with_body(FIXTURE)
        .create();

    let client = IndexClient::with_options(5, true);
    let source = IndexSource::Url(format!("{}/search_index.js", server.url()));

    assert!(matches!(
        client.load(&source),
        Err(IndexError::Invalid { .. })
    ));
}

#[test]
fn test_load_from_url_not_found() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/search_index.js")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let client = IndexClient::with_options(5, false);
    let source = IndexSource::Url(format!("{}/search_index.js", server.url()));

    match client.load(&source) {
        Err(IndexError::NotFound(message)) => assert_eq!(message, "Not Found"),
        other => panic!("expected NotFound, got {:?}", other.map(|p| p.report)),
    }
}

#[test]
fn test_load_from_url_server_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/search_index.js")
        .with_status(500)
        .with_body("boom")
        .create();

    let client = IndexClient::with_options(5, false);
    let source = IndexSource::Url(format!("{}/search_index.js", server.url()));

    assert!(matches!(
        client.load(&source),
        Err(IndexError::Status { status: 500, .. })
    ));
}

#[test]
fn test_load_from_url_malformed_body() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/search_index.js")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let client = IndexClient::with_options(5, false);
    let source = IndexSource::Url(format!("{}/search_index.js", server.url()));

    assert!(matches!(client.load(&source), Err(IndexError::Malformed(_))));
}

#[tokio::test]
async fn test_source_repository_over_http() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search_index.js")
        .with_status(200)
        .with_body(FIXTURE)
        .expect(1)
        .create_async()
        .await;

    let client = Arc::new(AsyncIndexClientImpl::new(IndexClient::with_options(5, false)))
        as Arc<dyn AsyncIndexClient>;
    let source = IndexSource::Url(format!("{}/search_index.js", server.url()));
    let repo = SourceDocsRepository::new(client, source.clone());

    let snapshot = repo.load().await.unwrap();

    mock.assert_async().await;
    assert_eq!(snapshot.record_count(), 71);
    assert_eq!(snapshot.source(), source.to_string());
    assert_eq!(snapshot.pages(), vec!["Home", "API"]);
}
