//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl → store → index → query cycle end-to-end.

use ripple_search::config::{parse_config, Config};
use ripple_search::crawler::{crawl, Coordinator};
use ripple_search::index::IndexEngine;
use ripple_search::search::SearchService;
use ripple_search::storage::{DocumentStore, JsonFileStore};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `seed` into `documents_dir`
fn create_test_config(
    seed: &str,
    keyword: &str,
    max_depth: u32,
    max_pages: usize,
    documents_dir: &Path,
) -> Config {
    let toml = format!(
        r#"
[crawler]
seed-url = "{seed}"
keyword = "{keyword}"
max-depth = {max_depth}
max-pages = {max_pages}
max-concurrent-fetches = 4
fetch-timeout-ms = 5000

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[links]
path-prefix = "/wiki/"

[store]
documents-dir = '{dir}'
"#,
        dir = documents_dir.display()
    );

    parse_config(&toml).expect("test config should be valid")
}

/// Builds an HTML page with the given paragraph text and links
fn page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<li><a href=\"{}\">next</a></li>", href))
        .collect();
    format!(
        "<html><head><title>Test</title><script>var ignored = 1;</script></head>\
         <body><p>{}</p><ul>{}</ul></body></html>",
        text, anchors
    )
}

/// Mounts a page at `route` that must be fetched exactly `expected` times
async fn mount_page(server: &MockServer, route: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_then_search() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/wiki/Rust",
        page(
            "Rust is a systems language. Rust has ownership.",
            &["/wiki/Cargo", "/wiki/Ownership", "/wiki/Talk:Rust", "https://elsewhere.test/wiki/Rust"],
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/wiki/Cargo",
        page("Cargo builds Rust crates. It downloads dependencies.", &["/wiki/Rust"]),
        1,
    )
    .await;
    mount_page(
        &server,
        "/wiki/Ownership",
        page("Ownership is checked at compile time. Rust enforces it.", &["/wiki/Cargo"]),
        1,
    )
    .await;

    let seed = format!("{}/wiki/Rust", server.uri());
    let config = create_test_config(&seed, "rust", 3, 10, dir.path());

    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run().await.unwrap();

    assert_eq!(outcome.documents_retrieved, 3);
    assert!(!outcome.budget_exhausted);
    assert_eq!(outcome.visited.len(), 3);
    assert!(outcome.finished_at >= outcome.started_at);

    let store = JsonFileStore::new(dir.path());
    assert_eq!(store.count().unwrap(), 3);

    let seed_document = store.load(&seed).unwrap();
    assert!(seed_document.content.contains("Rust is a systems language."));
    assert!(!seed_document.content.contains("ignored"));

    let service = SearchService::from_store(&store, IndexEngine::with_bm25(1.5, 0.75)).unwrap();
    let hits = service.query("cargo", 10);
    assert_eq!(hits.len(), 1);

    let cargo = &hits[0];
    assert_eq!(cargo.url, format!("{}/wiki/Cargo", server.uri()));
    assert_eq!(cargo.title, "Cargo");
    assert_eq!(cargo.snippet, "<b>Cargo</b> builds Rust crates...");

    assert!(service.query("", 10).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cycle_is_crawled_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/wiki/A", page("apple one", &["/wiki/B"]), 1).await;
    mount_page(&server, "/wiki/B", page("apple two", &["/wiki/C"]), 1).await;
    mount_page(&server, "/wiki/C", page("apple three", &["/wiki/A", "/wiki/B"]), 1).await;

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "apple", 5, 10, dir.path());

    let documents = crawl(&config).await.unwrap();

    assert_eq!(documents, 3);
    assert_eq!(JsonFileStore::new(dir.path()).count().unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_page_budget_of_one() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let children = ["/wiki/B", "/wiki/C", "/wiki/D", "/wiki/E", "/wiki/F"];
    mount_page(&server, "/wiki/A", page("apple", &children), 1).await;
    for child in children {
        mount_page(&server, child, page("apple", &[]), 0).await;
    }

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "apple", 3, 1, dir.path());

    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.documents_retrieved, 1);
    assert!(outcome.budget_exhausted);

    let stored = JsonFileStore::new(dir.path()).load_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].url, seed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_budget_caps_documents() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let children: Vec<String> = (0..12).map(|i| format!("/wiki/P{}", i)).collect();
    let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();
    mount_page(&server, "/wiki/A", page("apple", &child_refs), 1).await;
    for child in &child_refs {
        Mock::given(method("GET"))
            .and(path(*child))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page("apple", &[]), "text/html"))
            .mount(&server)
            .await;
    }

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "apple", 2, 5, dir.path());

    let documents = crawl(&config).await.unwrap();

    assert_eq!(documents, 5);
    assert_eq!(JsonFileStore::new(dir.path()).count().unwrap(), 5);
}

#[tokio::test]
async fn test_keyword_gate() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/wiki/A", page("All about APPLES", &["/wiki/B", "/wiki/C"]), 1).await;
    mount_page(&server, "/wiki/B", page("Nothing to see", &["/wiki/D"]), 1).await;
    mount_page(&server, "/wiki/C", page("apple pie", &[]), 1).await;
    mount_page(&server, "/wiki/D", page("apple tree", &[]), 0).await;

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "Apple", 5, 10, dir.path());

    let documents = crawl(&config).await.unwrap();

    assert_eq!(documents, 3);
    let store = JsonFileStore::new(dir.path());
    assert!(store.load(&format!("{}/wiki/B", server.uri())).is_ok());
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/wiki/A", page("apple", &["/wiki/B"]), 1).await;
    mount_page(&server, "/wiki/B", page("apple", &["/wiki/C"]), 1).await;
    mount_page(&server, "/wiki/C", page("apple", &[]), 0).await;

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "apple", 1, 10, dir.path());

    let documents = crawl(&config).await.unwrap();

    assert_eq!(documents, 2);
}

#[tokio::test]
async fn test_failed_pages_are_isolated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/wiki/A",
        page("apple", &["/wiki/Missing", "/wiki/Broken", "/wiki/Image", "/wiki/B"]),
        1,
    )
    .await;
    mount_page(&server, "/wiki/B", page("apple", &[]), 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 1, 2], "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/wiki/A", server.uri());
    let config = create_test_config(&seed, "apple", 3, 10, dir.path());

    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.documents_retrieved, 2);
    assert_eq!(outcome.visited.len(), 5);
    assert_eq!(JsonFileStore::new(dir.path()).count().unwrap(), 2);
}

#[tokio::test]
async fn test_unreachable_seed_retrieves_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let seed = format!("{}/wiki/Nowhere", server.uri());
    let config = create_test_config(&seed, "apple", 3, 10, dir.path());

    assert_eq!(crawl(&config).await.unwrap(), 0);
    assert_eq!(JsonFileStore::new(dir.path()).count().unwrap(), 0);
}
