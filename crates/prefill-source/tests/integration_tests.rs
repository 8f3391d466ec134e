//! Integration tests for graph sources
//!
//! HTTP round-trips against a live server are covered by the server crate's
//! tests; here the HTTP source is only exercised against an unreachable port.

use prefill_core::{EndpointConfig, FormNode};
use prefill_source::{load_graph, FetchError, FileGraphSource, GraphSource, HttpGraphSource, MockGraphSource};
use pretty_assertions::assert_eq;
use std::io::Write;

const BLUEPRINT: &str = r#"{
    "id": "bp_test",
    "nodes": [
        {"id": "form-a", "type": "form", "data": {"name": "Form A", "prerequisites": []}},
        {"id": "form-b", "type": "form", "data": {"name": "Form B", "prerequisites": ["form-a"]}},
        {"id": "form-c", "type": "form", "data": {"name": "Form C", "prerequisites": ["form-b"]}}
    ],
    "edges": []
}"#;

fn write_blueprint(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// File source
// =============================================================================

#[tokio::test]
async fn test_file_source_loads_graph() {
    let file = write_blueprint(BLUEPRINT);
    let source = FileGraphSource::new(file.path());

    let loaded = load_graph(&source).await.unwrap();

    assert_eq!(loaded.graph.len(), 3);
    assert_eq!(
        loaded.graph.transitive_dependencies_of(loaded.graph.find_node("form-c").unwrap())
            .iter()
            .map(|n| n.id.as_str())
            .collect::<Vec<_>>(),
        vec!["form-b", "form-a"]
    );
    assert!(loaded.source.starts_with("File ("));
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileGraphSource::new(dir.path().join("missing.json"));

    let result = load_graph(&source).await;
    assert!(matches!(result, Err(FetchError::IoError(_, _))));
}

#[tokio::test]
async fn test_file_source_invalid_json() {
    let file = write_blueprint("{ not json");
    let source = FileGraphSource::new(file.path());

    let result = source.fetch_graph().await;
    assert!(matches!(result, Err(FetchError::InvalidDocument(_))));
}

#[tokio::test]
async fn test_document_without_nodes_is_empty_graph() {
    let file = write_blueprint(r#"{"id": "bp_empty"}"#);
    let loaded = load_graph(&FileGraphSource::new(file.path())).await.unwrap();

    assert!(loaded.graph.is_empty());
}

// =============================================================================
// Mock source
// =============================================================================

#[tokio::test]
async fn test_mock_load_graph() {
    let source = MockGraphSource::from_nodes(vec![
        FormNode::new("form-a").with_name("Form A"),
        FormNode::new("form-b").with_prerequisites(["form-a", "ghost"]),
    ]);

    let before = chrono::Utc::now();
    let loaded = load_graph(&source).await.unwrap();

    assert_eq!(loaded.source, "Mock (memory)");
    assert!(loaded.loaded_at >= before);
    let form_b = loaded.graph.find_node("form-b").unwrap();
    assert_eq!(loaded.graph.direct_dependencies_of(form_b).len(), 1);
}

#[tokio::test]
async fn test_failed_load_is_not_retried() {
    let source = MockGraphSource::new()
        .with_failure(FetchError::Status { status: 500, message: "Failed to load graph.json".to_string() })
        .with_latency(10);

    let result = load_graph(&source).await;

    assert_eq!(
        result.unwrap_err(),
        FetchError::Status { status: 500, message: "Failed to load graph.json".to_string() }
    );
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_each_load_fetches_once() {
    let source = MockGraphSource::from_nodes(vec![FormNode::new("form-a")]);

    load_graph(&source).await.unwrap();
    source.add_node(FormNode::new("form-b")).await;
    let reloaded = load_graph(&source).await.unwrap();

    assert_eq!(reloaded.graph.len(), 2);
    assert_eq!(source.fetch_count(), 2);
}

// =============================================================================
// HTTP source
// =============================================================================

#[tokio::test]
async fn test_http_source_unreachable() {
    // Reserve a port, then free it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let endpoint = EndpointConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        timeout_secs: 2,
        ..EndpointConfig::default()
    };
    let source = HttpGraphSource::new(&endpoint).unwrap();

    let result = load_graph(&source).await;
    assert!(matches!(
        result,
        Err(FetchError::NetworkError(_)) | Err(FetchError::Timeout(_))
    ));
}
