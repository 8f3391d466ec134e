//! Graph endpoint tests
//!
//! Router behaviour is checked in-process with `oneshot`; the end-to-end test
//! binds a real listener and loads the graph through the HTTP source.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use prefill_core::EndpointConfig;
use prefill_server::{create_router, serve_listener, AppState};
use prefill_source::{load_graph, FetchError, HttpGraphSource};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tower::ServiceExt;

const GRAPH_URI: &str = "/api/v1/1/actions/blueprints/bp_01jk766tckfwx84xjcxazggzyc/graph";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/graph.json")
}

async fn send(state: AppState, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    create_router(state).oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn test_graph_served_verbatim() {
    let response = send(AppState::new(fixture_path()), Method::GET, GRAPH_URI).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_cors(&response);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let expected = std::fs::read(fixture_path()).unwrap();
    assert_eq!(bytes.as_ref(), expected.as_slice());
}

#[tokio::test]
async fn test_any_tenant_and_blueprint_match() {
    let response = send(
        AppState::new(fixture_path()),
        Method::GET,
        "/api/v1/tenant-9/actions/blueprints/bp_other/graph",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_document_reread_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let state = AppState::new(path.clone());

    std::fs::write(&path, r#"{"nodes": []}"#).unwrap();
    let first = body_json(send(state.clone(), Method::GET, GRAPH_URI).await).await;

    std::fs::write(&path, r#"{"nodes": [{"id": "form-a"}]}"#).unwrap();
    let second = body_json(send(state, Method::GET, GRAPH_URI).await).await;

    assert_eq!(first["nodes"].as_array().unwrap().len(), 0);
    assert_eq!(second["nodes"][0]["id"], "form-a");
}

#[tokio::test]
async fn test_missing_document_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let response = send(AppState::new(dir.path().join("graph.json")), Method::GET, GRAPH_URI).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_cors(&response);
    assert_eq!(body_json(response).await, serde_json::json!({"error": "Failed to load graph.json"}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = send(AppState::new(fixture_path()), Method::GET, "/api/v1/1/forms").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
    assert_eq!(body_json(response).await, serde_json::json!({"error": "Resource not found!"}));
}

#[tokio::test]
async fn test_post_on_graph_route_is_404() {
    let response = send(AppState::new(fixture_path()), Method::POST, GRAPH_URI).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Resource not found!");
}

#[tokio::test]
async fn test_head_on_graph_route_is_404() {
    let response = send(AppState::new(fixture_path()), Method::HEAD, GRAPH_URI).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
}

#[tokio::test]
async fn test_preflight_is_204_everywhere() {
    for uri in [GRAPH_URI, "/anything/else"] {
        let response = send(AppState::new(fixture_path()), Method::OPTIONS, uri).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}

// =============================================================================
// End to end
// =============================================================================

async fn spawn_server(state: AppState) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        serve_listener(listener, state, async {
            rx.await.ok();
        })
        .await
        .unwrap();
    });

    (base_url, tx)
}

fn endpoint(base_url: String) -> EndpointConfig {
    EndpointConfig {
        base_url,
        timeout_secs: 5,
        ..EndpointConfig::default()
    }
}

#[tokio::test]
async fn test_http_source_loads_fixture() {
    let (base_url, shutdown) = spawn_server(AppState::new(fixture_path())).await;
    let source = HttpGraphSource::new(&endpoint(base_url)).unwrap();

    let loaded = load_graph(&source).await.unwrap();

    assert_eq!(loaded.graph.len(), 6);
    let form_f = loaded
        .graph
        .forms()
        .iter()
        .find(|form| form.display_name() == "Form F")
        .unwrap();
    let transitive: Vec<&str> = loaded
        .graph
        .transitive_dependencies_of(form_f)
        .iter()
        .map(|form| form.display_name())
        .collect();
    assert_eq!(transitive, vec!["Form D", "Form B", "Form A", "Form E", "Form C"]);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn test_http_source_reports_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, shutdown) = spawn_server(AppState::new(dir.path().join("graph.json"))).await;
    let source = HttpGraphSource::new(&endpoint(base_url)).unwrap();

    let result = load_graph(&source).await;

    assert_eq!(
        result.unwrap_err(),
        FetchError::Status {
            status: 500,
            message: "Failed to load graph.json".to_string(),
        }
    );
    shutdown.send(()).ok();
}

#[test]
fn test_fixture_parses() {
    let document = prefill_graph::GraphDocument::from_file(&fixture_path()).unwrap();
    assert_eq!(document.nodes.len(), 6);
}
