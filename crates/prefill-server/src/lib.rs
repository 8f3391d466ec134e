//! Blueprint graph endpoint
//!
//! Serves a saved blueprint graph document over HTTP for local development:
//!
//! - `GET /api/v1/{tenant}/actions/blueprints/{blueprint}/graph` returns the
//!   document read fresh from disk on every request
//! - `OPTIONS` on any path is answered with an empty `204`
//! - everything else, `HEAD` on the graph route included, is a JSON `404`
//!
//! Every response carries permissive CORS headers.

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Route of the graph resource
pub const GRAPH_ROUTE: &str = "/api/v1/:tenant_id/actions/blueprints/:blueprint_id/graph";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    graph_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(graph_path: impl Into<PathBuf>) -> Self {
        Self {
            graph_path: Arc::new(graph_path.into()),
        }
    }

    pub fn graph_path(&self) -> &std::path::Path {
        &self.graph_path
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}: {1}")]
    InvalidListenAddress(String, String),

    #[error("Failed to bind {0}: {1}")]
    Bind(String, std::io::Error),

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Create the graph endpoint router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(GRAPH_ROUTE, get(get_graph).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen` and serve until `shutdown` resolves
pub async fn serve(
    listen: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let addr: std::net::SocketAddr = listen
        .parse()
        .map_err(|e: std::net::AddrParseError| ServerError::InvalidListenAddress(listen.to_string(), e.to_string()))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(addr.to_string(), e))?;

    serve_listener(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_listener(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Graph server listening on http://{}", addr);
    }
    tracing::info!("Serving {}", state.graph_path().display());

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

async fn get_graph(
    method: Method,
    State(state): State<AppState>,
    Path((tenant_id, blueprint_id)): Path<(String, String)>,
) -> Response {
    // axum routes HEAD to GET handlers; only GET is served
    if method != Method::GET {
        return not_found().await;
    }

    tracing::debug!(tenant = %tenant_id, blueprint = %blueprint_id, "graph requested");

    match tokio::fs::read(state.graph_path()).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(path = %state.graph_path().display(), error = %e, "failed to read graph document");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load graph.json")
        }
    }
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Resource not found!")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Answer preflights and stamp CORS headers on every response
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));

    response
}
