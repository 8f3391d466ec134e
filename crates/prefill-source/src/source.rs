//! Graph source trait and the one-shot graph loader

use chrono::{DateTime, Utc};
use prefill_graph::{FormGraph, GraphDocument};

/// Errors that can occur when fetching the blueprint graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    #[error("Failed to read {0}: {1}")]
    IoError(String, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Something that can produce a blueprint graph document
#[async_trait::async_trait]
pub trait GraphSource: Send + Sync {
    /// Source kind (e.g., "HTTP", "File")
    fn name(&self) -> &'static str;

    /// Where the document comes from (URL, path, ...)
    fn location(&self) -> String;

    /// Fetch and parse the graph document
    ///
    /// Performs exactly one fetch. Implementations must not retry.
    async fn fetch_graph(&self) -> Result<GraphDocument, FetchError>;
}

/// A graph loaded from a source
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: FormGraph,

    /// "<kind> (<location>)"
    pub source: String,

    pub loaded_at: DateTime<Utc>,
}

/// Load the blueprint graph from `source`
///
/// On failure no graph is produced; callers decide whether to try again.
pub async fn load_graph(source: &dyn GraphSource) -> Result<LoadedGraph, FetchError> {
    let origin = format!("{} ({})", source.name(), source.location());
    tracing::info!(source = %origin, "loading blueprint graph");

    let document = match source.fetch_graph().await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(source = %origin, error = %e, "failed to load blueprint graph");
            return Err(e);
        }
    };

    let graph = FormGraph::from_document(document);
    tracing::info!(source = %origin, forms = graph.len(), "loaded blueprint graph");

    Ok(LoadedGraph {
        graph,
        source: origin,
        loaded_at: Utc::now(),
    })
}
