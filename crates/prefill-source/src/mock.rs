//! Mock graph source for testing
//!
//! Serves an in-memory graph document without touching the network or disk.
//! Useful for exercising resolution and the CLI against a fixed blueprint, and
//! for simulating load failures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prefill_core::FormNode;
//! use prefill_source::{load_graph, MockGraphSource};
//!
//! let source = MockGraphSource::from_nodes(vec![
//!     FormNode::new("form-a").with_name("Form A"),
//!     FormNode::new("form-b").with_prerequisites(["form-a"]),
//! ]);
//! let loaded = load_graph(&source).await?;
//! ```
//!
//! ## Simulating Failures
//!
//! ```rust,ignore
//! let source = MockGraphSource::new()
//!     .with_failure(FetchError::NetworkError("connection refused".into()))
//!     .with_latency(100);
//! assert!(load_graph(&source).await.is_err());
//! ```

use crate::source::{FetchError, GraphSource};
use prefill_core::FormNode;
use prefill_graph::GraphDocument;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory graph source
///
/// Cloning shares the document and the fetch counter.
#[derive(Debug, Clone)]
pub struct MockGraphSource {
    document: Arc<RwLock<GraphDocument>>,

    /// Error returned instead of the document
    failure: Option<FetchError>,

    /// Simulated fetch latency (milliseconds)
    latency_ms: u64,

    fetches: Arc<AtomicUsize>,
}

impl MockGraphSource {
    /// Create a mock serving an empty document
    pub fn new() -> Self {
        Self::from_document(GraphDocument::default())
    }

    pub fn from_document(document: GraphDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
            failure: None,
            latency_ms: 0,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_nodes(nodes: Vec<FormNode>) -> Self {
        Self::from_document(GraphDocument::new(nodes))
    }

    /// Fail every fetch with `error`
    pub fn with_failure(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Delay every fetch by `ms` milliseconds
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = ms;
        self
    }

    /// Replace the served document
    pub async fn set_document(&self, document: GraphDocument) {
        *self.document.write().await = document;
    }

    /// Append a node to the served document
    pub async fn add_node(&self, node: FormNode) {
        self.document.write().await.nodes.push(node);
    }

    /// Number of fetches performed so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockGraphSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GraphSource for MockGraphSource {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn fetch_graph(&self) -> Result<GraphDocument, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(self.document.read().await.clone())
    }
}
