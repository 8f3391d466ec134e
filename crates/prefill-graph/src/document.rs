//! Blueprint graph document parsing
//!
//! Parses the graph document served by the blueprint endpoint. Only `nodes`
//! is used; edges, forms and layout data are ignored.

use prefill_core::FormNode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Blueprint graph document (subset of fields we care about)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Form nodes in document order; missing or `null` reads as empty
    #[serde(default, deserialize_with = "prefill_core::null_as_default")]
    pub nodes: Vec<FormNode>,
}

impl GraphDocument {
    /// Create a document from a list of nodes
    pub fn new(nodes: Vec<FormNode>) -> Self {
        Self { nodes }
    }

    /// Load document from file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DocumentError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse document from JSON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::ParseError(e.to_string()))
    }

    /// Parse document from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        serde_json::from_slice(bytes).map_err(|e| DocumentError::ParseError(e.to_string()))
    }
}

/// Graph document errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read graph document {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse graph JSON: {0}")]
    ParseError(String),
}
