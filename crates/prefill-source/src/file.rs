//! Local file graph source

use crate::source::{FetchError, GraphSource};
use prefill_graph::GraphDocument;
use std::path::{Path, PathBuf};

/// Graph source reading a saved graph document from disk
#[derive(Debug, Clone)]
pub struct FileGraphSource {
    path: PathBuf,
}

impl FileGraphSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl GraphSource for FileGraphSource {
    fn name(&self) -> &'static str {
        "File"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_graph(&self) -> Result<GraphDocument, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::IoError(self.location(), e.to_string()))?;

        GraphDocument::from_slice(&bytes).map_err(|e| FetchError::InvalidDocument(e.to_string()))
    }
}
