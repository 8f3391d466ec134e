//! HTTP graph source
//!
//! Issues a single GET against the blueprint graph endpoint:
//! `{base_url}/api/v1/{tenant_id}/actions/blueprints/{blueprint_id}/graph`

use crate::source::{FetchError, GraphSource};
use prefill_core::EndpointConfig;
use prefill_graph::GraphDocument;
use reqwest::header::ACCEPT;
use std::time::Duration;

const USER_AGENT: &str = concat!("prefill/", env!("CARGO_PKG_VERSION"));

/// Graph source backed by the blueprint HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpGraphSource {
    client: reqwest::Client,
    url: String,
}

impl HttpGraphSource {
    /// Create a source for the configured endpoint
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            url: endpoint.graph_url(),
        })
    }

    /// Create a source for an explicit URL with a caller-supplied client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl GraphSource for HttpGraphSource {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_graph(&self) -> Result<GraphDocument, FetchError> {
        tracing::debug!(url = %self.url, "fetching blueprint graph");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        GraphDocument::from_slice(&bytes).map_err(|e| FetchError::InvalidDocument(e.to_string()))
    }
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(e.to_string())
    } else {
        FetchError::NetworkError(e.to_string())
    }
}

/// Pull `error` out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
