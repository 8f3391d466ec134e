//! Data source provider trait

use prefill_core::{DataElement, GroupedElements};
use prefill_graph::DependencyContext;

/// Errors a provider can raise while producing elements
///
/// A provider error fails the whole resolution; no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider '{provider}' received a malformed context: {message}")]
    MalformedContext { provider: String, message: String },

    #[error("Provider '{provider}' failed: {message}")]
    Failed { provider: String, message: String },
}

impl ProviderError {
    /// Create a generic failure for a provider
    pub fn failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// A unit producing selectable data elements plus its own category grouping
///
/// Implement this to add a new kind of prefill source, then append it to a
/// [`ProviderRegistry`](crate::ProviderRegistry).
pub trait DataSourceProvider: Send + Sync {
    /// Stable provider identifier (e.g., "form-fields")
    fn id(&self) -> &str;

    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Produce the elements this provider offers for a context
    ///
    /// Must be pure in the context.
    fn get_elements(&self, context: &DependencyContext<'_>) -> Result<Vec<DataElement>, ProviderError>;

    /// Partition elements produced by this provider into named categories
    fn group_elements(&self, elements: &[DataElement]) -> GroupedElements;
}
