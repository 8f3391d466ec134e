//! Resolution engine
//!
//! Runs every registered provider over a dependency context and aggregates a
//! flat element list plus a category-grouped view.

use crate::provider::ProviderError;
use crate::registry::ProviderRegistry;
use prefill_core::{DataElement, ElementType, GroupedElements};
use prefill_graph::{ContextError, DependencyContext, FormGraph};
use serde::{Deserialize, Serialize};

/// Output of one resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Elements in provider registration order, then per-provider emission order
    pub elements: Vec<DataElement>,

    /// Union of every provider's grouping; later providers win on a name collision
    pub grouped: GroupedElements,
}

impl ResolutionResult {
    /// Elements carrying a given type tag
    pub fn of_type<'a>(&'a self, element_type: &'a ElementType) -> impl Iterator<Item = &'a DataElement> + 'a {
        self.elements
            .iter()
            .filter(move |element| &element.element_type == element_type)
    }

    /// Number of elements carrying a given type tag
    pub fn count_of(&self, element_type: &ElementType) -> usize {
        self.of_type(element_type).count()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no provider produced an element
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Resolve a context against every provider of a registry
///
/// No deduplication across providers. The first provider error aborts the
/// resolution and is returned as-is.
pub fn resolve_data_elements(
    registry: &ProviderRegistry,
    context: &DependencyContext<'_>,
) -> Result<ResolutionResult, ProviderError> {
    let mut result = ResolutionResult::default();

    for provider in registry.providers() {
        let elements = provider.get_elements(context)?;
        let grouped = provider.group_elements(&elements);

        tracing::debug!(
            provider = provider.id(),
            elements = elements.len(),
            categories = grouped.len(),
            "provider resolved"
        );

        result.elements.extend(elements);
        result.grouped.extend(grouped);
    }

    Ok(result)
}

/// Resolution engine bound to a provider registry
#[derive(Debug, Clone, Default)]
pub struct ResolutionEngine {
    registry: ProviderRegistry,
}

impl ResolutionEngine {
    /// Create an engine over a configured registry
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine resolves against
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Append a provider to the engine's registry
    pub fn register(&mut self, provider: impl crate::DataSourceProvider + 'static) {
        self.registry.register(provider);
    }

    /// Resolve a prepared dependency context
    pub fn resolve(&self, context: &DependencyContext<'_>) -> Result<ResolutionResult, ResolveError> {
        let result = resolve_data_elements(&self.registry, context)?;

        tracing::debug!(
            form = %context.current_form.id,
            elements = result.len(),
            "resolved data sources"
        );

        Ok(result)
    }

    /// Build the context for a form of `graph` and resolve it
    pub fn resolve_for_form(&self, graph: &FormGraph, form_id: &str) -> Result<ResolutionResult, ResolveError> {
        let context = DependencyContext::for_form(graph, form_id)?;
        self.resolve(&context)
    }
}
