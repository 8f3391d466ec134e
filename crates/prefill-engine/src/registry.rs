//! Append-only provider registry

use crate::provider::DataSourceProvider;
use crate::providers::{FixedPropertiesProvider, FormFieldsProvider};
use std::fmt;
use std::sync::Arc;

/// Ordered collection of data source providers
///
/// Seeded with the four built-ins. Providers can be appended but never removed
/// or reordered; resolution visits them in registration order. Registering
/// takes `&mut self`, so a registry cannot grow while a resolution borrows it.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn DataSourceProvider>>,
}

impl ProviderRegistry {
    /// Create a registry holding the built-in providers
    pub fn new() -> Self {
        Self {
            providers: Self::builtin_providers(),
        }
    }

    /// The built-in providers in registration order
    pub fn builtin_providers() -> Vec<Arc<dyn DataSourceProvider>> {
        vec![
            Arc::new(FormFieldsProvider),
            Arc::new(FixedPropertiesProvider::action_properties()),
            Arc::new(FixedPropertiesProvider::client_org_properties()),
            Arc::new(FixedPropertiesProvider::global_data()),
        ]
    }

    /// Append a provider
    pub fn register(&mut self, provider: impl DataSourceProvider + 'static) {
        self.register_shared(Arc::new(provider));
    }

    /// Append a provider that is shared with other registries
    pub fn register_shared(&mut self, provider: Arc<dyn DataSourceProvider>) {
        if self.get(provider.id()).is_some() {
            tracing::warn!(provider = provider.id(), "registering provider with duplicate id");
        }

        tracing::debug!(provider = provider.id(), name = provider.name(), "registered data source provider");
        self.providers.push(provider);
    }

    /// Providers in registration order
    pub fn providers(&self) -> impl Iterator<Item = &dyn DataSourceProvider> + '_ {
        self.providers.iter().map(|provider| provider.as_ref())
    }

    /// First provider registered under `id`
    pub fn get(&self, id: &str) -> Option<&dyn DataSourceProvider> {
        self.providers().find(|provider| provider.id() == id)
    }

    /// Provider ids in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.providers().map(|provider| provider.id()).collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}
