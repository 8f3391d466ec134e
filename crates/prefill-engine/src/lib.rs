//! Prefill engine - data source resolution
//!
//! This crate implements the data source resolution engine:
//! - The `DataSourceProvider` extension point and the built-in providers
//! - The append-only provider registry
//! - Resolution of a dependency context into flat and grouped elements
//! - Filtering and display grouping for interactive browsing
//! - Per-session prefill mappings

pub mod category;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod engine;
pub mod selector;
pub mod prefill;

pub use provider::{DataSourceProvider, ProviderError};
pub use providers::{FixedPropertiesProvider, FormFieldsProvider};
pub use registry::ProviderRegistry;
pub use engine::{resolve_data_elements, ResolutionEngine, ResolutionResult, ResolveError};
pub use selector::{filter_elements, group_by_display_category, display_category, Selector};
pub use prefill::PrefillSession;
