//! Prefill Core
//!
//! Stable domain types shared by every prefill crate.
//! Element type tags and value field names are serialized into the JSON the
//! front end consumes - never rename them.

pub mod form;
pub mod element;
pub mod config;

pub use form::{FormNode, FormData, FORM_FIELDS, form_fields, null_as_default};
pub use element::{DataElement, ElementType, ElementValue, GroupedElements};
pub use config::{Config, ConfigError, EndpointConfig, ServerConfig};
