//! Built-in data source providers

mod fixed;
mod form_fields;

pub use fixed::FixedPropertiesProvider;
pub use form_fields::FormFieldsProvider;
