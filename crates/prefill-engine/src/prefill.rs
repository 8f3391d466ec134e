//! Per-session prefill mappings
//!
//! Mappings live in memory only and are dropped with the session.

use prefill_core::{form_fields, DataElement, ElementValue, FormNode};
use std::collections::HashMap;

/// Field -> selected source for every form touched in a session
///
/// A field can be unmapped (never set), mapped, or explicitly cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefillSession {
    mappings: HashMap<String, HashMap<String, Option<ElementValue>>>,
}

impl PrefillSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a form field to a source value
    pub fn set(&mut self, form_id: &str, field: &str, value: ElementValue) {
        tracing::debug!(form = form_id, field, source = %value.form_id, "prefill mapping set");
        self.fields_mut(form_id).insert(field.to_string(), Some(value));
    }

    /// Map a form field to the value of a selected element
    pub fn select(&mut self, form_id: &str, field: &str, element: &DataElement) {
        self.set(form_id, field, element.value.clone());
    }

    /// Clear a field's mapping
    pub fn clear(&mut self, form_id: &str, field: &str) {
        tracing::debug!(form = form_id, field, "prefill mapping cleared");
        self.fields_mut(form_id).insert(field.to_string(), None);
    }

    /// Current mapping of a field, if any
    pub fn mapping(&self, form_id: &str, field: &str) -> Option<&ElementValue> {
        self.mappings
            .get(form_id)
            .and_then(|fields| fields.get(field))
            .and_then(Option::as_ref)
    }

    /// Every prefillable field of a form with its current mapping, in field order
    pub fn field_mappings(&self, form: &FormNode) -> Vec<(&'static str, Option<&ElementValue>)> {
        form_fields(form)
            .iter()
            .map(|&field| (field, self.mapping(&form.id, field)))
            .collect()
    }

    /// Number of fields currently mapped for a form
    pub fn mapped_count(&self, form_id: &str) -> usize {
        self.mappings
            .get(form_id)
            .map(|fields| fields.values().filter(|value| value.is_some()).count())
            .unwrap_or(0)
    }

    /// Human-readable description of a mapping
    pub fn describe(value: &ElementValue) -> String {
        let source = if value.form_id == "global" { "Global" } else { value.form_id.as_str() };
        format!("Prefilled from {}: {}", source, value.field)
    }

    fn fields_mut(&mut self, form_id: &str) -> &mut HashMap<String, Option<ElementValue>> {
        self.mappings.entry(form_id.to_string()).or_default()
    }
}
