//! Form nodes as they appear in the blueprint graph document

use serde::{Deserialize, Deserializer, Serialize};

/// Field keys every form exposes for prefill.
///
/// This is a fixed inventory, not derived from the form's component schema.
pub const FORM_FIELDS: [&str; 3] = ["email", "dynamic_checkbox_group", "dynamic_object"];

/// Get the prefillable field keys of a form
pub fn form_fields(_form: &FormNode) -> &'static [&'static str] {
    &FORM_FIELDS
}

/// A form in the blueprint graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormNode {
    /// Unique node identifier
    pub id: String,

    /// Form payload (name and prerequisite edges); `null` reads as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: FormData,
}

/// Node payload fields we care about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Ids of the forms this form depends on, in declaration order
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

/// Deserialize a field, reading an explicit `null` as the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormNode {
    /// Create a form node with no name and no prerequisites
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: FormData::default(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.data.name = Some(name.into());
        self
    }

    /// Set the prerequisite ids
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Name shown to users, falling back to the id when the form is unnamed
    pub fn display_name(&self) -> &str {
        match self.data.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    /// Prerequisite ids in declaration order
    pub fn prerequisites(&self) -> &[String] {
        &self.data.prerequisites
    }
}
