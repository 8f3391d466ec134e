//! Data elements: the selectable prefill sources
//!
//! Element JSON shape is consumed by the front end:
//! `{ "label": ..., "value": { "formId": ..., "field": ... }, "type": ... }`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name -> elements in that category
pub type GroupedElements = BTreeMap<String, Vec<DataElement>>;

/// Type tag of a data element
///
/// The five built-in tags are fixed and their names are reserved. Custom
/// providers introduce their own tags with [`ElementType::custom`], which maps
/// a reserved name back to its built-in variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Field of a form listed directly in the prerequisites
    Direct,

    /// Field of a form reachable through a chain of prerequisites
    Transitive,

    /// Action property
    Action,

    /// Client organization property
    Client,

    /// Global property
    Global,

    /// Tag introduced by a custom provider
    Custom(String),
}

impl ElementType {
    /// Get the tag as its serialized string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Direct => "direct",
            Self::Transitive => "transitive",
            Self::Action => "action",
            Self::Client => "client",
            Self::Global => "global",
            Self::Custom(tag) => tag,
        }
    }

    /// Tag for a custom provider
    ///
    /// A built-in name yields the built-in variant, never `Custom`.
    pub fn custom(tag: impl AsRef<str>) -> Self {
        Self::from(tag.as_ref())
    }

    /// Whether this is one of the five built-in tags
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        match tag {
            "direct" => Self::Direct,
            "transitive" => Self::Transitive,
            "action" => Self::Action,
            "client" => Self::Client,
            "global" => Self::Global,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ElementType> for String {
    fn from(tag: ElementType) -> Self {
        match tag {
            ElementType::Custom(tag) => tag,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque reference to the value an element prefills from
///
/// `form_id` is either the id of a source form or a symbolic source id
/// (`action`, `client`, `global`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementValue {
    pub form_id: String,
    pub field: String,
}

impl ElementValue {
    pub fn new(form_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            field: field.into(),
        }
    }
}

/// One selectable prefill source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataElement {
    /// Human-readable label, also the search target
    pub label: String,

    /// What the element refers to
    pub value: ElementValue,

    /// Type tag
    #[serde(rename = "type")]
    pub element_type: ElementType,
}

impl DataElement {
    /// Create a new data element
    pub fn new(label: impl Into<String>, value: ElementValue, element_type: ElementType) -> Self {
        Self {
            label: label.into(),
            value,
            element_type,
        }
    }
}
