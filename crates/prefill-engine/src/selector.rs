//! Filtering and display grouping for browsing resolved sources
//!
//! Display grouping is derived from element type tags alone. It does not reuse
//! the engine's provider grouping.

use crate::category::{
    ACTION_PROPERTIES, CLIENT_ORGANIZATION_PROPERTIES, DIRECT_DEPENDENCIES, DISPLAY_ORDER, GLOBAL,
    TRANSITIVE_DEPENDENCIES, UNCATEGORIZED,
};
use prefill_core::{DataElement, ElementType};
use std::collections::BTreeMap;

/// Display category -> elements in that category
pub type DisplayGroups<'a> = BTreeMap<&'static str, Vec<&'a DataElement>>;

/// Display category for a type tag
///
/// Custom tags fall back to the empty category.
pub fn display_category(element_type: &ElementType) -> &'static str {
    match element_type {
        ElementType::Direct => DIRECT_DEPENDENCIES,
        ElementType::Transitive => TRANSITIVE_DEPENDENCIES,
        ElementType::Action => ACTION_PROPERTIES,
        ElementType::Client => CLIENT_ORGANIZATION_PROPERTIES,
        ElementType::Global => GLOBAL,
        ElementType::Custom(_) => UNCATEGORIZED,
    }
}

/// Keep elements whose label contains `query`, ignoring case
///
/// An empty query keeps everything.
pub fn filter_elements<'a>(elements: &'a [DataElement], query: &str) -> Vec<&'a DataElement> {
    if query.is_empty() {
        return elements.iter().collect();
    }

    let needle = query.to_lowercase();
    elements
        .iter()
        .filter(|element| element.label.to_lowercase().contains(&needle))
        .collect()
}

/// Group elements by display category, preserving element order within a category
///
/// Only categories with at least one element are present.
pub fn group_by_display_category<'a, I>(elements: I) -> DisplayGroups<'a>
where
    I: IntoIterator<Item = &'a DataElement>,
{
    let mut grouped = DisplayGroups::new();
    for element in elements {
        grouped
            .entry(display_category(&element.element_type))
            .or_default()
            .push(element);
    }
    grouped
}

/// Iterate display groups in display order (built-ins first, fallback last)
pub fn in_display_order<'g, 'a>(
    groups: &'g DisplayGroups<'a>,
) -> impl Iterator<Item = (&'static str, &'g [&'a DataElement])> + 'g {
    DISPLAY_ORDER
        .iter()
        .filter_map(move |&category| groups.get(category).map(|elements| (category, elements.as_slice())))
}

/// Interactive source picker state
///
/// Holds the sources offered for one field, the search query and at most one
/// expanded category. State lives only as long as the picker.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    sources: Vec<DataElement>,
    query: String,
    expanded: Option<String>,
}

impl Selector {
    /// Create a picker over resolved sources
    pub fn new(sources: Vec<DataElement>) -> Self {
        Self {
            sources,
            query: String::new(),
            expanded: None,
        }
    }

    /// All sources, unfiltered
    pub fn sources(&self) -> &[DataElement] {
        &self.sources
    }

    /// Current search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Currently expanded category
    pub fn expanded_category(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Expand a category, or collapse it if it is already expanded
    pub fn toggle_category(&mut self, category: &str) {
        if self.expanded.as_deref() == Some(category) {
            self.expanded = None;
        } else {
            self.expanded = Some(category.to_string());
        }
    }

    /// Sources matching the query
    pub fn filtered(&self) -> Vec<&DataElement> {
        filter_elements(&self.sources, &self.query)
    }

    /// Matching sources grouped by display category
    pub fn groups(&self) -> DisplayGroups<'_> {
        group_by_display_category(self.filtered())
    }

    /// Matching sources in the expanded category
    pub fn expanded_elements(&self) -> Vec<&DataElement> {
        match self.expanded.as_deref() {
            Some(category) => self.groups().remove(category).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Pick the `index`-th visible source of the expanded category
    pub fn select(&self, index: usize) -> Option<&DataElement> {
        self.expanded_elements().get(index).copied()
    }
}
