//! Providers with a constant property inventory
//!
//! Action, client organization and global properties are not derived from the
//! graph: each provider emits the same elements for every context.

use crate::category::{ACTION_PROPERTIES, CLIENT_ORGANIZATION_PROPERTIES, GLOBAL};
use crate::provider::{DataSourceProvider, ProviderError};
use prefill_core::{DataElement, ElementType, ElementValue, GroupedElements};
use prefill_graph::DependencyContext;

const ACTION_FIELDS: &[&str] = &["action_type", "created_at", "updated_at"];
const CLIENT_ORG_FIELDS: &[&str] = &["org_name", "org_id", "industry"];
const GLOBAL_FIELDS: &[&str] = &[
    "organization_name",
    "timezone",
    "country",
    "current_user_id",
    "current_timestamp",
];

/// Provider emitting a fixed list of properties under one category
#[derive(Debug, Clone)]
pub struct FixedPropertiesProvider {
    id: &'static str,
    name: &'static str,

    /// Category name; also the label prefix
    category: &'static str,

    /// Symbolic id stored as the element value's form id
    source_id: &'static str,

    element_type: ElementType,
    fields: &'static [&'static str],
}

impl FixedPropertiesProvider {
    /// Action properties (`action-properties`)
    pub fn action_properties() -> Self {
        Self {
            id: "action-properties",
            name: "Action Properties",
            category: ACTION_PROPERTIES,
            source_id: "action",
            element_type: ElementType::Action,
            fields: ACTION_FIELDS,
        }
    }

    /// Client organization properties (`client-org-properties`)
    pub fn client_org_properties() -> Self {
        Self {
            id: "client-org-properties",
            name: "Client Organization Properties",
            category: CLIENT_ORGANIZATION_PROPERTIES,
            source_id: "client",
            element_type: ElementType::Client,
            fields: CLIENT_ORG_FIELDS,
        }
    }

    /// Global data (`global-data`)
    pub fn global_data() -> Self {
        Self {
            id: "global-data",
            name: "Global Data",
            category: GLOBAL,
            source_id: "global",
            element_type: ElementType::Global,
            fields: GLOBAL_FIELDS,
        }
    }

    /// Property names this provider emits
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }
}

impl DataSourceProvider for FixedPropertiesProvider {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn get_elements(&self, _context: &DependencyContext<'_>) -> Result<Vec<DataElement>, ProviderError> {
        Ok(self
            .fields
            .iter()
            .map(|field| {
                DataElement::new(
                    format!("{}: {}", self.category, field),
                    ElementValue::new(self.source_id, *field),
                    self.element_type.clone(),
                )
            })
            .collect())
    }

    fn group_elements(&self, elements: &[DataElement]) -> GroupedElements {
        let mut grouped = GroupedElements::new();
        grouped.insert(self.category.to_string(), elements.to_vec());
        grouped
    }
}
