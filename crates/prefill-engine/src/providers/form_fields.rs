//! Fields of the forms the current form depends on

use crate::category::{DIRECT_DEPENDENCIES, TRANSITIVE_DEPENDENCIES};
use crate::provider::{DataSourceProvider, ProviderError};
use prefill_core::{form_fields, DataElement, ElementType, ElementValue, FormNode, GroupedElements};
use prefill_graph::DependencyContext;

/// Offers every field of every direct and transitive dependency
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFieldsProvider;

impl FormFieldsProvider {
    pub const ID: &'static str = "form-fields";
    pub const NAME: &'static str = "Form Fields";
}

fn field_elements(form: &FormNode, element_type: ElementType) -> impl Iterator<Item = DataElement> + '_ {
    form_fields(form).iter().map(move |field| {
        DataElement::new(
            format!("{}: {}", form.display_name(), field),
            ElementValue::new(form.id.as_str(), *field),
            element_type.clone(),
        )
    })
}

impl DataSourceProvider for FormFieldsProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_elements(&self, context: &DependencyContext<'_>) -> Result<Vec<DataElement>, ProviderError> {
        let direct = context
            .direct_dependencies
            .iter()
            .flat_map(|dep| field_elements(dep, ElementType::Direct));

        let transitive = context
            .transitive_dependencies
            .iter()
            .flat_map(|dep| field_elements(dep, ElementType::Transitive));

        Ok(direct.chain(transitive).collect())
    }

    fn group_elements(&self, elements: &[DataElement]) -> GroupedElements {
        let mut grouped = GroupedElements::new();
        grouped.insert(DIRECT_DEPENDENCIES.to_string(), Vec::new());
        grouped.insert(TRANSITIVE_DEPENDENCIES.to_string(), Vec::new());

        for element in elements {
            let category = match element.element_type {
                ElementType::Direct => DIRECT_DEPENDENCIES,
                ElementType::Transitive => TRANSITIVE_DEPENDENCIES,
                _ => continue,
            };
            if let Some(bucket) = grouped.get_mut(category) {
                bucket.push(element.clone());
            }
        }

        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prefill_graph::FormGraph;

    fn graph() -> FormGraph {
        FormGraph::new(vec![
            FormNode::new("form-a").with_name("Form A"),
            FormNode::new("form-b").with_name("Form B").with_prerequisites(["form-a"]),
            FormNode::new("form-d").with_prerequisites(["form-b"]),
        ])
    }

    #[test]
    fn elements_for_direct_and_transitive_dependencies() {
        let graph = graph();
        let ctx = DependencyContext::for_form(&graph, "form-d").unwrap();

        let elements = FormFieldsProvider.get_elements(&ctx).unwrap();
        let labels: Vec<&str> = elements.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "Form B: email",
                "Form B: dynamic_checkbox_group",
                "Form B: dynamic_object",
                "Form A: email",
                "Form A: dynamic_checkbox_group",
                "Form A: dynamic_object",
            ]
        );
        assert_eq!(elements[0].value, ElementValue::new("form-b", "email"));
        assert_eq!(elements[0].element_type, ElementType::Direct);
        assert_eq!(elements[3].element_type, ElementType::Transitive);
    }

    #[test]
    fn unnamed_forms_are_labelled_by_id() {
        let graph = FormGraph::new(vec![
            FormNode::new("form-x"),
            FormNode::new("form-y").with_prerequisites(["form-x"]),
        ]);
        let ctx = DependencyContext::for_form(&graph, "form-y").unwrap();

        let elements = FormFieldsProvider.get_elements(&ctx).unwrap();
        assert_eq!(elements[0].label, "form-x: email");
    }

    #[test]
    fn grouping_always_has_both_categories() {
        let grouped = FormFieldsProvider.group_elements(&[]);

        assert_eq!(grouped.len(), 2);
        assert!(grouped[DIRECT_DEPENDENCIES].is_empty());
        assert!(grouped[TRANSITIVE_DEPENDENCIES].is_empty());
    }

    #[test]
    fn grouping_partitions_by_type() {
        let graph = graph();
        let ctx = DependencyContext::for_form(&graph, "form-d").unwrap();
        let elements = FormFieldsProvider.get_elements(&ctx).unwrap();

        let grouped = FormFieldsProvider.group_elements(&elements);
        assert_eq!(grouped[DIRECT_DEPENDENCIES], elements[..3].to_vec());
        assert_eq!(grouped[TRANSITIVE_DEPENDENCIES], elements[3..].to_vec());
    }
}
