//! Instance walker
//!
//! Resolves each element of a StructureDefinition snapshot into the JSON
//! instance and runs the per-element checks at every occurrence.

use crate::element::{validate_cardinality, validate_fixed};
use crate::error::{Error, Result};
use meridian_elements::{ElementNode, ElementTree};
use meridian_models::{OperationOutcome, OperationOutcomeIssue, StructureDefinition};
use serde_json::Value;

/// Validates resource instances against a StructureDefinition snapshot.
pub struct Validator;

impl Validator {
    /// Validate an instance, collecting every issue into one outcome.
    ///
    /// An empty issue list means the instance passed all checks.
    pub fn validate(sd: &StructureDefinition, instance: &Value) -> Result<OperationOutcome> {
        let elements = sd.elements();
        if elements.is_empty() {
            return Err(Error::NoSnapshot(sd.name.clone()));
        }

        let tree = ElementTree::from_elements(elements)?;
        let mut issues = Vec::new();

        let root_contexts = vec![(String::new(), instance)];
        for child in tree.children_of(tree.root()) {
            check_node(&tree, child, &root_contexts, &mut issues);
        }

        Ok(OperationOutcome::from_issues(issues))
    }
}

/// Check one element under every occurrence of its parent.
fn check_node<'a>(
    tree: &ElementTree<'a>,
    node: &ElementNode<'a>,
    parents: &[(String, &Value)],
    issues: &mut Vec<OperationOutcomeIssue>,
) {
    let mut occurrences: Vec<(String, &Value)> = Vec::new();

    for (pointer, parent) in parents {
        let (field, value) = resolve_field(node, parent);
        let field_pointer = format!("{}/{}", pointer, field);

        if let Some(issue) = validate_cardinality(node.element, value, &field_pointer) {
            issues.push(issue);
        }

        match value {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    occurrences.push((format!("{}/{}", field_pointer, i), item));
                }
            }
            Some(single) => occurrences.push((field_pointer, single)),
        }
    }

    for (pointer, value) in &occurrences {
        if let Some(issue) = validate_fixed(node.element, value, pointer) {
            issues.push(issue);
        }
    }

    // Only object occurrences can carry child elements.
    let child_contexts: Vec<(String, &Value)> = occurrences
        .into_iter()
        .filter(|(_, v)| v.is_object())
        .collect();
    if child_contexts.is_empty() {
        return;
    }

    for child in tree.children_of(node) {
        check_node(tree, child, &child_contexts, issues);
    }
}

/// Find the JSON field an element maps to under one parent value.
///
/// Choice elements (`value[x]`) match the first key that extends the stem
/// with an uppercase type name, e.g. `valueQuantity`.
fn resolve_field<'v>(node: &ElementNode<'_>, parent: &'v Value) -> (String, Option<&'v Value>) {
    let field = node.element.field_name();

    if let Some(stem) = field.strip_suffix("[x]") {
        if let Some(map) = parent.as_object() {
            for (key, value) in map {
                let rest = match key.strip_prefix(stem) {
                    Some(rest) => rest,
                    None => continue,
                };
                if rest.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
                    return (key.clone(), Some(value));
                }
            }
        }
        return (stem.to_string(), None);
    }

    (field.to_string(), parent.get(field))
}
