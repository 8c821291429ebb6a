//! Form construction from StructureDefinitions

use crate::control::ControlKind;
use crate::error::Result;
use meridian_elements::{ElementNode, ElementTree};
use meridian_models::StructureDefinition;
use serde::Serialize;

/// Declarative form for one resource type
#[derive(Debug, Clone, Serialize)]
pub struct Form {
    /// Resource type the form edits (e.g., "Patient")
    pub resource_type: String,

    /// Root group; its children are the resource's top-level fields
    pub root: FormNode,
}

/// One form control or group
#[derive(Debug, Clone, Serialize)]
pub struct FormNode {
    /// Field label: the last path segment, `[x]` suffix stripped
    pub label: String,

    /// Full element path (e.g., "Patient.name.given")
    pub path: String,

    /// Control to render. For choice elements this is the first candidate;
    /// `choice` lists all of them.
    pub control: ControlKind,

    /// min > 0
    pub required: bool,

    /// max = "*" or max > 1
    pub repeats: bool,

    /// Short description shown next to the control
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Candidate controls for choice (`value[x]`) elements; the renderer
    /// shows a type selector instead of a fixed input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<Vec<ControlKind>>,

    /// Nested controls for complex/backbone elements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormNode>,
}

/// Build the form for a StructureDefinition's snapshot.
pub fn build_form(sd: &StructureDefinition) -> Result<Form> {
    let tree = ElementTree::from_structure_definition(sd)?;

    let root = tree.fold_bottom_up(|node, children| node_to_form(sd, node, children));

    Ok(Form {
        resource_type: sd.type_name.clone(),
        root,
    })
}

fn node_to_form(sd: &StructureDefinition, node: &ElementNode, children: Vec<FormNode>) -> FormNode {
    let element = node.element;

    let label = element
        .field_name()
        .trim_end_matches("[x]")
        .to_string();

    let value_set = element
        .binding
        .as_ref()
        .and_then(|b| b.value_set.as_deref());

    let controls: Vec<ControlKind> = element
        .types
        .as_ref()
        .map(|types| {
            types
                .iter()
                .map(|t| ControlKind::from_type(t, value_set))
                .collect()
        })
        .unwrap_or_default();

    let control = if node.is_root() {
        // The resource root is a group named after the type, not an input.
        ControlKind::Complex {
            type_name: sd.type_name.clone(),
        }
    } else if !children.is_empty() {
        controls.first().cloned().unwrap_or(ControlKind::Complex {
            type_name: element.primary_type_code().unwrap_or("BackboneElement").to_string(),
        })
    } else {
        controls
            .first()
            .cloned()
            .unwrap_or(ControlKind::Unsupported {
                type_code: String::new(),
            })
    };

    let choice = if node.is_choice && controls.len() > 1 {
        Some(controls)
    } else {
        None
    };

    FormNode {
        label,
        path: element.path.clone(),
        control,
        required: element.is_required(),
        repeats: element.is_array(),
        short: element.short.clone(),
        choice,
        children,
    }
}
