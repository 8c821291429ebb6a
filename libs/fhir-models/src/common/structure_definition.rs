//! FHIR StructureDefinition model
//!
//! Version-agnostic model for the metadata resource that describes the shape
//! (fields, cardinalities, types) of a resource or data type.

use super::element_definition::ElementDefinition;
use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR StructureDefinition - describes a resource or data type structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureDefinition {
    /// Resource type - always "StructureDefinition"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier for this structure definition
    pub url: String,

    /// Business version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Computer-friendly name
    pub name: String,

    /// Publication status (draft | active | retired | unknown)
    pub status: String,

    /// Name of the publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Natural language description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// FHIR version this definition targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<String>,

    /// primitive-type | complex-type | resource | logical
    pub kind: StructureDefinitionKind,

    /// Whether the structure is abstract
    #[serde(rename = "abstract")]
    pub is_abstract: bool,

    /// Type this structure describes (e.g., "Patient")
    #[serde(rename = "type")]
    pub type_name: String,

    /// Definition this is constrained or specialized from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_definition: Option<String>,

    /// specialization | constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation: Option<StructureDefinitionDerivation>,

    /// Fully expanded element list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,

    /// Changes relative to the base definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differential: Option<Differential>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "StructureDefinition".to_string()
}

/// Kind of structure being described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureDefinitionKind {
    PrimitiveType,
    ComplexType,
    Resource,
    Logical,
}

/// How the type relates to its base definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureDefinitionDerivation {
    Specialization,
    Constraint,
}

/// Snapshot - the fully expanded, flattened element list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Snapshot {
    pub element: Vec<ElementDefinition>,
}

/// Differential - elements that differ from the base definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Differential {
    pub element: Vec<ElementDefinition>,
}

impl StructureDefinition {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Snapshot elements, or an empty slice when no snapshot is present
    pub fn elements(&self) -> &[ElementDefinition] {
        self.snapshot
            .as_ref()
            .map(|s| s.element.as_slice())
            .unwrap_or(&[])
    }

    /// Whether this is a profile (constraint) rather than a base definition
    pub fn is_constraint(&self) -> bool {
        self.derivation == Some(StructureDefinitionDerivation::Constraint)
    }

    /// Definition text of the root element, used as the type's summary
    pub fn root_definition(&self) -> Option<&str> {
        self.elements()
            .first()
            .and_then(|e| e.definition.as_deref())
    }
}

impl Snapshot {
    /// Get an element by path
    pub fn get_element(&self, path: &str) -> Option<&ElementDefinition> {
        self.element.iter().find(|e| e.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_structure_definition() {
        let sd: StructureDefinition = serde_json::from_value(json!({
            "resourceType": "StructureDefinition",
            "url": "http://hl7.org/fhir/StructureDefinition/Patient",
            "name": "Patient",
            "status": "active",
            "kind": "resource",
            "abstract": false,
            "type": "Patient",
            "derivation": "specialization"
        }))
        .unwrap();

        assert_eq!(sd.kind, StructureDefinitionKind::Resource);
        assert_eq!(sd.type_name, "Patient");
        assert!(!sd.is_constraint());
        assert!(sd.elements().is_empty());
    }

    #[test]
    fn round_trip_preserves_unknown_fields() {
        let input = json!({
            "resourceType": "StructureDefinition",
            "url": "http://example.org/StructureDefinition/Custom",
            "name": "Custom",
            "status": "draft",
            "kind": "complex-type",
            "abstract": false,
            "type": "Custom",
            "experimental": true,
            "contact": [{"name": "Someone"}]
        });

        let sd: StructureDefinition = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_value(&sd).unwrap();

        assert_eq!(output["experimental"], json!(true));
        assert_eq!(output["contact"], input["contact"]);
    }
}
