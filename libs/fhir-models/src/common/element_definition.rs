//! FHIR ElementDefinition model
//!
//! One field entry within a StructureDefinition's element list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ElementDefinition - defines an element in a resource or data type structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Path of the element in the hierarchy (e.g., "Patient.name.given")
    pub path: String,

    /// Short label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Full formal definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Minimum cardinality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Maximum cardinality (a number or "*")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Reference to the definition of the content (for recursive structures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_reference: Option<String>,

    /// Data type(s) for this element
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<ElementDefinitionType>>,

    /// ValueSet details if this is coded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<ElementDefinitionBinding>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Data type for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinitionType {
    /// Data type code (e.g., "string", "CodeableConcept", "Reference")
    pub code: String,

    /// Profiles (StructureDefinition canonical URLs) that apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,

    /// Profiles for Reference/canonical target types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_profile: Option<Vec<String>>,
}

/// ValueSet binding for a coded element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinitionBinding {
    /// Binding strength (required | extensible | preferred | example)
    pub strength: String,

    /// Human explanation of the value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Canonical reference to the value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<String>,
}

impl ElementDefinition {
    /// Create an element carrying only a path; useful for tests and builders
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Number of dotted segments in the path ("Patient.name.given" -> 3)
    pub fn depth(&self) -> usize {
        self.path.split('.').count()
    }

    /// Last path segment ("Patient.name.given" -> "given")
    pub fn field_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Get the parent path (everything before the last '.')
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rfind('.').map(|pos| &self.path[..pos])
    }

    /// Check if this element is a direct or transitive child of the given path
    pub fn is_descendant_of(&self, ancestor_path: &str) -> bool {
        self.path.starts_with(ancestor_path)
            && self.path.len() > ancestor_path.len()
            && self.path.as_bytes().get(ancestor_path.len()) == Some(&b'.')
    }

    /// Choice elements carry multiple candidate types (`value[x]` style)
    pub fn is_choice_type(&self) -> bool {
        self.path.ends_with("[x]") || self.types.as_ref().map(|t| t.len() > 1).unwrap_or(false)
    }

    /// Get type codes for this element
    pub fn type_codes(&self) -> Vec<&str> {
        self.types
            .as_ref()
            .map(|types| types.iter().map(|t| t.code.as_str()).collect())
            .unwrap_or_default()
    }

    /// First type code, the usual single-typed case
    pub fn primary_type_code(&self) -> Option<&str> {
        self.types.as_ref().and_then(|t| t.first()).map(|t| t.code.as_str())
    }

    /// Check if element is required (min > 0)
    pub fn is_required(&self) -> bool {
        self.min.unwrap_or(0) > 0
    }

    /// Check if element repeats (max = "*" or max > 1)
    pub fn is_array(&self) -> bool {
        self.max
            .as_ref()
            .map(|m| m == "*" || m.parse::<u32>().map(|n| n > 1).unwrap_or(false))
            .unwrap_or(false)
    }

    /// The `fixed[x]` value, if any.
    ///
    /// Fixed values are choice-typed in FHIR JSON (`fixedUri`, `fixedCode`,
    /// ...), so they land in the extension map and are recovered by prefix.
    pub fn fixed_value(&self) -> Option<&Value> {
        self.choice_property("fixed")
    }

    /// The `pattern[x]` value, if any.
    pub fn pattern_value(&self) -> Option<&Value> {
        self.choice_property("pattern")
    }

    fn choice_property(&self, prefix: &str) -> Option<&Value> {
        self.extensions.iter().find_map(|(key, value)| {
            let rest = key.strip_prefix(prefix)?;
            rest.chars()
                .next()
                .filter(|c| c.is_uppercase())
                .map(|_| value)
        })
    }

    /// Cardinality as a string (e.g., "0..1", "1..*")
    pub fn cardinality_string(&self) -> String {
        let min = self.min.unwrap_or(0);
        let max = self.max.as_deref().unwrap_or("*");
        format!("{}..{}", min, max)
    }
}
