//! FHIR ValueSet expansion model (consumed subset)
//!
//! The shape returned by the terminology `$expand` operation. Only the
//! expansion itself is modeled; compose rules are kept as raw extensions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ValueSet resource with an expansion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    /// Resource type - always "ValueSet"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Computer-friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The expanded set of codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<ValueSetExpansion>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ValueSet".to_string()
}

/// Result of expanding a value set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetExpansion {
    /// Total number of codes in the expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Codes in the expansion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<ExpansionContains>,
}

/// One code in an expansion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionContains {
    /// Code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Code value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Display text for the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ValueSet {
    /// Codes in the expansion, empty when no expansion is present
    pub fn expanded_codes(&self) -> &[ExpansionContains] {
        self.expansion
            .as_ref()
            .map(|e| e.contains.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_expansion_contains() {
        let vs: ValueSet = serde_json::from_value(json!({
            "resourceType": "ValueSet",
            "url": "http://hl7.org/fhir/ValueSet/administrative-gender",
            "expansion": {
                "total": 2,
                "contains": [
                    {"system": "http://hl7.org/fhir/administrative-gender", "code": "male", "display": "Male"},
                    {"system": "http://hl7.org/fhir/administrative-gender", "code": "female", "display": "Female"}
                ]
            }
        }))
        .unwrap();

        let codes = vs.expanded_codes();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].code.as_deref(), Some("male"));
    }
}
