//! FHIR SearchParameter model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR SearchParameter - a search parameter defined for one or more resource types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameter {
    /// Resource type - always "SearchParameter"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Computer-friendly name
    pub name: String,

    /// Code used in search query parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Resource types this parameter applies to
    #[serde(default)]
    pub base: Vec<String>,

    /// number | date | string | token | reference | composite | quantity | uri | special
    #[serde(rename = "type")]
    pub param_type: String,

    /// Natural language description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// FHIRPath expression that extracts the values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "SearchParameter".to_string()
}

impl SearchParameter {
    /// Whether this parameter applies to the named resource type.
    ///
    /// Parameters based on Resource or DomainResource apply to every type.
    pub fn applies_to(&self, resource_name: &str) -> bool {
        self.base.iter().any(|b| {
            b == resource_name || b == "Resource" || b == "DomainResource"
        })
    }
}
