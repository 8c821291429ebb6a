//! FHIR CapabilityStatement model (consumed subset)
//!
//! Only the portions the admin tooling reads: server FHIR version and the
//! resource types with their supported interactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR CapabilityStatement resource (subset)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatement {
    /// Resource type - always "CapabilityStatement"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// FHIR version the server supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<String>,

    /// RESTful capabilities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rest: Vec<CapabilityRest>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CapabilityStatement".to_string()
}

/// One REST endpoint description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRest {
    /// client | server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Per-resource-type capabilities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<CapabilityRestResource>,

    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Capabilities for a single resource type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRestResource {
    /// Resource type name (e.g., "Patient")
    #[serde(rename = "type")]
    pub type_name: String,

    /// Supported interactions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interaction: Vec<CapabilityInteraction>,

    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// One supported interaction (read, search-type, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapabilityInteraction {
    pub code: String,
}

impl CapabilityStatement {
    /// Names of the resource types the server advertises
    pub fn resource_types(&self) -> Vec<&str> {
        self.rest
            .iter()
            .flat_map(|r| r.resource.iter())
            .map(|r| r.type_name.as_str())
            .collect()
    }
}
