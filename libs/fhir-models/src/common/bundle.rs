//! FHIR Bundle model
//!
//! Container for collections of resources: search results, batch requests
//! and their responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Bundle resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Indicates the purpose of this bundle
    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// If search, the total number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Links related to this Bundle (paging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<BundleLink>>,

    /// Entries in the bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Type of Bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    Transaction,
    TransactionResponse,
    Batch,
    BatchResponse,
    History,
    Searchset,
    Collection,
}

/// Link related to a Bundle (e.g., next page)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

/// Entry in a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Full URL for the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// Request details (batch/transaction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleEntryRequest>,

    /// Results of execution (batch-response/transaction-response)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<BundleEntryResponse>,

    /// A resource in this bundle, kept as raw JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Request portion of a batch/transaction entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryRequest {
    /// GET | POST | PUT | DELETE | PATCH
    pub method: String,

    /// URL relative to the server base (e.g., "Patient?_summary=count")
    pub url: String,
}

/// Response portion of a batch-response/transaction-response entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryResponse {
    /// Status code and reason (e.g., "200 OK")
    pub status: String,

    /// Location header value, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Outcome resource (often an OperationOutcome on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Value>,
}

impl Bundle {
    /// Build a batch bundle of GET requests against relative URLs
    pub fn batch_get(urls: impl IntoIterator<Item = String>) -> Self {
        let entry: Vec<BundleEntry> = urls
            .into_iter()
            .map(|url| BundleEntry {
                request: Some(BundleEntryRequest {
                    method: "GET".to_string(),
                    url,
                }),
                ..Default::default()
            })
            .collect();

        Self {
            resource_type: default_resource_type(),
            id: None,
            bundle_type: BundleType::Batch,
            total: None,
            link: None,
            entry: Some(entry),
            extensions: HashMap::new(),
        }
    }

    /// Entries as a slice, empty when absent
    pub fn entries(&self) -> &[BundleEntry] {
        self.entry.as_deref().unwrap_or(&[])
    }

    /// Resources carried by the entries, in entry order
    pub fn resources(&self) -> impl Iterator<Item = &Value> {
        self.entries().iter().filter_map(|e| e.resource.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_get_builds_entries_in_order() {
        let bundle = Bundle::batch_get(vec![
            "Patient?_summary=count".to_string(),
            "Observation?_summary=count".to_string(),
        ]);

        assert_eq!(bundle.bundle_type, BundleType::Batch);
        let entries = bundle.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].request.as_ref().unwrap().url, "Patient?_summary=count");
        assert_eq!(entries[1].request.as_ref().unwrap().method, "GET");
    }

    #[test]
    fn bundle_type_serializes_kebab_case() {
        let json = serde_json::to_value(BundleType::BatchResponse).unwrap();
        assert_eq!(json, serde_json::json!("batch-response"));
    }
}
