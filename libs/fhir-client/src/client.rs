//! The FHIR client and its operations

use crate::error::{Error, Result};
use crate::transport::{FhirRequest, FhirResponse, HttpTransport, Transport};
use crate::ClientConfig;
use meridian_models::{Bundle, CapabilityStatement, OperationOutcome, ValueSet};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Async client for a FHIR server.
///
/// Holds its own coalescing state instead of module-level globals: the map
/// from expand-request fingerprint to a shared one-shot result lives inside
/// the client and dies with it.
pub struct FhirClient {
    transport: Arc<dyn Transport>,

    /// Completed `$expand` results keyed by request fingerprint. Entries are
    /// never evicted; the map lives as long as the client.
    expand_results: Mutex<HashMap<String, Arc<OnceCell<Value>>>>,
}

/// Parameters for a type-level search
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
    count: Option<u32>,
    offset: Option<u32>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary search parameter pair
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Page size (`_count`)
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Page offset (`_offset`)
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    fn into_query(self) -> Vec<(String, String)> {
        let mut query = self.params;
        if let Some(count) = self.count {
            query.push(("_count".to_string(), count.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("_offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// Result of one entry in the dashboard count batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCount {
    pub resource_type: String,

    /// Total from the matching searchset, `None` when that entry failed
    pub total: Option<u32>,
}

impl FhirClient {
    /// Create a client over HTTP from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport (mocks in tests).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            expand_results: Mutex::new(HashMap::new()),
        }
    }

    /// Read a single resource instance.
    pub async fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        self.execute(FhirRequest::get(format!("{}/{}", resource_type, id)))
            .await
    }

    /// Create a resource; returns the server's copy.
    pub async fn create(&self, resource_type: &str, resource: &Value) -> Result<Value> {
        self.execute(FhirRequest::post(resource_type, resource.clone()))
            .await
    }

    /// Update (replace) a resource instance.
    pub async fn update(&self, resource_type: &str, id: &str, resource: &Value) -> Result<Value> {
        self.execute(FhirRequest::put(
            format!("{}/{}", resource_type, id),
            resource.clone(),
        ))
        .await
    }

    /// Delete a resource instance. Confirmation is the caller's concern.
    pub async fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        self.execute(FhirRequest::delete(format!("{}/{}", resource_type, id)))
            .await?;
        Ok(())
    }

    /// Type-level search returning the searchset bundle.
    pub async fn search_type(&self, resource_type: &str, query: SearchQuery) -> Result<Bundle> {
        let value = self
            .execute(FhirRequest::get(resource_type).with_query(query.into_query()))
            .await?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Submit a batch bundle and return the batch-response bundle.
    pub async fn batch(&self, bundle: &Bundle) -> Result<Bundle> {
        let body = serde_json::to_value(bundle)?;
        let value = self.execute(FhirRequest::post("", body)).await?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Fetch the server's CapabilityStatement.
    pub async fn capabilities(&self) -> Result<CapabilityStatement> {
        let value = self.execute(FhirRequest::get("metadata")).await?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Invoke a system-level operation (`$operation` on the server base).
    pub async fn invoke_system(&self, operation: &str, parameters: Value) -> Result<Value> {
        self.execute(FhirRequest::post(format!("${}", operation), parameters))
            .await
    }

    /// Invoke a type-level operation (`ResourceType/$operation`).
    ///
    /// `expand` invocations are coalesced: identical requests share one
    /// network round trip and one resolved value for the lifetime of the
    /// client. All other operations go straight to the transport.
    pub async fn invoke_type(
        &self,
        resource_type: &str,
        operation: &str,
        parameters: Value,
    ) -> Result<Value> {
        let request = FhirRequest::post(format!("{}/${}", resource_type, operation), parameters);
        if operation == "expand" {
            self.coalesced_expand(request).await
        } else {
            self.execute(request).await
        }
    }

    /// Invoke an instance-level operation (`ResourceType/id/$operation`).
    pub async fn invoke_instance(
        &self,
        resource_type: &str,
        id: &str,
        operation: &str,
        parameters: Value,
    ) -> Result<Value> {
        self.execute(FhirRequest::post(
            format!("{}/{}/${}", resource_type, id, operation),
            parameters,
        ))
        .await
    }

    /// Expand a value set by canonical URL, optionally filtered.
    pub async fn expand(&self, value_set_url: &str, filter: Option<&str>) -> Result<ValueSet> {
        let mut parameter = vec![json!({"name": "url", "valueUri": value_set_url})];
        if let Some(filter) = filter {
            parameter.push(json!({"name": "filter", "valueString": filter}));
        }

        let body = json!({"resourceType": "Parameters", "parameter": parameter});
        let value = self.invoke_type("ValueSet", "expand", body).await?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Count several resource types in one batch request.
    ///
    /// Sub-results are matched to the requested types by entry index, as the
    /// batch-response preserves request order.
    pub async fn resource_counts(&self, resource_types: &[&str]) -> Result<Vec<ResourceCount>> {
        let bundle = Bundle::batch_get(
            resource_types
                .iter()
                .map(|t| format!("{}?_summary=count", t)),
        );
        let response = self.batch(&bundle).await?;

        let counts = resource_types
            .iter()
            .enumerate()
            .map(|(index, resource_type)| {
                let total = response
                    .entries()
                    .get(index)
                    .and_then(|entry| entry.resource.as_ref())
                    .and_then(|resource| resource.get("total"))
                    .and_then(|total| total.as_u64())
                    .map(|total| total as u32);

                ResourceCount {
                    resource_type: resource_type.to_string(),
                    total,
                }
            })
            .collect();

        Ok(counts)
    }

    async fn coalesced_expand(&self, request: FhirRequest) -> Result<Value> {
        let cell = {
            let mut map = self.expand_results.lock().await;
            map.entry(request.fingerprint())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        // Concurrent identical requests wait on the same cell; only the
        // winning initializer touches the network. A failed expand leaves
        // the cell empty, so the next caller retries.
        let value = cell
            .get_or_try_init(|| async { self.execute(request.clone()).await })
            .await?;
        Ok(value.clone())
    }

    async fn execute(&self, request: FhirRequest) -> Result<Value> {
        let response = self.transport.send(&request).await?;
        Self::check(response)
    }

    fn check(response: FhirResponse) -> Result<Value> {
        if response.is_success() {
            return Ok(response.body);
        }

        let status = response.status;
        if response.body.get("resourceType").and_then(|v| v.as_str())
            == Some("OperationOutcome")
        {
            if let Ok(outcome) = serde_json::from_value::<OperationOutcome>(response.body) {
                tracing::warn!(status, "FHIR request failed with OperationOutcome");
                return Err(Error::Fhir { status, outcome });
            }
        }

        tracing::warn!(status, "FHIR request failed without OperationOutcome");
        Err(Error::UnexpectedStatus { status })
    }
}
