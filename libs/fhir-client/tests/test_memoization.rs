//! Coalescing behavior of the client's expand handling

use async_trait::async_trait;
use meridian_client::{
    user_message, Error, FhirClient, FhirRequest, FhirResponse, Result, Transport,
    GENERIC_ERROR_MESSAGE,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Transport that counts calls and answers with a canned response
struct CountingTransport {
    calls: AtomicUsize,
    status: u16,
    body: Value,
    delay: Duration,
}

impl CountingTransport {
    fn ok(body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            status: 200,
            body,
            delay: Duration::from_millis(20),
        })
    }

    fn failing(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            status,
            body,
            delay: Duration::ZERO,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _request: &FhirRequest) -> Result<FhirResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(FhirResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn expansion() -> Value {
    json!({
        "resourceType": "ValueSet",
        "expansion": {
            "total": 1,
            "contains": [{"system": "http://example.org/cs", "code": "a", "display": "A"}]
        }
    })
}

fn expand_params(url: &str) -> Value {
    json!({
        "resourceType": "Parameters",
        "parameter": [{"name": "url", "valueUri": url}]
    })
}

#[tokio::test]
async fn concurrent_identical_expands_share_one_call() {
    let transport = CountingTransport::ok(expansion());
    let client = FhirClient::with_transport(transport.clone());

    let (a, b) = tokio::join!(
        client.invoke_type("ValueSet", "expand", expand_params("vs-1")),
        client.invoke_type("ValueSet", "expand", expand_params("vs-1")),
    );

    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a, b);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn completed_expand_is_reused_for_the_client_lifetime() {
    let transport = CountingTransport::ok(expansion());
    let client = FhirClient::with_transport(transport.clone());

    for _ in 0..3 {
        client
            .invoke_type("ValueSet", "expand", expand_params("vs-1"))
            .await
            .unwrap();
    }

    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn different_expand_bodies_trigger_separate_calls() {
    let transport = CountingTransport::ok(expansion());
    let client = FhirClient::with_transport(transport.clone());

    client
        .invoke_type("ValueSet", "expand", expand_params("vs-1"))
        .await
        .unwrap();
    client
        .invoke_type("ValueSet", "expand", expand_params("vs-2"))
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn non_expand_operations_are_never_memoized() {
    let transport = CountingTransport::ok(json!({"resourceType": "Parameters"}));
    let client = FhirClient::with_transport(transport.clone());

    let params = json!({
        "resourceType": "Parameters",
        "parameter": [{"name": "code", "valueCode": "a"}]
    });
    client
        .invoke_type("ValueSet", "validate-code", params.clone())
        .await
        .unwrap();
    client
        .invoke_type("ValueSet", "validate-code", params)
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn identical_reads_are_never_memoized() {
    let transport = CountingTransport::ok(json!({"resourceType": "Patient", "id": "x"}));
    let client = FhirClient::with_transport(transport.clone());

    client.read("Patient", "x").await.unwrap();
    client.read("Patient", "x").await.unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn operation_outcome_diagnostics_are_surfaced() {
    let transport = CountingTransport::failing(
        400,
        json!({
            "resourceType": "OperationOutcome",
            "issue": [{"severity": "error", "code": "invalid", "diagnostics": "X"}]
        }),
    );
    let client = FhirClient::with_transport(transport);

    let error = client.read("Patient", "missing").await.unwrap_err();
    assert_eq!(user_message(&error), "X");
    assert!(matches!(error, Error::Fhir { status: 400, .. }));
}

#[tokio::test]
async fn non_fhir_failures_fall_back_to_generic_message() {
    let transport = CountingTransport::failing(500, json!({"message": "boom"}));
    let client = FhirClient::with_transport(transport);

    let error = client.read("Patient", "x").await.unwrap_err();
    assert_eq!(user_message(&error), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn resource_counts_match_entries_by_index() {
    let transport = CountingTransport::ok(json!({
        "resourceType": "Bundle",
        "type": "batch-response",
        "entry": [
            {"resource": {"resourceType": "Bundle", "type": "searchset", "total": 12}},
            {"resource": {"resourceType": "Bundle", "type": "searchset", "total": 0}},
            {"response": {"status": "403 Forbidden"}}
        ]
    }));
    let client = FhirClient::with_transport(transport.clone());

    let counts = client
        .resource_counts(&["Patient", "Observation", "AuditEvent"])
        .await
        .unwrap();

    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].total, Some(12));
    assert_eq!(counts[1].total, Some(0));
    assert_eq!(counts[2].total, None);
    assert_eq!(transport.calls(), 1);
}
