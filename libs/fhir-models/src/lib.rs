//! FHIR data models
//!
//! Strongly-typed Rust structures for the FHIR metadata resources the
//! Meridian tooling consumes: StructureDefinitions and their element lists,
//! SearchParameters, Bundles, OperationOutcomes, CapabilityStatements, and
//! the ValueSet expansion shape returned by the `$expand` operation.
//!
//! # Design
//!
//! - **Version-agnostic core**: common fields present across FHIR R4, R4B,
//!   and R5
//! - **Lossless**: unknown JSON properties are captured in flattened
//!   `extensions` maps and survive a deserialize/serialize round trip
//! - **Read-oriented**: these resources are fetched and inspected, never
//!   authored by this workspace
//!
//! # Example
//!
//! ```rust
//! use meridian_models::common::{StructureDefinition, StructureDefinitionKind};
//! use serde_json::json;
//!
//! let sd_json = json!({
//!     "resourceType": "StructureDefinition",
//!     "id": "Patient",
//!     "url": "http://hl7.org/fhir/StructureDefinition/Patient",
//!     "name": "Patient",
//!     "status": "active",
//!     "kind": "resource",
//!     "abstract": false,
//!     "type": "Patient"
//! });
//!
//! let sd: StructureDefinition = serde_json::from_value(sd_json).unwrap();
//! assert_eq!(sd.name, "Patient");
//! assert_eq!(sd.kind, StructureDefinitionKind::Resource);
//! ```

pub mod common;

// Re-export commonly used types
pub use common::*;
