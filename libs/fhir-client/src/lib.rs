//! Async FHIR REST client
//!
//! An explicitly-constructed client for the FHIR HTTP interface: CRUD,
//! type-level search, batch submission, capabilities, and `$operation`
//! invocation. Identical in-flight `$expand` invocations are coalesced into
//! a single network round trip and the resolved value is kept for the
//! lifetime of the client (no eviction, no TTL).
//!
//! The network sits behind the [`Transport`] trait so tests can substitute
//! a mock; production code uses [`HttpTransport`] over `reqwest`.
//!
//! # Example
//!
//! ```rust,no_run
//! use meridian_client::{ClientConfig, FhirClient};
//!
//! # async fn example() -> meridian_client::Result<()> {
//! let client = FhirClient::new(ClientConfig::from_env()?)?;
//! let patient = client.read("Patient", "example").await?;
//! println!("{}", patient["id"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{FhirClient, ResourceCount, SearchQuery};
pub use config::{ClientConfig, Partition};
pub use error::{user_message, Error, Result, GENERIC_ERROR_MESSAGE};
pub use transport::{FhirRequest, FhirResponse, HttpTransport, Method, Transport};
