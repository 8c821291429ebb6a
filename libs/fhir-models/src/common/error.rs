//! Model error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// JSON did not match the expected resource shape
    #[error("Invalid FHIR resource: {0}")]
    InvalidResource(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
