//! Error types for the FHIR client

use meridian_models::OperationOutcome;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message shown for errors that carry no FHIR diagnostics
pub const GENERIC_ERROR_MESSAGE: &str = "Unknown Error";

/// FHIR client errors
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with an OperationOutcome
    #[error("FHIR error (status {status}): {}", .outcome.first_diagnostics().unwrap_or("no diagnostics"))]
    Fhir {
        status: u16,
        outcome: OperationOutcome,
    },

    /// Non-success status without a parseable OperationOutcome body
    #[error("Unexpected response status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The message surfaced to users for a failed request.
///
/// FHIR-shaped errors yield the first issue's diagnostics; everything else
/// falls back to [`GENERIC_ERROR_MESSAGE`]. Failures are never retried here;
/// the user re-triggers the action.
pub fn user_message(error: &Error) -> String {
    match error {
        Error::Fhir { outcome, .. } => outcome
            .first_diagnostics()
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string(),
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_models::{OperationOutcome, OperationOutcomeIssue};

    #[test]
    fn fhir_errors_surface_first_diagnostics() {
        let error = Error::Fhir {
            status: 400,
            outcome: OperationOutcome::from_issues(vec![OperationOutcomeIssue::error(
                "invalid",
                "X",
                vec![],
            )]),
        };
        assert_eq!(user_message(&error), "X");
    }

    #[test]
    fn non_fhir_errors_use_generic_message() {
        let error = Error::UnexpectedStatus { status: 502 };
        assert_eq!(user_message(&error), GENERIC_ERROR_MESSAGE);

        let error = Error::Config("missing base url".to_string());
        assert_eq!(user_message(&error), "Unknown Error");
    }
}
