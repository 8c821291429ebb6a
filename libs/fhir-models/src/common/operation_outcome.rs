//! FHIR OperationOutcome model
//!
//! Used by servers to convey errors and diagnostics from operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR OperationOutcome resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    /// Resource type - always "OperationOutcome"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// One issue per problem reported
    pub issue: Vec<OperationOutcomeIssue>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "OperationOutcome".to_string()
}

/// A single issue within an OperationOutcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcomeIssue {
    /// fatal | error | warning | information
    pub severity: IssueSeverity,

    /// Error or warning code (e.g., "structure", "not-found")
    pub code: String,

    /// Additional diagnostic information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,

    /// FHIRPath or JSON pointer expressions locating the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Vec<String>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Severity of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

impl OperationOutcome {
    /// Build an outcome from a list of issues
    pub fn from_issues(issue: Vec<OperationOutcomeIssue>) -> Self {
        Self {
            resource_type: default_resource_type(),
            issue,
            extensions: HashMap::new(),
        }
    }

    /// Diagnostics of the first issue, the message shown to users
    pub fn first_diagnostics(&self) -> Option<&str> {
        self.issue.first().and_then(|i| i.diagnostics.as_deref())
    }

    /// Whether any issue is error severity or worse
    pub fn has_errors(&self) -> bool {
        self.issue
            .iter()
            .any(|i| matches!(i.severity, IssueSeverity::Fatal | IssueSeverity::Error))
    }
}

impl OperationOutcomeIssue {
    /// Build an error-severity issue with diagnostics and a location
    pub fn error(
        code: impl Into<String>,
        diagnostics: impl Into<String>,
        expression: Vec<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.into(),
            diagnostics: Some(diagnostics.into()),
            expression: if expression.is_empty() {
                None
            } else {
                Some(expression)
            },
            extensions: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_diagnostics_reads_first_issue() {
        let outcome: OperationOutcome = serde_json::from_value(json!({
            "resourceType": "OperationOutcome",
            "issue": [
                {"severity": "error", "code": "not-found", "diagnostics": "X"},
                {"severity": "warning", "code": "informational", "diagnostics": "Y"}
            ]
        }))
        .unwrap();

        assert_eq!(outcome.first_diagnostics(), Some("X"));
        assert!(outcome.has_errors());
    }

    #[test]
    fn issue_error_builder() {
        let issue = OperationOutcomeIssue::error("structure", "bad value", vec!["/name/0".into()]);
        assert_eq!(issue.severity, IssueSeverity::Error);
        assert_eq!(issue.expression.as_deref(), Some(&["/name/0".to_string()][..]));
    }
}
