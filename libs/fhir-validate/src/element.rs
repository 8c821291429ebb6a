//! Per-element checks
//!
//! Each check returns issues rather than failing fast so a whole instance
//! can be reported in one pass.

use meridian_models::{ElementDefinition, OperationOutcomeIssue};
use serde_json::Value;

/// Check a single occurrence against the element's `fixed[x]` value.
///
/// Comparison is structural JSON equality. The pointer locates the checked
/// occurrence inside the instance and is carried in the issue's expression.
pub fn validate_fixed(
    element: &ElementDefinition,
    value: &Value,
    pointer: &str,
) -> Option<OperationOutcomeIssue> {
    let fixed = element.fixed_value()?;
    if value == fixed {
        return None;
    }

    Some(OperationOutcomeIssue::error(
        "structure",
        format!(
            "Value at {} does not match the fixed value {} required by {}",
            pointer, fixed, element.path
        ),
        vec![pointer.to_string()],
    ))
}

/// Check how many occurrences of an element appear under one parent value.
///
/// `value` is the raw field value: `None` when absent, an array for
/// repeating elements, anything else counts as a single occurrence.
pub fn validate_cardinality(
    element: &ElementDefinition,
    value: Option<&Value>,
    pointer: &str,
) -> Option<OperationOutcomeIssue> {
    let count = match value {
        None | Some(Value::Null) => 0,
        Some(Value::Array(items)) => items.len(),
        Some(_) => 1,
    };

    let min = element.min.unwrap_or(0) as usize;
    if count < min {
        return Some(OperationOutcomeIssue::error(
            "required",
            format!(
                "{} requires at least {} occurrence(s) but {} found",
                element.path, min, count
            ),
            vec![pointer.to_string()],
        ));
    }

    if let Some(max) = element.max.as_deref().and_then(|m| m.parse::<usize>().ok()) {
        if count > max {
            return Some(OperationOutcomeIssue::error(
                "structure",
                format!(
                    "{} allows at most {} occurrence(s) but {} found",
                    element.path, max, count
                ),
                vec![pointer.to_string()],
            ));
        }
    }

    None
}
