//! Instance validation against StructureDefinitions
//!
//! Element-level checks: fixed values and cardinality. Issues are collected
//! into an OperationOutcome so callers can display or persist them the same
//! way server-reported problems are handled.

pub mod element;
pub mod error;
pub mod validator;

pub use element::{validate_cardinality, validate_fixed};
pub use error::{Error, Result};
pub use validator::Validator;
