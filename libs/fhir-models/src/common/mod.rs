//! Version-agnostic FHIR models
//!
//! Types that work across FHIR R4, R4B, and R5

pub mod bundle;
pub mod capability_statement;
pub mod element_definition;
pub mod error;
pub mod operation_outcome;
pub mod search_parameter;
pub mod structure_definition;
pub mod value_set;

// Re-export commonly used types
pub use bundle::*;
pub use capability_statement::*;
pub use element_definition::*;
pub use error::{Error, Result};
pub use operation_outcome::*;
pub use search_parameter::*;
pub use structure_definition::*;
pub use value_set::*;
