//! Schema-driven forms for FHIR resources
//!
//! Turns a StructureDefinition into a declarative form description (one
//! control per leaf element, nested groups for complex elements) and
//! expresses edits as path-addressed patches against the resource instance
//! instead of mutating it in place. Rendering is left to the caller.

pub mod control;
pub mod error;
pub mod form;
pub mod patch;

pub use control::ControlKind;
pub use error::{Error, Result};
pub use form::{build_form, Form, FormNode};
pub use patch::{apply_patch, FieldPath, Patch, PatchOp, Segment};
