//! StructureDefinition element trees
//!
//! A StructureDefinition snapshot is a flat, path-ordered list of element
//! definitions; the hierarchy is implicit in the dotted paths. This crate
//! builds that hierarchy once into an explicit arena of nodes indexed by
//! element position, then offers a bottom-up (post-order) traversal that
//! combines each element with the already-computed results of its children.
//!
//! Both the form builder and the documentation generator drive their output
//! from this traversal.
//!
//! # Example
//!
//! ```rust
//! use meridian_elements::ElementTree;
//! use meridian_models::ElementDefinition;
//!
//! # fn main() -> Result<(), meridian_elements::Error> {
//! let elements = vec![
//!     ElementDefinition::with_path("Patient"),
//!     ElementDefinition::with_path("Patient.name"),
//!     ElementDefinition::with_path("Patient.name.given"),
//! ];
//!
//! let tree = ElementTree::from_elements(&elements)?;
//! let paths = tree.fold_bottom_up(|node, children: Vec<String>| {
//!     let mut out = node.element.path.clone();
//!     for child in children {
//!         out.push('\n');
//!         out.push_str(&child);
//!     }
//!     out
//! });
//! assert!(paths.starts_with("Patient\n"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{ElementNode, ElementTree};
