//! Error types for element tree construction

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an element tree from a snapshot
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Element list is empty")]
    Empty,

    #[error("Element 0 must be the resource root, found path '{path}'")]
    InvalidRoot { path: String },

    #[error("Multiple root elements: '{path}' at index {index}")]
    MultipleRoots { index: usize, path: String },

    #[error("Element '{path}' at index {index} is out of snapshot order: no parent element precedes it")]
    OutOfOrder { index: usize, path: String },
}
