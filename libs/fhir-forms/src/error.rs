//! Error types for form building and patching

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element tree error: {0}")]
    Tree(#[from] meridian_elements::Error),

    #[error("Invalid field path: {0}")]
    InvalidPath(String),

    #[error("Path not found in instance: {0}")]
    PathNotFound(String),

    #[error("Value at {0} has the wrong container type")]
    TypeMismatch(String),

    #[error("Patch operation requires a value")]
    MissingValue,
}
