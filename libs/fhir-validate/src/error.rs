//! Error types for validation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element tree error: {0}")]
    Tree(#[from] meridian_elements::Error),

    #[error("StructureDefinition '{0}' has no snapshot")]
    NoSnapshot(String),
}
