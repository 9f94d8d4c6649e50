//! Catalog error types.

use thiserror::Error;

/// Errors raised by client-side validation and lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A required form field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Price text does not parse to a non-negative number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Update form has no changed field and no new image.
    #[error("Nothing to update")]
    NothingToUpdate,

    /// Selected file is not an image.
    #[error("Not an image file: {mime}")]
    NotAnImage { mime: String },

    /// Selected file exceeds the upload ceiling.
    #[error("Image is too large: {size} bytes (max {max} bytes)")]
    ImageTooLarge { size: u64, max: u64 },

    /// Family not found in the loaded family list.
    #[error("Family not found: {0}")]
    FamilyNotFound(String),

    /// Product id not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Local file could not be read.
    #[error("Cannot read file {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
