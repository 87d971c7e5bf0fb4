//! Error types for the cvparse library.

use std::io;
use thiserror::Error;

/// Result type alias for cvparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading inputs and resources.
///
/// Extraction itself never fails: a pattern that matches nothing and a
/// layout too weak to segment are ordinary data conditions, reported
/// through empty result fields rather than errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing or deserializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line record violates the rendering collaborator's contract
    /// (missing or malformed visual attributes). Fails the one document.
    #[error("Invalid line record: {0}")]
    InvalidLineRecord(String),

    /// A keyword or skill resource could not be loaded.
    #[error("Resource error: {0}")]
    Resource(String),
}
