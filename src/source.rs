//! Input boundary to the rendering collaborator.
//!
//! Converting a PDF into positioned text lines is an external concern
//! (browser-driven rendering in the reference deployment). The core only
//! consumes the resulting line records through [`LineSource`].

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::LineRecord;

/// A producer of line records for one document.
pub trait LineSource {
    /// Load the line records for the document at `path`.
    fn lines(&self, path: &Path) -> Result<Vec<LineRecord>>;
}

/// Reads line records from a JSON array dumped by the external renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLineSource;

impl JsonLineSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for JsonLineSource {
    fn lines(&self, path: &Path) -> Result<Vec<LineRecord>> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|err| Error::InvalidLineRecord(format!("{}: {err}", path.display())))
    }
}
