//! The line record consumed from the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::text;

/// One visually distinct line of a rendered document, with the visual
/// attributes the layout analysis runs on.
///
/// Produced by the external PDF-to-lines renderer; immutable once built.
/// All attributes are required: a record missing any of them is a contract
/// violation and fails deserialization for that document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// The raw line text, unmodified.
    pub text: String,

    /// Font size in rendered pixels.
    pub font_size: f32,

    /// Font family name as reported by the renderer.
    pub font_family: String,

    /// Distance from the left page edge, in pixels.
    pub left_margin: f32,

    /// Distance from the bottom page edge, in pixels.
    pub bottom_margin: f32,

    /// CSS-style color string.
    pub font_color: String,

    /// Page the line appears on (1-indexed).
    pub page_number: u32,
}

impl LineRecord {
    /// Create a line with neutral body-text attributes; adjust with the
    /// `with_*` builders.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 12.0,
            font_family: "Helvetica".to_string(),
            left_margin: 0.0,
            bottom_margin: 0.0,
            font_color: "#000000".to_string(),
            page_number: 1,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_left_margin(mut self, margin: f32) -> Self {
        self.left_margin = margin;
        self
    }

    pub fn with_bottom_margin(mut self, margin: f32) -> Self {
        self.bottom_margin = margin;
        self
    }

    pub fn with_font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = color.into();
        self
    }

    pub fn with_page_number(mut self, page: u32) -> Self {
        self.page_number = page;
        self
    }

    /// True if the line renders as empty.
    pub fn is_blank(&self) -> bool {
        text::is_blank(&self.text)
    }

    /// The text cleared of symbols that defeat keyword matching.
    pub fn normalized_text(&self) -> String {
        text::strip_nonbasic(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let line = LineRecord::new("SKILLS")
            .with_font_size(18.0)
            .with_left_margin(42.5)
            .with_page_number(2);
        assert_eq!(line.font_size, 18.0);
        assert_eq!(line.left_margin, 42.5);
        assert_eq!(line.page_number, 2);
    }

    #[test]
    fn test_deserialize_requires_all_attributes() {
        let complete = r#"{
            "text": "WORK EXPERIENCE",
            "font_size": 18.0,
            "font_family": "Arial-Bold",
            "left_margin": 40.0,
            "bottom_margin": 700.0,
            "font_color": "#222222",
            "page_number": 1
        }"#;
        assert!(serde_json::from_str::<LineRecord>(complete).is_ok());

        let missing = r#"{"text": "WORK EXPERIENCE", "font_size": 18.0}"#;
        assert!(serde_json::from_str::<LineRecord>(missing).is_err());
    }

    #[test]
    fn test_normalized_text() {
        let line = LineRecord::new("• Work_Experience ");
        assert_eq!(line.normalized_text(), "WorkExperience");
    }
}
