//! # cvparse
//!
//! Layout-driven resume extraction for Rust.
//!
//! Resumes rarely carry usable markup: the only reliable structure is
//! visual (font, size, color, indentation). This library consumes the line
//! records produced by an external document renderer and recovers structure
//! statistically: it infers which visual attributes mark section headers,
//! splits the document into sections, segments the work-experience section
//! into individual job entries, and parses employment durations written in
//! dozens of loosely punctuated human formats.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvparse::{extract_file, Result};
//!
//! fn main() -> Result<()> {
//!     // A JSON dump of line records from the external renderer.
//!     let resume = extract_file("resume.lines.json")?;
//!
//!     for job in &resume.work_experience {
//!         println!("{:?} .. {:?}: {:?}", job.start_date, job.end_date, job.skills);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Date-range recognition**: a priority cascade over composable
//!   patterns handles `04/2017 - 01/2018`, `mar. 2018 – jun. 2019`,
//!   `15 May 2015 to 16 July 2017`, bare `2013-2014`, and open-ended
//!   ranges ("present", "now", "...").
//! - **Layout-driven sectioning**: header signatures are inferred per
//!   document from attribute frequency statistics, with graceful
//!   degradation when the signal is weak.
//! - **Job segmentation**: combined spacing/indentation breaks with a
//!   cascade of fallbacks judged against the number of durations the text
//!   mentions.
//! - **Skill extraction**: longest-first dictionary matching plus a
//!   flanked-word learning heuristic with an explicit, persistable
//!   appended set.

pub mod dates;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod layout;
pub mod model;
pub mod skills;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use dates::{DateRange, DateRangeExtractor, DurationPatterns};
pub use error::{Error, Result};
pub use extract::ResumeExtractor;
pub use keywords::{KeywordDictionary, SKILLS, WORK_EXPERIENCE};
pub use layout::{infer_signature, segment_jobs, VisualSignature, UNLABELED_SECTION};
pub use model::{EndDate, JobEntry, LineRecord, ParsedResume};
pub use skills::{SkillDictionary, SkillStore};
pub use source::{JsonLineSource, LineSource};

use std::path::Path;

/// Extract one document from in-memory line records using the bundled
/// dictionaries.
pub fn extract_lines(lines: &[LineRecord]) -> ParsedResume {
    ResumeExtractor::new().extract(lines)
}

/// Extract one document from a JSON line-record dump on disk.
///
/// # Example
///
/// ```no_run
/// let resume = cvparse::extract_file("resume.lines.json").unwrap();
/// println!("{}", resume.to_json().unwrap());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ParsedResume> {
    let lines = JsonLineSource::new().lines(path.as_ref())?;
    Ok(extract_lines(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lines_empty_document() {
        let resume = extract_lines(&[]);
        assert!(resume.work_experience.is_empty());
        assert!(resume.skills_in_skill_section.is_empty());
    }

    #[test]
    fn test_extract_file_missing_path_is_io_error() {
        let err = extract_file("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
