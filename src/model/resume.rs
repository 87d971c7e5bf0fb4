//! Output types: the per-document extraction record.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::text;

/// Output date format, `DD.MM.YYYY`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// The end of an employment period: a concrete date or explicitly ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    /// Ended on this date.
    On(NaiveDate),
    /// Explicitly unterminated ("present", "now", ...).
    Open,
}

/// One employment record extracted from the work-experience section.
///
/// The description is a contiguous run of the document's original lines.
/// Dates and skills are filled in after segmentation; the entry is not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub description: Vec<String>,

    /// Start of the period, day defaulted to the 1st. Empty string in the
    /// serialized form when undetermined.
    #[serde(serialize_with = "serialize_start_date")]
    pub start_date: Option<NaiveDate>,

    /// End of the period; serialized as `DD.MM.YYYY`, `"present"` for open
    /// ends, empty string when undetermined.
    #[serde(serialize_with = "serialize_end_date")]
    pub end_date: Option<EndDate>,

    /// Skills recognized in the description, dictionary casing preserved.
    pub skills: Vec<String>,
}

impl JobEntry {
    pub fn from_description(description: Vec<String>) -> Self {
        Self {
            description,
            start_date: None,
            end_date: None,
            skills: Vec::new(),
        }
    }

    /// The description as one continuous text, for date and skill matching.
    pub fn full_text(&self) -> String {
        text::collapse_whitespace(&self.description.join(" "))
    }
}

/// One structured record per input document: the section map in original
/// document order, plus the segmented employment history.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    /// Section name to content lines, ordered by first occurrence.
    pub sections: IndexMap<String, Vec<String>>,

    /// Job entries from the work-experience section.
    pub work_experience: Vec<JobEntry>,

    /// Skills recognized in the skill section itself.
    pub skills_in_skill_section: Vec<String>,

    /// Skills newly learned from this document and appended to the
    /// dictionary, kept visible for callers that persist them.
    pub learned_skills: Vec<String>,
}

impl ParsedResume {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn serialize_start_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}

fn serialize_end_date<S: Serializer>(
    date: &Option<EndDate>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match date {
        Some(EndDate::On(d)) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        Some(EndDate::Open) => serializer.serialize_str("present"),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_serialize_zero_padded() {
        let entry = JobEntry {
            description: vec!["Backend engineer".to_string()],
            start_date: NaiveDate::from_ymd_opt(2015, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2016, 12, 31).map(EndDate::On),
            skills: vec![],
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"startDate\":\"01.05.2015\""));
        assert!(json.contains("\"endDate\":\"31.12.2016\""));
    }

    #[test]
    fn test_undetermined_dates_serialize_empty() {
        let entry = JobEntry::from_description(vec!["no dates".to_string()]);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"startDate\":\"\""));
        assert!(json.contains("\"endDate\":\"\""));
    }

    #[test]
    fn test_open_end_serializes_as_present() {
        let mut entry = JobEntry::from_description(vec!["ongoing role".to_string()]);
        entry.end_date = Some(EndDate::Open);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"endDate\":\"present\""));
    }

    #[test]
    fn test_full_text_collapses_line_breaks() {
        let entry = JobEntry::from_description(vec![
            "Acme Corp ".to_string(),
            " 01/2015 - 03/2016".to_string(),
        ]);
        assert_eq!(entry.full_text(), "Acme Corp 01/2015 - 03/2016");
    }
}
