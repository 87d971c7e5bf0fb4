//! Splitting a document into named sections using the inferred signature.

use indexmap::IndexMap;

use crate::keywords::KeywordDictionary;
use crate::layout::signature::VisualSignature;
use crate::model::LineRecord;
use crate::text;

/// Section name used when the layout signal was too weak to segment and the
/// whole document becomes one block.
pub const UNLABELED_SECTION: &str = "Unlabeled";

/// Walk the document once, switching the current section whenever a line
/// looks like a header. Content lines preserve original document order;
/// lines before the first recognized section are dropped.
pub fn segment(
    lines: &[LineRecord],
    keywords: &KeywordDictionary,
    signature: Option<&VisualSignature>,
) -> IndexMap<String, Vec<String>> {
    let Some(signature) = signature else {
        return single_block(lines);
    };

    let mut sections: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in lines {
        if signature.matches(line) {
            if let Some(section) = keywords.match_section(&line.normalized_text()) {
                sections.entry(section.to_string()).or_default();
                current = Some(section.to_string());
                continue;
            }
            if line.is_blank() {
                continue;
            }
            // Header-styled but unrecognized: an all-caps bare line is
            // taken as a new section under its own name, anything else is
            // ordinary content.
            if signature.all_caps
                && text::is_all_caps(&line.text)
                && text::has_no_punctuation(&line.text)
            {
                let name = line.text.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
            } else if let Some(ref section) = current {
                sections
                    .entry(section.clone())
                    .or_default()
                    .push(line.text.clone());
            }
        } else if let Some(ref section) = current {
            if !line.is_blank() {
                sections
                    .entry(section.clone())
                    .or_default()
                    .push(line.text.clone());
            }
        }
    }
    sections
}

fn single_block(lines: &[LineRecord]) -> IndexMap<String, Vec<String>> {
    let mut sections = IndexMap::new();
    sections.insert(
        UNLABELED_SECTION.to_string(),
        lines
            .iter()
            .filter(|line| !line.is_blank())
            .map(|line| line.text.clone())
            .collect(),
    );
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{SKILLS, WORK_EXPERIENCE};

    fn header(text: &str) -> LineRecord {
        LineRecord::new(text)
            .with_font_size(18.0)
            .with_font_family("Arial-Bold")
            .with_left_margin(40.0)
            .with_font_color("#222222")
    }

    fn body(text: &str) -> LineRecord {
        LineRecord::new(text)
            .with_font_size(11.0)
            .with_font_family("Arial")
            .with_left_margin(60.0)
            .with_font_color("#000000")
    }

    fn caps_signature() -> VisualSignature {
        VisualSignature {
            font_size: Some(18.0),
            font_family: Some("Arial-Bold".to_string()),
            left_margin: Some(40.0),
            font_color: Some("#222222".to_string()),
            all_caps: true,
        }
    }

    #[test]
    fn test_segment_switches_on_keyword_headers() {
        let lines = vec![
            body("dropped preamble"),
            header("WORK EXPERIENCE"),
            body("Acme Corp"),
            body("built backends"),
            header("SKILLS"),
            body("java, sql"),
        ];
        let sections = segment(&lines, &KeywordDictionary::builtin(), Some(&caps_signature()));

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[WORK_EXPERIENCE],
            vec!["Acme Corp".to_string(), "built backends".to_string()]
        );
        assert_eq!(sections[SKILLS], vec!["java, sql".to_string()]);
    }

    #[test]
    fn test_unknown_all_caps_header_becomes_section() {
        let lines = vec![
            header("WORK EXPERIENCE"),
            body("Acme Corp"),
            header("SIDE PROJECTS 2019"),
            body("built a game"),
        ];
        let sections = segment(&lines, &KeywordDictionary::builtin(), Some(&caps_signature()));

        assert_eq!(
            sections["SIDE PROJECTS 2019"],
            vec!["built a game".to_string()]
        );
    }

    #[test]
    fn test_header_styled_punctuated_line_stays_content() {
        let lines = vec![
            header("WORK EXPERIENCE"),
            header("ACME CORP: LEAD"),
            body("built backends"),
        ];
        let sections = segment(&lines, &KeywordDictionary::builtin(), Some(&caps_signature()));

        assert_eq!(
            sections[WORK_EXPERIENCE],
            vec!["ACME CORP: LEAD".to_string(), "built backends".to_string()]
        );
    }

    #[test]
    fn test_no_signature_yields_single_block() {
        let lines = vec![
            body("first"),
            LineRecord::new("   "),
            body("second"),
        ];
        let sections = segment(&lines, &KeywordDictionary::builtin(), None);

        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[UNLABELED_SECTION],
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_lines_before_first_section_are_dropped() {
        let lines = vec![body("John Doe"), header("SKILLS"), body("python")];
        let sections = segment(&lines, &KeywordDictionary::builtin(), Some(&caps_signature()));

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[SKILLS], vec!["python".to_string()]);
    }
}
