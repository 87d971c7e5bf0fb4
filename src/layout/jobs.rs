//! Splitting the work-experience section into individual job entries.
//!
//! Section flattening keeps only line text, so the segmenter first locates
//! the section's lines back in the original record sequence to recover their
//! visual attributes. The primary split requires a vertical spacing jump
//! *and* an indentation decrease on the same line pair, which separates new
//! job blocks from ordinary wrapped lines. When that explains too few of the
//! durations the section mentions, progressively looser strategies take over.

use chrono::NaiveDate;

use crate::dates::{DateRange, DateRangeExtractor};
use crate::model::{EndDate, JobEntry, LineRecord};
use crate::text;

/// A vertical gap counts as a break when it exceeds the previous gap by
/// this factor.
const SPACING_JUMP_FACTOR: f32 = 1.4;

/// Segment the work-experience section into job entries and date each one.
///
/// `section_lines` is the section's content as produced by the section
/// segmenter; `lines` is the full original record sequence.
pub fn segment_jobs(
    lines: &[LineRecord],
    section_lines: &[String],
    extractor: &DateRangeExtractor,
) -> Vec<JobEntry> {
    let content: Vec<&String> = section_lines
        .iter()
        .filter(|line| !text::is_blank(line))
        .collect();
    let (Some(first), Some(last)) = (content.first(), content.last()) else {
        return Vec::new();
    };

    let all: Vec<&LineRecord> = lines.iter().collect();
    let filtered: Vec<&LineRecord> = lines.iter().filter(|line| !line.is_blank()).collect();
    let Some((start, end)) = locate_span(&filtered, first, last) else {
        log::debug!("work-experience lines not found in the original sequence");
        return Vec::new();
    };

    let section_text = filtered[start..=end]
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let expected = extractor.count_durations(&section_text);

    let mut best = split_by_spacing_and_indent(&filtered, start, end);
    log::debug!(
        "spacing+indent split: {} entries ({} durations expected)",
        best.len(),
        expected
    );

    // Fallbacks fire while the best split explains at most half of the
    // expected durations; the most productive strategy wins.
    if best.len() * 2 <= expected {
        if let Some((start, end)) = locate_span(&all, first, last) {
            let candidate = split_on_blank_lines(&all, start, end);
            log::debug!("blank-line split: {} entries", candidate.len());
            if candidate.len() > best.len() {
                best = candidate;
            }
        }
    }
    if best.len() * 2 <= expected {
        if let Some((start, end)) = locate_span(&all, first, last) {
            let candidate = split_by_spacing(&all, start, end);
            log::debug!("spacing-only split: {} entries", candidate.len());
            if candidate.len() > best.len() {
                best = candidate;
            }
        }
    }
    if best.len() * 2 <= expected {
        let candidate = split_by_indent(&filtered, start, end);
        log::debug!("indent-only split: {} entries", candidate.len());
        if candidate.len() > best.len() {
            best = candidate;
        }
    }

    let mut entries: Vec<JobEntry> = best.into_iter().map(JobEntry::from_description).collect();
    for entry in &mut entries {
        let duration = extractor.extract(&entry.full_text());
        apply_duration(entry, &duration);
    }
    entries
}

/// Find the section's first and last content lines in `lines` by text
/// equality: first occurrence of the opening line, last occurrence of the
/// closing line.
fn locate_span(lines: &[&LineRecord], first: &str, last: &str) -> Option<(usize, usize)> {
    let start = lines.iter().position(|line| line.text == first)?;
    let end = lines.iter().rposition(|line| line.text == last)?;
    (start <= end).then_some((start, end))
}

/// Primary strategy: a new entry needs a vertical spacing jump (or page
/// change) together with a leftward indentation shift.
fn split_by_spacing_and_indent(
    lines: &[&LineRecord],
    start: usize,
    end: usize,
) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current = vec![lines[start].text.clone()];
    let mut previous_gaps: Vec<f32> = Vec::new();

    for i in start + 1..=end {
        let gap = lines[i - 1].bottom_margin - lines[i].bottom_margin;
        let vertical = is_vertical_break(lines[i - 1], lines[i], gap, &previous_gaps);
        previous_gaps.push(gap.abs());
        let indent = lines[i - 1].left_margin - lines[i].left_margin > 0.0;

        if vertical && indent {
            entries.push(current);
            current = vec![lines[i].text.clone()];
        } else {
            current.push(lines[i].text.clone());
        }
    }
    entries.push(current);
    entries
}

/// The gap is measured against the immediately preceding gap, so documents
/// with tight or generous line spacing self-calibrate. Never fires on the
/// first pair. A negative gap means a new page or column started.
fn is_vertical_break(
    prev: &LineRecord,
    curr: &LineRecord,
    gap: f32,
    previous_gaps: &[f32],
) -> bool {
    let Some(&last_gap) = previous_gaps.last() else {
        return false;
    };
    curr.page_number != prev.page_number || (gap > 0.0 && gap > last_gap * SPACING_JUMP_FACTOR)
}

/// Fallback: paragraph breaks. Runs over the unfiltered sequence, where the
/// blank lines still exist. Yields nothing unless at least one blank line
/// was seen.
fn split_on_blank_lines(lines: &[&LineRecord], start: usize, end: usize) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current = vec![lines[start].text.clone()];
    let mut found = false;

    for i in start + 1..=end {
        if lines[i].is_blank() {
            found = true;
            if !current.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
        } else {
            current.push(lines[i].text.clone());
        }
    }
    if !found {
        return Vec::new();
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}

/// Fallback: vertical spacing jumps alone.
fn split_by_spacing(lines: &[&LineRecord], start: usize, end: usize) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current = vec![lines[start].text.clone()];
    let mut previous_gaps: Vec<f32> = Vec::new();
    let mut found = false;

    for i in start + 1..=end {
        let gap = lines[i - 1].bottom_margin - lines[i].bottom_margin;
        let vertical = is_vertical_break(lines[i - 1], lines[i], gap, &previous_gaps);
        previous_gaps.push(gap.abs());

        if vertical {
            found = true;
            entries.push(current);
            current = vec![lines[i].text.clone()];
        } else {
            current.push(lines[i].text.clone());
        }
    }
    if !found {
        return Vec::new();
    }
    entries.push(current);
    entries
}

/// Fallback: leftward indentation shifts alone.
fn split_by_indent(lines: &[&LineRecord], start: usize, end: usize) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current = vec![lines[start].text.clone()];
    let mut found = false;

    for i in start + 1..=end {
        if lines[i - 1].left_margin - lines[i].left_margin > 0.0 {
            found = true;
            entries.push(current);
            current = vec![lines[i].text.clone()];
        } else {
            current.push(lines[i].text.clone());
        }
    }
    if !found {
        return Vec::new();
    }
    entries.push(current);
    entries
}

/// Turn an extracted duration into entry dates.
///
/// Year-only ranges span whole years (Jan 1 through Dec 31); anything else
/// defaults the day to the 1st. Implausible months fail date construction
/// and leave the field undetermined.
fn apply_duration(entry: &mut JobEntry, duration: &DateRange) {
    let year_span = duration.year_only
        || (duration.start_year.is_some()
            && duration.end_year.is_some()
            && duration.start_month.is_none()
            && duration.end_month.is_none());

    if year_span {
        entry.start_date = duration
            .start_year
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        entry.end_date = duration
            .end_year
            .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
            .map(EndDate::On);
        return;
    }

    if let (Some(month), Some(year)) = (duration.start_month, duration.start_year) {
        entry.start_date = NaiveDate::from_ymd_opt(year, month, 1);
    }
    if duration.open_ended {
        entry.end_date = Some(EndDate::Open);
    } else if let (Some(month), Some(year)) = (duration.end_month, duration.end_year) {
        entry.end_date = NaiveDate::from_ymd_opt(year, month, 1).map(EndDate::On);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, left: f32, bottom: f32) -> LineRecord {
        LineRecord::new(text)
            .with_left_margin(left)
            .with_bottom_margin(bottom)
    }

    fn extractor() -> DateRangeExtractor {
        DateRangeExtractor::new()
    }

    #[test]
    fn test_primary_split_on_spacing_and_indent() {
        let lines = vec![
            line("Acme Corp", 40.0, 700.0),
            line("did 01/2015 - 03/2016 stuff", 60.0, 685.0),
            // Big gap and back to the header indent: new job block.
            line("Beta Inc", 40.0, 640.0),
            line("did 05/2017 - 06/2018 stuff", 60.0, 625.0),
        ];
        let section: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
        let entries = segment_jobs(&lines, &section, &extractor());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description[0], "Acme Corp");
        assert_eq!(entries[0].start_date, NaiveDate::from_ymd_opt(2015, 1, 1));
        assert_eq!(
            entries[0].end_date,
            NaiveDate::from_ymd_opt(2016, 3, 1).map(EndDate::On)
        );
        assert_eq!(entries[1].description[0], "Beta Inc");
        assert_eq!(entries[1].start_date, NaiveDate::from_ymd_opt(2017, 5, 1));
    }

    #[test]
    fn test_page_change_with_indent_breaks() {
        let lines = vec![
            line("Acme Corp", 40.0, 100.0),
            line("wrapped description line", 60.0, 85.0),
            line("Beta Inc", 40.0, 720.0).with_page_number(2),
        ];
        let section: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
        let entries = segment_jobs(&lines, &section, &extractor());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].description, vec!["Beta Inc".to_string()]);
    }

    #[test]
    fn test_line_wraps_do_not_split() {
        // Uniform spacing, deeper indent: ordinary wrapped lines.
        let lines = vec![
            line("Acme Corp", 40.0, 700.0),
            line("long description", 60.0, 685.0),
            line("more description", 60.0, 670.0),
            line("even more", 60.0, 655.0),
        ];
        let section: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
        let entries = segment_jobs(&lines, &section, &extractor());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description.len(), 4);
    }

    #[test]
    fn test_blank_line_fallback_wins_when_primary_undersegments() {
        // Four isolated years -> four expected durations, but no layout
        // variation for the primary strategy. Blank lines split into three.
        let lines = vec![
            line("Engineer 2008 at Foo", 40.0, 700.0),
            line("", 40.0, 685.0),
            line("Engineer 2011 at Bar", 40.0, 670.0),
            line("", 40.0, 655.0),
            line("Engineer 2014 at Baz", 40.0, 640.0),
            line("Engineer 2017 at Qux", 40.0, 625.0),
        ];
        let section: Vec<String> = lines
            .iter()
            .filter(|l| !l.is_blank())
            .map(|l| l.text.clone())
            .collect();
        let entries = segment_jobs(&lines, &section, &extractor());

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[2].description,
            vec![
                "Engineer 2014 at Baz".to_string(),
                "Engineer 2017 at Qux".to_string()
            ]
        );
    }

    #[test]
    fn test_year_only_range_spans_whole_years() {
        let mut entry = JobEntry::from_description(vec!["Acme 2013-2014".to_string()]);
        let duration = extractor().extract("Acme 2013-2014");
        apply_duration(&mut entry, &duration);

        assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2013, 1, 1));
        assert_eq!(
            entry.end_date,
            NaiveDate::from_ymd_opt(2014, 12, 31).map(EndDate::On)
        );
    }

    #[test]
    fn test_open_ended_duration() {
        let mut entry = JobEntry::from_description(vec!["Acme Jan 2015 - present".to_string()]);
        let duration = extractor().extract("Acme Jan 2015 - present");
        apply_duration(&mut entry, &duration);

        assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2015, 1, 1));
        assert_eq!(entry.end_date, Some(EndDate::Open));
    }

    #[test]
    fn test_empty_section_yields_no_entries() {
        let entries = segment_jobs(&[], &[], &extractor());
        assert!(entries.is_empty());
    }
}
