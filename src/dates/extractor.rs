//! Duration extraction: locating and parsing employment date ranges.
//!
//! A priority-ordered list of strategies is tried against the cleaned text;
//! the first strategy that recognizes anything wins. Finding nothing is the
//! expected common case and produces an empty [`DateRange`], never an error.

use crate::dates::patterns::DurationPatterns;
use crate::text;

/// The outcome of one extraction: a best-effort (month, year) pair for each
/// side of the range. Built once per text span and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Start month, 1-12.
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    /// End month, 1-12.
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
    /// True when the end was an explicit ongoing marker ("present", "now",
    /// "today", or a trailing ellipsis) rather than a date.
    pub open_ended: bool,
    /// True when the range was year-only (`2013-2014`); months carry the
    /// January default and callers may widen the range to full years.
    pub year_only: bool,
}

impl DateRange {
    /// True when nothing was recognized at all.
    pub fn is_empty(&self) -> bool {
        self.start_year.is_none() && self.end_year.is_none() && !self.open_ended
    }

    /// True when both a start month and year were found.
    pub fn has_start(&self) -> bool {
        self.start_month.is_some() && self.start_year.is_some()
    }
}

/// Which month notation a strategy searches for inside a matched span.
#[derive(Debug, Clone, Copy)]
enum MonthSearch {
    /// Alphabetic month names first, plain numeric as fallback.
    AlphabeticFirst,
    /// A numeric month directly ahead of a year (day-month-year formats).
    NumericLong,
}

/// Recognizes employment durations in free-form text.
///
/// Compiles its pattern library once; an instance is immutable and reusable
/// across all documents of a batch.
#[derive(Debug, Default)]
pub struct DateRangeExtractor {
    patterns: DurationPatterns,
}

impl DateRangeExtractor {
    pub fn new() -> Self {
        Self {
            patterns: DurationPatterns::new(),
        }
    }

    /// Extract the most plausible duration mentioned in `text`.
    pub fn extract(&self, text: &str) -> DateRange {
        let cleaned = prepare(text);

        type Strategy = fn(&DateRangeExtractor, &str) -> Option<DateRange>;
        let strategies: [Strategy; 6] = [
            Self::long_numeric_range,
            Self::long_alphabetic_range,
            Self::month_year_range,
            Self::shared_year_month_range,
            Self::multi_year_range,
            Self::open_ended_start,
        ];

        strategies
            .iter()
            .find_map(|strategy| strategy(self, &cleaned))
            .unwrap_or_default()
    }

    /// Approximate the number of distinct durations mentioned in a passage.
    ///
    /// Counts year tokens not followed within ten characters by the start of
    /// another year token, so a `MM.YYYY - MM.YYYY` range counts once: only
    /// its trailing year survives. A cheap lower bound used to judge how many
    /// job entries a section ought to split into.
    pub fn count_durations(&self, text: &str) -> usize {
        let years: Vec<_> = self.patterns.year_token.find_iter(text).collect();
        years
            .iter()
            .filter(|year| {
                !years
                    .iter()
                    .any(|other| other.start() >= year.end() && other.start() <= year.end() + 10)
            })
            .count()
    }

    /// `DD.MM.YYYY - DD.MM.YYYY` and friends.
    fn long_numeric_range(&self, text: &str) -> Option<DateRange> {
        let span = self.patterns.date_range_numeric_long.find(text)?;
        Some(self.extract_span(span.as_str(), MonthSearch::NumericLong))
    }

    /// `15 May 2015 - 16 July 2017`.
    fn long_alphabetic_range(&self, text: &str) -> Option<DateRange> {
        let span = self.patterns.date_range_alphabetic_long.find(text)?;
        Some(self.extract_span(span.as_str(), MonthSearch::AlphabeticFirst))
    }

    /// `04/2017 - 01/2018`, `mar 2018 - jun 2019`, `Jan 2015 - present`.
    fn month_year_range(&self, text: &str) -> Option<DateRange> {
        let span = self.patterns.date_range.find(text)?;
        Some(self.extract_span(span.as_str(), MonthSearch::AlphabeticFirst))
    }

    /// Two months sharing a single trailing year, `04-05.2017`.
    fn shared_year_month_range(&self, text: &str) -> Option<DateRange> {
        let span = self.patterns.month_range.find(text)?.as_str();
        let year: Option<i32> = self
            .patterns
            .year
            .find(span)
            .and_then(|m| m.as_str().parse().ok());

        let mut range = DateRange {
            start_year: year,
            end_year: year,
            ..DateRange::default()
        };
        if let Some((month, month_end)) = self.find_month_with_end(span) {
            range.start_month = Some(month);
            range.end_month = self.find_month_with_end(&span[month_end..]).map(|(m, _)| m);
        }
        Some(range)
    }

    /// Chains of bare years: `2013-2014`, `2012 - 2013 - 2015`. Keeps the
    /// first and last year; months default to January and `year_only` is set
    /// so callers can apply the full-year convention.
    fn multi_year_range(&self, text: &str) -> Option<DateRange> {
        let span = self.patterns.multi_year_range.find(text)?.as_str();
        let years: Vec<i32> = self
            .patterns
            .year
            .find_iter(span)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        Some(DateRange {
            start_month: Some(1),
            start_year: years.first().copied(),
            end_month: Some(1),
            end_year: years.last().copied(),
            open_ended: false,
            year_only: true,
        })
    }

    /// A start date with no end at all, e.g. `2.2015 -` at the end of a job
    /// header. Candidates buried in runs of non-letter characters are
    /// rejected so an isolated year inside tabular prose is not mistaken
    /// for a date.
    fn open_ended_start(&self, text: &str) -> Option<DateRange> {
        for candidate in self.patterns.start_date_only.find_iter(text) {
            if buried_in_symbols(text, candidate.start(), candidate.end()) {
                continue;
            }
            let span = candidate.as_str();
            if let Some(year) = self.patterns.year.find(span) {
                return Some(DateRange {
                    start_year: year.as_str().parse().ok(),
                    start_month: self.find_month(span, MonthSearch::AlphabeticFirst),
                    ..DateRange::default()
                });
            }
        }
        None
    }

    /// Pull start and end out of one matched range span.
    ///
    /// The start year is the first year in the span and the start month the
    /// first month anywhere in it. The end-side search restarts after the
    /// start-year match, which naturally skips the start date.
    fn extract_span(&self, span: &str, mode: MonthSearch) -> DateRange {
        let mut range = DateRange::default();
        let Some(start_year) = self.patterns.year.find(span) else {
            return range;
        };
        range.start_year = start_year.as_str().parse().ok();
        range.start_month = self.find_month(span, mode);

        let tail = &span[start_year.end()..];
        if let Some(end_year) = self.patterns.year.find(tail) {
            range.end_year = end_year.as_str().parse().ok();
            range.end_month = self.find_month(tail, mode);
        } else if self.patterns.open_end_marker.is_match(span) {
            range.open_ended = true;
        }
        range
    }

    fn find_month(&self, text: &str, mode: MonthSearch) -> Option<u32> {
        match mode {
            MonthSearch::AlphabeticFirst => self.find_month_with_end(text).map(|(m, _)| m),
            MonthSearch::NumericLong => self
                .patterns
                .month_numeric_long
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok()),
        }
    }

    /// First month in `text` (alphabetic preferred), with its match end so
    /// follow-up searches can resume past it.
    fn find_month_with_end(&self, text: &str) -> Option<(u32, usize)> {
        if let Some(m) = self.patterns.months_short.find(text) {
            if let Some(index) = month_index(m.as_str()) {
                return Some((index, m.end()));
            }
        }
        self.patterns
            .month_numeric
            .find(text)
            .and_then(|m| m.as_str().parse().ok().map(|index| (index, m.end())))
    }
}

/// Canonicalize connectives before the cascade runs: textual range markers
/// become hyphens and ellipses become an explicit ongoing marker, then the
/// separator punctuation is cleared.
fn prepare(text: &str) -> String {
    let connected = text.replace(" to ", " - ").replace(" until ", " - ");
    let marked = connected.replace('\u{2026}', " present ").replace("...", " present ");
    text::clean_for_dates(&marked)
}

/// True when five or more consecutive non-letter characters directly precede
/// or follow the candidate span.
fn buried_in_symbols(text: &str, start: usize, end: usize) -> bool {
    let before: Vec<char> = text[..start].chars().rev().take(5).collect();
    if before.len() == 5 && before.iter().all(|c| !c.is_ascii_alphabetic()) {
        return true;
    }
    let after: Vec<char> = text[end..].chars().take(5).collect();
    after.len() == 5 && after.iter().all(|c| !c.is_ascii_alphabetic())
}

fn month_index(name: &str) -> Option<u32> {
    let index = match name.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(index)
}
