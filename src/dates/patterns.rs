//! The catalogue of duration patterns.
//!
//! Employment durations appear in dozens of loosely punctuated shapes:
//! `04/2017 - 01/2018`, `mar. 2018 – jun. 2019`, `15 May 2015 to 16 July 2017`,
//! bare `2013-2014`. Each composite below is assembled from small fragments
//! glued together with a bounded run of non-alphanumeric separator characters,
//! so hyphens, slashes, dots, and en dashes all read as the same connective.
//!
//! The regex crate has no look-around. The Python-era digit guards
//! (`(?<!\d)…(?!\d)`) become `\b` boundaries, the month-before-year lookahead
//! becomes a capture group, and the prose-context guard around start-only
//! dates is applied procedurally in the extractor.

use regex::Regex;

/// Any single separator character between date tokens.
const SEP: &str = r"[^a-zA-Z\d]";

/// Three-letter month names; also matched inside full names ("July" hits "jul").
const MONTHS_SHORT: &str = r"(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)";

const MONTHS_LONG: &str = r"(january|february|march|april|may|june|july|august|september|october|november|december)";

/// A 1-2 digit month standing alone between non-digits.
const MONTH_NUMERIC: &str = r"\b\d{1,2}\b";

/// A plausible Gregorian year, 1900-2099.
const YEAR: &str = r"((20|19)\d{2})";

/// Compiled duration patterns, built once and reused read-only across
/// every document in a batch.
#[derive(Debug)]
pub struct DurationPatterns {
    /// A single year token.
    pub year: Regex,
    /// A bare `\d{4}` run, used by the approximate duration counter.
    pub year_token: Regex,
    /// Short alphabetic month, for month extraction inside a matched span.
    pub months_short: Regex,
    /// Numeric month, for month extraction inside a matched span.
    pub month_numeric: Regex,
    /// Numeric month captured immediately ahead of a year (`07` in `31.07.2015`).
    pub month_numeric_long: Regex,
    /// Two to six years chained by separators (`2012 - 2013 - 2015`).
    pub multi_year_range: Regex,
    /// Month+year ranges, alphabetic or numeric (`04/2017 - 01/2018`).
    pub date_range: Regex,
    /// Day-month-year ranges in digits (`15.01.2014 - 31.07.2015`).
    pub date_range_numeric_long: Regex,
    /// Day-month-year ranges with alphabetic months (`15 May 2015 - 16 July 2017`).
    pub date_range_alphabetic_long: Regex,
    /// Two months sharing one trailing year (`04-05.2017`).
    pub month_range: Regex,
    /// A start date with no matching end; context-gated by the extractor.
    pub start_date_only: Regex,
    /// Open-ended end markers.
    pub open_end_marker: Regex,
}

impl DurationPatterns {
    pub fn new() -> Self {
        let month_alphabetic = format!("({MONTHS_SHORT}|{MONTHS_LONG})");

        let start_alphabetic = format!("{month_alphabetic}{SEP}{{1,3}}{YEAR}");
        let start_numeric = format!("{MONTH_NUMERIC}{SEP}{{1,3}}{YEAR}");
        // Long forms require a day-of-month token ahead of the month.
        let start_numeric_long = format!(r"\d{{1,2}}{SEP}?{MONTH_NUMERIC}{SEP}?{YEAR}");
        let start_alphabetic_long = format!(r"\d{{1,2}}{SEP}?{month_alphabetic}{SEP}?{YEAR}");

        let open = "(present)|(now)|(today)";
        let end_alphabetic = format!("(({month_alphabetic}{SEP}{{1,3}}{YEAR})|{open})");
        let end_numeric = format!("(({MONTH_NUMERIC}{SEP}{{1,3}}{YEAR})|{open})");
        let end_numeric_long = format!("(({start_numeric_long})|{open})");
        let end_alphabetic_long = format!("(({start_alphabetic_long})|{open})");

        let range_alphabetic = format!("({start_alphabetic}{SEP}{{1,3}}{end_alphabetic})");
        let range_numeric = format!("({start_numeric}{SEP}{{1,3}}{end_numeric})");

        Self {
            year: compile(YEAR),
            year_token: compile(r"\d{4}"),
            months_short: compile(MONTHS_SHORT),
            month_numeric: compile(MONTH_NUMERIC),
            month_numeric_long: compile(r"(\d{1,2})[^A-Za-z]\d{4}"),
            multi_year_range: compile(&format!("{YEAR}({SEP}{{1,3}}{YEAR}){{1,5}}")),
            date_range: compile(&format!(
                "({range_alphabetic}|{range_numeric})({SEP}{{1,4}}|$)"
            )),
            date_range_numeric_long: compile(&format!(
                "({start_numeric_long}{SEP}{{1,3}}{end_numeric_long})({SEP}{{1,4}}|$)"
            )),
            date_range_alphabetic_long: compile(&format!(
                "({start_alphabetic_long}{SEP}{{1,3}}{end_alphabetic_long})({SEP}{{1,4}}|$)"
            )),
            month_range: compile(&format!(
                "({month_alphabetic}|{MONTH_NUMERIC}){SEP}{{1,4}}({month_alphabetic}|{MONTH_NUMERIC}){SEP}{{1,2}}{YEAR}"
            )),
            start_date_only: compile(&format!("({start_numeric}|{start_alphabetic})")),
            open_end_marker: compile(r"\b(present|now|today)\b"),
        }
    }
}

impl Default for DurationPatterns {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).unwrap()
}
