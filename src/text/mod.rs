//! Text normalization helpers shared across the extraction pipeline.
//!
//! Rendered resume text carries bullets, private-use glyphs, and punctuation
//! that defeat both keyword matching and date recognition. Every component
//! normalizes through these helpers before matching anything.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters that interfere with date recognition and are replaced by spaces.
const DATE_NOISE: &[char] = &[
    ':', '.', ',', '/', '(', ')', '[', ']', '+', '?', '*', '#', '\u{F0B7}',
];

/// Collapse runs of whitespace (including newlines) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Clear the text of anything that would prevent keyword matching:
/// non-ASCII symbols and bullets become spaces, underscores are dropped,
/// whitespace is collapsed and trimmed.
pub fn strip_nonbasic(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|&c| c != '_')
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect();
    collapse_whitespace(&replaced).trim().to_string()
}

/// Prepare text for the duration cascade.
///
/// Separator punctuation (`.`, `/`, `,`, brackets, ...) becomes spaces so
/// `03.2012`, `03/2012`, and `03 2012` all read the same to the patterns.
/// Idempotent: cleaning already-clean text is a no-op.
pub fn clean_for_dates(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if DATE_NOISE.contains(&c) { ' ' } else { c })
        .collect();
    let collapsed = collapse_whitespace(&replaced);
    match collapsed.strip_suffix(' ') {
        Some(trimmed) => trimmed.to_string(),
        None => collapsed,
    }
}

/// Keep only ASCII letters, digits, and spaces. Used when a line must be
/// compared against a keyword as a whole.
pub fn strip_to_alnum(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Prepare a skill-section text for dictionary matching: NFC-normalize,
/// replace list punctuation and decorative glyphs with spaces, collapse.
pub fn clean_for_skills(text: &str) -> String {
    let text: String = text.nfc().collect();
    let replaced: String = text
        .chars()
        .map(|c| match c {
            ',' | ';' | '?' | '!' | '(' | ')' | '\\' | '/' => ' ',
            '\u{E000}'..='\u{F8FF}' => ' ',
            '\u{1F300}'..='\u{1F5FF}' => ' ',
            '\u{25A0}'..='\u{25FF}' => ' ',
            other => other,
        })
        .collect();
    collapse_whitespace(&replaced)
}

/// Drop sentence-ending periods while leaving intra-token dots alone
/// (`node.js` survives, `managed releases.` loses its period).
pub fn strip_sentence_punctuation(text: &str) -> String {
    let re = Regex::new(r"\.(\s|$)").unwrap();
    re.replace_all(text, "$1").into_owned()
}

/// True if the text is entirely upper case (digits and symbols are neutral).
pub fn is_all_caps(text: &str) -> bool {
    text == text.to_uppercase()
}

/// True if the trimmed text contains only letters, digits, and spaces.
pub fn has_no_punctuation(text: &str) -> bool {
    text.trim()
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace())
}

/// True if the line renders as empty (whitespace and newlines only).
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
