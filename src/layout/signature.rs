//! Inferring the visual signature of section-header lines.
//!
//! Resumes carry no markup: the only evidence that a line is a section
//! header is that it looks like the other section headers. Every line that
//! matches a section keyword contributes its visual attributes to frequency
//! tables, split across two populations: lines whose entire text *is* the
//! keyword, and lines where the keyword appears fully capitalized. The
//! per-attribute winners become the document's signature.

use crate::keywords::KeywordDictionary;
use crate::model::LineRecord;
use crate::text;

/// Minimum occurrences before an attribute value is representative.
const MIN_OCCURRENCES: u32 = 3;

/// Minimum all-caps keyword hits before headers are assumed capitalized.
const MIN_CAPITAL_MATCHES: u32 = 3;

/// The inferred "shape" of a section-header line for one document.
///
/// Attributes that could not be determined are `None` and simply not
/// asserted when matching lines against the signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualSignature {
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub left_margin: Option<f32>,
    pub font_color: Option<String>,
    /// Section keywords are written fully capitalized in this document.
    pub all_caps: bool,
}

impl VisualSignature {
    /// How many of the four visual attributes were determined.
    pub fn determined_attributes(&self) -> usize {
        [
            self.font_size.is_some(),
            self.font_family.is_some(),
            self.left_margin.is_some(),
            self.font_color.is_some(),
        ]
        .iter()
        .filter(|&&set| set)
        .count()
    }

    /// A signature is usable with three determined attributes, or two when
    /// the all-caps flag supplies the third signal.
    pub fn is_sufficient(&self) -> bool {
        let determined = self.determined_attributes();
        determined >= 3 || (determined == 2 && self.all_caps)
    }

    /// True if the line carries every asserted attribute of the signature.
    /// Attribute values come verbatim from the renderer, so equality is
    /// exact. An all-caps signature additionally requires the line text to
    /// be literally upper case.
    pub fn matches(&self, line: &LineRecord) -> bool {
        if let Some(size) = self.font_size {
            if line.font_size != size {
                return false;
            }
        }
        if let Some(ref family) = self.font_family {
            if &line.font_family != family {
                return false;
            }
        }
        if let Some(margin) = self.left_margin {
            if line.left_margin != margin {
                return false;
            }
        }
        if let Some(ref color) = self.font_color {
            if &line.font_color != color {
                return false;
            }
        }
        if self.all_caps && !text::is_all_caps(&line.text) {
            return false;
        }
        true
    }
}

/// An ordered frequency table: insertion order is preserved so ties break
/// deterministically toward the first-seen value.
#[derive(Debug, Clone)]
struct FreqTable<K> {
    entries: Vec<(K, u32)>,
}

impl<K: PartialEq> FreqTable<K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: K) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += 1;
        } else {
            self.entries.push((key, 1));
        }
    }

    /// The most frequent key with at least `min` occurrences; ties go to
    /// the first-seen key.
    fn most_frequent(&self, min: u32) -> Option<(&K, u32)> {
        let mut best: Option<(&K, u32)> = None;
        for (key, count) in &self.entries {
            if *count >= min && best.map_or(true, |(_, c)| *count > c) {
                best = Some((key, *count));
            }
        }
        best
    }
}

impl FreqTable<f32> {
    /// The numerically largest key with at least `min` occurrences.
    fn largest(&self, min: u32) -> Option<(f32, u32)> {
        self.entries
            .iter()
            .filter(|(_, count)| *count >= min)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, c)| (*k, *c))
    }

    /// The numerically smallest key with at least `min` occurrences.
    fn smallest(&self, min: u32) -> Option<(f32, u32)> {
        self.entries
            .iter()
            .filter(|(_, count)| *count >= min)
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, c)| (*k, *c))
    }
}

/// Attribute frequency tables for one match population.
struct Population {
    font_size: FreqTable<f32>,
    font_family: FreqTable<String>,
    left_margin: FreqTable<f32>,
    font_color: FreqTable<String>,
}

impl Population {
    fn new() -> Self {
        Self {
            font_size: FreqTable::new(),
            font_family: FreqTable::new(),
            left_margin: FreqTable::new(),
            font_color: FreqTable::new(),
        }
    }

    fn record(&mut self, line: &LineRecord) {
        self.font_size.add(line.font_size);
        self.font_family.add(line.font_family.clone());
        self.left_margin.add(line.left_margin);
        self.font_color.add(line.font_color.clone());
    }
}

/// Infer the section-header signature of one document.
///
/// Returns `None` when too few consistent attribute matches exist; the
/// document then degrades to a single unsegmented block.
pub fn infer_signature(
    lines: &[LineRecord],
    keywords: &KeywordDictionary,
) -> Option<VisualSignature> {
    let mut caps_population = Population::new();
    let mut entire_population = Population::new();
    let mut capital_matches = 0u32;

    for line in lines {
        let normalized = line.normalized_text();
        for (_, keyword) in keywords.matching_sections(&normalized) {
            if line.text.contains(&keyword.to_uppercase()) {
                caps_population.record(line);
                capital_matches += 1;
            }
            if text::strip_to_alnum(&normalized).to_uppercase() == keyword.to_uppercase() {
                entire_population.record(line);
            }
        }
    }

    let signature = VisualSignature {
        font_size: pick(
            caps_population.font_size.largest(MIN_OCCURRENCES),
            entire_population.font_size.largest(MIN_OCCURRENCES),
        ),
        font_family: pick_ref(
            caps_population.font_family.most_frequent(MIN_OCCURRENCES),
            entire_population.font_family.most_frequent(MIN_OCCURRENCES),
        ),
        left_margin: pick(
            caps_population.left_margin.smallest(MIN_OCCURRENCES),
            entire_population.left_margin.smallest(MIN_OCCURRENCES),
        ),
        font_color: pick_ref(
            caps_population.font_color.most_frequent(MIN_OCCURRENCES),
            entire_population.font_color.most_frequent(MIN_OCCURRENCES),
        ),
        all_caps: capital_matches >= MIN_CAPITAL_MATCHES,
    };

    if signature.is_sufficient() {
        log::debug!(
            "inferred header signature with {} attributes (all_caps: {})",
            signature.determined_attributes(),
            signature.all_caps
        );
        Some(signature)
    } else {
        log::warn!(
            "only {} header attributes could be inferred; document will not be segmented",
            signature.determined_attributes()
        );
        None
    }
}

/// Combine the two populations' candidates for one attribute: agreement
/// settles it, otherwise the higher occurrence count wins (ties go to the
/// entire-match population).
fn pick<K: PartialEq + Copy>(caps: Option<(K, u32)>, entire: Option<(K, u32)>) -> Option<K> {
    match (caps, entire) {
        (Some((a, na)), Some((b, nb))) => {
            if a == b || na > nb {
                Some(a)
            } else {
                Some(b)
            }
        }
        (Some((a, _)), None) => Some(a),
        (None, Some((b, _))) => Some(b),
        (None, None) => None,
    }
}

fn pick_ref<K: PartialEq + Clone>(
    caps: Option<(&K, u32)>,
    entire: Option<(&K, u32)>,
) -> Option<K> {
    pick(caps, entire).cloned()
}
