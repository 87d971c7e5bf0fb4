//! The section keyword dictionary.
//!
//! Maps canonical section names ("WorkExperience", "Skills", ...) to the
//! synonym strings documents actually use for them. Loaded once per run and
//! read-only afterwards. Synonyms are matched longest-first so that
//! "Work Experience" wins over the bare "Experience".

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Canonical name of the employment-history section.
pub const WORK_EXPERIENCE: &str = "WorkExperience";

/// Canonical name of the skill section.
pub const SKILLS: &str = "Skills";

#[derive(Debug, Clone, Default)]
pub struct KeywordDictionary {
    /// Section name to synonyms, synonyms sorted longest-first.
    sections: IndexMap<String, Vec<String>>,
    /// Every (section, synonym) pair, sorted longest-synonym-first.
    ranked: Vec<(String, String)>,
}

impl KeywordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary bundled with the crate.
    pub fn builtin() -> Self {
        let mut dict = Self::new();
        for (name, data) in [
            ("Summary", include_str!("../resources/keywordlists/Summary.txt")),
            (
                "WorkExperience",
                include_str!("../resources/keywordlists/WorkExperience.txt"),
            ),
            (
                "Education",
                include_str!("../resources/keywordlists/Education.txt"),
            ),
            ("Skills", include_str!("../resources/keywordlists/Skills.txt")),
            (
                "Languages",
                include_str!("../resources/keywordlists/Languages.txt"),
            ),
            (
                "Certifications",
                include_str!("../resources/keywordlists/Certifications.txt"),
            ),
        ] {
            dict.insert(name, parse_lines(data));
        }
        dict
    }

    /// Load from a directory of `SectionName.txt` files, one synonym per
    /// line. The file stem becomes the canonical section name.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        let mut dict = Self::new();
        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path)?;
            dict.insert(name, parse_lines(&content));
        }
        if dict.is_empty() {
            return Err(Error::Resource(format!(
                "no keyword lists found in {}",
                dir.display()
            )));
        }
        Ok(dict)
    }

    /// Register a section and its synonyms.
    pub fn insert(&mut self, section: impl Into<String>, mut synonyms: Vec<String>) {
        synonyms.sort_by(|a, b| b.len().cmp(&a.len()));
        self.sections.insert(section.into(), synonyms);

        self.ranked = self
            .sections
            .iter()
            .flat_map(|(name, syns)| syns.iter().map(move |s| (name.clone(), s.clone())))
            .collect();
        self.ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate sections in insertion order with their synonyms.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(name, syns)| (name.as_str(), syns.as_slice()))
    }

    /// For each section, the first (longest) synonym found in `text`,
    /// case-insensitive substring match.
    pub fn matching_sections(&self, text: &str) -> Vec<(&str, &str)> {
        let upper = text.to_uppercase();
        self.sections
            .iter()
            .filter_map(|(name, syns)| {
                syns.iter()
                    .find(|s| upper.contains(&s.to_uppercase()))
                    .map(|s| (name.as_str(), s.as_str()))
            })
            .collect()
    }

    /// Canonical name of the longest synonym found anywhere in `text`.
    pub fn match_section(&self, text: &str) -> Option<&str> {
        let upper = text.to_uppercase();
        self.ranked
            .iter()
            .find(|(_, keyword)| upper.contains(&keyword.to_uppercase()))
            .map(|(name, _)| name.as_str())
    }
}

fn parse_lines(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
