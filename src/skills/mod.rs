//! Skill dictionary matching and the flanked-word learning heuristic.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::text;

/// Words too generic to ever be learned as skills, beyond the avoid-list.
const STOPWORDS: &[&str] = &[
    "a", "about", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been", "both",
    "but", "by", "can", "do", "for", "from", "had", "has", "have", "how", "i", "if", "in",
    "into", "is", "it", "its", "like", "more", "most", "my", "no", "not", "of", "on", "only",
    "or", "other", "our", "out", "over", "per", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "under", "up", "use", "used", "very", "was", "we", "well", "were", "what", "when",
    "where", "which", "while", "who", "will", "with", "within", "would", "you", "your",
];

/// The skill dictionary: known skills (matched longest-first), an avoid-list
/// of words never to learn, and the log of skills learned so far.
#[derive(Debug, Clone, Default)]
pub struct SkillDictionary {
    /// Dictionary casing, sorted longest-first for matching.
    skills: Vec<String>,
    /// Lowercase membership index.
    known: HashSet<String>,
    /// Lowercase words excluded from learning.
    avoid: HashSet<String>,
    /// Every skill learned through this dictionary, in learning order.
    learned: Vec<String>,
}

impl SkillDictionary {
    pub fn new(skills: Vec<String>, avoid: Vec<String>) -> Self {
        let mut dict = Self {
            avoid: avoid.into_iter().map(|word| word.to_lowercase()).collect(),
            ..Self::default()
        };
        for skill in skills {
            dict.add_skill(skill);
        }
        dict
    }

    /// The skill list and avoid-list bundled with the crate.
    pub fn builtin() -> Self {
        Self::new(
            parse_lines(include_str!("../../resources/skills/skills_to_find.txt")),
            parse_lines(include_str!("../../resources/skills/skills_to_avoid.txt")),
        )
    }

    /// Load skills and avoid-list from files, one entry per line.
    pub fn from_files<P: AsRef<Path>>(skills_path: P, avoid_path: P) -> Result<Self> {
        let skills = parse_lines(&fs::read_to_string(skills_path)?);
        let avoid = parse_lines(&fs::read_to_string(avoid_path)?);
        Ok(Self::new(skills, avoid))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills learned so far, in learning order.
    pub fn learned(&self) -> &[String] {
        &self.learned
    }

    /// Find known skills in `text` and return them in dictionary casing.
    ///
    /// Matching is longest-first on non-alphanumeric boundaries; matched
    /// occurrences are blanked out so shorter skills cannot re-match inside
    /// a longer one ("java" never fires inside "javascript").
    pub fn find_in_text(&self, skill_text: &str) -> Vec<String> {
        let mut haystack = skill_text.to_lowercase();
        let mut found = Vec::new();
        for skill in &self.skills {
            if blank_out(&mut haystack, &skill.to_lowercase()) {
                found.push(skill.clone());
            }
        }
        found
    }

    /// Scan a skill-section text for unknown words flanked by two known
    /// skills and learn them. An unknown word between two skills in a skill
    /// enumeration is almost always a skill itself.
    ///
    /// Newly learned words join the dictionary after the scan completes, so
    /// one pass cannot bootstrap itself. Returns the words learned by this
    /// call; the cumulative log stays available through [`learned`].
    ///
    /// [`learned`]: SkillDictionary::learned
    pub fn learn_from_section(&mut self, section_text: &str) -> Vec<String> {
        let cleaned =
            text::strip_sentence_punctuation(&text::clean_for_skills(section_text)).to_lowercase();
        let words: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|word| !STOPWORDS.contains(word))
            .collect();

        let mut newly_learned: Vec<String> = Vec::new();
        if words.len() < 3 {
            return newly_learned;
        }
        for i in 1..words.len() - 1 {
            let word = words[i];
            if self.is_known(words[i - 1])
                && !self.is_known(word)
                && self.is_known(words[i + 1])
                && !self.avoid.contains(word)
                && !newly_learned.iter().any(|learned| learned == word)
            {
                newly_learned.push(word.to_string());
            }
        }

        for word in &newly_learned {
            self.add_skill(word.clone());
            self.learned.push(word.clone());
        }
        newly_learned
    }

    fn is_known(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    fn add_skill(&mut self, skill: String) {
        if !self.known.insert(skill.to_lowercase()) {
            return;
        }
        self.skills.push(skill);
        self.skills.sort_by(|a, b| b.len().cmp(&a.len()));
    }
}

/// File-backed skill store. Learning is an explicit mutation of the external
/// resource: the appended set is written back visibly rather than kept only
/// in memory.
#[derive(Debug, Clone)]
pub struct SkillStore {
    path: PathBuf,
}

impl SkillStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored skill list.
    pub fn load(&self) -> Result<Vec<String>> {
        Ok(parse_lines(&fs::read_to_string(&self.path)?))
    }

    /// Append learned skills to the store file, one per line.
    pub fn append(&self, skills: &[String]) -> Result<()> {
        if skills.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        for skill in skills {
            writeln!(file, "{skill}")?;
        }
        Ok(())
    }
}

/// Blank out every boundary-valid occurrence of `needle` in `haystack`.
/// Returns true if at least one occurrence was found.
fn blank_out(haystack: &mut String, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut found = false;
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        let boundary_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            found = true;
            haystack.replace_range(start..end, &" ".repeat(needle.len()));
            search_from = end;
        } else {
            let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
            search_from = start + step;
        }
    }
    found
}

fn parse_lines(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
