//! The per-document extraction pipeline.

use crate::dates::DateRangeExtractor;
use crate::keywords::{KeywordDictionary, SKILLS, WORK_EXPERIENCE};
use crate::layout;
use crate::model::{LineRecord, ParsedResume};
use crate::skills::SkillDictionary;
use crate::text;

/// Runs the full pipeline over one document's line records: signature
/// inference, section segmentation, job segmentation and dating, skill
/// matching, and skill learning.
///
/// Holds the compiled date patterns and both dictionaries, so one instance
/// should be reused across a batch. The skill dictionary accumulates learned
/// skills from document to document; everything else is per-document state.
///
/// # Example
///
/// ```
/// use cvparse::{LineRecord, ResumeExtractor};
///
/// let lines = vec![LineRecord::new("Engineer, 01/2015 - 03/2016")];
/// let mut extractor = ResumeExtractor::new();
/// let resume = extractor.extract(&lines);
/// assert!(resume.work_experience.is_empty()); // no section structure
/// ```
#[derive(Debug)]
pub struct ResumeExtractor {
    keywords: KeywordDictionary,
    skills: SkillDictionary,
    dates: DateRangeExtractor,
}

impl ResumeExtractor {
    /// Create an extractor with the bundled keyword and skill dictionaries.
    pub fn new() -> Self {
        Self {
            keywords: KeywordDictionary::builtin(),
            skills: SkillDictionary::builtin(),
            dates: DateRangeExtractor::new(),
        }
    }

    /// Replace the section keyword dictionary.
    pub fn with_keywords(mut self, keywords: KeywordDictionary) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the skill dictionary.
    pub fn with_skills(mut self, skills: SkillDictionary) -> Self {
        self.skills = skills;
        self
    }

    /// The skill dictionary, including skills learned so far.
    pub fn skills(&self) -> &SkillDictionary {
        &self.skills
    }

    /// Extract one document.
    pub fn extract(&mut self, lines: &[LineRecord]) -> ParsedResume {
        let signature = layout::infer_signature(lines, &self.keywords);
        let sections = layout::segment(lines, &self.keywords, signature.as_ref());

        let mut work_experience = sections
            .get(WORK_EXPERIENCE)
            .map(|section| layout::segment_jobs(lines, section, &self.dates))
            .unwrap_or_default();
        for job in &mut work_experience {
            let cleaned = text::strip_sentence_punctuation(&job.full_text());
            job.skills = self.skills.find_in_text(&cleaned);
        }

        // Learning runs before the skill-section match, so a skill learned
        // from this document is recognized in its own skill section.
        let mut learned_skills = Vec::new();
        let mut skills_in_skill_section = Vec::new();
        if let Some(skill_lines) = sections.get(SKILLS) {
            let joined = skill_lines.join(" ");
            learned_skills = self.skills.learn_from_section(&joined);
            let cleaned =
                text::strip_sentence_punctuation(&text::clean_for_skills(&joined)).to_lowercase();
            skills_in_skill_section = self.skills.find_in_text(&cleaned);
        }

        ParsedResume {
            sections,
            work_experience,
            skills_in_skill_section,
            learned_skills,
        }
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
