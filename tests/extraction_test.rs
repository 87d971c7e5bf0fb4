//! End-to-end tests for the extraction pipeline on synthetic documents.

use cvparse::{
    extract_lines, KeywordDictionary, LineRecord, ResumeExtractor, SkillDictionary,
    UNLABELED_SECTION, SKILLS, WORK_EXPERIENCE,
};

fn header(text: &str, bottom: f32) -> LineRecord {
    LineRecord::new(text)
        .with_font_size(18.0)
        .with_font_family("Arial-Bold")
        .with_left_margin(40.0)
        .with_bottom_margin(bottom)
        .with_font_color("#222222")
}

fn body(text: &str, left: f32, bottom: f32) -> LineRecord {
    LineRecord::new(text)
        .with_font_size(11.0)
        .with_font_family("Arial")
        .with_left_margin(left)
        .with_bottom_margin(bottom)
        .with_font_color("#000000")
}

/// A resume with four consistently styled all-caps section headers and two
/// job blocks separated by a spacing jump plus an indentation reset.
fn sample_resume() -> Vec<LineRecord> {
    vec![
        body("Jane Doe", 40.0, 760.0),
        header("SUMMARY", 740.0),
        body("Backend engineer with database focus.", 60.0, 725.0),
        header("WORK EXPERIENCE", 700.0),
        body("Acme Corp, Berlin", 40.0, 680.0),
        body("Backend engineer, 01/2015 - 03/2016.", 60.0, 665.0),
        body("Built python services against postgresql.", 60.0, 650.0),
        // Spacing jump (45 > 15 * 1.4) and back to the block indent.
        body("Beta Inc, Hamburg", 40.0, 605.0),
        body("Data engineer, Jan 2017 - present.", 60.0, 590.0),
        body("Airflow pipelines, sql everywhere.", 60.0, 575.0),
        header("SKILLS", 550.0),
        body("python, sql, airflow, docker", 60.0, 535.0),
        header("EDUCATION", 510.0),
        body("BSc Computer Science, 2010 - 2014", 60.0, 495.0),
    ]
}

#[test]
fn test_sections_follow_document_order() {
    let resume = extract_lines(&sample_resume());

    let names: Vec<&str> = resume.sections.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Summary", WORK_EXPERIENCE, SKILLS, "Education"]);
    assert_eq!(
        resume.sections["Education"],
        vec!["BSc Computer Science, 2010 - 2014".to_string()]
    );
}

#[test]
fn test_job_entries_are_segmented_and_dated() {
    let resume = extract_lines(&sample_resume());

    assert_eq!(resume.work_experience.len(), 2);

    let first = &resume.work_experience[0];
    assert_eq!(first.description[0], "Acme Corp, Berlin");
    assert_eq!(first.description.len(), 3);

    let second = &resume.work_experience[1];
    assert_eq!(second.description[0], "Beta Inc, Hamburg");

    let json = serde_json::to_value(&resume).unwrap();
    let jobs = json["workExperience"].as_array().unwrap();
    assert_eq!(jobs[0]["startDate"], "01.01.2015");
    assert_eq!(jobs[0]["endDate"], "01.03.2016");
    assert_eq!(jobs[1]["startDate"], "01.01.2017");
    assert_eq!(jobs[1]["endDate"], "present");
}

#[test]
fn test_job_skills_are_matched_per_entry() {
    let resume = extract_lines(&sample_resume());

    let first = &resume.work_experience[0];
    assert!(first.skills.contains(&"python".to_string()));
    assert!(first.skills.contains(&"postgresql".to_string()));
    assert!(!first.skills.contains(&"airflow".to_string()));

    let second = &resume.work_experience[1];
    assert!(second.skills.contains(&"airflow".to_string()));
    assert!(second.skills.contains(&"sql".to_string()));
}

#[test]
fn test_skill_section_recognition() {
    let resume = extract_lines(&sample_resume());

    for skill in ["python", "sql", "airflow", "docker"] {
        assert!(
            resume.skills_in_skill_section.contains(&skill.to_string()),
            "missing {skill}"
        );
    }
}

#[test]
fn test_weak_signature_degrades_to_one_section() {
    // Only two keyword headers: not enough attribute occurrences.
    let lines = vec![
        header("WORK EXPERIENCE", 700.0),
        body("Acme Corp, 01/2015 - 03/2016", 60.0, 685.0),
        header("SKILLS", 650.0),
        body("python", 60.0, 635.0),
    ];
    let resume = extract_lines(&lines);

    assert_eq!(resume.sections.len(), 1);
    let block = &resume.sections[UNLABELED_SECTION];
    assert_eq!(block.len(), 4);
    assert_eq!(block[0], "WORK EXPERIENCE");
    assert!(resume.work_experience.is_empty());
}

#[test]
fn test_blank_line_fallback_beats_undersegmenting_primary() {
    // Work experience with four isolated years but no layout variation;
    // blank lines split it into three paragraphs.
    let mut lines = vec![
        header("SUMMARY", 790.0),
        body("Engineer.", 60.0, 775.0),
        header("WORK EXPERIENCE", 750.0),
        body("Engineer 2008 at Foo", 60.0, 735.0),
        body("", 60.0, 720.0),
        body("Engineer 2011 at Bar", 60.0, 705.0),
        body("", 60.0, 690.0),
        body("Engineer 2014 at Baz", 60.0, 675.0),
        body("Engineer 2017 at Qux", 60.0, 660.0),
        header("SKILLS", 635.0),
        body("python", 60.0, 620.0),
    ];
    lines.push(header("EDUCATION", 595.0));
    lines.push(body("BSc", 60.0, 580.0));

    let resume = extract_lines(&lines);
    assert_eq!(resume.work_experience.len(), 3);
    assert_eq!(
        resume.work_experience[2].description,
        vec![
            "Engineer 2014 at Baz".to_string(),
            "Engineer 2017 at Qux".to_string()
        ]
    );
}

#[test]
fn test_learned_skills_are_visible_and_cumulative() {
    let mut extractor = ResumeExtractor::new().with_skills(SkillDictionary::new(
        vec!["java".to_string(), "sql".to_string()],
        vec![],
    ));

    let lines = vec![
        header("SUMMARY", 790.0),
        body("Engineer.", 60.0, 775.0),
        header("WORK EXPERIENCE", 750.0),
        body("Wrote java.", 60.0, 735.0),
        header("SKILLS", 710.0),
        body("java frobnicator sql", 60.0, 695.0),
        header("EDUCATION", 670.0),
        body("BSc", 60.0, 655.0),
    ];
    let resume = extractor.extract(&lines);

    assert_eq!(resume.learned_skills, vec!["frobnicator".to_string()]);
    // Learned before the skill-section match, so it is already recognized.
    assert!(resume
        .skills_in_skill_section
        .contains(&"frobnicator".to_string()));
    assert_eq!(extractor.skills().learned(), &["frobnicator".to_string()]);
}

#[test]
fn test_custom_keyword_dictionary() {
    let mut dict = KeywordDictionary::new();
    dict.insert("WorkExperience", vec!["Berufserfahrung".to_string()]);
    dict.insert("Skills", vec!["Kenntnisse".to_string()]);
    dict.insert("Education", vec!["Ausbildung".to_string()]);

    let lines = vec![
        header("BERUFSERFAHRUNG", 740.0),
        body("Acme GmbH, 01/2015 - 03/2016", 60.0, 725.0),
        header("KENNTNISSE", 700.0),
        body("python", 60.0, 685.0),
        header("AUSBILDUNG", 660.0),
        body("Diplom", 60.0, 645.0),
    ];
    let resume = ResumeExtractor::new().with_keywords(dict).extract(&lines);

    assert!(resume.sections.contains_key(WORK_EXPERIENCE));
    assert_eq!(resume.work_experience.len(), 1);
    let json = serde_json::to_value(&resume).unwrap();
    assert_eq!(json["workExperience"][0]["startDate"], "01.01.2015");
}
