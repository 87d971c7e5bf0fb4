//! cvparse CLI - batch resume extraction tool.
//!
//! Walks a directory of line-record JSON dumps (produced by the external
//! document renderer), extracts one structured record per document, and
//! writes it next to the input. A failing document is reported and skipped;
//! the batch always runs to completion.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvparse::{
    JsonLineSource, KeywordDictionary, LineSource, ParsedResume, ResumeExtractor, SkillDictionary,
    SkillStore,
};

#[derive(Parser)]
#[command(name = "cvparse")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract structured resume data from rendered line records", long_about = None)]
struct Cli {
    /// Input directory of line-record JSON dumps, or a single file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory (defaults next to each input file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Directory of section keyword lists (SectionName.txt, one synonym per line)
    #[arg(long, value_name = "DIR")]
    keywords: Option<PathBuf>,

    /// Skill list file, one skill per line
    #[arg(long, value_name = "FILE")]
    skills: Option<PathBuf>,

    /// Avoid-list file for skill learning
    #[arg(long, value_name = "FILE", requires = "skills")]
    avoid: Option<PathBuf>,

    /// Append newly learned skills back to the skill list file
    #[arg(long, requires = "skills")]
    learn: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show section and job-entry statistics for one document
    Info {
        /// Input line-record JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Info { input }) => run_info(&cli, input),
        None => match cli.input.clone() {
            Some(input) => run_batch(&cli, &input),
            None => {
                eprintln!("{} no input given; see --help", "error:".red().bold());
                std::process::exit(2);
            }
        },
    };

    if let Err(err) = result {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run_batch(cli: &Cli, input: &Path) -> cvparse::Result<()> {
    let files = collect_inputs(input)?;
    if files.is_empty() {
        println!(
            "{} no .json line dumps found in {}",
            "warning:".yellow().bold(),
            input.display()
        );
        return Ok(());
    }

    let mut extractor = build_extractor(cli)?;

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut extracted = 0usize;
    let mut failed = 0usize;
    for file in &files {
        bar.set_message(
            file.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        match process_document(&mut extractor, cli, file) {
            Ok(output) => {
                extracted += 1;
                log::info!("wrote {}", output.display());
            }
            Err(err) => {
                failed += 1;
                bar.println(format!(
                    "{} {}: {err}",
                    "skipped".red().bold(),
                    file.display()
                ));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if cli.learn {
        if let Some(ref skills_path) = cli.skills {
            let learned = extractor.skills().learned();
            SkillStore::new(skills_path).append(learned)?;
            if !learned.is_empty() {
                println!(
                    "{} appended {} learned skill(s) to {}",
                    "learn:".cyan().bold(),
                    learned.len(),
                    skills_path.display()
                );
            }
        }
    }

    println!(
        "{} {extracted} extracted, {failed} failed",
        "done:".green().bold()
    );
    Ok(())
}

fn run_info(cli: &Cli, input: &Path) -> cvparse::Result<()> {
    let lines = JsonLineSource::new().lines(input)?;
    let mut extractor = build_extractor(cli)?;
    let resume = extractor.extract(&lines);

    println!("{}", input.display().to_string().bold());
    println!("  lines: {}", lines.len());
    for (name, content) in &resume.sections {
        println!("  section {}: {} line(s)", name.cyan(), content.len());
    }
    println!("  job entries: {}", resume.work_experience.len());
    for (i, job) in resume.work_experience.iter().enumerate() {
        let dates = serde_json::to_value(job).unwrap_or_default();
        println!(
            "    #{}: {} line(s), {} -> {}, {} skill(s)",
            i + 1,
            job.description.len(),
            dates["startDate"].as_str().unwrap_or(""),
            dates["endDate"].as_str().unwrap_or(""),
            job.skills.len()
        );
    }
    Ok(())
}

fn build_extractor(cli: &Cli) -> cvparse::Result<ResumeExtractor> {
    let mut extractor = ResumeExtractor::new();
    if let Some(ref dir) = cli.keywords {
        extractor = extractor.with_keywords(KeywordDictionary::from_dir(dir)?);
    }
    if let Some(ref skills_path) = cli.skills {
        let skills = SkillStore::new(skills_path).load()?;
        let avoid = match cli.avoid {
            Some(ref avoid_path) => SkillStore::new(avoid_path).load()?,
            None => Vec::new(),
        };
        extractor = extractor.with_skills(SkillDictionary::new(skills, avoid));
    }
    Ok(extractor)
}

fn collect_inputs(input: &Path) -> cvparse::Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();
    Ok(files)
}

fn process_document(
    extractor: &mut ResumeExtractor,
    cli: &Cli,
    file: &Path,
) -> cvparse::Result<PathBuf> {
    let lines = JsonLineSource::new().lines(file)?;
    let resume = extractor.extract(&lines);
    let output = output_path(cli, file);
    write_resume(&resume, &output, cli.compact)?;
    Ok(output)
}

fn output_path(cli: &Cli, file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let dir = cli
        .output
        .clone()
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{stem}.resume.json"))
}

fn write_resume(resume: &ParsedResume, output: &Path, compact: bool) -> cvparse::Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = if compact {
        resume.to_json_compact()?
    } else {
        resume.to_json()?
    };
    fs::write(output, json + "\n")?;
    Ok(())
}
