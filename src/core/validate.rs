//! Quiz page validation harness.
//!
//! Every Markdown file under the given paths runs through a fixed set of
//! gates:
//!
//! - **Quiz Presence**: a quiz page must contain a quiz block.
//! - **Quiz Structure**: every quiz block parses; question counts and
//!   multi-select questions are checked against the config.
//! - **Page Heading**: quiz pages open with `# X.Y Topic - Quiz`.
//! - **Markdown Lint**: heading and list spacing.
//!
//! Files are validated in parallel and reported in path order. Any failure
//! fails the run; warnings never do.

use crate::core::config::{Config, MultiSelectPolicy};
use crate::core::error::QuizmarkError;
use crate::core::output::{self, OutputFormat, Tag};
use crate::core::parser::{self, ParsedDocument};
use crate::core::quiz::SelectMode;
use crate::core::report::{CheckStatus, FileReport, Finding, Gate, ValidationReport};
use crate::core::scan;
use crate::plugins::{heading, lint};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Which gates a run evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSet {
    pub quiz: bool,
    pub headings: bool,
    pub lint: bool,
}

impl GateSet {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quiz: true,
            headings: config.headings.enabled,
            lint: config.lint.enabled,
        }
    }

    pub fn lint_only() -> Self {
        Self {
            quiz: false,
            headings: false,
            lint: true,
        }
    }
}

fn trace_gate(path: &Path, gate: Gate) {
    if std::env::var("QUIZMARK_VALIDATE_TRACE").ok().as_deref() == Some("1") {
        println!("validate: trace {} {}", gate, path.display());
    }
}

fn validate_quiz_presence(doc: &ParsedDocument) -> Vec<Finding> {
    if doc.blocks == 0 {
        vec![Finding::fail(
            Gate::QuizPresence,
            None,
            "quiz page contains no `!!! quiz` block",
        )]
    } else {
        Vec::new()
    }
}

fn validate_quiz_structure(doc: &ParsedDocument, config: &Config) -> Vec<Finding> {
    let mut findings: Vec<Finding> = doc
        .errors
        .iter()
        .map(|e| Finding::fail(Gate::QuizStructure, Some(e.line()), e.to_string()))
        .collect();

    for quiz in &doc.quizzes {
        if let Some(expected) = config.quiz.expected_questions
            && quiz.questions.len() != expected
        {
            findings.push(Finding::warn(
                Gate::QuizStructure,
                Some(quiz.line),
                format!(
                    "quiz `{}` has {} question(s), expected {}",
                    quiz.title,
                    quiz.questions.len(),
                    expected
                ),
            ));
        }

        for question in quiz.questions.iter().filter(|q| q.mode == SelectMode::Multi) {
            let message = format!(
                "question `{}` is multi-select ({} correct options)",
                output::compact_line(&question.prompt, 60),
                question.correct_options().count()
            );
            match config.quiz.multi_select {
                MultiSelectPolicy::Allow => {}
                MultiSelectPolicy::Warn => findings.push(Finding::warn(
                    Gate::QuizStructure,
                    Some(question.line),
                    message,
                )),
                MultiSelectPolicy::Deny => findings.push(Finding::fail(
                    Gate::QuizStructure,
                    Some(question.line),
                    message,
                )),
            }
        }
    }

    findings.sort_by_key(|f| f.line);
    findings
}

/// Run the selected gates over one page held in memory.
pub fn validate_text(path: &Path, text: &str, config: &Config, gates: GateSet) -> FileReport {
    let mut report = FileReport::new(path.to_path_buf());
    let is_quiz_page = config.scan.is_quiz_page(path);

    if gates.quiz {
        let doc = parser::parse_document(text);
        report.quizzes = doc.quizzes.len();
        report.questions = doc.quizzes.iter().map(|q| q.questions.len()).sum();

        if is_quiz_page {
            trace_gate(path, Gate::QuizPresence);
            report.record(validate_quiz_presence(&doc));
        }
        if is_quiz_page || doc.blocks > 0 {
            trace_gate(path, Gate::QuizStructure);
            report.record(validate_quiz_structure(&doc, config));
        }
    }

    if gates.headings && is_quiz_page {
        trace_gate(path, Gate::PageHeading);
        report.record(heading::check_heading(text, path));
    }

    if gates.lint {
        trace_gate(path, Gate::MarkdownLint);
        report.record(lint::lint_markdown(text, &config.lint));
    }

    log::debug!(
        "validated {}: gates={} passed={} findings={}",
        path.display(),
        report.gates_run,
        report.gates_passed,
        report.findings.len()
    );
    report
}

pub fn validate_file(path: &Path, config: &Config, gates: GateSet) -> FileReport {
    match fs::read_to_string(path) {
        Ok(text) => validate_text(path, &text, config, gates),
        Err(e) => {
            log::warn!("cannot read {}: {}", path.display(), e);
            let mut report = FileReport::new(path.to_path_buf());
            report.record(vec![Finding::fail(
                Gate::FileRead,
                None,
                format!("cannot read file: {}", e),
            )]);
            report
        }
    }
}

pub fn run_validation(
    paths: &[PathBuf],
    config: &Config,
    gates: GateSet,
) -> Result<ValidationReport, QuizmarkError> {
    let files = scan::collect_markdown_files(paths, &config.scan)?;
    log::info!("validating {} markdown file(s)", files.len());

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| validate_file(path, config, gates))
        .collect();
    Ok(ValidationReport::from_files(reports))
}

fn print_text_report(report: &ValidationReport) {
    for file in &report.files {
        for finding in &file.findings {
            let tag = match finding.status {
                CheckStatus::Fail => Tag::Fail,
                CheckStatus::Warn => Tag::Warn,
                CheckStatus::Pass => Tag::Pass,
            };
            println!(
                "  {} {} [{}] {}",
                output::tag(tag),
                output::location(&file.path, finding.line),
                finding.gate,
                finding.message
            );
        }
    }

    println!(
        "validate: summary files={} quizzes={} pass={} fail={} warn={}",
        report.files.len(),
        report.quiz_count(),
        report.passed,
        report.failed,
        report.warnings
    );

    let failures: Vec<String> = report
        .files
        .iter()
        .flat_map(|file| {
            file.findings
                .iter()
                .filter(|f| f.status == CheckStatus::Fail)
                .map(|f| format!("{}: {}", output::location(&file.path, f.line), f.message))
        })
        .collect();
    if !failures.is_empty() {
        println!(
            "validate: failures {}: {}",
            failures.len(),
            output::preview_messages(&failures, 2, 110)
        );
    }
}

/// Validate `paths`, print the report and fail when any gate failed.
pub fn run_validate_cli(
    paths: &[PathBuf],
    config: &Config,
    gates: GateSet,
    format: OutputFormat,
) -> Result<(), QuizmarkError> {
    if format == OutputFormat::Text {
        println!("validate: running");
    }
    let report = run_validation(paths, config, gates)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text_report(&report),
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(QuizmarkError::ValidationError(format!(
            "{} check(s) failed.",
            report.failed
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GOOD_QUIZ: &str = "# 1.1 Intro - Quiz\n\n!!! quiz \"Intro\"\n\n    1. What is 2+2?\n        - 3\n        - 4 { data-correct }\n\n    2. Pick the primes\n        - 2 { data-correct }\n        - 3 { data-correct }\n        - 4\n";

    fn quiz_path() -> PathBuf {
        PathBuf::from("docs/Chapter-1/Section-1-intro/quiz.md")
    }

    #[test]
    fn test_good_quiz_passes_all_gates() {
        let config = Config::default();
        let report = validate_text(&quiz_path(), GOOD_QUIZ, &config, GateSet::from_config(&config));
        assert_eq!(report.failures(), 0, "{:?}", report.findings);
        assert_eq!(report.gates_run, 4);
        assert_eq!(report.gates_passed, 4);
        assert_eq!(report.quizzes, 1);
        assert_eq!(report.questions, 2);
    }

    #[test]
    fn test_multi_select_policy() {
        let mut config = Config::default();
        config.quiz.multi_select = MultiSelectPolicy::Warn;
        let report = validate_text(&quiz_path(), GOOD_QUIZ, &config, GateSet::from_config(&config));
        assert_eq!(report.warnings(), 1);
        assert_eq!(report.findings[0].line, Some(9));

        config.quiz.multi_select = MultiSelectPolicy::Deny;
        let report = validate_text(&quiz_path(), GOOD_QUIZ, &config, GateSet::from_config(&config));
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_expected_question_count_warns() {
        let mut config = Config::default();
        config.quiz.expected_questions = Some(8);
        let report = validate_text(&quiz_path(), GOOD_QUIZ, &config, GateSet::from_config(&config));
        assert_eq!(report.failures(), 0);
        assert!(report
            .findings
            .iter()
            .any(|f| f.status == CheckStatus::Warn && f.message.contains("expected 8")));
    }

    #[test]
    fn test_quiz_page_without_block_fails() {
        let config = Config::default();
        let report = validate_text(
            &quiz_path(),
            "# 1.1 Intro - Quiz\n\nNo quiz yet.\n",
            &config,
            GateSet::from_config(&config),
        );
        assert!(report
            .findings
            .iter()
            .any(|f| f.gate == Gate::QuizPresence && f.status == CheckStatus::Fail));
    }

    #[test]
    fn test_structure_errors_become_failures() {
        let config = Config::default();
        let page = "# 1.1 Intro - Quiz\n\n!!! quiz \"Intro\"\n\n    1. Which is prime?\n        - 4\n        - 6\n";
        let report = validate_text(&quiz_path(), page, &config, GateSet::from_config(&config));
        let fail = report
            .findings
            .iter()
            .find(|f| f.gate == Gate::QuizStructure)
            .unwrap();
        assert_eq!(fail.line, Some(5));
        assert!(fail.message.contains("Which is prime?"));
    }

    #[test]
    fn test_content_page_only_linted() {
        let config = Config::default();
        let report = validate_text(
            Path::new("docs/index.md"),
            "# Course\n\nWelcome.\n",
            &config,
            GateSet::from_config(&config),
        );
        assert_eq!(report.gates_run, 1);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn test_run_validation_over_tree() {
        let tmp = tempdir().unwrap();
        let section = tmp.path().join("docs/Chapter-1/Section-1-intro");
        fs::create_dir_all(&section).unwrap();
        fs::write(section.join("quiz.md"), GOOD_QUIZ).unwrap();
        fs::write(section.join("index.md"), "# Intro\n\nText.\n").unwrap();

        let config = Config::default();
        let report = run_validation(
            &[tmp.path().to_path_buf()],
            &config,
            GateSet::from_config(&config),
        )
        .unwrap();
        assert_eq!(report.files.len(), 2);
        assert!(report.files[0].path.ends_with("index.md"));
        assert!(report.is_success());
        assert_eq!(report.quiz_count(), 1);
    }

    #[test]
    fn test_lint_only_skips_quiz_gates() {
        let config = Config::default();
        let report = validate_text(&quiz_path(), "No quiz here.\n", &config, GateSet::lint_only());
        assert_eq!(report.gates_run, 1);
        assert_eq!(report.failures(), 0);
    }
}
