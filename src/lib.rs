//! Quizmark: parser and validator for Markdown quiz admonitions.
//!
//! Course pages embed multiple-choice quizzes as admonition blocks:
//!
//! ```text
//! !!! quiz "Section 3.1 Quiz: Loops"
//!
//!     1. Which loop always runs at least once?
//!         - for
//!         - while
//!         - do-while { data-correct }
//! ```
//!
//! This crate parses those blocks into a typed model ([`Quiz`] →
//! [`Question`] → [`AnswerOption`]), reports authoring mistakes with line
//! numbers, and emits the parsed quizzes as JSON for the page widget.
//!
//! # Examples
//!
//! ```bash
//! # Emit JSON for one page
//! quizmark parse docs/Chapter-3/Section-1-loops/quiz.md --pretty
//!
//! # Run every gate over the docs tree (exits 1 on failure)
//! quizmark validate docs
//!
//! # Rewrite legacy quiz markup and page headings
//! quizmark fix docs --dry-run
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: quiz model, parser, config and the validation harness
//! - [`plugins`]: Markdown lint, legacy normalization and page headings

pub mod core;
pub mod plugins;

pub use core::error::QuizmarkError;
pub use core::parser::{ParseFailure, ParsedDocument, QuizError, parse_document, parse_quiz};
pub use core::quiz::{AnswerOption, Question, Quiz, SelectMode};

use core::{config, output::OutputFormat, validate};
use plugins::fix;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "quizmark",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parse and validate Markdown quiz blocks"
)]
struct Cli {
    /// Config file (defaults to `<root>/quizmark.toml` when present).
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Project root used for config lookup and as the default scan path.
    #[clap(long, global = true)]
    root: Option<PathBuf>,
    /// Disable colored output.
    #[clap(long, global = true)]
    no_color: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one Markdown file and print its quizzes as JSON.
    Parse {
        file: PathBuf,
        /// Pretty-print the JSON.
        #[clap(long)]
        pretty: bool,
    },
    /// Run all gates over Markdown files.
    Validate {
        /// Files or directories (defaults to the root).
        paths: Vec<PathBuf>,
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run only the Markdown lint.
    Lint {
        paths: Vec<PathBuf>,
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Normalize legacy quiz markup and quiz page headings.
    Fix {
        paths: Vec<PathBuf>,
        /// Report what would change without writing files.
        #[clap(long)]
        dry_run: bool,
    },
    /// Print the version.
    Version,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    path: &'a Path,
    quizzes: &'a [Quiz],
}

fn run_parse(file: &Path, pretty: bool) -> Result<(), QuizmarkError> {
    if !file.is_file() {
        return Err(QuizmarkError::NotFound(file.display().to_string()));
    }
    let text = fs::read_to_string(file)?;
    let doc = parse_document(&text);

    if !doc.is_ok() {
        for err in &doc.errors {
            eprintln!("{}: {}", file.display(), err);
        }
        return Err(QuizmarkError::ParseError {
            path: file.to_path_buf(),
            failure: ParseFailure { errors: doc.errors },
        });
    }

    let out = ParseOutput {
        path: file,
        quizzes: &doc.quizzes,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    println!("{}", json);
    Ok(())
}

fn scan_paths(paths: Vec<PathBuf>, root: &Path) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths
    }
}

pub fn run() -> Result<(), QuizmarkError> {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    if let Command::Version = cli.command {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(QuizmarkError::PathError(format!(
            "root {} is not a directory",
            root.display()
        )));
    }
    let config = config::load_config(&root, cli.config.as_deref())?;

    match cli.command {
        Command::Parse { file, pretty } => run_parse(&file, pretty),
        Command::Validate { paths, format } => validate::run_validate_cli(
            &scan_paths(paths, &root),
            &config,
            validate::GateSet::from_config(&config),
            format,
        ),
        Command::Lint { paths, format } => validate::run_validate_cli(
            &scan_paths(paths, &root),
            &config,
            validate::GateSet::lint_only(),
            format,
        ),
        Command::Fix { paths, dry_run } => {
            fix::run_fix_cli(&scan_paths(paths, &root), &config, dry_run)
        }
        Command::Version => Ok(()),
    }
}
