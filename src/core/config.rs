//! `quizmark.toml` loading.
//!
//! A missing config file is not an error: every key has a default that
//! matches the layout of a typical MkDocs course site.

use crate::core::error::QuizmarkError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quizmark.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub quiz: QuizConfig,
    pub lint: LintConfig,
    pub headings: HeadingConfig,
}

/// Which files are visited.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File names treated as quiz pages.
    pub quiz_files: Vec<String>,
    /// Extensions treated as Markdown.
    pub markdown_ext: Vec<String>,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            quiz_files: vec!["quiz.md".to_string()],
            markdown_ext: vec!["md".to_string()],
            exclude_dirs: vec![
                ".git".to_string(),
                "target".to_string(),
                "site".to_string(),
                "node_modules".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    pub multi_select: MultiSelectPolicy,
    /// Warn when a quiz has a different number of questions.
    pub expected_questions: Option<usize>,
}

/// How questions with more than one correct option are treated.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MultiSelectPolicy {
    #[default]
    Allow,
    Warn,
    Deny,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    pub enabled: bool,
    pub max_h1: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_h1: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingConfig {
    pub enabled: bool,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ScanConfig {
    pub fn is_quiz_page(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.quiz_files.iter().any(|q| q == name))
    }

    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.markdown_ext.iter().any(|m| m.eq_ignore_ascii_case(ext)))
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

pub fn parse_config(content: &str, path: &Path) -> Result<Config, QuizmarkError> {
    toml::from_str(content).map_err(|e| QuizmarkError::ConfigError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config from an explicit path, or `<root>/quizmark.toml` if present.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, QuizmarkError> {
    let path: PathBuf = match explicit {
        Some(p) => {
            if !p.is_file() {
                return Err(QuizmarkError::NotFound(format!(
                    "config file {}",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => {
            let candidate = root.join(CONFIG_FILE);
            if !candidate.is_file() {
                log::debug!("no {} under {}, using defaults", CONFIG_FILE, root.display());
                return Ok(Config::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path).map_err(QuizmarkError::IoError)?;
    let config = parse_config(&content, &path)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
