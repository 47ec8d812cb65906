//! Findings and per-file reports produced by the validation gates.

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    FileRead,
    QuizPresence,
    QuizStructure,
    PageHeading,
    MarkdownLint,
}

impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileRead => "file read",
            Self::QuizPresence => "quiz presence",
            Self::QuizStructure => "quiz structure",
            Self::PageHeading => "page heading",
            Self::MarkdownLint => "markdown lint",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failure or warning raised by a gate.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Finding {
    pub gate: Gate,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Finding {
    pub fn fail(gate: Gate, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            gate,
            status: CheckStatus::Fail,
            line,
            message: message.into(),
        }
    }

    pub fn warn(gate: Gate, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            gate,
            status: CheckStatus::Warn,
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct FileReport {
    pub path: PathBuf,
    pub quizzes: usize,
    pub questions: usize,
    pub gates_run: usize,
    pub gates_passed: usize,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Record the outcome of one gate. A gate passes when it raised no failure.
    pub fn record(&mut self, findings: Vec<Finding>) {
        self.gates_run += 1;
        if !findings.iter().any(|f| f.status == CheckStatus::Fail) {
            self.gates_passed += 1;
        }
        self.findings.extend(findings);
    }

    pub fn failures(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warnings(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl ValidationReport {
    pub fn from_files(mut files: Vec<FileReport>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let passed = files.iter().map(|f| f.gates_passed).sum();
        let failed = files.iter().map(FileReport::failures).sum();
        let warnings = files.iter().map(FileReport::warnings).sum();
        Self {
            files,
            passed,
            failed,
            warnings,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn quiz_count(&self) -> usize {
        self.files.iter().map(|f| f.quizzes).sum()
    }
}
