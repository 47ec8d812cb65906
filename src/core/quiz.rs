//! Quiz data model.
//!
//! A quiz page holds one or more `!!! quiz` admonition blocks. Each block
//! becomes a [`Quiz`] holding ordered [`Question`]s, each holding ordered
//! [`AnswerOption`]s. Values are built once by the parser and never mutated.

use serde::{Deserialize, Serialize};

/// Inline token marking an option as correct.
pub const CORRECT_MARKER: &str = "{ data-correct }";

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// A parsed quiz admonition block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Quoted admonition title shown to the learner.
    pub title: String,
    /// Free text between the marker and the first question.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub questions: Vec<Question>,
    /// 1-based line of the `!!! quiz` marker.
    pub line: usize,
    /// SHA-256 of the raw block text.
    pub fingerprint: String,
}

/// A single multiple-choice prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    /// 1-based line of the numbered item.
    pub line: usize,
    pub mode: SelectMode,
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Whether a question expects one answer or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    Single,
    Multi,
}

impl SelectMode {
    /// The number of correct options decides the mode.
    pub fn from_correct_count(correct: usize) -> Self {
        if correct > 1 {
            SelectMode::Multi
        } else {
            SelectMode::Single
        }
    }
}

impl std::fmt::Display for SelectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Multi => write!(f, "multi"),
        }
    }
}

impl Question {
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|o| o.is_correct)
    }

    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.is_correct.then_some(i))
            .collect()
    }
}

impl Quiz {
    pub fn is_multi_select(&self) -> bool {
        self.questions.iter().any(|q| q.mode == SelectMode::Multi)
    }
}
