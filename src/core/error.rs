use crate::core::parser::ParseFailure;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizmarkError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Config error in {}: {message}", .path.display())]
    ConfigError { path: PathBuf, message: String },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error in {}: {} quiz error(s)", .path.display(), .failure.errors.len())]
    ParseError {
        path: PathBuf,
        failure: ParseFailure,
    },
}
