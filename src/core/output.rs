//! Terminal rendering helpers for findings and summaries.
//!
//! Keeps lint output to one bounded line per finding so a failing build log
//! stays readable even when a page has dozens of problems.

use colored::Colorize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Collapse whitespace runs (including newlines) and cap the length.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let head: String = collapsed.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}

/// Join up to `max_items` messages on one line, noting how many were cut.
pub fn preview_messages(messages: &[String], max_items: usize, max_chars: usize) -> String {
    let mut shown = messages
        .iter()
        .take(max_items)
        .map(|m| compact_line(m, max_chars))
        .collect::<Vec<_>>()
        .join(" | ");
    if messages.len() > max_items {
        shown.push_str(&format!(" (+{} more)", messages.len() - max_items));
    }
    shown
}

/// `path:line`, or just `path` for file-level findings.
pub fn location(path: &Path, line: Option<usize>) -> String {
    match line {
        Some(line) => format!("{}:{}", path.display(), line),
        None => path.display().to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Pass,
    Fail,
    Warn,
    Fixed,
}

/// Fixed-width status tag, colored unless colors are disabled globally.
pub fn tag(kind: Tag) -> String {
    match kind {
        Tag::Pass => "PASS".green().bold().to_string(),
        Tag::Fail => "FAIL".red().bold().to_string(),
        Tag::Warn => "WARN".yellow().bold().to_string(),
        Tag::Fixed => "FIX ".cyan().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_compact_line_collapses_and_truncates() {
        assert_eq!(compact_line("a\n  b\tc", 20), "a b c");
        assert_eq!(compact_line("abcdefghij", 4), "abcd...");
        assert_eq!(compact_line("abc def", 4), "abc...");
        assert_eq!(compact_line("", 4), "");
    }

    #[test]
    fn test_preview_messages_counts_hidden() {
        let msgs = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        assert_eq!(preview_messages(&msgs, 2, 10), "one | two (+1 more)");
        assert_eq!(preview_messages(&msgs, 5, 10), "one | two | three");
        assert_eq!(preview_messages(&[], 2, 10), "");
    }

    #[test]
    fn test_location() {
        let path = PathBuf::from("docs/quiz.md");
        assert_eq!(location(&path, Some(7)), "docs/quiz.md:7");
        assert_eq!(location(&path, None), "docs/quiz.md");
    }
}
