//! Quiz block normalization.
//!
//! Rewrites older quiz markup into the canonical layout:
//! - `a) text` lettered options become `- text` bullets;
//! - `**bold**` question text loses its bold markers;
//! - questions sit 4 columns and options 8 columns right of the marker.
//!
//! Continuation lines (prompt code, wrapped options) move with the item
//! they belong to, so relative indentation inside code blocks survives.
//! Only lines inside quiz blocks are touched, apart from trailing
//! whitespace at the end of the file. The page keeps its line ending; a page
//! mixing `\r\n` and `\n` is converted to `\r\n` throughout.

use crate::core::markdown::{self, FenceTracker};
use crate::core::parser;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static LETTERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]\)\s*(.*)$").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

const QUESTION_OFFSET: usize = 4;
const OPTION_OFFSET: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    LetteredOption,
    BoldQuestion,
    Reindent,
    TrailingWhitespace,
    LineEndings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub line: usize,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub text: String,
    pub changes: Vec<Change>,
}

impl Normalized {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

struct Block {
    marker_indent: usize,
    question_column: Option<usize>,
    option_column: Option<usize>,
    /// Shift applied to continuation lines of the current item.
    delta: isize,
    fences: FenceTracker,
}

pub fn normalize_quiz_format(text: &str) -> Normalized {
    let mut out: Vec<String> = Vec::new();
    let mut changes = Vec::new();
    let mut page_fences = FenceTracker::default();
    let mut block: Option<Block> = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let (indent, content) = markdown::split_indent(raw);

        if let Some(b) = block.as_ref()
            && !content.is_empty()
            && indent <= b.marker_indent
            && !b.fences.is_open()
        {
            block = None;
        }

        let Some(b) = block.as_mut() else {
            if !page_fences.observe(content) && parser::is_quiz_marker(content) {
                block = Some(Block {
                    marker_indent: indent,
                    question_column: None,
                    option_column: None,
                    delta: 0,
                    fences: FenceTracker::default(),
                });
            }
            out.push(raw.to_string());
            continue;
        };

        if content.is_empty() {
            out.push(raw.to_string());
            continue;
        }

        if b.fences.is_open() || markdown::Fence::open(content).is_some() {
            b.fences.observe(content);
            out.push(shift(raw, indent, content, b.delta));
            continue;
        }

        let rewritten = normalize_block_line(b, indent, content, line_no, &mut changes);
        let line = match rewritten {
            Some(line) => line,
            None => shift(raw, indent, content, b.delta),
        };
        if line != raw && !changes.iter().any(|c: &Change| c.line == line_no) {
            changes.push(Change {
                line: line_no,
                kind: ChangeKind::Reindent,
            });
        }
        out.push(line);
    }

    let nl = markdown::line_ending(text);
    if markdown::has_mixed_line_endings(text) {
        changes.push(Change {
            line: 1,
            kind: ChangeKind::LineEndings,
        });
    }
    let body = text
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t));
    if body != Some(text.trim_end()) {
        changes.push(Change {
            line: out.len().max(1),
            kind: ChangeKind::TrailingWhitespace,
        });
    }
    let mut joined = out.join(nl).trim_end().to_string();
    joined.push_str(nl);

    Normalized {
        text: joined,
        changes,
    }
}

/// Rewrite a question or option line. Returns `None` for continuation text.
fn normalize_block_line(
    b: &mut Block,
    indent: usize,
    content: &str,
    line_no: usize,
    changes: &mut Vec<Change>,
) -> Option<String> {
    let question_column = match b.question_column {
        Some(col) => col,
        None if markdown::ordered_item(content).is_some() => {
            b.question_column = Some(indent);
            indent
        }
        // description text before the first question
        None => return None,
    };

    if indent == question_column && markdown::ordered_item(content).is_some() {
        let target = b.marker_indent + QUESTION_OFFSET;
        b.delta = target as isize - indent as isize;
        b.option_column = None;
        let mut text = content.to_string();
        if BOLD_RE.is_match(content) {
            text = BOLD_RE.replace_all(content, "$1").into_owned();
            changes.push(Change {
                line: line_no,
                kind: ChangeKind::BoldQuestion,
            });
        }
        return Some(format!("{}{}", " ".repeat(target), text));
    }

    let is_option_level =
        indent > question_column && b.option_column.is_none_or(|col| indent <= col);
    if !is_option_level {
        return None;
    }

    let bullet_text = if let Some(caps) = LETTERED_RE.captures(content) {
        changes.push(Change {
            line: line_no,
            kind: ChangeKind::LetteredOption,
        });
        Some(caps.get(1).map_or("", |m| m.as_str()).to_string())
    } else {
        markdown::bullet_item(content).map(|t| t.to_string())
    }?;

    b.option_column.get_or_insert(indent);
    let target = b.marker_indent + OPTION_OFFSET;
    b.delta = target as isize - indent as isize;
    let bullet = if bullet_text.is_empty() {
        "-".to_string()
    } else {
        format!("- {}", bullet_text)
    };
    Some(format!("{}{}", " ".repeat(target), bullet))
}

fn shift(raw: &str, indent: usize, content: &str, delta: isize) -> String {
    if delta == 0 || content.is_empty() {
        return raw.to_string();
    }
    let new_indent = (indent as isize + delta).max(0) as usize;
    format!("{}{}", " ".repeat(new_indent), content)
}
