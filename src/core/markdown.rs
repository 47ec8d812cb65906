//! Line-level Markdown helpers shared by the parser, the lint and the fixers.
//!
//! Nothing here builds a full Markdown AST. Quiz pages only need indentation,
//! fenced code tracking, headings and list items, so each line is classified
//! on its own.

use regex::Regex;
use std::sync::LazyLock;

/// Width of a tab stop when measuring indentation.
pub const TAB_WIDTH: usize = 4;

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(?:\s+(.*))?$").unwrap());

static BULLET_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+](?:\s+(.*))?$").unwrap());

/// Split a raw line into its indentation width (in columns) and the content
/// after the leading whitespace, with trailing whitespace removed.
pub fn split_indent(raw: &str) -> (usize, &str) {
    let mut col = 0;
    let mut offset = raw.len();
    for (idx, ch) in raw.char_indices() {
        match ch {
            ' ' => col += 1,
            '\t' => col += TAB_WIDTH - (col % TAB_WIDTH),
            _ => {
                offset = idx;
                break;
            }
        }
    }
    (col, raw[offset..].trim_end())
}

pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Index of the first line after a leading `---` front matter block, or 0
/// when the page has none.
pub fn front_matter_end(lines: &[&str]) -> usize {
    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return 0;
    }
    lines
        .iter()
        .skip(1)
        .position(|l| matches!(l.trim_end(), "---" | "..."))
        .map_or(0, |pos| pos + 2)
}

/// Line terminator a page uses: `\r\n` when any line ends with it.
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Whether the page mixes `\r\n` and bare `\n` line endings.
pub fn has_mixed_line_endings(text: &str) -> bool {
    let crlf = text.matches("\r\n").count();
    crlf > 0 && crlf < text.matches('\n').count()
}

/// An open fenced code block (``` or ~~~).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    /// Returns the fence opened by `content`, if any.
    pub fn open(content: &str) -> Option<Fence> {
        let ch = content.chars().next()?;
        if ch != '`' && ch != '~' {
            return None;
        }
        let len = content.chars().take_while(|&c| c == ch).count();
        (len >= 3).then_some(Fence { ch, len })
    }

    /// Whether `content` closes this fence.
    pub fn closes(&self, content: &str) -> bool {
        let run = content.chars().take_while(|&c| c == self.ch).count();
        // fence chars are ASCII, so `run` is also a byte offset
        run >= self.len && content[run..].trim().is_empty()
    }
}

/// Tracks fenced code across consecutive lines.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    /// Feed one line's content. Returns true when the line is part of a
    /// fence, delimiters included.
    pub fn observe(&mut self, content: &str) -> bool {
        match self.open {
            Some(fence) => {
                if fence.closes(content) {
                    self.open = None;
                }
                true
            }
            None => {
                self.open = Fence::open(content);
                self.open.is_some()
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Heading level (1-6) of an ATX heading line, `None` otherwise.
pub fn heading_level(content: &str) -> Option<usize> {
    let level = content.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &content[level..];
    (rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')).then_some(level)
}

/// Text of an ATX heading without its `#` prefix.
pub fn heading_text(content: &str) -> Option<&str> {
    let level = heading_level(content)?;
    Some(content[level..].trim())
}

/// `N. text` item: returns the number and the text after the marker.
pub fn ordered_item(content: &str) -> Option<(&str, &str)> {
    let caps = ORDERED_ITEM_RE.captures(content)?;
    let number = caps.get(1)?.as_str();
    let text = caps.get(2).map_or("", |m| m.as_str());
    Some((number, text))
}

/// `- text`, `* text` or `+ text` item: returns the text after the bullet.
pub fn bullet_item(content: &str) -> Option<&str> {
    // `**bold**` and `---` rules are not bullets
    let caps = BULLET_ITEM_RE.captures(content)?;
    Some(caps.get(1).map_or("", |m| m.as_str()))
}

pub fn is_list_item(content: &str) -> bool {
    ordered_item(content).is_some() || bullet_item(content).is_some()
}

/// Lines of text collected with their indentation, rendered dedented.
#[derive(Debug, Default, Clone)]
pub struct IndentedText {
    lines: Vec<(usize, String)>,
}

impl IndentedText {
    pub fn push(&mut self, indent: usize, content: &str) {
        self.lines.push((indent, content.to_string()));
    }

    pub fn push_blank(&mut self) {
        self.lines.push((0, String::new()));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|(_, c)| c.is_empty())
    }

    /// Join the lines, removing the indentation they all share.
    pub fn render(&self) -> String {
        let common = self
            .lines
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(indent, _)| *indent)
            .min()
            .unwrap_or(0);
        self.lines
            .iter()
            .map(|(indent, content)| {
                if content.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", " ".repeat(indent - common), content)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
