//! Quiz page headings.
//!
//! Quiz pages open with a single `# {chapter}.{section} {Topic} - Quiz`
//! heading derived from the course layout
//! (`.../Chapter-20-.../Section-01-what-is-ai-vs-ml/quiz.md`).

use crate::core::markdown;
use crate::core::report::{Finding, Gate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Chapter-(\d+)").unwrap());
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Section-(\d+)").unwrap());

const HEADING_SUFFIX: &str = " - Quiz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    pub chapter: String,
    pub section: String,
    pub topic: String,
}

impl SectionInfo {
    pub fn heading(&self) -> String {
        format!(
            "# {}.{} {}{}",
            self.chapter, self.section, self.topic, HEADING_SUFFIX
        )
    }
}

/// Read chapter, section and topic from the path components. Unknown parts
/// fall back to `X` and `Quiz`.
pub fn section_info(path: &Path) -> SectionInfo {
    let mut info = SectionInfo {
        chapter: "X".to_string(),
        section: "X".to_string(),
        topic: "Quiz".to_string(),
    };

    for part in path.iter().filter_map(|c| c.to_str()) {
        if part.starts_with("Chapter-") {
            if let Some(caps) = CHAPTER_RE.captures(part) {
                info.chapter = caps[1].to_string();
            }
        } else if part.starts_with("Section-") {
            if let Some(caps) = SECTION_RE.captures(part) {
                info.section = caps[1].to_string();
            }
            if part.len() > 10
                && let Some(topic) = part.splitn(3, '-').nth(2)
            {
                info.topic = title_case(&topic.replace('-', " "));
            }
        }
    }
    info
}

/// Capitalize the first letter of each run of letters, lowercase the rest.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

struct LeadingHeading<'a> {
    line: usize,
    level: usize,
    text: &'a str,
}

/// Heading lines at the top of the page, after any front matter and before
/// other content.
struct PageTop<'a> {
    headings: Vec<LeadingHeading<'a>>,
    /// Byte offset where the front matter ends.
    body_start: usize,
    /// Byte offset of the first content after the leading headings.
    content_start: usize,
}

fn leading_headings(text: &str) -> PageTop<'_> {
    let lines: Vec<&str> = text.lines().collect();
    let skip = markdown::front_matter_end(&lines);
    let mut headings = Vec::new();
    let mut offset = 0;
    let mut body_start = 0;
    for (i, raw) in text.split_inclusive('\n').enumerate() {
        if i < skip {
            offset += raw.len();
            body_start = offset;
            continue;
        }
        let (indent, content) = markdown::split_indent(raw);
        if content.is_empty() {
            offset += raw.len();
            continue;
        }
        match markdown::heading_level(content) {
            Some(level) if indent < 4 => {
                headings.push(LeadingHeading {
                    line: i + 1,
                    level,
                    text: markdown::heading_text(content).unwrap_or_default(),
                });
                offset += raw.len();
            }
            _ => break,
        }
    }
    PageTop {
        headings,
        body_start,
        content_start: offset,
    }
}

fn is_canonical(heading: &LeadingHeading<'_>) -> bool {
    heading.level == 1 && heading.text.ends_with(HEADING_SUFFIX) && !heading.text.starts_with("Section ")
}

pub fn check_heading(text: &str, path: &Path) -> Vec<Finding> {
    let expected = section_info(path).heading();
    let top = leading_headings(text);
    let headings = top.headings;
    let mut findings = Vec::new();

    let Some(first) = headings.first() else {
        let line = text[..top.body_start].lines().count() + 1;
        findings.push(Finding::warn(
            Gate::PageHeading,
            Some(line),
            format!("missing page heading, expected `{}`", expected),
        ));
        return findings;
    };

    if !is_canonical(first) {
        findings.push(Finding::warn(
            Gate::PageHeading,
            Some(first.line),
            format!(
                "heading `{}` does not follow `# X.Y Topic - Quiz` (expected `{}`)",
                first.text, expected
            ),
        ));
    }

    for dup in headings.iter().skip(1) {
        findings.push(Finding::fail(
            Gate::PageHeading,
            Some(dup.line),
            format!("duplicate leading heading `{}`", dup.text),
        ));
    }
    findings
}

/// Replace the page's leading headings with the derived one, keeping any
/// front matter above it. Returns `None` when the page already has a single
/// canonical heading.
pub fn fix_heading(text: &str, path: &Path) -> Option<String> {
    let top = leading_headings(text);
    if top.headings.len() == 1 && is_canonical(&top.headings[0]) {
        return None;
    }

    let nl = markdown::line_ending(text);
    let heading = section_info(path).heading();
    let mut fixed = text[..top.body_start].to_string();
    if !fixed.is_empty() {
        if !fixed.ends_with('\n') {
            fixed.push_str(nl);
        }
        fixed.push_str(nl);
    }
    fixed.push_str(&heading);
    fixed.push_str(nl);

    let rest = &text[top.content_start..];
    if !rest.trim().is_empty() {
        fixed.push_str(nl);
        fixed.push_str(rest);
    }
    Some(fixed)
}
