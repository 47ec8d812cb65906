//! Markdown lint: heading and list spacing checks for every page.
//!
//! Rules:
//! - at most `max_h1` H1 headings per page;
//! - headings need a blank line above and below (failure);
//! - a list needs a blank line before its first item (warning).
//!
//! Fenced code and YAML front matter are skipped. Lines indented 4 or more
//! columns are never headings.

use crate::core::config::LintConfig;
use crate::core::markdown::{self, FenceTracker};
use crate::core::output;
use crate::core::report::{Finding, Gate};

const PREVIEW_CHARS: usize = 60;

pub fn lint_markdown(text: &str, config: &LintConfig) -> Vec<Finding> {
    let lines: Vec<&str> = text.lines().collect();
    let mut findings = Vec::new();
    let mut fences = FenceTracker::default();
    let mut h1_lines = Vec::new();
    let start = markdown::front_matter_end(&lines);

    for i in start..lines.len() {
        let (indent, content) = markdown::split_indent(lines[i]);
        if fences.observe(content) {
            continue;
        }
        if content.is_empty() {
            continue;
        }
        let line_no = i + 1;
        let preview = output::compact_line(content, PREVIEW_CHARS);
        let above_blank = i == start || markdown::is_blank(lines[i - 1]);

        if indent < 4
            && let Some(level) = markdown::heading_level(content)
        {
            if level == 1 {
                h1_lines.push(line_no);
            }
            if !above_blank {
                findings.push(Finding::fail(
                    Gate::MarkdownLint,
                    Some(line_no),
                    format!("heading '{}' not preceded by a blank line", preview),
                ));
            }
            let below_blank = i + 1 == lines.len() || markdown::is_blank(lines[i + 1]);
            if !below_blank {
                findings.push(Finding::fail(
                    Gate::MarkdownLint,
                    Some(line_no),
                    format!("heading '{}' not followed by a blank line", preview),
                ));
            }
            continue;
        }

        if markdown::is_list_item(content) && !above_blank && !continues_list(lines[i - 1]) {
            findings.push(Finding::warn(
                Gate::MarkdownLint,
                Some(line_no),
                format!("list item may need a blank line before it ('{}')", preview),
            ));
        }
    }

    if h1_lines.len() > config.max_h1 {
        findings.push(Finding::fail(
            Gate::MarkdownLint,
            h1_lines.get(config.max_h1).copied(),
            format!(
                "H1 count: {} (should be at most {})",
                h1_lines.len(),
                config.max_h1
            ),
        ));
    }

    findings.sort_by_key(|f| f.line);
    findings
}

/// Whether `prev` belongs to a list the current item continues: another
/// item, or an indented continuation line of one.
fn continues_list(prev: &str) -> bool {
    let (indent, content) = markdown::split_indent(prev);
    markdown::is_list_item(content) || indent >= 2
}
