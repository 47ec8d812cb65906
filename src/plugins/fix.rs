//! `quizmark fix`: rewrite pages in place.
//!
//! Applies quiz normalization to every Markdown file and, on quiz pages, the
//! derived page heading. Files are processed in path order and written only
//! when their content changes.

use crate::core::config::Config;
use crate::core::error::QuizmarkError;
use crate::core::output::{self, Tag};
use crate::core::scan;
use crate::plugins::{heading, normalize};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFix {
    pub path: PathBuf,
    pub changes: Vec<normalize::Change>,
    pub heading_fixed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FixSummary {
    pub scanned: usize,
    pub fixed: Vec<FileFix>,
    pub dry_run: bool,
}

/// Compute the fixed text for one page. Returns `None` when nothing changes.
pub fn fix_text(text: &str, path: &Path, config: &Config) -> Option<(String, FileFix)> {
    let normalized = normalize::normalize_quiz_format(text);
    let mut fixed = normalized.text;
    let mut heading_fixed = false;

    if config.headings.enabled
        && config.scan.is_quiz_page(path)
        && let Some(with_heading) = heading::fix_heading(&fixed, path)
    {
        fixed = with_heading;
        heading_fixed = true;
    }

    if fixed == text {
        return None;
    }
    Some((
        fixed,
        FileFix {
            path: path.to_path_buf(),
            changes: normalized.changes,
            heading_fixed,
        },
    ))
}

pub fn run_fix(
    paths: &[PathBuf],
    config: &Config,
    dry_run: bool,
) -> Result<FixSummary, QuizmarkError> {
    let files = scan::collect_markdown_files(paths, &config.scan)?;
    let mut summary = FixSummary {
        scanned: files.len(),
        dry_run,
        ..FixSummary::default()
    };

    for path in &files {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let Some((fixed, file_fix)) = fix_text(&text, path, config) else {
            continue;
        };
        if !dry_run {
            fs::write(path, fixed)?;
        }
        log::debug!("fixed {} ({} change(s))", path.display(), file_fix.changes.len());
        summary.fixed.push(file_fix);
    }

    Ok(summary)
}

fn describe(fix: &FileFix) -> String {
    let mut parts: Vec<String> = Vec::new();
    if fix.heading_fixed {
        parts.push("heading".to_string());
    }
    for change in &fix.changes {
        parts.push(format!("line {} {:?}", change.line, change.kind));
    }
    output::preview_messages(&parts, 4, 40)
}

pub fn run_fix_cli(paths: &[PathBuf], config: &Config, dry_run: bool) -> Result<(), QuizmarkError> {
    let summary = run_fix(paths, config, dry_run)?;
    for fix in &summary.fixed {
        println!(
            "  {} {} ({})",
            output::tag(Tag::Fixed),
            fix.path.display(),
            describe(fix)
        );
    }
    println!(
        "fix: summary files={} changed={}{}",
        summary.scanned,
        summary.fixed.len(),
        if dry_run { " (dry run, nothing written)" } else { "" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LEGACY: &str = "# Section 1.1 Quiz: Intro\n\n!!! quiz \"Intro\"\n  1. **What is 2+2?**\n      a) 3\n      b) 4 { data-correct }\n";

    #[test]
    fn test_fix_text_normalizes_and_sets_heading() {
        let path = Path::new("docs/Chapter-1/Section-1-intro/quiz.md");
        let (fixed, fix) = fix_text(LEGACY, path, &Config::default()).unwrap();
        assert_eq!(
            fixed,
            "# 1.1 Intro - Quiz\n\n!!! quiz \"Intro\"\n    1. What is 2+2?\n        - 3\n        - 4 { data-correct }\n"
        );
        assert!(fix.heading_fixed);
        assert!(fix_text(&fixed, path, &Config::default()).is_none());
    }

    #[test]
    fn test_fix_text_leaves_front_matter_page_alone() {
        let path = Path::new("docs/Chapter-3/Section-1-loops/quiz.md");
        let page = "---\ntitle: Loops quiz\n---\n\n# 3.1 Loops - Quiz\n\n!!! quiz \"Loops\"\n    1. Q?\n        - a { data-correct }\n        - b\n";
        assert!(fix_text(page, path, &Config::default()).is_none());

        let page = "---\ntitle: Loops quiz\n---\n\n!!! quiz \"Loops\"\n    1. Q?\n        - a { data-correct }\n        - b\n";
        let (fixed, fix) = fix_text(page, path, &Config::default()).unwrap();
        assert!(fix.heading_fixed);
        assert!(fixed.starts_with("---\ntitle: Loops quiz\n---\n\n# 3.1 Loops - Quiz\n\n!!! quiz"));
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("Chapter-1/Section-1-intro");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("quiz.md");
        fs::write(&file, LEGACY).unwrap();

        let summary = run_fix(&[tmp.path().to_path_buf()], &Config::default(), true).unwrap();
        assert_eq!(summary.fixed.len(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), LEGACY);

        let summary = run_fix(&[tmp.path().to_path_buf()], &Config::default(), false).unwrap();
        assert_eq!(summary.fixed.len(), 1);
        assert!(fs::read_to_string(&file).unwrap().starts_with("# 1.1 Intro - Quiz\n"));

        let summary = run_fix(&[tmp.path().to_path_buf()], &Config::default(), false).unwrap();
        assert!(summary.fixed.is_empty());
    }
}
