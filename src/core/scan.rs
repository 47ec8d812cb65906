//! Markdown file discovery.

use crate::core::config::ScanConfig;
use crate::core::error::QuizmarkError;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect every Markdown file under `paths`. Files given directly are kept
/// even when their extension is not configured. Output is sorted and
/// deduplicated.
pub fn collect_markdown_files(
    paths: &[PathBuf],
    scan: &ScanConfig,
) -> Result<Vec<PathBuf>, QuizmarkError> {
    fn recurse(dir: &Path, scan: &ScanConfig, out: &mut Vec<PathBuf>) -> Result<(), QuizmarkError> {
        let mut entries = fs::read_dir(dir)
            .map_err(QuizmarkError::IoError)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(QuizmarkError::IoError)?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                let name = entry.file_name();
                if scan.is_excluded_dir(&name.to_string_lossy()) {
                    log::debug!("skipping excluded dir {}", path.display());
                    continue;
                }
                recurse(&path, scan, out)?;
            } else if path.is_file() && scan.is_markdown(&path) {
                out.push(path);
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            recurse(path, scan, &mut out)?;
        } else if path.is_file() {
            out.push(path.clone());
        } else {
            return Err(QuizmarkError::NotFound(path.display().to_string()));
        }
    }
    out.sort();
    out.dedup();
    Ok(out)
}
