//! Stylesheet discovery on a local directory tree.
//!
//! Convenience for static-site runs where the stylesheet list is not
//! enumerated by hand. Uses early directory pruning via
//! `WalkDir::filter_entry` so excluded subtrees are skipped without being
//! walked.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never worth descending into for stylesheets.
const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "target", "dist"];

/// Checks if a directory entry should be pruned (excluded from traversal).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers all `.css` files under `root`, as paths relative to `root`,
/// sorted so the resulting run order is deterministic.
pub fn gather_css_files(root: &Path) -> Result<Vec<PathBuf>> {
    let excludes: HashSet<&str> = EXCLUDED_DIRS.iter().copied().collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
                {
                    Some(Ok(path.strip_prefix(root).unwrap_or(path).to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!(
            "Failed to gather .css files from {}",
            root.display()
        ))?;

    files.sort();
    Ok(files)
}
