//! Recipe file discovery.

use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{RecipeError, Result};

/// Extension of recipe source files.
pub const DEFAULT_EXTENSION: &str = "food";

/// Build a matcher for `*.<extension>` file names.
fn extension_matcher(extension: &str) -> Result<GlobMatcher> {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() || ext.contains(['*', '?', '[', ']', '{', '}', '/', '\\']) {
        return Err(RecipeError::Extension(extension.to_string()));
    }
    let glob = Glob::new(&format!("*.{}", ext))
        .map_err(|_| RecipeError::Extension(extension.to_string()))?;
    Ok(glob.compile_matcher())
}

/// Snapshot the recipe files directly inside `dir`.
///
/// Subdirectories are not descended into. The result is sorted by path and is
/// meant to be reused for every later phase of a run.
pub fn collect_recipe_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let matcher = extension_matcher(extension)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| RecipeError::Read {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collects_only_matching_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("soup.food"), "").unwrap();
        std::fs::write(temp.path().join("bread.food"), "").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();
        std::fs::write(temp.path().join("food"), "").unwrap();
        std::fs::write(temp.path().join(".draft.food"), "").unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("nested").join("cake.food"), "").unwrap();

        let files = collect_recipe_files(temp.path(), DEFAULT_EXTENSION).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![".draft.food", "bread.food", "soup.food"]);
    }

    #[test]
    fn test_directory_named_like_recipe_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("odd.food")).unwrap();

        let files = collect_recipe_files(temp.path(), "food").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_leading_dot_in_extension() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("stew.food"), "").unwrap();

        let files = collect_recipe_files(temp.path(), ".food").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_invalid_extension() {
        let temp = TempDir::new().unwrap();
        for bad in ["", "*", "fo{o"] {
            let err = collect_recipe_files(temp.path(), bad).unwrap_err();
            assert!(matches!(err, RecipeError::Extension(_)));
        }
    }
}
