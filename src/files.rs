//! Source file discovery under a repository root.
//!
//! Ordinary I/O glue for callers that want to pick a file to track; the
//! engine itself never walks directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively list files under `root` whose name ends with `extension`
/// (e.g. `".java"`), skipping the `.git` directory. Returned paths are
/// relative to `root` and sorted.
pub fn discover_source_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("Skipping unreadable directory entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            let path = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(path);
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discovers_only_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/com")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("src/com/App.java"), "class App {}").unwrap();
        fs::write(dir.path().join("src/com/Util.java"), "class Util {}").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();
        fs::write(dir.path().join(".git/HEAD.java"), "not source").unwrap();

        let files = discover_source_files(dir.path(), ".java");
        assert_eq!(
            files,
            vec![
                PathBuf::from("src/com/App.java"),
                PathBuf::from("src/com/Util.java")
            ]
        );
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_source_files(dir.path(), ".java").is_empty());
    }
}
