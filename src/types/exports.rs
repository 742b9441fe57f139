use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::RecipeError;

/// Glob patterns, relative to the project root, naming the files that travel
/// with the recipe
///
/// A pattern that matches a directory pulls in every file below it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExportFileSet {
    patterns: Vec<String>,
}

/// Files selected by an [`ExportFileSet`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFiles {
    /// Paths relative to the project root, sorted and unique
    pub files: Vec<PathBuf>,
    /// Patterns that selected nothing
    pub unmatched: Vec<String>,
}

impl ExportFileSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExportFileSet {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Expand the patterns against `root`
    pub fn resolve(&self, root: &Path) -> Result<ResolvedFiles, RecipeError> {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let mut files = BTreeSet::new();
        let mut unmatched = Vec::new();

        for pattern in &self.patterns {
            let full_pattern = format!("{}/{}", escaped_root, pattern);
            let mut matched = false;
            for entry in glob::glob(&full_pattern)? {
                let path = entry?;
                if path.is_dir() {
                    for item in WalkDir::new(&path).sort_by_file_name() {
                        let item = item?;
                        if item.file_type().is_file() {
                            files.insert(item.path().strip_prefix(root)?.to_path_buf());
                            matched = true;
                        }
                    }
                } else if path.is_file() {
                    files.insert(path.strip_prefix(root)?.to_path_buf());
                    matched = true;
                }
            }
            if !matched {
                unmatched.push(pattern.clone());
            }
        }

        Ok(ResolvedFiles {
            files: files.into_iter().collect(),
            unmatched,
        })
    }
}
