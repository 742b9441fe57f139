/// # Project Metadata
///
/// Reads the package identity from the project's `CMakeLists.txt`.
///
/// Only the `project()` declaration is looked at:
///
/// ```cmake
/// project(MyLib
///     VERSION 2.3.0
///     DESCRIPTION "demo"
///     LANGUAGES CXX)
/// ```
///
/// yields `mylib`, `2.3.0` and `demo`. The description is optional and falls
/// back to [`DEFAULT_DESCRIPTION`].

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::MetadataError;

/// File name of the build description, relative to the project root
pub const BUILD_DESCRIPTION_FILE: &str = "CMakeLists.txt";

/// Used when the declaration has no `DESCRIPTION` clause
pub const DEFAULT_DESCRIPTION: &str = "A modern C++ project template.";

// Dot matches newline so a declaration may span several lines. The tail is
// non-greedy so the match stops at the first closing parenthesis.
const PROJECT_DECLARATION: &str =
    r#"(?s)project\s*\(\s*(\S+)\s+VERSION\s+([^\s)]+)(?:\s+DESCRIPTION\s+"([^"]+)")?.*?\)"#;

/// Identity of the project as declared in its build description
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl ProjectMetadata {
    /// `name/version`
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Extract the project identity from the build description at `path`.
///
/// Either all fields are extracted or an error is returned; there is no
/// partial result.
pub fn extract(path: &Path) -> Result<ProjectMetadata, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::ConfigurationFileMissing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content)?.ok_or_else(|| MetadataError::ConfigurationPatternNotFound {
        path: path.to_path_buf(),
    })
}

/// Parse the first `project()` declaration found in `content`.
///
/// Returns `Ok(None)` when the text holds no recognisable declaration.
pub fn parse(content: &str) -> Result<Option<ProjectMetadata>, MetadataError> {
    let re = Regex::new(PROJECT_DECLARATION)?;
    let Some(caps) = re.captures(content) else {
        return Ok(None);
    };

    let description = caps
        .get(3)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    Ok(Some(ProjectMetadata {
        name: caps[1].to_lowercase(),
        version: caps[2].to_string(),
        description,
    }))
}

/// Number of `project()` declarations in `content`.
///
/// Extraction always uses the first one; callers can use this to warn about
/// files that declare more than one project.
pub fn declaration_count(content: &str) -> Result<usize, MetadataError> {
    let re = Regex::new(PROJECT_DECLARATION)?;
    Ok(re.find_iter(content).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parsed(content: &str) -> ProjectMetadata {
        parse(content).unwrap().expect("declaration should match")
    }

    #[test]
    fn test_single_line_with_description() {
        let md = parsed(r#"project(MyLib VERSION 2.3.0 DESCRIPTION "demo")"#);
        assert_eq!(md.name, "mylib");
        assert_eq!(md.version, "2.3.0");
        assert_eq!(md.description, "demo");
    }

    #[test]
    fn test_missing_description_uses_default() {
        let md = parsed("project(MyLib VERSION 2.3.0)");
        assert_eq!(md.name, "mylib");
        assert_eq!(md.version, "2.3.0");
        assert_eq!(md.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_multi_line_with_trailing_arguments() {
        let content = r#"
cmake_minimum_required(VERSION 3.20)

project(
    CppSharp
        VERSION   1.4.2
    DESCRIPTION "Thread pools and friends"
    HOMEPAGE_URL "https://example.com"
    LANGUAGES CXX
)

add_subdirectory(src)
"#;
        let md = parsed(content);
        assert_eq!(md.name, "cppsharp");
        assert_eq!(md.version, "1.4.2");
        assert_eq!(md.description, "Thread pools and friends");
    }

    #[test]
    fn test_whitespace_inside_parentheses() {
        let md = parsed("project (  Foo\tVERSION\n0.1.0-rc1 )");
        assert_eq!(md.name, "foo");
        assert_eq!(md.version, "0.1.0-rc1");
    }

    #[test]
    fn test_version_stops_at_closing_paren() {
        let md = parsed("project(Foo VERSION 3.0)");
        assert_eq!(md.version, "3.0");
    }

    #[test]
    fn test_empty_description_falls_back_to_default() {
        let md = parsed(r#"project(Foo VERSION 1.0.0 DESCRIPTION "")"#);
        assert_eq!(md.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_no_declaration() {
        assert!(parse("cmake_minimum_required(VERSION 3.20)\nadd_library(foo foo.cpp)\n")
            .unwrap()
            .is_none());
        // VERSION is mandatory
        assert!(parse("project(Foo LANGUAGES CXX)").unwrap().is_none());
    }

    #[test]
    fn test_first_declaration_wins() {
        let content = "project(First VERSION 1.0.0)\nproject(Second VERSION 2.0.0)\n";
        let md = parsed(content);
        assert_eq!(md.name, "first");
        assert_eq!(md.version, "1.0.0");
        assert_eq!(declaration_count(content).unwrap(), 2);
    }

    #[test]
    fn test_extract_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CMakeLists.txt");
        let err = extract(&path).unwrap_err();
        assert!(matches!(err, MetadataError::ConfigurationFileMissing { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_extract_pattern_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CMakeLists.txt");
        fs::write(&path, "add_executable(app main.cpp)\n").unwrap();
        let err = extract(&path).unwrap_err();
        assert!(matches!(err, MetadataError::ConfigurationPatternNotFound { .. }));
    }

    #[test]
    fn test_extract_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CMakeLists.txt");
        fs::write(&path, "project(MyLib\n  VERSION 2.3.0\n  DESCRIPTION \"demo\")\n").unwrap();
        let md = extract(&path).unwrap();
        assert_eq!(md.reference(), "mylib/2.3.0");
        assert_eq!(md.description, "demo");
    }
}
