use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading project identity from the build description
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Cannot find CMakeLists.txt at {}. Check the recipe 'exports' attribute.", path.display())]
    ConfigurationFileMissing { path: PathBuf },

    #[error("Could not extract project name, version, or description from {}: no `project(<name> VERSION <version> ...)` declaration found", path.display())]
    ConfigurationPatternNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid project declaration pattern: {0}")]
    Pattern(#[from] regex::Error),
}
