use std::io;
use thiserror::Error;

/// Errors that can occur when locating or preparing the local cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to determine cache directory: set CPPRECIPE_HOME or HOME")]
    CacheDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to walk cache: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
