use thiserror::Error;

use crate::recipe::Stage;

/// Crate-wide error type to avoid `Box<dyn Error>` in public APIs.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Metadata(#[from] crate::errors::MetadataError),

    #[error("Profile error: {0}")]
    Profile(#[from] crate::errors::ProfileError),

    #[error("Cache error: {0}")]
    Cache(#[from] crate::errors::CacheError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Invalid export pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Export pattern error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Strip prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    #[error("Template render error: {0}")]
    TemplateRender(#[from] tera::Error),

    #[error("Embedded asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid requirement reference '{0}', expected name/version")]
    InvalidReference(String),

    #[error("`{hook}()` called out of order: expected stage {expected}, recipe is at {actual}")]
    LifecycleOutOfOrder {
        hook: &'static str,
        expected: Stage,
        actual: Stage,
    },

    #[error("Failed to launch `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed ({status}):\n{stderr}")]
    ExternalBuildFailure {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),

    #[error("Invalid export manifest: {0}")]
    InvalidManifest(String),
}
