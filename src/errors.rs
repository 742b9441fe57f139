// Central error aggregation module. This file defines the global `RecipeError`
// and re-exports commonly used error types under `crate::errors::*`.
pub mod cache;
pub mod metadata;
pub mod profile;
pub mod recipe;

pub use cache::CacheError;
pub use metadata::MetadataError;
pub use profile::ProfileError;

pub use recipe::RecipeError;
pub type Result<T> = std::result::Result<T, RecipeError>;
