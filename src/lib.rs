//! Packaging recipe for a CMake-based C++ library template.
//!
//! The package identity is read from `CMakeLists.txt` ([`metadata`]); the
//! [`recipe::Recipe`] declares options, requirements and exported files and
//! drives CMake through the configure, build and install steps.

pub mod assets;
pub mod cache;
pub mod cmake;
pub mod cmds;
pub mod errors;
pub mod export;
pub mod metadata;
pub mod output;
pub mod recipe;
pub mod types;
pub mod utils;
