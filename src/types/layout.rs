use serde::Serialize;
use std::path::{Path, PathBuf};

/// Folder layout of a CMake build
///
/// Single-configuration generators get one build folder per build type
/// (`build/Release`); multi-configuration generators share `build/`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Layout {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    pub generators_folder: PathBuf,
    pub multi_config: bool,
}

impl Layout {
    pub fn cmake(project_root: &Path, build_type: &str, generator: Option<&str>) -> Self {
        let multi_config = generator.is_some_and(is_multi_config_generator);
        let build_folder = if multi_config {
            project_root.join("build")
        } else {
            project_root.join("build").join(build_type)
        };
        Layout {
            source_folder: project_root.to_path_buf(),
            generators_folder: build_folder.join("generators"),
            build_folder,
            multi_config,
        }
    }
}

/// Generators that hold several build types in one build tree
pub fn is_multi_config_generator(generator: &str) -> bool {
    generator.starts_with("Visual Studio")
        || generator == "Xcode"
        || generator.contains("Multi-Config")
}
