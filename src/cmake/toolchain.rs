use std::fs;
use std::path::PathBuf;

use tera::Context;

use crate::assets;
use crate::errors::RecipeError;
use crate::output::ScopedOutput;
use crate::types::{BinaryOptions, CppStd, Layout, Settings};
use crate::utils::{PrintOp, Utils};

/// Name of the generated toolchain file
pub const TOOLCHAIN_FILE: &str = "conan_toolchain.cmake";

/// Render the toolchain file text
pub fn render_toolchain(
    reference: &str,
    settings: &Settings,
    options: &BinaryOptions,
    layout: &Layout,
) -> Result<String, RecipeError> {
    let raw = settings.cppstd.as_deref().ok_or_else(|| {
        RecipeError::InvalidConfiguration("compiler.cppstd is not set".to_string())
    })?;
    let cppstd: CppStd = raw.parse().map_err(RecipeError::InvalidConfiguration)?;

    let mut ctx = Context::new();
    ctx.insert("reference", reference);
    ctx.insert("cppstd", cppstd.level());
    ctx.insert("cppstd_extensions", &cppstd.is_gnu());
    ctx.insert("has_fpic", &options.fpic.is_some());
    ctx.insert("fpic", &options.fpic.unwrap_or(false));
    ctx.insert("shared", &options.shared);
    // Multi-config generators pick the build type at build time
    let build_type = if layout.multi_config {
        String::new()
    } else {
        settings.build_type.clone()
    };
    ctx.insert("build_type", &build_type);
    ctx.insert(
        "generators_folder",
        &Utils::cmake_path(&layout.generators_folder),
    );

    assets::render("cmake/toolchain.cmake.tera", &ctx)
}

/// Write `conan_toolchain.cmake` into the generators folder
pub fn write_toolchain(
    out: &ScopedOutput,
    reference: &str,
    settings: &Settings,
    options: &BinaryOptions,
    layout: &Layout,
) -> Result<PathBuf, RecipeError> {
    let content = render_toolchain(reference, settings, options, layout)?;
    fs::create_dir_all(&layout.generators_folder)?;
    let path = layout.generators_folder.join(TOOLCHAIN_FILE);
    Utils::print_status(out, &path, TOOLCHAIN_FILE, PrintOp::Create);
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Os;
    use std::path::Path;

    fn settings(cppstd: &str) -> Settings {
        Settings {
            os: Os::Linux,
            arch: "x86_64".to_string(),
            build_type: "Release".to_string(),
            compiler: Some("gcc".to_string()),
            compiler_version: Some("13".to_string()),
            cppstd: Some(cppstd.to_string()),
        }
    }

    #[test]
    fn test_render_single_config() {
        let layout = Layout::cmake(Path::new("/work/proj"), "Release", None);
        let text = render_toolchain(
            "cppsharp/1.0.0",
            &settings("17"),
            &BinaryOptions::default(),
            &layout,
        )
        .unwrap();
        assert!(text.contains("set(CMAKE_CXX_STANDARD 17)"));
        assert!(text.contains("set(CMAKE_CXX_EXTENSIONS OFF)"));
        assert!(text.contains("set(CMAKE_POSITION_INDEPENDENT_CODE ON"));
        assert!(text.contains("set(BUILD_SHARED_LIBS OFF"));
        assert!(text.contains("set(CMAKE_BUILD_TYPE \"Release\""));
        assert!(text.contains("\"/work/proj/build/Release/generators\""));
        assert!(text.contains("${CMAKE_CURRENT_LIST_FILE}"));
    }

    #[test]
    fn test_render_gnu_without_fpic_multi_config() {
        let layout = Layout::cmake(Path::new("/work/proj"), "Debug", Some("Xcode"));
        let mut options = BinaryOptions::default();
        options.remove_fpic();
        options.shared = true;
        let text = render_toolchain("cppsharp/1.0.0", &settings("gnu20"), &options, &layout)
            .unwrap();
        assert!(text.contains("set(CMAKE_CXX_STANDARD 20)"));
        assert!(text.contains("set(CMAKE_CXX_EXTENSIONS ON)"));
        assert!(!text.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(text.contains("set(BUILD_SHARED_LIBS ON"));
        assert!(!text.contains("CMAKE_BUILD_TYPE"));
    }

    #[test]
    fn test_missing_cppstd() {
        let layout = Layout::cmake(Path::new("/work/proj"), "Release", None);
        let mut s = settings("17");
        s.cppstd = None;
        let err = render_toolchain("x/1", &s, &BinaryOptions::default(), &layout).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidConfiguration(_)));
    }
}
