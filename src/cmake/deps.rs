use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::Context;

use crate::assets;
use crate::errors::RecipeError;
use crate::output::ScopedOutput;
use crate::types::{Requirement, Requirements};
use crate::utils::{PrintOp, Utils};

/// Name of the aggregate file calling `find_package` for every requirement
pub const AGGREGATE_FILE: &str = "conandeps.cmake";

/// How a package is found from CMake
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CMakePackage {
    /// Name given to `find_package`
    pub file_name: String,
    pub components: Vec<Component>,
    /// Packages found before this one
    pub dependencies: Vec<String>,
    pub defines: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Component {
    pub target: String,
    /// Libraries and targets linked by the target
    pub link: Vec<String>,
}

fn component(target: &str, link: &[&str]) -> Component {
    Component {
        target: target.to_string(),
        link: link.iter().map(|s| s.to_string()).collect(),
    }
}

impl CMakePackage {
    /// CMake names of a requirement. Unknown packages get `<name>::<name>`.
    pub fn for_requirement(req: &Requirement) -> Self {
        match req.name.as_str() {
            "fmt" => CMakePackage {
                file_name: "fmt".to_string(),
                components: vec![component("fmt::fmt", &["fmt"])],
                dependencies: Vec::new(),
                defines: Vec::new(),
            },
            "spdlog" => CMakePackage {
                file_name: "spdlog".to_string(),
                components: vec![component("spdlog::spdlog", &["spdlog", "fmt::fmt"])],
                dependencies: vec!["fmt".to_string()],
                defines: vec![
                    "SPDLOG_FMT_EXTERNAL".to_string(),
                    "SPDLOG_COMPILED_LIB".to_string(),
                ],
            },
            "gtest" => CMakePackage {
                file_name: "GTest".to_string(),
                components: vec![
                    component("GTest::gtest", &["gtest"]),
                    component("GTest::gtest_main", &["gtest_main", "GTest::gtest"]),
                ],
                dependencies: Vec::new(),
                defines: Vec::new(),
            },
            name => CMakePackage {
                file_name: name.to_string(),
                components: vec![component(&format!("{0}::{0}", name), &[name])],
                dependencies: Vec::new(),
                defines: Vec::new(),
            },
        }
    }

    pub fn targets(&self) -> Vec<String> {
        self.components.iter().map(|c| c.target.clone()).collect()
    }

    pub fn config_file(&self) -> String {
        format!("{}-config.cmake", self.file_name.to_lowercase())
    }

    pub fn config_version_file(&self) -> String {
        format!("{}-config-version.cmake", self.file_name.to_lowercase())
    }
}

#[derive(Serialize)]
struct AggregateEntry {
    reference: String,
    visible: bool,
    file_name: String,
    targets: Vec<String>,
}

/// Write the dependency files of every requirement plus `conandeps.cmake`.
///
/// `deps_root` holds the dependency packages as `<name>/<version>`.
/// Returns the written paths.
pub fn write_dependency_files(
    out: &ScopedOutput,
    reference: &str,
    requirements: &Requirements,
    deps_root: &Path,
    generators_folder: &Path,
) -> Result<Vec<PathBuf>, RecipeError> {
    fs::create_dir_all(generators_folder)?;
    let mut written = Vec::new();
    let mut aggregate = Vec::new();

    for req in requirements.iter() {
        let package = CMakePackage::for_requirement(req);
        let package_folder = deps_root.join(&req.name).join(&req.version);

        let mut ctx = Context::new();
        ctx.insert("reference", &req.to_string());
        ctx.insert("version", &req.version);
        ctx.insert("major", req.major_version());
        ctx.insert("file_name", &package.file_name);
        ctx.insert("package_folder", &Utils::cmake_path(&package_folder));
        ctx.insert(
            "include_dir",
            &Utils::cmake_path(&package_folder.join("include")),
        );
        ctx.insert("lib_dir", &Utils::cmake_path(&package_folder.join("lib")));
        ctx.insert("components", &package.components);
        ctx.insert("dependencies", &package.dependencies);
        ctx.insert("defines", &package.defines);

        let config = assets::render("cmake/config.cmake.tera", &ctx)?;
        written.push(write_file(out, generators_folder, &package.config_file(), &config)?);
        let version = assets::render("cmake/config-version.cmake.tera", &ctx)?;
        written.push(write_file(
            out,
            generators_folder,
            &package.config_version_file(),
            &version,
        )?);

        aggregate.push(AggregateEntry {
            reference: req.to_string(),
            visible: req.visible,
            targets: package.targets(),
            file_name: package.file_name,
        });
    }

    let mut ctx = Context::new();
    ctx.insert("reference", reference);
    ctx.insert("dependencies", &aggregate);
    let content = assets::render("cmake/conandeps.cmake.tera", &ctx)?;
    written.push(write_file(out, generators_folder, AGGREGATE_FILE, &content)?);

    Ok(written)
}

fn write_file(
    out: &ScopedOutput,
    folder: &Path,
    name: &str,
    content: &str,
) -> Result<PathBuf, RecipeError> {
    let path = folder.join(name);
    Utils::print_status(out, &path, name, PrintOp::Create);
    fs::write(&path, content)?;
    Ok(path)
}
