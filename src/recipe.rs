/// # Package Recipe
///
/// Static description of the C++ template package plus the hooks that take
/// it from definition to an installed package. Hooks run in a fixed order:
///
/// ```text
/// requirements -> config_options -> configure -> validate
///     -> layout -> generate -> build -> package
/// ```
///
/// Each hook consumes a [`RecipeState`] and returns the next one; calling a
/// hook out of order fails with `LifecycleOutOfOrder`. `package_info` only
/// reads the static description and can be asked at any time.

pub mod lifecycle;

use std::path::Path;

use serde::Serialize;

pub use lifecycle::{Lifecycle, RecipeState, Stage};

use crate::cmake::{deps, toolchain, CMake, CommandRunner};
use crate::errors::{RecipeError, Result};
use crate::metadata::{self, ProjectMetadata, BUILD_DESCRIPTION_FILE};
use crate::output::ScopedOutput;
use crate::types::{
    BinaryOptions, CppInfo, CppStd, ExportFileSet, Layout, PackageInfo, Requirements,
};
use crate::utils::Utils;

pub const LICENSE: &str = "MIT";
pub const AUTHOR: &str = "HoneyBury zoujiahe389@gmail.com";
pub const URL: &str = "https://github.com/HoneyBury/CppSharp.git";
pub const TOPICS: [&str; 5] = ["cpp", "cmake", "conan", "template", "scaffolding"];

/// Settings the package binary depends on
pub const SETTINGS: [&str; 4] = ["os", "compiler", "build_type", "arch"];

/// `(reference, visible)` in declaration order
pub const REQUIRES: [(&str, bool); 3] = [
    ("fmt/10.2.1", true),
    ("spdlog/1.12.0", true),
    ("gtest/1.14.0", false),
];

/// Used when no cppstd comes from the profile or the command line
pub const DEFAULT_CPPSTD: &str = "17";
/// Oldest accepted cppstd
pub const MIN_CPPSTD: &str = "14";

/// Files needed to evaluate the recipe itself
pub const EXPORTS: [&str; 1] = [BUILD_DESCRIPTION_FILE];
/// Files needed to build the package from source
pub const EXPORTS_SOURCES: [&str; 7] = [
    BUILD_DESCRIPTION_FILE,
    "src/*",
    "cmake/*",
    "tests/*",
    "assets/*",
    "LICENSE",
    "README.md",
];

#[derive(Serialize, Debug, Clone)]
pub struct Recipe {
    pub name: String,
    pub version: String,
    pub description: String,
    pub license: &'static str,
    pub author: &'static str,
    pub url: &'static str,
    pub topics: Vec<&'static str>,
    pub settings: Vec<&'static str>,
    pub default_options: BinaryOptions,
    pub exports: ExportFileSet,
    pub exports_sources: ExportFileSet,
    #[serde(skip)]
    output: ScopedOutput,
}

impl Recipe {
    pub fn new(metadata: ProjectMetadata) -> Self {
        let output = ScopedOutput::new(metadata.reference());
        Recipe {
            name: metadata.name,
            version: metadata.version,
            description: metadata.description,
            license: LICENSE,
            author: AUTHOR,
            url: URL,
            topics: TOPICS.to_vec(),
            settings: SETTINGS.to_vec(),
            default_options: BinaryOptions::default(),
            exports: ExportFileSet::new(EXPORTS),
            exports_sources: ExportFileSet::new(EXPORTS_SOURCES),
            output,
        }
    }

    /// Recipe for the project rooted at `project_root`
    pub fn load(project_root: &Path) -> Result<Self> {
        let md = metadata::extract(&project_root.join(BUILD_DESCRIPTION_FILE))?;
        Ok(Self::new(md))
    }

    /// `name/version`
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    pub fn output(&self) -> &ScopedOutput {
        &self.output
    }

    /// Requirements as declared by the recipe
    pub fn declared_requirements(&self) -> Result<Requirements> {
        let mut reqs = Requirements::new();
        for (reference, visible) in REQUIRES {
            reqs.require(reference, visible)?;
        }
        Ok(reqs)
    }

    fn enter(&self, state: &RecipeState, hook: &'static str, expected: Stage) -> Result<()> {
        state.expect(hook, expected)?;
        self.output.highlight(format!("Calling {}()", hook));
        Ok(())
    }

    pub fn requirements(&self, mut state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "requirements", Stage::Defined)?;
        state.requirements = self.declared_requirements()?;
        for req in state.requirements.iter() {
            let scope = if req.visible { "visible" } else { "build" };
            self.output.verbose(format!("Requires {} ({})", req, scope));
        }
        Ok(state.advance())
    }

    pub fn config_options(&self, mut state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "config_options", Stage::RequirementsDeclared)?;
        if state.settings.os.is_windows() && state.options.fpic.is_some() {
            state.options.remove_fpic();
            self.output.verbose("Removed option fPIC (Windows)");
        }
        Ok(state.advance())
    }

    pub fn configure(&self, mut state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "configure", Stage::OptionsConfigured)?;
        if state.settings.cppstd.is_none() {
            state.settings.cppstd = Some(DEFAULT_CPPSTD.to_string());
            self.output
                .verbose(format!("compiler.cppstd not set, using {}", DEFAULT_CPPSTD));
        }
        Ok(state.advance())
    }

    pub fn validate(&self, state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "validate", Stage::Configured)?;
        if let Some(raw) = &state.settings.cppstd {
            let cppstd: CppStd = raw.parse().map_err(|e| {
                RecipeError::InvalidConfiguration(format!("compiler.cppstd: {}", e))
            })?;
            let min: CppStd = MIN_CPPSTD
                .parse()
                .map_err(RecipeError::InvalidConfiguration)?;
            if cppstd.is_below(&min) {
                return Err(RecipeError::InvalidConfiguration(format!(
                    "{} requires at least C++{}, but compiler.cppstd={}",
                    self.name, MIN_CPPSTD, raw
                )));
            }
        }
        Ok(state.advance())
    }

    pub fn layout(&self, mut state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "layout", Stage::Validated)?;
        let layout = Layout::cmake(
            &state.project_root,
            &state.settings.build_type,
            state.conf.generator.as_deref(),
        );
        self.output.verbose(format!(
            "Build folder: {}",
            Utils::display_relative(&layout.build_folder, &state.project_root)
        ));
        state.layout = Some(layout);
        Ok(state.advance())
    }

    pub fn generate(&self, mut state: RecipeState) -> Result<RecipeState> {
        self.enter(&state, "generate", Stage::LayoutSet)?;
        let reference = self.reference();
        let layout = state.layout("generate")?.clone();
        self.output.info(format!(
            "Generators folder: {}",
            Utils::display_relative(&layout.generators_folder, &state.project_root)
        ));

        let mut written = deps::write_dependency_files(
            &self.output,
            &reference,
            &state.requirements,
            &state.deps_root,
            &layout.generators_folder,
        )?;
        written.push(toolchain::write_toolchain(
            &self.output,
            &reference,
            &state.settings,
            &state.options,
            &layout,
        )?);
        state.generated_files = written;
        self.output.success("Generated toolchain and dependency files");
        Ok(state.advance())
    }

    pub fn build(&self, state: RecipeState, runner: &dyn CommandRunner) -> Result<RecipeState> {
        self.enter(&state, "build", Stage::Generated)?;
        let layout = state.layout("build")?;
        let cmake = CMake::new(&state.conf, layout, &state.settings.build_type, runner);
        let toolchain_file = layout.generators_folder.join(toolchain::TOOLCHAIN_FILE);
        cmake.configure(&toolchain_file, &state.package_folder)?;
        cmake.build()?;
        Ok(state.advance())
    }

    pub fn package(&self, state: RecipeState, runner: &dyn CommandRunner) -> Result<RecipeState> {
        self.enter(&state, "package", Stage::Built)?;
        let layout = state.layout("package")?;
        let cmake = CMake::new(&state.conf, layout, &state.settings.build_type, runner);
        cmake.install(&state.package_folder)?;
        self.output.success(format!(
            "Package folder {}",
            state.package_folder.display()
        ));
        Ok(state.advance())
    }

    /// What consumers link against: a single library named after the package
    pub fn package_info(&self) -> Result<PackageInfo> {
        Ok(PackageInfo {
            reference: self.reference(),
            cpp_info: CppInfo {
                libs: vec![self.name.clone()],
                ..CppInfo::default()
            },
            requires: self.declared_requirements()?.visible().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmake::DryRunRunner;
    use crate::types::{Conf, Os, Settings};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn recipe() -> Recipe {
        Recipe::new(ProjectMetadata {
            name: "cppsharp".to_string(),
            version: "1.0.0".to_string(),
            description: metadata::DEFAULT_DESCRIPTION.to_string(),
        })
    }

    fn state(root: &Path, os: Os, cppstd: Option<&str>) -> RecipeState {
        let settings = Settings {
            os,
            arch: "x86_64".to_string(),
            build_type: "Release".to_string(),
            compiler: None,
            compiler_version: None,
            cppstd: cppstd.map(str::to_string),
        };
        RecipeState::new(
            root.to_path_buf(),
            settings,
            BinaryOptions::default(),
            Conf::default(),
            root.join("deps"),
            root.join("package"),
        )
    }

    fn through_configure(recipe: &Recipe, state: RecipeState) -> RecipeState {
        let state = recipe.requirements(state).unwrap();
        let state = recipe.config_options(state).unwrap();
        recipe.configure(state).unwrap()
    }

    #[test]
    fn test_identity() {
        let recipe = recipe();
        assert_eq!(recipe.reference(), "cppsharp/1.0.0");
        assert_eq!(recipe.license, "MIT");
        assert_eq!(recipe.settings, vec!["os", "compiler", "build_type", "arch"]);
        assert_eq!(recipe.exports.patterns(), ["CMakeLists.txt"]);
        assert_eq!(recipe.exports_sources.patterns().len(), 7);
        assert_eq!(recipe.default_options, BinaryOptions::default());
    }

    #[test]
    fn test_requirements_declared_in_order() {
        let recipe = recipe();
        let state = recipe
            .requirements(state(Path::new("/p"), Os::Linux, None))
            .unwrap();
        let declared: Vec<(String, bool)> = state
            .requirements
            .iter()
            .map(|r| (r.to_string(), r.visible))
            .collect();
        assert_eq!(
            declared,
            vec![
                ("fmt/10.2.1".to_string(), true),
                ("spdlog/1.12.0".to_string(), true),
                ("gtest/1.14.0".to_string(), false),
            ]
        );
        assert_eq!(state.stage(), Stage::RequirementsDeclared);
    }

    #[test]
    fn test_windows_drops_fpic_and_defaults_cppstd() {
        let recipe = recipe();
        let state = through_configure(&recipe, state(Path::new("/p"), Os::Windows, None));
        assert_eq!(state.options.fpic, None);
        assert!(!state.options.shared);
        assert_eq!(state.settings.cppstd.as_deref(), Some("17"));
        let state = recipe.validate(state).unwrap();
        assert_eq!(state.stage(), Stage::Validated);
    }

    #[test]
    fn test_linux_keeps_fpic_and_explicit_cppstd() {
        let recipe = recipe();
        let state = through_configure(&recipe, state(Path::new("/p"), Os::Linux, Some("20")));
        assert_eq!(state.options.fpic, Some(true));
        assert_eq!(state.settings.cppstd.as_deref(), Some("20"));
    }

    #[test]
    fn test_validate_rejects_old_standard() {
        let recipe = recipe();
        for old in ["11", "gnu11", "98"] {
            let state = through_configure(&recipe, state(Path::new("/p"), Os::Linux, Some(old)));
            match recipe.validate(state).unwrap_err() {
                RecipeError::InvalidConfiguration(msg) => assert!(msg.contains(old)),
                other => panic!("unexpected error: {}", other),
            }
        }
        let state = through_configure(&recipe, state(Path::new("/p"), Os::Linux, Some("14")));
        assert!(recipe.validate(state).is_ok());
    }

    #[test]
    fn test_validate_rejects_unparsable_standard() {
        let recipe = recipe();
        let state = through_configure(&recipe, state(Path::new("/p"), Os::Linux, Some("latest")));
        assert!(matches!(
            recipe.validate(state),
            Err(RecipeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_hooks_out_of_order() {
        let recipe = recipe();
        let runner = DryRunRunner::new();
        let err = recipe
            .build(state(Path::new("/p"), Os::Linux, None), &runner)
            .unwrap_err();
        assert!(matches!(
            err,
            RecipeError::LifecycleOutOfOrder {
                hook: "build",
                expected: Stage::Generated,
                actual: Stage::Defined,
            }
        ));
        assert!(runner.invocations().is_empty());

        let state = recipe
            .requirements(state(Path::new("/p"), Os::Linux, None))
            .unwrap();
        assert!(recipe.requirements(state).is_err());
    }

    #[test]
    fn test_full_lifecycle_with_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let recipe = recipe();
        let runner = DryRunRunner::new();
        let lifecycle = Lifecycle::new(&recipe, &runner);

        let state = lifecycle
            .create(state(temp_dir.path(), Os::Linux, None))
            .unwrap();
        assert_eq!(state.stage(), Stage::Packaged);

        let generators = temp_dir.path().join("build").join("Release").join("generators");
        assert!(generators.join(toolchain::TOOLCHAIN_FILE).is_file());
        assert!(generators.join(deps::AGGREGATE_FILE).is_file());
        assert_eq!(state.generated_files.len(), 8);

        let calls = runner.invocations();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].args.contains(&"-S".to_string()));
        assert_eq!(calls[1].args[0], "--build");
        assert_eq!(calls[2].args[0], "--install");
        assert_eq!(
            calls[2].args.last().map(PathBuf::from),
            Some(temp_dir.path().join("package"))
        );
    }

    #[test]
    fn test_package_info() {
        let info = recipe().package_info().unwrap();
        assert_eq!(info.reference, "cppsharp/1.0.0");
        assert_eq!(info.cpp_info.libs, vec!["cppsharp"]);
        assert_eq!(info.cpp_info.includedirs, vec!["include"]);
        let requires: Vec<String> = info.requires.iter().map(|r| r.to_string()).collect();
        assert_eq!(requires, vec!["fmt/10.2.1", "spdlog/1.12.0"]);
    }
}
