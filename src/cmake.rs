/// # CMake Driver
///
/// Builds the `cmake` command lines used by the build and package steps and
/// writes the files CMake reads during configuration (toolchain and
/// dependency config files).

pub mod deps;
pub mod runner;
pub mod toolchain;

use std::path::Path;

pub use runner::{CommandRunner, DryRunRunner, Invocation, ProcessRunner};

use crate::errors::RecipeError;
use crate::types::{Conf, Layout};
use crate::utils::Utils;

/// `cmake` invocations for one layout and build type
pub struct CMake<'a> {
    conf: &'a Conf,
    layout: &'a Layout,
    build_type: &'a str,
    runner: &'a dyn CommandRunner,
}

impl<'a> CMake<'a> {
    pub fn new(
        conf: &'a Conf,
        layout: &'a Layout,
        build_type: &'a str,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        CMake {
            conf,
            layout,
            build_type,
            runner,
        }
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(self.conf.cmake_program(), &self.layout.source_folder)
    }

    pub fn configure_invocation(&self, toolchain: &Path, install_prefix: &Path) -> Invocation {
        let mut inv = self.invocation();
        if let Some(generator) = &self.conf.generator {
            inv = inv.args(["-G", generator.as_str()]);
        }
        inv = inv
            .arg("-S")
            .arg(Utils::cmake_path(&self.layout.source_folder))
            .arg("-B")
            .arg(Utils::cmake_path(&self.layout.build_folder))
            .arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", Utils::cmake_path(toolchain)))
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                Utils::cmake_path(install_prefix)
            ))
            .arg("-DCMAKE_POLICY_DEFAULT_CMP0091=NEW");
        if !self.layout.multi_config {
            inv = inv.arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type));
        }
        inv
    }

    pub fn build_invocation(&self) -> Invocation {
        let mut inv = self
            .invocation()
            .arg("--build")
            .arg(Utils::cmake_path(&self.layout.build_folder))
            .args(["--config", self.build_type]);
        if let Some(jobs) = self.conf.jobs {
            inv = inv.args(["--parallel".to_string(), jobs.to_string()]);
        }
        inv
    }

    pub fn install_invocation(&self, prefix: &Path) -> Invocation {
        self.invocation()
            .arg("--install")
            .arg(Utils::cmake_path(&self.layout.build_folder))
            .args(["--config", self.build_type])
            .arg("--prefix")
            .arg(Utils::cmake_path(prefix))
    }

    pub fn configure(&self, toolchain: &Path, install_prefix: &Path) -> Result<(), RecipeError> {
        self.runner
            .run(&self.configure_invocation(toolchain, install_prefix))
    }

    pub fn build(&self) -> Result<(), RecipeError> {
        self.runner.run(&self.build_invocation())
    }

    pub fn install(&self, prefix: &Path) -> Result<(), RecipeError> {
        self.runner.run(&self.install_invocation(prefix))
    }
}
