use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::cmake::CommandRunner;
use crate::errors::{RecipeError, Result};
use crate::types::{BinaryOptions, Conf, Layout, Requirements, Settings};

use super::Recipe;

/// Position of a recipe in its lifecycle
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Defined,
    RequirementsDeclared,
    OptionsConfigured,
    Configured,
    Validated,
    LayoutSet,
    Generated,
    Built,
    Packaged,
}

impl Stage {
    /// Stage reached after the next hook, `None` once packaged
    pub fn next(self) -> Option<Stage> {
        use Stage::*;
        match self {
            Defined => Some(RequirementsDeclared),
            RequirementsDeclared => Some(OptionsConfigured),
            OptionsConfigured => Some(Configured),
            Configured => Some(Validated),
            Validated => Some(LayoutSet),
            LayoutSet => Some(Generated),
            Generated => Some(Built),
            Built => Some(Packaged),
            Packaged => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Everything the hooks read and write, handed from one hook to the next
#[derive(Debug, Clone)]
pub struct RecipeState {
    stage: Stage,
    pub project_root: PathBuf,
    pub settings: Settings,
    pub options: BinaryOptions,
    pub conf: Conf,
    pub requirements: Requirements,
    /// Set by `layout()`
    pub layout: Option<Layout>,
    /// Files written by `generate()`
    pub generated_files: Vec<PathBuf>,
    /// Folder holding dependency packages as `<name>/<version>`
    pub deps_root: PathBuf,
    /// Install prefix used by `package()`
    pub package_folder: PathBuf,
}

impl RecipeState {
    pub fn new(
        project_root: PathBuf,
        settings: Settings,
        options: BinaryOptions,
        conf: Conf,
        deps_root: PathBuf,
        package_folder: PathBuf,
    ) -> Self {
        RecipeState {
            stage: Stage::Defined,
            project_root,
            settings,
            options,
            conf,
            requirements: Requirements::new(),
            layout: None,
            generated_files: Vec::new(),
            deps_root,
            package_folder,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Fail unless the state is at `expected`
    pub(crate) fn expect(&self, hook: &'static str, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(RecipeError::LifecycleOutOfOrder {
                hook,
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    /// Move to the following stage
    pub(crate) fn advance(mut self) -> Self {
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
        self
    }

    pub(crate) fn layout(&self, hook: &'static str) -> Result<&Layout> {
        self.layout.as_ref().ok_or(RecipeError::LifecycleOutOfOrder {
            hook,
            expected: Stage::LayoutSet,
            actual: self.stage,
        })
    }
}

/// Runs the hooks of a recipe in their fixed order
pub struct Lifecycle<'a> {
    recipe: &'a Recipe,
    runner: &'a dyn CommandRunner,
}

impl<'a> Lifecycle<'a> {
    pub fn new(recipe: &'a Recipe, runner: &'a dyn CommandRunner) -> Self {
        Lifecycle { recipe, runner }
    }

    /// `requirements` through `generate`: everything a consumer build needs
    pub fn install(&self, state: RecipeState) -> Result<RecipeState> {
        let state = self.recipe.requirements(state)?;
        let state = self.recipe.config_options(state)?;
        let state = self.recipe.configure(state)?;
        let state = self.recipe.validate(state)?;
        let state = self.recipe.layout(state)?;
        self.recipe.generate(state)
    }

    /// The whole lifecycle, ending with an installed package
    pub fn create(&self, state: RecipeState) -> Result<RecipeState> {
        let state = self.install(state)?;
        let state = self.recipe.build(state, self.runner)?;
        self.recipe.package(state, self.runner)
    }
}
