use clap::Args;
use std::path::{Path, PathBuf};

use crate::cache::RecipeCache;
use crate::cmake::{CommandRunner, DryRunRunner, ProcessRunner};
use crate::errors::{RecipeError, Result};
use crate::output::Verbosity;
use crate::recipe::{Recipe, RecipeState};
use crate::types::profile::Overrides;
use crate::types::Profile;

/// Project selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root containing CMakeLists.txt
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// Profile and overrides for commands that run the lifecycle
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Profile file (default: $CPPRECIPE_PROFILE, then <cache>/profiles/default.toml)
    #[arg(short = 'p', long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Setting override, e.g. -s compiler.cppstd=20
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option override, e.g. -o shared=True
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Print the cmake commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Canonical project root; it must be an existing directory
pub fn project_root(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(RecipeError::InvalidDirectory(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(path.canonicalize()?)
}

/// Recipe, cache and initial state for a lifecycle run
pub struct Prepared {
    pub root: PathBuf,
    pub recipe: Recipe,
    pub cache: RecipeCache,
    pub profile: Profile,
    pub state: RecipeState,
}

pub fn prepare(
    project: &ProjectArgs,
    profile_args: &ProfileArgs,
    package_folder: Option<&Path>,
) -> Result<Prepared> {
    let cache = RecipeCache::new()?;
    prepare_with_cache(project, profile_args, package_folder, cache)
}

pub fn prepare_with_cache(
    project: &ProjectArgs,
    profile_args: &ProfileArgs,
    package_folder: Option<&Path>,
    cache: RecipeCache,
) -> Result<Prepared> {
    let root = project_root(&project.path)?;
    let recipe = Recipe::load(&root)?;

    let profile = Profile::locate(profile_args.profile.as_deref(), &cache.default_profile())?;
    let overrides = Overrides::parse(&profile_args.settings, &profile_args.options)?;
    let (settings, options) = profile.resolve(&recipe.default_options, &overrides)?;

    let deps_root = profile
        .conf
        .deps_root
        .clone()
        .unwrap_or_else(|| cache.packages_root());
    let package_folder = match package_folder {
        Some(p) => p.to_path_buf(),
        None => cache.package_folder(&recipe.name, &recipe.version),
    };

    let state = RecipeState::new(
        root.clone(),
        settings,
        options,
        profile.conf.clone(),
        deps_root,
        package_folder,
    );

    Ok(Prepared {
        root,
        recipe,
        cache,
        profile,
        state,
    })
}

/// Runner for external commands: recorded only with `--dry-run`
pub fn runner(dry_run: bool) -> Box<dyn CommandRunner> {
    let verbose = Verbosity::from_env() >= Verbosity::Verbose;
    if dry_run {
        Box::new(DryRunRunner::echoing())
    } else {
        Box::new(ProcessRunner::new(verbose))
    }
}

/// Print the effective settings and options of a run
pub fn print_configuration(prepared: &Prepared) {
    let out = prepared.recipe.output();
    out.title("Configuration");
    if !prepared.profile.raw.is_empty() {
        out.verbose(format!("Profile:\n{}", prepared.profile.raw.trim_end()));
    }
    for (key, value) in prepared.state.settings.entries() {
        out.info(format!("[settings] {}={}", key, value));
    }
    for (key, value) in prepared.state.options.entries() {
        out.info(format!("[options] {}={}", key, value));
    }
}
