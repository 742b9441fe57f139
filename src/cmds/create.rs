/// # Create Command
///
/// Export the recipe, then run every hook through `package()` and show the
/// resulting package information.

use clap::Args;
use std::path::PathBuf;

use super::common::{prepare, print_configuration, runner, ProfileArgs, ProjectArgs};
use super::info::print_package_info;
use crate::errors::Result;
use crate::recipe::Lifecycle;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Install prefix (default: <cache>/p/<name>/<version>/package)
    #[arg(long, value_name = "DIR")]
    pub package_folder: Option<PathBuf>,

    /// Skip exporting the recipe into the cache
    #[arg(long)]
    pub no_export: bool,
}

pub fn run(args: CreateArgs) -> Result<()> {
    let prepared = prepare(&args.project, &args.profile, args.package_folder.as_deref())?;
    prepared.cache.ensure_dirs()?;

    if !args.no_export {
        super::export::export(&prepared.recipe, &prepared.root, &prepared.cache)?;
    }
    print_configuration(&prepared);

    let runner = runner(args.profile.dry_run);
    let recipe = &prepared.recipe;
    recipe.output().title("Creating package");
    let state = Lifecycle::new(recipe, runner.as_ref()).create(prepared.state)?;
    recipe.output().verbose(format!("Reached stage {}", state.stage()));

    recipe.output().title("Package info");
    print_package_info(&recipe.package_info()?);
    Ok(())
}
