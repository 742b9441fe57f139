/// # Install Command
///
/// Run the recipe up to `generate()`: the build folder receives the
/// toolchain and dependency files, nothing is compiled.

use clap::Args;

use super::common::{prepare, print_configuration, runner, ProfileArgs, ProjectArgs};
use crate::errors::Result;
use crate::recipe::Lifecycle;
use crate::utils::Utils;

#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

pub fn run(args: InstallArgs) -> Result<()> {
    let prepared = prepare(&args.project, &args.profile, None)?;
    print_configuration(&prepared);

    let runner = runner(args.profile.dry_run);
    let recipe = &prepared.recipe;
    recipe.output().title("Installing");
    let state = Lifecycle::new(recipe, runner.as_ref()).install(prepared.state)?;

    for file in &state.generated_files {
        recipe
            .output()
            .verbose(format!("Wrote {}", Utils::display_relative(file, &prepared.root)));
    }
    if let Some(layout) = &state.layout {
        recipe.output().success(format!(
            "Install finished, configure with -DCMAKE_TOOLCHAIN_FILE={}",
            Utils::cmake_path(&layout.generators_folder.join(crate::cmake::toolchain::TOOLCHAIN_FILE))
        ));
    }
    Ok(())
}
