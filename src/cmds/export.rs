/// # Export Command
///
/// Copy the recipe and its sources into the local cache and print the
/// resulting recipe revision.

use clap::Args;
use colored::Colorize;

use super::common::{project_root, ProjectArgs};
use crate::cache::RecipeCache;
use crate::errors::Result;
use crate::export::{export_recipe, ExportResult};
use crate::recipe::Recipe;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let root = project_root(&args.project.path)?;
    let recipe = Recipe::load(&root)?;
    let cache = RecipeCache::new()?;
    cache.ensure_dirs()?;
    export(&recipe, &root, &cache)?;
    Ok(())
}

/// Export and report, shared with `create`
pub fn export(
    recipe: &Recipe,
    root: &std::path::Path,
    cache: &RecipeCache,
) -> Result<ExportResult> {
    let out = recipe.output();
    out.title("Exporting recipe");
    let result = export_recipe(recipe, root, cache)?;
    out.info(format!(
        "Copied {} exported and {} source files",
        result.exports.len(),
        result.sources.len()
    ));
    if result.unchanged() {
        out.info("Recipe unchanged");
    }
    out.success(format!(
        "Exported: {}#{}",
        recipe.reference(),
        result.revision.bold()
    ));
    out.verbose(format!("Export folder: {}", result.folder.display()));
    Ok(result)
}
