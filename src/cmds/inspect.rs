/// # Inspect Command
///
/// Show what the recipe reads from `CMakeLists.txt` together with its static
/// attributes.

use clap::Args;
use colored::Colorize;
use std::fs;

use super::common::{project_root, ProjectArgs};
use crate::errors::Result;
use crate::metadata::{self, BUILD_DESCRIPTION_FILE};
use crate::recipe::Recipe;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let root = project_root(&args.project.path)?;
    let recipe = Recipe::load(&root)?;

    let content = fs::read_to_string(root.join(BUILD_DESCRIPTION_FILE))?;
    let declarations = metadata::declaration_count(&content)?;
    if declarations > 1 {
        recipe.output().warning(format!(
            "{} declares {} projects; using the first one",
            BUILD_DESCRIPTION_FILE, declarations
        ));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    let field = |k: &str, v: &str| println!("{}: {}", k.bold(), v);
    field("name", &recipe.name);
    field("version", &recipe.version);
    field("description", &recipe.description);
    field("license", recipe.license);
    field("author", recipe.author);
    field("url", recipe.url);
    field("topics", &recipe.topics.join(", "));
    field("settings", &recipe.settings.join(", "));
    println!("{}:", "default_options".bold());
    for (key, value) in recipe.default_options.entries() {
        println!("    {}: {}", key, value);
    }
    field("exports", &recipe.exports.patterns().join(", "));
    field("exports_sources", &recipe.exports_sources.patterns().join(", "));
    println!("{}:", "requires".bold());
    for req in recipe.declared_requirements()?.iter() {
        let scope = if req.visible { "" } else { " (build)" };
        println!("    {}{}", req, scope.dimmed());
    }

    Ok(())
}
