/// # Info Command
///
/// Show what consumers of the package get: its libraries and folders and the
/// requirements it declares.

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{project_root, ProjectArgs};
use crate::errors::Result;
use crate::recipe::Recipe;
use crate::types::{PackageInfo, Requirement};

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InfoReport {
    package_info: PackageInfo,
    requires: Vec<Requirement>,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = project_root(&args.project.path)?;
    let recipe = Recipe::load(&root)?;
    let report = InfoReport {
        package_info: recipe.package_info()?,
        requires: recipe.declared_requirements()?.iter().cloned().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_package_info(&report.package_info);
    println!();
    println!("{}", "Requirements:".bold());
    println!("  {}", report.package_info.reference.bold());
    let count = report.requires.len();
    for (i, req) in report.requires.iter().enumerate() {
        let branch = if i + 1 == count { "└──" } else { "├──" };
        let scope = if req.visible { "visible".green() } else { "build".dimmed() };
        println!("  {} {} ({})", branch, req, scope);
    }
    Ok(())
}

pub fn print_package_info(info: &PackageInfo) {
    println!("{}", info.reference.bold().cyan());
    println!("  {}: {}", "libs".bold(), info.cpp_info.libs.join(", "));
    println!("  {}: {}", "includedirs".bold(), info.cpp_info.includedirs.join(", "));
    println!("  {}: {}", "libdirs".bold(), info.cpp_info.libdirs.join(", "));
    println!("  {}: {}", "bindirs".bold(), info.cpp_info.bindirs.join(", "));
    if !info.requires.is_empty() {
        let requires: Vec<String> = info.requires.iter().map(|r| r.to_string()).collect();
        println!("  {}: {}", "requires".bold(), requires.join(", "));
    }
}
