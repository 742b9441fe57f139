/// # Profile Command
///
/// - `show` - print the profile a build would use, after overrides
/// - `detect` - write a profile for this machine
/// - `path` - print the default profile location

use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::common::ProfileArgs;
use crate::cache::RecipeCache;
use crate::errors::Result;
use crate::types::profile::Overrides;
use crate::types::{BinaryOptions, Profile};

#[derive(Args, Debug)]
pub struct ProfileCmdArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the effective settings and options
    Show {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Detect the host and write a profile
    Detect {
        /// Output file (default: <cache>/profiles/default.toml)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing profile
        #[arg(short, long)]
        force: bool,
    },

    /// Show the default profile path
    Path,
}

pub fn run(args: ProfileCmdArgs) -> Result<()> {
    match args.command {
        ProfileCommands::Show { profile } => show(&profile),
        ProfileCommands::Detect { output, force } => detect(output, force),
        ProfileCommands::Path => {
            println!("{}", RecipeCache::new()?.default_profile().display());
            Ok(())
        }
    }
}

fn show(args: &ProfileArgs) -> Result<()> {
    let cache = RecipeCache::new()?;
    let profile = Profile::locate(args.profile.as_deref(), &cache.default_profile())?;
    let overrides = Overrides::parse(&args.settings, &args.options)?;
    let (settings, options) = profile.resolve(&BinaryOptions::default(), &overrides)?;

    println!("{}", "[settings]".bold());
    for (key, value) in settings.entries() {
        println!("{}={}", key, value);
    }
    println!("{}", "[options]".bold());
    for (key, value) in options.entries() {
        println!("{}={}", key, value);
    }
    println!("{}", "[conf]".bold());
    println!("cmake_program={}", profile.conf.cmake_program());
    if let Some(generator) = &profile.conf.generator {
        println!("generator={}", generator);
    }
    if let Some(jobs) = profile.conf.jobs {
        println!("jobs={}", jobs);
    }
    if let Some(deps_root) = &profile.conf.deps_root {
        println!("deps_root={}", deps_root.display());
    }
    Ok(())
}

fn detect(output: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match output {
        Some(p) => p,
        None => RecipeCache::new()?.default_profile(),
    };
    if path.exists() && !force {
        println!(
            "{} {} exists, use --force to overwrite",
            "!".yellow(),
            path.display()
        );
        return Ok(());
    }
    let profile = Profile::detect();
    profile.write_to_file(&path)?;
    println!("{} Wrote {}", "✓".green().bold(), path.display().to_string().green());
    print!("{}", profile.to_toml()?);
    Ok(())
}
