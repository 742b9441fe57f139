/// # Cache Command
///
/// - `info` - show cache folders and statistics
/// - `clear` - remove the whole cache
/// - `clear-dir <dir>` - empty one folder (export, p, profiles)
/// - `path` - show the cache root

use clap::{Args, Subcommand};
use colored::Colorize;
use std::io::{self, Write};

use crate::cache::RecipeCache;
use crate::errors::{RecipeError, Result};

#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache information and statistics
    Info,

    /// Clear all cache
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Clear a specific cache directory
    ClearDir {
        /// Directory to clear (export, p, profiles)
        dir: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the cache root path
    Path,
}

const CLEARABLE_DIRS: &[&str] = &["export", "p", "profiles"];

pub fn run(args: CacheArgs) -> Result<()> {
    let cache = RecipeCache::new()?;
    match args.command {
        CacheCommands::Info => show_info(&cache),
        CacheCommands::Clear { yes } => {
            if yes || confirm(&format!("This will delete {}", cache.root().display()))? {
                cache.clear_all()?;
                println!("{}", "✓ Cache cleared".green().bold());
            }
            Ok(())
        }
        CacheCommands::ClearDir { dir, yes } => {
            if !CLEARABLE_DIRS.contains(&dir.as_str()) {
                return Err(RecipeError::InvalidDirectory(format!(
                    "'{}', expected one of: {}",
                    dir,
                    CLEARABLE_DIRS.join(", ")
                )));
            }
            if yes || confirm(&format!("This will delete everything in '{}'", dir))? {
                cache.clear_dir(&dir)?;
                println!("{}", format!("✓ Directory '{}' cleared", dir).green().bold());
            }
            Ok(())
        }
        CacheCommands::Path => {
            println!("{}", cache.root().display());
            Ok(())
        }
    }
}

fn show_info(cache: &RecipeCache) -> Result<()> {
    println!("{}", "cpprecipe cache".bold().cyan());
    println!();
    println!("  {}: {}", "Root".bold(), cache.root().display());
    println!();
    println!("{}", "Directories:".bold());
    println!("  {}: {}", "export".yellow(), cache.export_root().display());
    println!("  {}: {}", "p".yellow(), cache.packages_root().display());
    println!("  {}: {}", "profiles".yellow(), cache.profiles_dir().display());
    println!();

    let stats = cache.stats()?;
    println!("{}", "Statistics:".bold());
    println!("  {}: {}", "Total Size".bold(), stats.format_size().green());
    println!(
        "  {}: {}",
        "File Count".bold(),
        stats.file_count.to_string().green()
    );
    Ok(())
}

fn confirm(warning: &str) -> Result<bool> {
    println!("{}", format!("Warning: {}", warning).yellow().bold());
    print!("Are you sure? (y/N): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let ok = input.trim().eq_ignore_ascii_case("y");
    if !ok {
        println!("{}", "Cancelled.".yellow());
    }
    Ok(ok)
}
