use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use cpprecipe::errors::RecipeError;
use cpprecipe::output::ScopedOutput;

#[derive(Parser)]
#[command(
    name = "cpprecipe",
    about = "cpprecipe — package recipe for CMake C++ projects",
    long_about = "Reads the project identity from CMakeLists.txt, generates CMake toolchain and dependency files, and builds, installs and exports the package.",
    version,
    help_template = "{bin} — {about}\n\nUsage: {usage}\n\nCommands:\n{subcommands}\n\nOptions:\n{options}\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recipe read from CMakeLists.txt
    Inspect(cpprecipe::cmds::inspect::InspectArgs),

    /// Export the recipe and its sources into the cache
    Export(cpprecipe::cmds::export::ExportArgs),

    /// Generate toolchain and dependency files
    Install(cpprecipe::cmds::install::InstallArgs),

    /// Export, build and package
    Create(cpprecipe::cmds::create::CreateArgs),

    /// Show package info and requirements
    Info(cpprecipe::cmds::info::InfoArgs),

    /// Manage build profiles
    Profile(cpprecipe::cmds::profile::ProfileCmdArgs),

    /// Manage the local cache
    Cache(cpprecipe::cmds::cache::CacheArgs),
}

fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        ScopedOutput::new("cpprecipe").error(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RecipeError> {
    match cli.command {
        Commands::Inspect(args) => cpprecipe::cmds::inspect::run(args),
        Commands::Export(args) => cpprecipe::cmds::export::run(args),
        Commands::Install(args) => cpprecipe::cmds::install::run(args),
        Commands::Create(args) => cpprecipe::cmds::create::run(args),
        Commands::Info(args) => cpprecipe::cmds::info::run(args),
        Commands::Profile(args) => cpprecipe::cmds::profile::run(args),
        Commands::Cache(args) => cpprecipe::cmds::cache::run(args),
    }
}
