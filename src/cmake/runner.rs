use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use colored::Colorize;

use crate::errors::RecipeError;

/// One external command line, run in `cwd`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Runs external build commands. Blocking; a failed command is an error.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), RecipeError>;
}

/// Spawns the real process and waits for it
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    /// Echo the command line and its stdout
    pub echo: bool,
}

impl ProcessRunner {
    pub fn new(echo: bool) -> Self {
        ProcessRunner { echo }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), RecipeError> {
        if self.echo {
            println!("{} {}", "$".dimmed(), invocation.to_string().dimmed());
        }

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|source| RecipeError::CommandSpawn {
                command: invocation.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(RecipeError::ExternalBuildFailure {
                command: invocation.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if self.echo {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                println!("{}", stdout.trim_end());
            }
        }

        Ok(())
    }
}

/// Records invocations instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner {
    recorded: RefCell<Vec<Invocation>>,
    echo: bool,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print each command as it is recorded
    pub fn echoing() -> Self {
        DryRunRunner {
            recorded: RefCell::new(Vec::new()),
            echo: true,
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.recorded.borrow().clone()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), RecipeError> {
        if self.echo {
            println!("{} {}", "(dry run)".yellow(), invocation);
        }
        self.recorded.borrow_mut().push(invocation.clone());
        Ok(())
    }
}
