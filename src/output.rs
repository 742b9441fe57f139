/// # Console Output
///
/// Status lines are prefixed with the package reference they belong to:
///
/// ```text
/// cppsharp/1.0.0: Calling generate()
/// cppsharp/1.0.0: Generators folder: build/Release/generators
/// ```
///
/// How much is printed is controlled by `CPPRECIPE_VERBOSITY`
/// (`quiet`, `error`, `warning`, `status`, `verbose`). Warnings and errors go to
/// stderr.

use colored::Colorize;
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the output level
pub const VERBOSITY_ENV: &str = "CPPRECIPE_VERBOSITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    Error,
    Warning,
    #[default]
    Status,
    Verbose,
}

impl Verbosity {
    /// Level from `CPPRECIPE_VERBOSITY`; unknown values fall back to `status`
    pub fn from_env() -> Self {
        std::env::var(VERBOSITY_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "error" => Ok(Verbosity::Error),
            "warning" => Ok(Verbosity::Warning),
            "status" | "notice" | "info" => Ok(Verbosity::Status),
            "verbose" | "debug" => Ok(Verbosity::Verbose),
            other => Err(format!("unknown verbosity '{}'", other)),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Error => "error",
            Verbosity::Warning => "warning",
            Verbosity::Status => "status",
            Verbosity::Verbose => "verbose",
        };
        write!(f, "{}", s)
    }
}

/// Output bound to one scope, usually a `name/version` reference
#[derive(Debug, Clone)]
pub struct ScopedOutput {
    scope: String,
    verbosity: Verbosity,
}

impl ScopedOutput {
    pub fn new(scope: impl Into<String>) -> Self {
        Self::with_verbosity(scope, Verbosity::from_env())
    }

    pub fn with_verbosity(scope: impl Into<String>, verbosity: Verbosity) -> Self {
        ScopedOutput {
            scope: scope.into(),
            verbosity,
        }
    }

    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Quiet && self.verbosity >= level
    }

    fn prefix(&self) -> String {
        format!("{}:", self.scope).bold().to_string()
    }

    pub fn info(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Status) {
            println!("{} {}", self.prefix(), msg);
        }
    }

    pub fn highlight(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Status) {
            println!("{} {}", self.prefix(), msg.to_string().magenta());
        }
    }

    pub fn success(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Status) {
            println!("{} {}", self.prefix(), msg.to_string().green());
        }
    }

    pub fn warning(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Warning) {
            eprintln!(
                "{} {} {}",
                self.prefix(),
                "WARN:".yellow().bold(),
                msg.to_string().yellow()
            );
        }
    }

    pub fn error(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Error) {
            eprintln!(
                "{} {} {}",
                self.prefix(),
                "ERROR:".red().bold(),
                msg.to_string().red()
            );
        }
    }

    pub fn verbose(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Verbose) {
            println!("{} {}", self.prefix(), msg.to_string().dimmed());
        }
    }

    /// Section header, e.g. `======== Installing ========`
    pub fn title(&self, msg: impl fmt::Display) {
        if self.enabled(Verbosity::Status) {
            println!();
            println!("{}", format!("======== {} ========", msg).bold().cyan());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("Quiet".parse::<Verbosity>().unwrap(), Verbosity::Quiet);
        assert_eq!("debug".parse::<Verbosity>().unwrap(), Verbosity::Verbose);
        assert!("loud".parse::<Verbosity>().is_err());
        assert_eq!(Verbosity::default(), Verbosity::Status);
    }

    #[test]
    fn test_enabled_levels() {
        let out = ScopedOutput::with_verbosity("pkg/1.0", Verbosity::Warning);
        assert!(out.enabled(Verbosity::Error));
        assert!(out.enabled(Verbosity::Warning));
        assert!(!out.enabled(Verbosity::Status));

        let quiet = ScopedOutput::with_verbosity("pkg/1.0", Verbosity::Quiet);
        assert!(!quiet.enabled(Verbosity::Error));
        assert!(!quiet.enabled(Verbosity::Quiet));
    }
}
