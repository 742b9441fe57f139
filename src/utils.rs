use std::path::Path;
use colored::{Color, Colorize};

use crate::output::{ScopedOutput, Verbosity};

pub struct Utils;

pub enum PrintOp {
    Create,
    Copy { from: String, to: String },
}

impl Utils {
    /// Line describing a file operation. Call before writing: an existing
    /// `path` is shown as updated.
    pub fn status_line(path: &Path, rel: &str, op: &PrintOp) -> String {
        let line = match op {
            PrintOp::Create if !path.exists() => format!("+ {}", rel).color(Color::Green),
            PrintOp::Create => format!("~ {}", rel).color(Color::Yellow),
            PrintOp::Copy { from, to } => {
                format!("{} -> {} (copy)", from, to).color(Color::Cyan)
            }
        };
        format!("  {}", line)
    }

    /// Print a file operation at status level; returns whether it was shown
    pub fn print_status(out: &ScopedOutput, path: &Path, rel: &str, op: PrintOp) -> bool {
        if !out.enabled(Verbosity::Status) {
            return false;
        }
        println!("{}", Self::status_line(path, rel, &op));
        true
    }

    /// Path spelled the way CMake expects it, with forward slashes
    pub fn cmake_path(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }

    /// Path relative to `base` for display, or the full path if unrelated
    pub fn display_relative(path: &Path, base: &Path) -> String {
        match path.strip_prefix(base) {
            Ok(rel) if !rel.as_os_str().is_empty() => Self::cmake_path(rel),
            Ok(_) => ".".to_string(),
            Err(_) => Self::cmake_path(path),
        }
    }
}
