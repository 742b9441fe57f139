use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ProfileError;

/// Target operating system (serialized as "Windows", "Linux", "Macos", ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBSD,
    Other(String),
}

impl Os {
    /// Operating system this binary was compiled for
    pub fn detect() -> Self {
        Os::parse(std::env::consts::OS)
    }

    /// Parse an OS identifier, accepting common aliases case-insensitively
    pub fn parse(value: &str) -> Self {
        let key = value.trim();
        match key.to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win64" => Os::Windows,
            "linux" => Os::Linux,
            "macos" | "darwin" | "osx" => Os::Macos,
            "freebsd" => Os::FreeBSD,
            _ => Os::Other(key.to_string()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Os::Windows)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::FreeBSD => "FreeBSD",
            Os::Other(s) => return write!(f, "{}", s),
        };
        write!(f, "{}", s)
    }
}

impl Serialize for Os {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Os {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OsVisitor;

        impl<'de> Visitor<'de> for OsVisitor {
            type Value = Os;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an operating system name")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Os::parse(v))
            }
        }

        deserializer.deserialize_str(OsVisitor)
    }
}

/// Map the host architecture to the names used in settings
pub fn detect_arch() -> String {
    match std::env::consts::ARCH {
        "aarch64" => "armv8".to_string(),
        "arm" => "armv7".to_string(),
        other => other.to_string(),
    }
}

/// A C++ language standard level such as `17` or `gnu20`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppStd {
    raw: String,
    level: String,
    gnu: bool,
    year: u16,
}

impl CppStd {
    /// Numeric level as written, without the `gnu` prefix (`"17"`)
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Whether GNU extensions were requested (`gnu17`)
    pub fn is_gnu(&self) -> bool {
        self.gnu
    }

    /// Publication year of the standard, used for ordering (`98` < `11`)
    pub fn year(&self) -> u16 {
        self.year
    }

    /// True when this level predates `other` (`gnu14` is not below `14`)
    pub fn is_below(&self, other: &CppStd) -> bool {
        self.year < other.year
    }
}

impl FromStr for CppStd {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.trim();
        let (gnu, level) = match raw.strip_prefix("gnu") {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let number: u16 = level
            .parse()
            .map_err(|_| format!("'{}' is not a C++ standard level", raw))?;
        let year = match number {
            98 => 1998,
            n if n < 98 => 2000 + n,
            _ => return Err(format!("'{}' is not a C++ standard level", raw)),
        };
        Ok(CppStd {
            raw: raw.to_string(),
            level: level.to_string(),
            gnu,
            year,
        })
    }
}

impl fmt::Display for CppStd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Settings the package binary depends on
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub os: Os,
    pub arch: String,
    pub build_type: String,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    /// `None` until a profile, the command line or `configure()` sets it
    pub cppstd: Option<String>,
}

impl Settings {
    /// Settings for the machine running the tool
    pub fn detect() -> Self {
        Settings {
            os: Os::detect(),
            arch: detect_arch(),
            build_type: "Release".to_string(),
            compiler: None,
            compiler_version: None,
            cppstd: None,
        }
    }

    /// Assign a setting by its dotted key (`os`, `compiler.cppstd`, ...)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ProfileError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        match key {
            "os" => self.os = Os::parse(value),
            "arch" => self.arch = value.to_string(),
            "build_type" => self.build_type = value.to_string(),
            "compiler" => self.compiler = Some(value.to_string()),
            "compiler.version" => self.compiler_version = Some(value.to_string()),
            "compiler.cppstd" => self.cppstd = Some(value.to_string()),
            other => return Err(ProfileError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }

    /// `(key, value)` pairs of every assigned setting, in a stable order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("os", self.os.to_string()),
            ("arch", self.arch.clone()),
            ("build_type", self.build_type.clone()),
        ];
        if let Some(c) = &self.compiler {
            entries.push(("compiler", c.clone()));
        }
        if let Some(v) = &self.compiler_version {
            entries.push(("compiler.version", v.clone()));
        }
        if let Some(s) = &self.cppstd {
            entries.push(("compiler.cppstd", s.clone()));
        }
        entries
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::detect()
    }
}
