/// # Build Profiles
///
/// A profile is a small TOML file describing the machine a package is built
/// for and how the build tool should be invoked:
///
/// ```toml
/// [settings]
/// os = "Linux"
/// arch = "x86_64"
/// build_type = "Release"
///
/// [settings.compiler]
/// name = "gcc"
/// version = "13"
/// cppstd = "17"
///
/// [options]
/// shared = false
/// fPIC = true
///
/// [conf]
/// generator = "Ninja"
/// jobs = 8
/// ```
///
/// Every key is optional. Missing settings are detected from the host.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::options::BinaryOptions;
use super::settings::Settings;
use crate::errors::ProfileError;

/// Environment variable naming a profile to use when none is given explicitly
pub const PROFILE_ENV: &str = "CPPRECIPE_PROFILE";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub options: OptionsSection,
    #[serde(default)]
    pub conf: Conf,
    #[serde(skip)]
    pub raw: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SettingsSection {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub build_type: Option<String>,
    pub compiler: Option<CompilerSection>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CompilerSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub cppstd: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OptionsSection {
    pub shared: Option<bool>,
    #[serde(rename = "fPIC")]
    pub fpic: Option<bool>,
}

/// How the external build tool is driven
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Conf {
    /// `cmake` executable (default: `cmake` from PATH)
    pub cmake_program: Option<String>,
    /// CMake generator passed with `-G`
    pub generator: Option<String>,
    /// Parallel build jobs
    pub jobs: Option<u32>,
    /// Folder holding dependency packages as `<name>/<version>`
    pub deps_root: Option<PathBuf>,
}

impl Conf {
    pub fn cmake_program(&self) -> &str {
        self.cmake_program.as_deref().unwrap_or("cmake")
    }
}

/// `-s key=value` and `-o key=value` assignments from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub settings: Vec<(String, String)>,
    pub options: Vec<(String, String)>,
}

impl Overrides {
    pub fn parse(settings: &[String], options: &[String]) -> Result<Self, ProfileError> {
        Ok(Overrides {
            settings: parse_assignments(settings)?,
            options: parse_assignments(options)?,
        })
    }
}

/// Parse `key=value` strings, keeping their order
pub fn parse_assignments(items: &[String]) -> Result<Vec<(String, String)>, ProfileError> {
    items
        .iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(ProfileError::InvalidAssignment(item.clone())),
        })
        .collect()
}

impl Profile {
    pub fn from_string(raw: String) -> Result<Self, ProfileError> {
        let doc = toml_edit::DocumentMut::from_str(&raw).map_err(ProfileError::TomlSyntax)?;
        let profile: Profile =
            toml_edit::de::from_document(doc).map_err(ProfileError::TomlSchema)?;
        Ok(Self { raw, ..profile })
    }

    pub fn to_toml(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_string(content)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Pick the profile to use: an explicit path, then `CPPRECIPE_PROFILE`,
    /// then `default_path` if it exists, else an empty profile.
    pub fn locate(explicit: Option<&Path>, default_path: &Path) -> Result<Self, ProfileError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(env_path) = std::env::var_os(PROFILE_ENV) {
            return Self::load(Path::new(&env_path));
        }
        if default_path.exists() {
            return Self::load(default_path);
        }
        Ok(Self::default())
    }

    /// Profile describing the host machine
    pub fn detect() -> Self {
        let host = Settings::detect();
        Profile {
            settings: SettingsSection {
                os: Some(host.os.to_string()),
                arch: Some(host.arch),
                build_type: Some(host.build_type),
                compiler: None,
            },
            ..Self::default()
        }
    }

    /// Final settings and options: host detection, then this profile, then
    /// the command-line overrides. `defaults` are the recipe's option
    /// defaults.
    pub fn resolve(
        &self,
        defaults: &BinaryOptions,
        overrides: &Overrides,
    ) -> Result<(Settings, BinaryOptions), ProfileError> {
        let mut settings = Settings::detect();
        let s = &self.settings;
        if let Some(os) = &s.os {
            settings.set("os", os)?;
        }
        if let Some(arch) = &s.arch {
            settings.set("arch", arch)?;
        }
        if let Some(build_type) = &s.build_type {
            settings.set("build_type", build_type)?;
        }
        if let Some(compiler) = &s.compiler {
            if let Some(name) = &compiler.name {
                settings.set("compiler", name)?;
            }
            if let Some(version) = &compiler.version {
                settings.set("compiler.version", version)?;
            }
            if let Some(cppstd) = &compiler.cppstd {
                settings.set("compiler.cppstd", cppstd)?;
            }
        }
        for (key, value) in &overrides.settings {
            settings.set(key, value)?;
        }

        let mut options = defaults.clone();
        if let Some(shared) = self.options.shared {
            options.shared = shared;
        }
        if let Some(fpic) = self.options.fpic {
            if options.fpic.is_some() {
                options.fpic = Some(fpic);
            }
        }
        for (key, value) in &overrides.options {
            options.set(key, value)?;
        }

        Ok((settings, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::settings::Os;

    const SAMPLE: &str = r#"
[settings]
os = "Windows"
build_type = "Debug"

[settings.compiler]
name = "msvc"
cppstd = "20"

[options]
shared = true

[conf]
generator = "Ninja"
jobs = 4
"#;

    #[test]
    fn test_from_string() {
        let profile = Profile::from_string(SAMPLE.to_string()).unwrap();
        assert_eq!(profile.settings.os.as_deref(), Some("Windows"));
        assert_eq!(profile.options.shared, Some(true));
        assert_eq!(profile.options.fpic, None);
        assert_eq!(profile.conf.jobs, Some(4));
        assert_eq!(profile.conf.cmake_program(), "cmake");
        assert_eq!(profile.raw, SAMPLE);
    }

    #[test]
    fn test_resolve_layers_profile_and_overrides() {
        let profile = Profile::from_string(SAMPLE.to_string()).unwrap();
        let overrides = Overrides::parse(
            &["compiler.cppstd=17".to_string()],
            &["shared=False".to_string()],
        )
        .unwrap();
        let (settings, options) = profile
            .resolve(&BinaryOptions::default(), &overrides)
            .unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.build_type, "Debug");
        assert_eq!(settings.compiler.as_deref(), Some("msvc"));
        assert_eq!(settings.cppstd.as_deref(), Some("17"));
        assert!(!options.shared);
        assert_eq!(options.fpic, Some(true));
    }

    #[test]
    fn test_empty_profile_uses_host() {
        let (settings, options) = Profile::default()
            .resolve(&BinaryOptions::default(), &Overrides::default())
            .unwrap();
        assert_eq!(settings, Settings::detect());
        assert_eq!(options, BinaryOptions::default());
    }

    #[test]
    fn test_invalid_assignment() {
        let err = parse_assignments(&["compiler.cppstd".to_string()]).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidAssignment(_)));
        let err = parse_assignments(&["=17".to_string()]).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidAssignment(_)));
    }

    #[test]
    fn test_syntax_error() {
        let err = Profile::from_string("[settings\nos=".to_string()).unwrap_err();
        assert!(matches!(err, ProfileError::TomlSyntax(_)));
    }

    #[test]
    fn test_write_and_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles").join("default.toml");
        let profile = Profile::detect();
        profile.write_to_file(&path).unwrap();
        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded.settings, profile.settings);
        assert!(matches!(
            Profile::load(&temp_dir.path().join("missing.toml")),
            Err(ProfileError::NotFound(_))
        ));
    }
}
