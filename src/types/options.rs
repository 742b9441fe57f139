use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

/// Binary-compatibility options of the package
///
/// - `shared`: build a shared instead of a static library
/// - `fPIC`: position independent code; `None` once removed, which happens on
///   Windows where the option has no meaning
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BinaryOptions {
    pub shared: bool,
    #[serde(rename = "fPIC")]
    pub fpic: Option<bool>,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        BinaryOptions {
            shared: false,
            fpic: Some(true),
        }
    }
}

impl BinaryOptions {
    /// Assign an option by name. Assigning `fPIC` after it was removed is a
    /// no-op.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        let parsed = parse_bool(value).ok_or_else(|| ProfileError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        match key {
            "shared" => self.shared = parsed,
            "fPIC" => {
                if self.fpic.is_some() {
                    self.fpic = Some(parsed);
                }
            }
            other => return Err(ProfileError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Remove `fPIC` if present
    pub fn remove_fpic(&mut self) {
        self.fpic = None;
    }

    /// `(name, value)` pairs of the options still defined
    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        let mut entries = vec![("shared", self.shared)];
        if let Some(fpic) = self.fpic {
            entries.push(("fPIC", fpic));
        }
        entries
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}
