use serde::{Deserialize, Serialize};

use super::Requirement;

/// What a consumer needs to know to link against the package
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CppInfo {
    pub libs: Vec<String>,
    pub includedirs: Vec<String>,
    pub libdirs: Vec<String>,
    pub bindirs: Vec<String>,
}

impl Default for CppInfo {
    fn default() -> Self {
        CppInfo {
            libs: Vec::new(),
            includedirs: vec!["include".to_string()],
            libdirs: vec!["lib".to_string()],
            bindirs: vec!["bin".to_string()],
        }
    }
}

/// Information published for consumers of the package
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub reference: String,
    pub cpp_info: CppInfo,
    /// Requirements propagated to consumers
    pub requires: Vec<Requirement>,
}
