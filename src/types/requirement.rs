use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RecipeError;

/// A dependency on another package at a pinned version
///
/// `visible` requirements are propagated to consumers of this package;
/// the others are only needed to build it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    pub visible: bool,
}

impl Requirement {
    /// Parse a `name/version` reference
    pub fn parse(reference: &str, visible: bool) -> Result<Self, RecipeError> {
        let (name, version) = reference
            .trim()
            .split_once('/')
            .filter(|(n, v)| !n.is_empty() && !v.is_empty() && !v.contains('/'))
            .ok_or_else(|| RecipeError::InvalidReference(reference.to_string()))?;
        Ok(Requirement {
            name: name.to_string(),
            version: version.to_string(),
            visible,
        })
    }

    /// Major component of the version, used for compatibility checks
    pub fn major_version(&self) -> &str {
        self.version.split('.').next().unwrap_or(&self.version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Ordered set of requirements, unique by package name
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Requirements {
    items: Vec<Requirement>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a requirement; the same package cannot be required twice
    pub fn require(&mut self, reference: &str, visible: bool) -> Result<(), RecipeError> {
        let req = Requirement::parse(reference, visible)?;
        if self.items.iter().any(|r| r.name == req.name) {
            return Err(RecipeError::InvalidConfiguration(format!(
                "Duplicated requirement: {}",
                req.name
            )));
        }
        self.items.push(req);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.items.iter()
    }

    /// Requirements propagated to consumers
    pub fn visible(&self) -> impl Iterator<Item = &Requirement> {
        self.items.iter().filter(|r| r.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let req = Requirement::parse("spdlog/1.12.0", true).unwrap();
        assert_eq!(req.name, "spdlog");
        assert_eq!(req.version, "1.12.0");
        assert_eq!(req.major_version(), "1");
        assert_eq!(req.to_string(), "spdlog/1.12.0");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Requirement::parse("fmt", true).is_err());
        assert!(Requirement::parse("/1.0", true).is_err());
        assert!(Requirement::parse("fmt/", true).is_err());
        assert!(Requirement::parse("fmt/1.0/extra", true).is_err());
    }

    #[test]
    fn test_order_and_visibility() {
        let mut reqs = Requirements::new();
        reqs.require("fmt/10.2.1", true).unwrap();
        reqs.require("gtest/1.14.0", false).unwrap();
        let names: Vec<_> = reqs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["fmt", "gtest"]);
        assert_eq!(reqs.visible().count(), 1);
    }

    #[test]
    fn test_duplicate_requirement() {
        let mut reqs = Requirements::new();
        reqs.require("fmt/10.2.1", true).unwrap();
        let err = reqs.require("fmt/9.0.0", true).unwrap_err();
        assert!(err.to_string().contains("Duplicated requirement: fmt"));
    }
}
