use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
	#[error("TOML syntax error: {0}")]
	TomlSyntax(#[from] toml_edit::TomlError),
	#[error("TOML schema error: {0}")]
	TomlSchema(#[from] toml_edit::de::Error),
	#[error("TOML serialization error: {0}")]
	TomlSer(#[from] toml::ser::Error),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Profile not found: {}", .0.display())]
	NotFound(PathBuf),
	#[error("Invalid assignment '{0}', expected key=value")]
	InvalidAssignment(String),
	#[error("Unknown setting: {0}")]
	UnknownSetting(String),
	#[error("Unknown option: {0}")]
	UnknownOption(String),
	#[error("Invalid value '{value}' for {key}")]
	InvalidValue { key: String, value: String },
}
