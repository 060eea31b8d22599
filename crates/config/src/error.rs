//! Error types for configuration parsing.

use std::fmt;
use std::path::PathBuf;

use rowset_primitives::SelectorError;
use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or mapping it onto the schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value is outside its allowed range or shape.
	#[error("invalid value for `{field}`: {reason}")]
	InvalidValue {
		/// Dotted path of the offending option.
		field: &'static str,
		/// What is wrong with it.
		reason: String,
	},

	/// The removal-control selector could not be parsed.
	#[error("invalid remove_selector {source_text:?}: {error}")]
	InvalidSelector {
		/// The selector as written.
		source_text: String,
		/// Parser error.
		error: SelectorError,
	},

	/// A required field is missing from the configuration.
	#[error("missing required field: {0}")]
	MissingField(&'static str),
}

/// Non-fatal issues found while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// `name` is rewritten by the bracket rule and cannot be a known attribute.
	ReservedKnownAttribute(String),
	/// A mandatory known attribute was missing and has been added back.
	MandatoryAttributeRestored(&'static str),
	/// A skip-list entry names no configured validator field.
	UnknownSkipField(String),
	/// A validator field pattern lacks the `{index}` placeholder and will bind
	/// the same field for every row.
	UnindexedValidatorField(String),
}

impl fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigWarning::ReservedKnownAttribute(name) => {
				write!(f, "'{name}' in known_attributes is ignored (field names use the bracket rule)")
			}
			ConfigWarning::MandatoryAttributeRestored(name) => {
				write!(f, "'{name}' is always reindexed; added to known_attributes")
			}
			ConfigWarning::UnknownSkipField(pattern) => {
				write!(f, "skip_fields entry '{pattern}' matches no validator field")
			}
			ConfigWarning::UnindexedValidatorField(pattern) => {
				write!(f, "validator field '{pattern}' has no {{index}} placeholder")
			}
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
