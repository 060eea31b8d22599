//! Configuration for row collections.
//!
//! Configuration is written in TOML. Every option has a default, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! field_name = "items"          # inputs are named items[<index>][...]
//! row_id_prefix = "row"         # rows carry id="row_<index>"
//! max_rows = 10
//! remove_selector = ".row_remove"
//! known_attributes = ["id", "for", "aria-describedby", "data-bv-field"]
//! placeholder_token = "__i__"
//! index_label_offset = 1        # position labels read 1, 2, ...
//! id_field = "items[{index}][id]"
//!
//! [deletion]
//! enabled = true
//! url = "/api/items/{id}?row={rowId}"
//! method = "DELETE"
//! data = { id = "{id}" }
//!
//! [validator]
//! enabled = true
//! skip_fields = ["items[{index}][note]"]
//!
//! [validator.fields."items[{index}][label]"]
//! notEmpty = { message = "Label is required" }
//! ```
//!
//! Documents can be layered with [`Config::layer`]: later layers override only
//! the options they mention. Non-fatal issues are collected in
//! [`Config::warnings`].

pub mod error;
mod sections;

use std::path::Path;

use rowset_primitives::Selector;
use serde::Deserialize;
use tracing::{debug, warn};

pub use error::{ConfigError, ConfigWarning, Result};
pub use sections::{DeletionConfig, ValidatorConfig};


/// Attributes that are always reindexed: identity, label target, and
/// accessibility description.
pub const MANDATORY_KNOWN_ATTRIBUTES: [&str; 3] = ["id", "for", "aria-describedby"];

/// Default set of known structural attributes.
pub const DEFAULT_KNOWN_ATTRIBUTES: [&str; 5] = ["id", "for", "aria-describedby", "aria-labelledby", "data-bv-field"];

/// Validated configuration for one row collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Field-name prefix; inputs are named `<field_name>[<index>]...`.
	pub field_name: String,
	/// Structural-id prefix; rows carry `id="<row_id_prefix>_<index>"`.
	pub row_id_prefix: String,
	/// Maximum number of rows; `add` is rejected at this size.
	pub max_rows: usize,
	/// Selector identifying removal controls inside a row.
	pub remove_selector: Selector,
	/// Attribute names reindexed with the composite/placeholder/bounded rules.
	pub known_attributes: Vec<String>,
	/// Literal token replaced with the row index wherever it appears.
	pub placeholder_token: Option<String>,
	/// Added to the index for visible position labels unless the label element
	/// overrides it.
	pub index_label_offset: usize,
	/// Pattern naming the field holding a row's persisted identifier.
	pub id_field: Option<String>,
	/// Confirmation / deletion request settings.
	pub deletion: DeletionConfig,
	/// Validator registration settings.
	pub validator: ValidatorConfig,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			field_name: "rows".to_string(),
			row_id_prefix: "row".to_string(),
			max_rows: 10,
			remove_selector: default_remove_selector(),
			known_attributes: DEFAULT_KNOWN_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
			placeholder_token: None,
			index_label_offset: 1,
			id_field: None,
			deletion: DeletionConfig::default(),
			validator: ValidatorConfig::default(),
			warnings: Vec::new(),
		}
	}
}

fn default_remove_selector() -> Selector {
	Selector::class("row_remove")
}

/// One TOML document, before it is layered onto a [`Config`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
	field_name: Option<String>,
	row_id_prefix: Option<String>,
	max_rows: Option<usize>,
	remove_selector: Option<String>,
	known_attributes: Option<Vec<String>>,
	placeholder_token: Option<String>,
	index_label_offset: Option<usize>,
	id_field: Option<String>,
	deletion: Option<sections::DeletionSection>,
	validator: Option<sections::ValidatorSection>,
}

impl Config {
	/// Parse a TOML string into a [`Config`], starting from defaults.
	///
	/// Non-fatal warnings are collected in `Config::warnings` rather than
	/// causing parse failure. Callers should check and display these.
	pub fn parse(input: &str) -> Result<Self> {
		let mut config = Self::default();
		config.layer(input)?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		debug!(path = %path.display(), "loading row collection config");
		Self::parse(&content)
	}

	/// Overlay another TOML document; options it mentions replace current ones.
	///
	/// Validator field tables are merged, everything else is replaced. On error
	/// `self` is left unchanged.
	pub fn layer(&mut self, input: &str) -> Result<()> {
		let file: ConfigFile = toml::from_str(input)?;
		let mut next = self.clone();
		next.apply(file)?;
		next.validate()?;
		*self = next;
		Ok(())
	}

	fn apply(&mut self, file: ConfigFile) -> Result<()> {
		if let Some(v) = file.field_name {
			self.field_name = v;
		}
		if let Some(v) = file.row_id_prefix {
			self.row_id_prefix = v;
		}
		if let Some(v) = file.max_rows {
			self.max_rows = v;
		}
		if let Some(source_text) = file.remove_selector {
			self.remove_selector =
				Selector::parse(&source_text).map_err(|error| ConfigError::InvalidSelector { source_text, error })?;
		}
		if let Some(v) = file.known_attributes {
			self.known_attributes = v;
		}
		if let Some(v) = file.placeholder_token {
			self.placeholder_token = Some(v).filter(|t| !t.is_empty());
		}
		if let Some(v) = file.index_label_offset {
			self.index_label_offset = v;
		}
		if let Some(v) = file.id_field {
			self.id_field = Some(v).filter(|p| !p.is_empty());
		}
		if let Some(section) = file.deletion {
			self.deletion.apply(section);
		}
		if let Some(section) = file.validator {
			self.validator.apply(section);
		}
		Ok(())
	}

	/// Checks invariants and normalizes lists, recording warnings.
	fn validate(&mut self) -> Result<()> {
		if self.field_name.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				field: "field_name",
				reason: "must not be empty".to_string(),
			});
		}
		if self.row_id_prefix.trim().is_empty() || self.row_id_prefix.contains(char::is_whitespace) {
			return Err(ConfigError::InvalidValue {
				field: "row_id_prefix",
				reason: "must be a non-empty token without whitespace".to_string(),
			});
		}
		if self.max_rows == 0 {
			return Err(ConfigError::InvalidValue {
				field: "max_rows",
				reason: "must be at least 1".to_string(),
			});
		}
		if self.deletion.enabled && self.deletion.url.as_deref().is_none_or(str::is_empty) {
			return Err(ConfigError::MissingField("deletion.url"));
		}
		if self.deletion.method.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				field: "deletion.method",
				reason: "must not be empty".to_string(),
			});
		}

		let mut warnings = Vec::new();
		let mut known: Vec<String> = Vec::with_capacity(self.known_attributes.len());
		for attr in self.known_attributes.drain(..) {
			let attr = attr.trim().to_ascii_lowercase();
			if attr == "name" {
				warnings.push(ConfigWarning::ReservedKnownAttribute(attr));
			} else if !attr.is_empty() && !known.contains(&attr) {
				known.push(attr);
			}
		}
		for mandatory in MANDATORY_KNOWN_ATTRIBUTES {
			if !known.iter().any(|a| a == mandatory) {
				warnings.push(ConfigWarning::MandatoryAttributeRestored(mandatory));
				known.push(mandatory.to_string());
			}
		}
		self.known_attributes = known;

		for skip in &self.validator.skip_fields {
			if !self.validator.fields.contains_key(skip) {
				warnings.push(ConfigWarning::UnknownSkipField(skip.clone()));
			}
		}
		for pattern in self.validator.fields.keys() {
			if !pattern.contains("{index}") {
				warnings.push(ConfigWarning::UnindexedValidatorField(pattern.clone()));
			}
		}

		for warning in &warnings {
			warn!(%warning, "row collection config");
		}
		for warning in warnings {
			if !self.warnings.contains(&warning) {
				self.warnings.push(warning);
			}
		}
		Ok(())
	}

	/// Resolves `id_field` for the row at `index`.
	pub fn id_field_for(&self, index: usize) -> Option<String> {
		self.id_field.as_deref().map(|p| resolve_index(p, index))
	}
}

/// Replaces every `{index}` in a field pattern.
pub fn resolve_index(pattern: &str, index: usize) -> String {
	pattern.replace("{index}", &index.to_string())
}
