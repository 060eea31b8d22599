//! Optional collaborator sections: `[deletion]` and `[validator]`.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Templated deletion request handed to the confirmation flow.
///
/// `url` and string `data` values may reference `{id}`, `{index}`, `{rowId}`
/// and `{fieldName}`; they are resolved per row before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionConfig {
	/// Whether removals of rows with an identifier go through the flow.
	pub enabled: bool,
	/// Endpoint template; required when enabled.
	pub url: Option<String>,
	/// HTTP method, uppercased.
	pub method: String,
	/// Request body fields.
	pub data: BTreeMap<String, String>,
}

impl Default for DeletionConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			url: None,
			method: "DELETE".to_string(),
			data: BTreeMap::from([("id".to_string(), "{id}".to_string())]),
		}
	}
}

/// Per-row validator registration rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatorConfig {
	/// Whether rules are registered at all.
	pub enabled: bool,
	/// Field-name pattern (with `{index}`) to the rules passed through to the
	/// validation library unchanged.
	pub fields: BTreeMap<String, serde_json::Value>,
	/// Patterns from `fields` that are never registered automatically.
	pub skip_fields: Vec<String>,
}

impl ValidatorConfig {
	/// Configured patterns minus the skip list, in name order.
	pub fn active_fields(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
		self.fields
			.iter()
			.filter(|(pattern, _)| !self.skip_fields.iter().any(|s| s == *pattern))
			.map(|(pattern, rules)| (pattern.as_str(), rules))
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DeletionSection {
	pub enabled: Option<bool>,
	pub url: Option<String>,
	pub method: Option<String>,
	pub data: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ValidatorSection {
	pub enabled: Option<bool>,
	pub fields: Option<BTreeMap<String, serde_json::Value>>,
	pub skip_fields: Option<Vec<String>>,
}

impl DeletionConfig {
	pub(crate) fn apply(&mut self, section: DeletionSection) {
		if let Some(enabled) = section.enabled {
			self.enabled = enabled;
		}
		if section.url.is_some() {
			self.url = section.url;
		}
		if let Some(method) = section.method {
			self.method = method.to_ascii_uppercase();
		}
		if let Some(data) = section.data {
			self.data = data;
		}
	}
}

impl ValidatorConfig {
	pub(crate) fn apply(&mut self, section: ValidatorSection) {
		if let Some(enabled) = section.enabled {
			self.enabled = enabled;
		}
		if let Some(fields) = section.fields {
			self.fields.extend(fields);
		}
		if let Some(skip) = section.skip_fields {
			self.skip_fields = skip;
		}
	}
}
