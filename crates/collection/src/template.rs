//! `{placeholder}` resolution for deletion request templates.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Values available to request templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
	/// `{fieldName}`: configured field-name prefix.
	pub field_name: String,
	/// `{id}`: persisted identifier of the row.
	pub id: String,
	/// `{index}`: position of the row.
	pub index: usize,
	/// `{rowId}`: structural id of the row.
	pub row_id: String,
}

impl TemplateVars {
	/// Looks up a placeholder by its template name.
	pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
		match key {
			"fieldName" => Some(Cow::Borrowed(&self.field_name)),
			"id" => Some(Cow::Borrowed(&self.id)),
			"index" => Some(Cow::Owned(self.index.to_string())),
			"rowId" => Some(Cow::Borrowed(&self.row_id)),
			_ => None,
		}
	}
}

/// Resolves placeholders in request templates.
pub trait TemplateResolver {
	/// Returns `template` with placeholders substituted from `vars`.
	fn resolve(&self, template: &str, vars: &TemplateVars) -> String;
}

/// Replaces `{word}` placeholders; unknown placeholders are left verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceTemplate;

impl TemplateResolver for BraceTemplate {
	fn resolve(&self, template: &str, vars: &TemplateVars) -> String {
		PLACEHOLDER
			.replace_all(template, |caps: &Captures<'_>| match vars.get(&caps[1]) {
				Some(value) => value.into_owned(),
				None => caps[0].to_string(),
			})
			.into_owned()
	}
}

impl<F> TemplateResolver for F
where
	F: Fn(&str, &TemplateVars) -> String,
{
	fn resolve(&self, template: &str, vars: &TemplateVars) -> String {
		self(template, vars)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn vars() -> TemplateVars {
		TemplateVars {
			field_name: "items".to_string(),
			id: "42".to_string(),
			index: 3,
			row_id: "row_3".to_string(),
		}
	}

	#[test]
	fn resolves_known_placeholders() {
		let out = BraceTemplate.resolve("/api/{fieldName}/{id}?i={index}&r={rowId}", &vars());
		assert_eq!(out, "/api/items/42?i=3&r=row_3");
	}

	#[test]
	fn keeps_unknown_placeholders() {
		assert_eq!(BraceTemplate.resolve("{{ csrf }} {token}", &vars()), "{{ csrf }} {token}");
	}

	#[test]
	fn closures_are_resolvers() {
		let upper = |t: &str, v: &TemplateVars| format!("{}:{}", t.to_uppercase(), v.id);
		assert_eq!(upper.resolve("x", &vars()), "X:42");
	}
}
