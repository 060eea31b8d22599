//! Structural ids are the single source of truth for a row's position.
//!
//! A row's root carries `id="<prefix>_<index>"`. Reindexing reads the prior
//! index from here before touching anything else, then writes the new one
//! first, so no attribute under rewrite is ever trusted for the old position.

use std::fmt;

/// A parsed `<prefix>_<index>` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralId {
	prefix: String,
	index: usize,
}

impl StructuralId {
	/// Creates the structural id for `index` under `prefix`.
	pub fn new(prefix: impl Into<String>, index: usize) -> Self {
		Self {
			prefix: prefix.into(),
			index,
		}
	}

	/// Strictly parses `value` as `<prefix>_<digits>`.
	///
	/// The prefix must match exactly and everything after the separating
	/// underscore must be ASCII digits. Anything else is unrecoverable.
	pub fn parse(prefix: &str, value: &str) -> Option<Self> {
		let digits = value.strip_prefix(prefix)?.strip_prefix('_')?;
		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		let index = digits.parse().ok()?;
		Some(Self::new(prefix, index))
	}

	/// The row index this id encodes.
	pub fn index(&self) -> usize {
		self.index
	}

	/// The configured prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}

impl fmt::Display for StructuralId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}_{}", self.prefix, self.index)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn formats_prefix_and_index() {
		assert_eq!(StructuralId::new("row", 3).to_string(), "row_3");
	}

	#[rstest]
	#[case("row_0", Some(0))]
	#[case("row_42", Some(42))]
	#[case("row_", None)]
	#[case("row_4a", None)]
	#[case("row-4", None)]
	#[case("rows_4", None)]
	#[case("row_-1", None)]
	#[case("", None)]
	fn parses_strictly(#[case] value: &str, #[case] expected: Option<usize>) {
		assert_eq!(StructuralId::parse("row", value).map(|id| id.index()), expected);
	}

	#[test]
	fn prefix_may_contain_underscores() {
		let id = StructuralId::parse("line_item", "line_item_7").expect("parses");
		assert_eq!(id.index(), 7);
		assert_eq!(id.prefix(), "line_item");
	}
}
