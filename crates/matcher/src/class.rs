use std::fmt;

/// A rule describing how an attribute value encodes a row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternClass {
	/// `<field>[<index>]` anchored at the start of the value; only the
	/// bracketed numeral is rewritten.
	BracketIndex,
	/// A literal configured token, replaced wholesale with the new index
	/// wherever it occurs. Ignores the prior index.
	PlaceholderToken,
	/// The prior index as a standalone numeral (not adjacent to other digits).
	BoundedNumeral,
	/// `<field>[<prior>]` anywhere in the value. Both the field segment and the
	/// index must match, so unrelated values sharing the number are untouched.
	CompositeFieldBinding,
}

impl PatternClass {
	/// Fixed evaluation order when several classes could apply to one value.
	pub const PRIORITY: [PatternClass; 4] = [
		PatternClass::CompositeFieldBinding,
		PatternClass::PlaceholderToken,
		PatternClass::BracketIndex,
		PatternClass::BoundedNumeral,
	];

	/// Whether the class can only match when the prior index is known.
	pub fn needs_prior_index(self) -> bool {
		matches!(self, PatternClass::BoundedNumeral | PatternClass::CompositeFieldBinding)
	}

	/// Position of this class in [`PatternClass::PRIORITY`].
	pub fn rank(self) -> usize {
		match self {
			PatternClass::CompositeFieldBinding => 0,
			PatternClass::PlaceholderToken => 1,
			PatternClass::BracketIndex => 2,
			PatternClass::BoundedNumeral => 3,
		}
	}

	/// Stable lowercase name, used in logs.
	pub fn name(self) -> &'static str {
		match self {
			PatternClass::BracketIndex => "bracket-index",
			PatternClass::PlaceholderToken => "placeholder-token",
			PatternClass::BoundedNumeral => "bounded-numeral",
			PatternClass::CompositeFieldBinding => "composite-field-binding",
		}
	}
}

impl fmt::Display for PatternClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
