//! Non-fatal problems found while reindexing or notifying collaborators.

use std::fmt;

use rowset_primitives::{ElementId, RowId};
use tracing::warn;

/// A recovered problem. The affected attribute or registration was skipped;
/// the rest of the operation went ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// A bounded numeral appeared at several positions with conflicting
	/// context; the attribute was left unchanged.
	AmbiguousRewrite {
		/// Row being reindexed.
		row: RowId,
		/// Element carrying the attribute.
		element: ElementId,
		/// Attribute name.
		attribute: String,
		/// Value that was left untouched.
		value: String,
	},
	/// The row's structural id was missing or malformed, so classes needing a
	/// prior index were disabled for this pass.
	UnrecoverablePriorIndex {
		/// Row being reindexed.
		row: RowId,
		/// What the root's `id` held, if anything.
		found: Option<String>,
	},
	/// The validator collaborator rejected a field registration or removal.
	ValidatorRegistrationFailed {
		/// Row whose field was being (un)registered.
		row: RowId,
		/// Resolved field name.
		field: String,
		/// Collaborator-provided reason.
		reason: String,
	},
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::AmbiguousRewrite { row, attribute, value, .. } => {
				write!(f, "{row}: ambiguous index in {attribute}={value:?}; left unchanged")
			}
			Diagnostic::UnrecoverablePriorIndex { row, found: Some(found) } => {
				write!(f, "{row}: structural id {found:?} is malformed")
			}
			Diagnostic::UnrecoverablePriorIndex { row, found: None } => {
				write!(f, "{row}: structural id is missing")
			}
			Diagnostic::ValidatorRegistrationFailed { row, field, reason } => {
				write!(f, "{row}: validator for {field} failed: {reason}")
			}
		}
	}
}

/// The collection's diagnostic channel.
///
/// Every entry is logged when pushed and kept until the owner drains it.
#[derive(Debug, Default)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	/// Records a diagnostic.
	pub fn push(&mut self, diagnostic: Diagnostic) {
		warn!(%diagnostic, "row collection diagnostic");
		self.entries.push(diagnostic);
	}

	/// Records several diagnostics.
	pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
		for d in diagnostics {
			self.push(d);
		}
	}

	/// Pending entries, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
		self.entries.iter()
	}

	/// Number of pending entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing is pending.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes and returns every pending entry.
	pub fn drain(&mut self) -> Vec<Diagnostic> {
		std::mem::take(&mut self.entries)
	}
}
