use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique row IDs.
static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a row for its whole lifetime.
///
/// Unlike the positional index, a [`RowId`] never changes when other rows are
/// added or removed, so it is the key used to dispatch removal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl RowId {
	/// Generates a new unique row ID.
	pub fn next() -> Self {
		Self(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "row#{}", self.0)
	}
}

/// Handle to one element inside a row's attribute surface.
///
/// Handles are only meaningful for the surface that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl ElementId {
	/// The root element of every fragment.
	pub const ROOT: ElementId = ElementId(0);

	/// Returns the arena slot of this element.
	pub fn index(self) -> usize {
		self.0
	}
}
