//! Operation-level errors surfaced to callers.

use rowset_primitives::RowId;
use thiserror::Error;

/// Errors returned by [`Collection`](crate::Collection) operations.
///
/// Per-attribute and per-row problems never show up here; they are recovered
/// locally and reported through the diagnostic channel instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
	/// `add` was called with the collection already at its maximum size.
	#[error("row limit reached ({len} of {max})")]
	CapacityExceeded {
		/// Configured maximum.
		max: usize,
		/// Size at the time of the call.
		len: usize,
	},

	/// The confirmation or deletion collaborator failed; the row was kept.
	#[error("removal of {row} failed: {reason}")]
	ExternalFlowFailed {
		/// The row that was to be removed.
		row: RowId,
		/// Collaborator-provided reason.
		reason: String,
	},

	/// The row is not (or no longer) part of this collection.
	#[error("{0} is not in this collection")]
	UnknownRow(RowId),

	/// No row could be located for a removal control's positional index.
	#[error("no row found for removal control index {0}")]
	NoRowForControl(usize),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
