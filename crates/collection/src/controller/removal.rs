//! Removal: request, await external resolution, finalize.
//!
//! [`Collection::remove`] runs all three steps. Callers that drive their own
//! event loop can use [`Collection::begin_removal`] and
//! [`Collection::finish_removal`] instead; between the two the row stays in
//! place and nothing is reindexed.

use rowset_primitives::{AttributeSurface, RowId};
use tracing::debug;

use super::{Collection, flow_failed};
use crate::collab::{DeletionRequest, FlowOutcome};
use crate::error::{CollectionError, Result};
use crate::template::TemplateVars;

/// A removal waiting on the confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending removal does nothing until it is finished"]
pub struct PendingRemoval {
	row: RowId,
	request: DeletionRequest,
}

impl PendingRemoval {
	/// The row awaiting confirmation.
	pub fn row(&self) -> RowId {
		self.row
	}

	/// The resolved request to hand to the flow.
	pub fn request(&self) -> &DeletionRequest {
		&self.request
	}
}

/// Result of [`Collection::begin_removal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
	/// A hook cancelled the removal; nothing changed.
	Cancelled,
	/// The row was removed and the collection reindexed.
	Completed,
	/// Confirmation is required before the row can be removed.
	Pending(PendingRemoval),
}

/// Final result of a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
	/// The row is gone and the remaining rows are reindexed.
	Removed,
	/// The confirmation flow was declined; nothing changed.
	Declined,
	/// A lifecycle hook cancelled the removal; nothing changed.
	Cancelled,
}

impl<S: AttributeSurface> Collection<S> {
	/// Removes a row, awaiting the confirmation flow when one applies.
	///
	/// A failed flow keeps the row and returns
	/// [`CollectionError::ExternalFlowFailed`].
	pub async fn remove(&mut self, id: RowId) -> Result<RemoveOutcome> {
		let pending = match self.begin_removal(id)? {
			Removal::Cancelled => return Ok(RemoveOutcome::Cancelled),
			Removal::Completed => return Ok(RemoveOutcome::Removed),
			Removal::Pending(pending) => pending,
		};

		let outcome = {
			let position = self.position(id).ok_or(CollectionError::UnknownRow(id))?;
			match &self.confirmation {
				Some(flow) => flow.confirm(&pending.request, &self.rows[position]).await,
				None => FlowOutcome::Confirmed,
			}
		};
		self.finish_removal(pending, outcome)
	}

	/// Removes the row owning the removal control stamped with `control_index`.
	pub async fn remove_at(&mut self, control_index: usize) -> Result<RemoveOutcome> {
		match self.locate(control_index) {
			Some(id) => self.remove(id).await,
			None => {
				tracing::warn!(control_index, "could not locate row to remove");
				Err(CollectionError::NoRowForControl(control_index))
			}
		}
	}

	/// First half of a removal: hooks, then either immediate removal or a
	/// [`PendingRemoval`] to resolve with [`finish_removal`](Self::finish_removal).
	///
	/// An injected confirmation flow is always consulted, except for rows
	/// without an identifier while deletion is enabled: those were never
	/// persisted and are removed straight away.
	pub fn begin_removal(&mut self, id: RowId) -> Result<Removal> {
		let position = self.position(id).ok_or(CollectionError::UnknownRow(id))?;
		if !self.run_remove_hooks(position) {
			return Ok(Removal::Cancelled);
		}

		if self.confirmation.is_some() {
			let request = self.deletion_request(position);
			if self.config.deletion.enabled && request.id.is_none() {
				debug!(row = %id, position, "row has no identifier; removing without confirmation");
			} else {
				debug!(row = %id, position, url = ?request.url, "removal awaiting confirmation");
				return Ok(Removal::Pending(PendingRemoval { row: id, request }));
			}
		}

		self.finalize_removal(id)?;
		Ok(Removal::Completed)
	}

	/// Second half of a removal.
	///
	/// `Confirmed` removes the row; `Declined` and `Failed` leave the
	/// collection exactly as it was.
	pub fn finish_removal(&mut self, pending: PendingRemoval, outcome: FlowOutcome) -> Result<RemoveOutcome> {
		match outcome {
			FlowOutcome::Confirmed => {
				self.finalize_removal(pending.row)?;
				Ok(RemoveOutcome::Removed)
			}
			FlowOutcome::Declined => {
				debug!(row = %pending.row, "removal declined");
				Ok(RemoveOutcome::Declined)
			}
			FlowOutcome::Failed(reason) => Err(flow_failed(pending.row, reason)),
		}
	}

	/// Builds the request for the row at `position`. The network part is only
	/// filled in when deletion is enabled and both an identifier and an
	/// endpoint are available.
	fn deletion_request(&self, position: usize) -> DeletionRequest {
		let row = &self.rows[position];
		let id = self
			.config
			.id_field_for(position)
			.and_then(|field| row.field_value(&field).map(str::to_string));

		let vars = TemplateVars {
			field_name: self.config.field_name.clone(),
			id: id.clone().unwrap_or_default(),
			index: position,
			row_id: row.structural_id_raw().unwrap_or_default().to_string(),
		};

		let deletion = &self.config.deletion;
		let url = match (deletion.enabled, &id, deletion.url.as_deref()) {
			(true, Some(_), Some(template)) => Some(self.resolver.resolve(template, &vars)),
			_ => None,
		};
		let data = if url.is_some() {
			deletion
				.data
				.iter()
				.map(|(key, value)| (key.clone(), self.resolver.resolve(value, &vars)))
				.collect()
		} else {
			Default::default()
		};

		DeletionRequest {
			id,
			index: position,
			row_id: vars.row_id,
			field_name: vars.field_name,
			url,
			method: deletion.method.clone(),
			data,
		}
	}
}
