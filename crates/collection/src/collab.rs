//! Collaborator contracts.
//!
//! Everything the controller does not own (row construction, user hooks,
//! confirmation dialogs and deletion requests, validation libraries, the add
//! button) sits behind one of these traits and is injected at construction.
//! Every collaborator is optional: the defaults are no-ops, never a crash.

use std::collections::BTreeMap;

use rowset_primitives::{AttributeSurface, BoxFutureLocal, Fragment, Row};
use thiserror::Error;

/// Builds the structure of a new row.
pub trait RowFactory<S: AttributeSurface> {
	/// Builds the row for position `index`.
	///
	/// The row should carry a `name`-bearing input embedding
	/// `<field_name>[<index>]`, a root `id` equal to `<prefix>_<index>`, and a
	/// removal control whose `data-index` is `index`.
	fn build(&self, index: usize, field_name: &str) -> Row<S>;

	/// Whether [`build`](Self::build) always produces correct positional
	/// references. When false the controller reindexes after every insertion.
	fn guarantees_indices(&self) -> bool {
		false
	}
}

/// Result of a lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookResult {
	/// Continue with the operation.
	#[default]
	Continue,
	/// Cancel the operation (only honoured before a removal).
	Cancel,
}

/// What a lifecycle hook sees.
#[derive(Debug)]
pub struct RowEvent<'a, S> {
	/// Position of the row at the time of the event.
	pub index: usize,
	/// The row itself.
	pub row: &'a Row<S>,
	/// Configured field-name prefix.
	pub field_name: &'a str,
	/// Collection size at the time of the event.
	pub len: usize,
}

/// User callbacks around structural mutation.
pub trait LifecycleHook<S> {
	/// Called after a row was inserted and reindexed, before validators are
	/// registered and capacity is re-evaluated.
	fn on_add(&self, _event: &RowEvent<'_, S>) {}

	/// Called before anything else in a removal. Returning
	/// [`HookResult::Cancel`] stops the removal with no side effects.
	fn on_remove(&self, _event: &RowEvent<'_, S>) -> HookResult {
		HookResult::Continue
	}
}

/// Resolution of a confirmation/deletion flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
	/// The user confirmed and any deletion request succeeded.
	Confirmed,
	/// The user declined; nothing happens.
	Declined,
	/// The deletion request failed; the row is kept.
	Failed(String),
}

/// What the confirmation flow is asked about, with every template
/// placeholder resolved.
///
/// `url` is set only when the flow should also perform a network deletion:
/// deletion is enabled, the row has an identifier, and an endpoint is
/// configured. Otherwise the flow only confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
	/// Persisted identifier read from the row's id field, if any.
	pub id: Option<String>,
	/// Position of the row when the removal was requested.
	pub index: usize,
	/// Structural id of the row when the removal was requested.
	pub row_id: String,
	/// Configured field-name prefix.
	pub field_name: String,
	/// Resolved endpoint of the network deletion, if one applies.
	pub url: Option<String>,
	/// HTTP method.
	pub method: String,
	/// Resolved body fields; empty when there is no network deletion.
	pub data: BTreeMap<String, String>,
}

/// Confirms a destructive removal, optionally performing a network deletion.
///
/// The returned future is the only suspension point in the engine. While it
/// is pending the row stays in place and is not reindexed.
pub trait ConfirmationFlow<S> {
	/// Asks for confirmation of `request` concerning `row`.
	fn confirm<'a>(&'a self, request: &'a DeletionRequest, row: &'a Row<S>) -> BoxFutureLocal<'a, FlowOutcome>;
}

/// Failure reported by a [`ValidatorRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidatorError(pub String);

/// Field-level validation registration.
pub trait ValidatorRegistry<S> {
	/// Registers `rules` for the field named `field` inside `row`.
	fn add_field(&mut self, field: &str, row: &Row<S>, rules: &serde_json::Value) -> Result<(), ValidatorError>;

	/// Drops the rules for the field named `field` inside `row`.
	fn remove_field(&mut self, field: &str, row: &Row<S>) -> Result<(), ValidatorError>;
}

/// The "add row" affordance.
pub trait AddControl {
	/// Enables or disables the affordance.
	fn set_enabled(&mut self, enabled: bool);
}

/// Validator registry used when no validation library is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoValidators;

impl<S> ValidatorRegistry<S> for NoValidators {
	fn add_field(&mut self, _: &str, _: &Row<S>, _: &serde_json::Value) -> Result<(), ValidatorError> {
		Ok(())
	}

	fn remove_field(&mut self, _: &str, _: &Row<S>) -> Result<(), ValidatorError> {
		Ok(())
	}
}

/// Add control used when there is no button to toggle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAddControl;

impl AddControl for NoAddControl {
	fn set_enabled(&mut self, _: bool) {}
}

impl<S, F> LifecycleHook<S> for F
where
	F: Fn(&RowEvent<'_, S>) -> HookResult,
{
	fn on_add(&self, event: &RowEvent<'_, S>) {
		self(event);
	}

	fn on_remove(&self, event: &RowEvent<'_, S>) -> HookResult {
		self(event)
	}
}

/// Default factory producing the stock row markup.
///
/// ```text
/// <div class="row-box" id="row_<i>">
///   <span data-row-index><i+offset></span>
///   <input type="text" name="<field>[<i>]">
///   <button type="button" class="row_remove" data-index="<i>">Remove</button>
/// </div>
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRowFactory {
	row_id_prefix: String,
	remove_class: String,
	label_offset: usize,
}

impl TemplateRowFactory {
	/// Creates a factory stamping `<prefix>_<i>` ids and the given removal class.
	pub fn new(row_id_prefix: impl Into<String>, remove_class: impl Into<String>) -> Self {
		Self {
			row_id_prefix: row_id_prefix.into(),
			remove_class: remove_class.into(),
			label_offset: 1,
		}
	}

	/// Sets the number added to the index in the visible position label.
	pub fn with_label_offset(mut self, offset: usize) -> Self {
		self.label_offset = offset;
		self
	}

	/// Derives the factory from a configuration.
	pub fn from_config(config: &rowset_config::Config) -> Self {
		let remove_class = config.remove_selector.primary_class().unwrap_or("row_remove");
		Self::new(&config.row_id_prefix, remove_class).with_label_offset(config.index_label_offset)
	}
}

impl RowFactory<Fragment> for TemplateRowFactory {
	fn build(&self, index: usize, field_name: &str) -> Row<Fragment> {
		use rowset_primitives::{ElementSpec, StructuralId};

		let spec = ElementSpec::new("div")
			.attr("class", "row-box")
			.attr("id", StructuralId::new(&self.row_id_prefix, index).to_string())
			.child(
				ElementSpec::new("span")
					.attr("data-row-index", "")
					.text((index + self.label_offset).to_string()),
			)
			.child(
				ElementSpec::new("input")
					.attr("type", "text")
					.attr("name", format!("{field_name}[{index}]")),
			)
			.child(
				ElementSpec::new("button")
					.attr("type", "button")
					.attr("class", &self.remove_class)
					.attr("data-index", index.to_string())
					.text("Remove"),
			);
		Row::new(Fragment::from_spec(spec))
	}

	fn guarantees_indices(&self) -> bool {
		true
	}
}
