//! The collection controller.
//!
//! [`Collection`] exclusively owns the ordered rows and keeps their indices
//! contiguous (`0..n`, in document order) after every public operation. It
//! drives the reindexer, the collaborators, and the capacity policy, always
//! in the same order: structural change, user hook, validators, capacity.

mod removal;

use rowset_config::Config;
use rowset_primitives::{AttributeSurface, Fragment, Row, RowId};
use tracing::{debug, warn};

pub use self::removal::{PendingRemoval, RemoveOutcome, Removal};
use crate::collab::{
	AddControl, ConfirmationFlow, LifecycleHook, NoAddControl, NoValidators, RowEvent, RowFactory,
	TemplateRowFactory, ValidatorRegistry,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{CollectionError, Result};
use crate::indexer::{self, ReindexReport};
use crate::policy::{Capacity, CapacityPolicy};
use crate::template::{BraceTemplate, TemplateResolver};
use crate::validators;


/// An ordered collection of interchangeable rows.
pub struct Collection<S: AttributeSurface = Fragment> {
	config: Config,
	rows: Vec<Row<S>>,
	factory: Box<dyn RowFactory<S>>,
	hooks: Vec<Box<dyn LifecycleHook<S>>>,
	validators: Box<dyn ValidatorRegistry<S>>,
	confirmation: Option<Box<dyn ConfirmationFlow<S>>>,
	resolver: Box<dyn TemplateResolver>,
	add_control: Box<dyn AddControl>,
	policy: CapacityPolicy,
	capacity: Capacity,
	diagnostics: Diagnostics,
}

impl<S: AttributeSurface> std::fmt::Debug for Collection<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Collection")
			.field("len", &self.rows.len())
			.field("max", &self.policy.max())
			.field("hooks", &self.hooks.len())
			.field("confirmation", &self.confirmation.is_some())
			.field("capacity", &self.capacity)
			.field("diagnostics", &self.diagnostics.len())
			.finish()
	}
}

impl Collection<Fragment> {
	/// Creates an empty collection using the stock row template.
	pub fn new(config: Config) -> Self {
		let factory = TemplateRowFactory::from_config(&config);
		CollectionBuilder::new(config, factory).build()
	}
}

/// Assembles a [`Collection`] with its collaborators.
pub struct CollectionBuilder<S: AttributeSurface> {
	config: Config,
	factory: Box<dyn RowFactory<S>>,
	rows: Vec<Row<S>>,
	hooks: Vec<Box<dyn LifecycleHook<S>>>,
	validators: Box<dyn ValidatorRegistry<S>>,
	confirmation: Option<Box<dyn ConfirmationFlow<S>>>,
	resolver: Box<dyn TemplateResolver>,
	add_control: Box<dyn AddControl>,
}

impl<S: AttributeSurface> CollectionBuilder<S> {
	/// Starts a builder with no-op collaborators.
	pub fn new(config: Config, factory: impl RowFactory<S> + 'static) -> Self {
		Self {
			config,
			factory: Box::new(factory),
			rows: Vec::new(),
			hooks: Vec::new(),
			validators: Box::new(NoValidators),
			confirmation: None,
			resolver: Box::new(BraceTemplate),
			add_control: Box::new(NoAddControl),
		}
	}

	/// Adopts rows that already exist (in document order).
	pub fn rows(mut self, rows: impl IntoIterator<Item = Row<S>>) -> Self {
		self.rows.extend(rows);
		self
	}

	/// Adds a lifecycle hook; hooks run in registration order.
	pub fn hook(mut self, hook: impl LifecycleHook<S> + 'static) -> Self {
		self.hooks.push(Box::new(hook));
		self
	}

	/// Sets the validator registry.
	pub fn validators(mut self, registry: impl ValidatorRegistry<S> + 'static) -> Self {
		self.validators = Box::new(registry);
		self
	}

	/// Sets the confirmation/deletion flow.
	pub fn confirmation(mut self, flow: impl ConfirmationFlow<S> + 'static) -> Self {
		self.confirmation = Some(Box::new(flow));
		self
	}

	/// Sets the request template resolver.
	pub fn resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
		self.resolver = Box::new(resolver);
		self
	}

	/// Sets the add affordance toggled by the capacity policy.
	pub fn add_control(mut self, control: impl AddControl + 'static) -> Self {
		self.add_control = Box::new(control);
		self
	}

	/// Builds the collection, reindexing adopted rows and evaluating capacity.
	pub fn build(self) -> Collection<S> {
		let policy = CapacityPolicy::new(self.config.max_rows);
		let mut collection = Collection {
			capacity: policy.capacity(self.rows.len()),
			config: self.config,
			rows: self.rows,
			factory: self.factory,
			hooks: self.hooks,
			validators: self.validators,
			confirmation: self.confirmation,
			resolver: self.resolver,
			add_control: self.add_control,
			policy,
			diagnostics: Diagnostics::default(),
		};
		collection.reindex_all();
		collection.evaluate_capacity();
		collection
	}
}

impl<S: AttributeSurface> Collection<S> {
	/// The configuration this collection runs with.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether the collection has no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Rows in document order; a row's position is its index.
	pub fn rows(&self) -> &[Row<S>] {
		&self.rows
	}

	/// Row with the given id.
	pub fn row(&self, id: RowId) -> Option<&Row<S>> {
		self.rows.iter().find(|r| r.id() == id)
	}

	/// Current index of the row with the given id.
	pub fn position(&self, id: RowId) -> Option<usize> {
		self.rows.iter().position(|r| r.id() == id)
	}

	/// Capacity as of the last evaluation.
	pub fn capacity(&self) -> Capacity {
		self.capacity
	}

	/// The diagnostic channel.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Drains every pending diagnostic.
	pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
		self.diagnostics.drain()
	}

	/// Finds the row a removal control belongs to from its positional
	/// `data-index`.
	///
	/// Prefers the row whose structural id encodes `control_index` and falls
	/// back to the row at that position.
	pub fn locate(&self, control_index: usize) -> Option<RowId> {
		let prefix = self.config.row_id_prefix.as_str();
		self.rows
			.iter()
			.find(|r| r.structural_id(prefix).is_some_and(|id| id.index() == control_index))
			.or_else(|| self.rows.get(control_index))
			.map(Row::id)
	}

	/// Appends a new row at the current last index.
	///
	/// Rejected with [`CollectionError::CapacityExceeded`] when the collection
	/// is full; nothing changes in that case.
	pub fn add(&mut self) -> Result<RowId> {
		let len = self.rows.len();
		if !self.policy.allows_add(len) {
			debug!(len, max = self.policy.max(), "add rejected");
			return Err(CollectionError::CapacityExceeded {
				max: self.policy.max(),
				len,
			});
		}

		let index = len;
		let row = self.factory.build(index, &self.config.field_name);
		let id = row.id();
		self.rows.push(row);
		if !self.factory.guarantees_indices() {
			self.reindex_all();
		}
		debug!(row = %id, index, "row added");

		let event = RowEvent {
			index,
			row: &self.rows[index],
			field_name: &self.config.field_name,
			len: self.rows.len(),
		};
		for hook in &self.hooks {
			hook.on_add(&event);
		}

		validators::register(
			&self.config.validator,
			self.validators.as_mut(),
			&self.rows[index],
			index,
			&mut self.diagnostics,
		);
		self.evaluate_capacity();
		Ok(id)
	}

	/// Reindexes every row so its index equals its position.
	///
	/// Idempotent: a second call changes nothing.
	pub fn reindex_all(&mut self) -> Vec<ReindexReport> {
		let mut reports = Vec::with_capacity(self.rows.len());
		for (position, row) in self.rows.iter_mut().enumerate() {
			let report = indexer::reindex(row, position, &self.config);
			self.diagnostics.extend(report.diagnostics.iter().cloned());
			reports.push(report);
		}
		reports
	}

	fn evaluate_capacity(&mut self) {
		self.capacity = self.policy.evaluate(self.rows.len(), self.add_control.as_mut());
	}

	/// Structurally removes a row, then reindexes the rest.
	///
	/// Validators of the removed row are dropped first; rows whose index shifts
	/// have their validators re-keyed around the reindex pass.
	fn finalize_removal(&mut self, id: RowId) -> Result<()> {
		let position = self.position(id).ok_or(CollectionError::UnknownRow(id))?;
		let prefix = self.config.row_id_prefix.as_str();

		validators::unregister(
			&self.config.validator,
			self.validators.as_mut(),
			&self.rows[position],
			position,
		);
		self.rows.remove(position);

		let mut shifted = Vec::new();
		for (new_index, row) in self.rows.iter().enumerate() {
			match row.structural_id(prefix).map(|s| s.index()) {
				Some(prior) if prior != new_index => {
					validators::unregister(&self.config.validator, self.validators.as_mut(), row, prior);
					shifted.push(new_index);
				}
				Some(_) => {}
				None => shifted.push(new_index),
			}
		}

		self.reindex_all();

		for index in shifted {
			validators::register(
				&self.config.validator,
				self.validators.as_mut(),
				&self.rows[index],
				index,
				&mut self.diagnostics,
			);
		}

		debug!(row = %id, position, len = self.rows.len(), "row removed");
		self.evaluate_capacity();
		Ok(())
	}

	/// Runs removal hooks; returns false when one cancels.
	fn run_remove_hooks(&self, position: usize) -> bool {
		let event = RowEvent {
			index: position,
			row: &self.rows[position],
			field_name: &self.config.field_name,
			len: self.rows.len(),
		};
		for hook in &self.hooks {
			if hook.on_remove(&event) == crate::collab::HookResult::Cancel {
				debug!(row = %event.row.id(), position, "removal cancelled by hook");
				return false;
			}
		}
		true
	}
}

/// Logs a failed flow before handing the error back.
fn flow_failed(row: RowId, reason: String) -> CollectionError {
	warn!(%row, %reason, "removal flow failed; row kept");
	CollectionError::ExternalFlowFailed { row, reason }
}
