//! Ordered row collections that keep positional references consistent.
//!
//! A [`Collection`] owns an ordered list of interchangeable rows (repeated
//! form fieldsets, for instance). Whenever rows are added or removed, every
//! positional reference inside every remaining row (field names, ids, label
//! targets, ARIA links, validator bindings, placeholder tokens) is rewritten so
//! row `i` says `i` everywhere.
//!
//! ```
//! use rowset_collection::Collection;
//! use rowset_config::Config;
//!
//! let mut rows = Collection::new(Config::parse(r#"field_name = "items""#).unwrap());
//! let first = rows.add().unwrap();
//! rows.add().unwrap();
//!
//! let pending = rows.begin_removal(first).unwrap();
//! assert_eq!(pending, rowset_collection::Removal::Completed);
//!
//! let survivor = &rows.rows()[0];
//! assert_eq!(survivor.structural_id_raw(), Some("row_0"));
//! assert!(survivor.has_field("items[0]"));
//! ```

pub mod collab;
pub mod diagnostics;
pub mod error;
pub mod indexer;
pub mod policy;
pub mod template;
pub mod validators;

mod controller;

pub use collab::{
	AddControl, ConfirmationFlow, DeletionRequest, FlowOutcome, HookResult, LifecycleHook, NoAddControl,
	NoValidators, RowEvent, RowFactory, TemplateRowFactory, ValidatorError, ValidatorRegistry,
};
pub use controller::{Collection, CollectionBuilder, PendingRemoval, RemoveOutcome, Removal};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{CollectionError, Result};
pub use indexer::{ReindexReport, reindex};
pub use policy::{Capacity, CapacityPolicy};
pub use template::{BraceTemplate, TemplateResolver, TemplateVars};
