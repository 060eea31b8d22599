//! Core types for repeatable rows: element fragments, attribute surfaces,
//! selectors, and structural ids.

/// Boxed future aliases for collaborator contracts.
pub mod future;
/// In-memory element tree backing a row.
pub mod fragment;
/// Identifier types for rows and elements.
pub mod ids;
/// Rows and their stable identity.
pub mod row;
/// Compound simple selectors (`button.row_remove[data-index]`).
pub mod selector;
/// `<prefix>_<index>` structural identifiers.
pub mod structural;
/// The attribute surface abstraction the reindexer walks.
pub mod surface;

pub use fragment::{ElementSpec, Fragment};
pub use future::BoxFutureLocal;
pub use ids::{ElementId, RowId};
pub use row::Row;
pub use selector::{Selector, SelectorError};
pub use structural::StructuralId;
pub use surface::AttributeSurface;
