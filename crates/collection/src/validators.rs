//! Per-row validator registration driven by `[validator]` configuration.

use rowset_config::{ValidatorConfig, resolve_index};
use rowset_primitives::{AttributeSurface, Row};
use tracing::{debug, trace};

use crate::collab::ValidatorRegistry;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Registers every active field pattern of `config` for the row at `index`.
///
/// Patterns whose resolved field is absent from the row are skipped. Failures
/// are reported and never abort the loop.
pub fn register<S: AttributeSurface>(
	config: &ValidatorConfig,
	registry: &mut dyn ValidatorRegistry<S>,
	row: &Row<S>,
	index: usize,
	diagnostics: &mut Diagnostics,
) {
	if !config.enabled {
		return;
	}
	for (pattern, rules) in config.active_fields() {
		let field = resolve_index(pattern, index);
		if !row.has_field(&field) {
			trace!(%field, "no such field in row; skipping validator");
			continue;
		}
		match registry.add_field(&field, row, rules) {
			Ok(()) => debug!(%field, index, "validator registered"),
			Err(err) => diagnostics.push(Diagnostic::ValidatorRegistrationFailed {
				row: row.id(),
				field,
				reason: err.to_string(),
			}),
		}
	}
}

/// Removes every active field pattern of `config` for the row at `index`.
///
/// Failures usually mean the field was never registered; they are logged at
/// debug level only.
pub fn unregister<S: AttributeSurface>(
	config: &ValidatorConfig,
	registry: &mut dyn ValidatorRegistry<S>,
	row: &Row<S>,
	index: usize,
) {
	if !config.enabled {
		return;
	}
	for (pattern, _) in config.active_fields() {
		let field = resolve_index(pattern, index);
		if !row.has_field(&field) {
			continue;
		}
		if let Err(err) = registry.remove_field(&field, row) {
			debug!(%field, error = %err, "validator removal failed");
		}
	}
}
