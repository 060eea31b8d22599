//! Row reindexing.
//!
//! [`reindex`] walks one row's attribute surface and rewrites every positional
//! reference to a new index. The pass is ordered:
//!
//! 1. recover the prior index from the structural id (the only trusted source),
//! 2. write the new structural id,
//! 3. refresh visible position labels,
//! 4. rewrite input `name`s (placeholder, then bracket index),
//! 5. stamp removal controls' `data-index`,
//! 6. rewrite known structural attributes (composite, placeholder, bounded).
//!
//! Problems with individual attributes are reported and skipped; the pass
//! always runs to completion.

use rowset_config::Config;
use rowset_matcher::{MatchContext, Matcher, PatternClass, Rewrite};
use rowset_primitives::{AttributeSurface, ElementId, Row, RowId, StructuralId};
use tracing::{trace, trace_span};

use crate::diagnostics::Diagnostic;

#[cfg(test)]
mod tests;

/// Marks an element whose text shows the row's visible position.
pub const POSITION_LABEL_ATTR: &str = "data-row-index";

/// Per-element override of the label offset.
pub const POSITION_OFFSET_ATTR: &str = "data-row-index-offset";

/// Positional attribute carried by removal controls.
pub const CONTROL_INDEX_ATTR: &str = "data-index";

/// Tags whose `name` attribute is a form field name.
const INPUT_TAGS: [&str; 3] = ["input", "select", "textarea"];

/// Classes tried on field names, in priority order.
const NAME_CLASSES: [PatternClass; 2] = [PatternClass::PlaceholderToken, PatternClass::BracketIndex];

/// Classes tried on known structural attributes. The bracket class is
/// reserved for field names.
const KNOWN_CLASSES: [PatternClass; 3] = [
	PatternClass::CompositeFieldBinding,
	PatternClass::PlaceholderToken,
	PatternClass::BoundedNumeral,
];

/// What one reindex pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexReport {
	/// Row that was reindexed.
	pub row: RowId,
	/// Index recovered from the structural id, if any.
	pub prior: Option<usize>,
	/// Index assigned.
	pub new: usize,
	/// Number of attribute and text values that actually changed.
	pub rewritten: usize,
	/// Recovered problems.
	pub diagnostics: Vec<Diagnostic>,
}

impl ReindexReport {
	/// Whether anything changed.
	pub fn changed(&self) -> bool {
		self.rewritten > 0
	}
}

/// Rewrites every positional reference in `row` to `new_index`.
pub fn reindex<S: AttributeSurface>(row: &mut Row<S>, new_index: usize, config: &Config) -> ReindexReport {
	let row_id = row.id();
	let _span = trace_span!("reindex", row = %row_id, new = new_index).entered();

	let mut report = ReindexReport {
		row: row_id,
		prior: None,
		new: new_index,
		rewritten: 0,
		diagnostics: Vec::new(),
	};

	report.prior = row.structural_id(&config.row_id_prefix).map(|id| id.index());
	if report.prior.is_none() {
		report.diagnostics.push(Diagnostic::UnrecoverablePriorIndex {
			row: row_id,
			found: row.structural_id_raw().map(str::to_string),
		});
	}

	let surface = row.surface_mut();
	let root = surface.root();

	let structural = StructuralId::new(config.row_id_prefix.as_str(), new_index).to_string();
	write(surface, root, "id", &structural, &mut report);

	update_position_labels(surface, new_index, config.index_label_offset, &mut report);

	let ctx = MatchContext::new(report.prior, new_index, &config.field_name)
		.with_token(config.placeholder_token.as_deref());
	let matcher = Matcher::new(ctx);

	for (el, value) in surface.find_all("name") {
		let is_input = INPUT_TAGS.iter().any(|&tag| tag == surface.tag(el));
		if !is_input || !value.starts_with(config.field_name.as_str()) {
			continue;
		}
		apply(surface, &matcher, el, "name", &value, &NAME_CLASSES, &mut report);
	}

	let index_text = new_index.to_string();
	for el in surface.select(&config.remove_selector) {
		write(surface, el, CONTROL_INDEX_ATTR, &index_text, &mut report);
	}

	for attr in &config.known_attributes {
		for (el, value) in surface.find_all(attr) {
			if el == root && attr == "id" {
				continue;
			}
			apply(surface, &matcher, el, attr, &value, &KNOWN_CLASSES, &mut report);
		}
	}

	trace!(prior = ?report.prior, rewritten = report.rewritten, "reindexed row");
	report
}

fn update_position_labels<S: AttributeSurface>(
	surface: &mut S,
	new_index: usize,
	default_offset: usize,
	report: &mut ReindexReport,
) {
	let labels: Vec<ElementId> = surface
		.elements()
		.into_iter()
		.filter(|&el| surface.attribute(el, POSITION_LABEL_ATTR).is_some())
		.collect();
	for el in labels {
		let offset = surface
			.attribute(el, POSITION_OFFSET_ATTR)
			.and_then(|v| v.trim().parse::<usize>().ok())
			.unwrap_or(default_offset);
		let text = (offset + new_index).to_string();
		if surface.text(el) != text {
			surface.set_text(el, &text);
			report.rewritten += 1;
		}
	}
}

fn write<S: AttributeSurface>(surface: &mut S, el: ElementId, name: &str, value: &str, report: &mut ReindexReport) {
	if surface.attribute(el, name) != Some(value) {
		surface.set_attribute(el, name, value);
		report.rewritten += 1;
	}
}

fn apply<S: AttributeSurface>(
	surface: &mut S,
	matcher: &Matcher<'_>,
	el: ElementId,
	attr: &str,
	value: &str,
	classes: &[PatternClass],
	report: &mut ReindexReport,
) {
	let resolution = matcher.rewrite_first(value, classes);
	match resolution.rewrite {
		Rewrite::Unchanged => {}
		Rewrite::Rewritten(next) => {
			trace!(attr, from = value, to = %next, class = ?resolution.class, "rewrite");
			surface.set_attribute(el, attr, &next);
			report.rewritten += 1;
		}
		Rewrite::Ambiguous(_) => report.diagnostics.push(Diagnostic::AmbiguousRewrite {
			row: report.row,
			element: el,
			attribute: attr.to_string(),
			value: value.to_string(),
		}),
	}
}
