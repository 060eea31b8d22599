use pretty_assertions::assert_eq;
use rowset_primitives::{ElementSpec, Fragment};

use super::*;

fn config() -> Config {
	Config {
		field_name: "items".to_string(),
		placeholder_token: Some("__i__".to_string()),
		..Config::default()
	}
}

fn row_at(index: usize) -> Row<Fragment> {
	let i = index;
	Row::new(Fragment::from_spec(
		ElementSpec::new("div")
			.attr("id", format!("row_{i}"))
			.attr("class", "row-box")
			.child(ElementSpec::new("span").attr("data-row-index", "").text(format!("{}", i + 1)))
			.child(ElementSpec::new("label").attr("for", format!("row_{i}_label")))
			.child(
				ElementSpec::new("input")
					.attr("id", format!("row_{i}_label"))
					.attr("name", format!("items[{i}][label]"))
					.attr("aria-describedby", format!("help_{i}"))
					.attr("data-bv-field", format!("items[{i}][label]")),
			)
			.child(ElementSpec::new("small").attr("id", format!("help_{i}")).text("Year 2024"))
			.child(ElementSpec::new("input").attr("name", format!("other[{i}]")))
			.child(ElementSpec::new("div").attr("data-note", format!("{i}")))
			.child(
				ElementSpec::new("button")
					.attr("class", "row_remove")
					.attr("data-index", format!("{i}")),
			),
	))
}

fn attr(row: &Row<Fragment>, el: usize, name: &str) -> Option<String> {
	row.surface().attribute(ElementId(el), name).map(str::to_string)
}

#[test]
fn rewrites_every_positional_reference() {
	let mut row = row_at(2);
	let report = reindex(&mut row, 0, &config());

	assert_eq!(report.prior, Some(2));
	assert_eq!(report.new, 0);
	assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

	let s = row.surface();
	assert_eq!(s.attribute(ElementId::ROOT, "id"), Some("row_0"));
	assert_eq!(s.text(ElementId(1)), "1");
	assert_eq!(attr(&row, 2, "for").as_deref(), Some("row_0_label"));
	assert_eq!(attr(&row, 3, "id").as_deref(), Some("row_0_label"));
	assert_eq!(attr(&row, 3, "name").as_deref(), Some("items[0][label]"));
	assert_eq!(attr(&row, 3, "aria-describedby").as_deref(), Some("help_0"));
	assert_eq!(attr(&row, 3, "data-bv-field").as_deref(), Some("items[0][label]"));
	assert_eq!(attr(&row, 4, "id").as_deref(), Some("help_0"));
	assert_eq!(s.text(ElementId(4)), "Year 2024");
	assert_eq!(attr(&row, 5, "name").as_deref(), Some("other[2]"));
	assert_eq!(attr(&row, 6, "data-note").as_deref(), Some("2"));
	assert_eq!(attr(&row, 7, "data-index").as_deref(), Some("0"));
}

#[test]
fn reindexing_to_current_index_changes_nothing() {
	let mut row = row_at(3);
	let before = row.surface().clone();
	let report = reindex(&mut row, 3, &config());
	assert_eq!(report.rewritten, 0);
	assert!(!report.changed());
	assert_eq!(row.surface(), &before);
}

#[test]
fn second_pass_is_idempotent() {
	let mut row = row_at(4);
	reindex(&mut row, 1, &config());
	let after_first = row.surface().clone();
	let report = reindex(&mut row, 1, &config());
	assert_eq!(report.rewritten, 0);
	assert_eq!(row.surface(), &after_first);
}

#[test]
fn digit_length_change() {
	let mut row = row_at(9);
	reindex(&mut row, 10, &config());
	assert_eq!(attr(&row, 3, "id").as_deref(), Some("row_10_label"));
	assert_eq!(attr(&row, 3, "name").as_deref(), Some("items[10][label]"));
	assert_eq!(row.surface().text(ElementId(1)), "11");
}

#[test]
fn unrecoverable_prior_index_degrades() {
	let mut row = row_at(5);
	row.surface_mut().set_attribute(ElementId::ROOT, "id", "bogus");
	let report = reindex(&mut row, 0, &config());

	assert_eq!(report.prior, None);
	assert_eq!(
		report.diagnostics,
		[Diagnostic::UnrecoverablePriorIndex {
			row: row.id(),
			found: Some("bogus".to_string()),
		}]
	);
	assert_eq!(row.surface().attribute(ElementId::ROOT, "id"), Some("row_0"));
	// Bracket falls back to a wildcard match on the field name.
	assert_eq!(attr(&row, 3, "name").as_deref(), Some("items[0][label]"));
	// Classes needing the prior index are disabled.
	assert_eq!(attr(&row, 3, "id").as_deref(), Some("row_5_label"));
	assert_eq!(attr(&row, 3, "data-bv-field").as_deref(), Some("items[5][label]"));
	assert_eq!(attr(&row, 7, "data-index").as_deref(), Some("0"));
}

#[test]
fn missing_structural_id_is_reported() {
	let mut row = Row::new(Fragment::new("div"));
	let report = reindex(&mut row, 0, &config());
	assert_eq!(
		report.diagnostics,
		[Diagnostic::UnrecoverablePriorIndex {
			row: row.id(),
			found: None,
		}]
	);
	assert_eq!(row.structural_id_raw(), Some("row_0"));
}

#[test]
fn ambiguous_attribute_is_left_alone() {
	let mut row = row_at(2);
	row.surface_mut().set_attribute(ElementId(3), "aria-describedby", "q2-2");
	let report = reindex(&mut row, 0, &config());

	assert_eq!(attr(&row, 3, "aria-describedby").as_deref(), Some("q2-2"));
	assert_eq!(
		report.diagnostics,
		[Diagnostic::AmbiguousRewrite {
			row: row.id(),
			element: ElementId(3),
			attribute: "aria-describedby".to_string(),
			value: "q2-2".to_string(),
		}]
	);
	// The rest of the row is still reindexed.
	assert_eq!(attr(&row, 3, "id").as_deref(), Some("row_0_label"));
}

#[test]
fn placeholder_tokens_in_names_and_ids() {
	let mut row = row_at(0);
	let s = row.surface_mut();
	s.set_attribute(ElementId(3), "name", "items[__i__][label]");
	s.set_attribute(ElementId(4), "id", "help___i__");
	reindex(&mut row, 3, &config());
	assert_eq!(attr(&row, 3, "name").as_deref(), Some("items[3][label]"));
	assert_eq!(attr(&row, 4, "id").as_deref(), Some("help_3"));
}

#[test]
fn label_offset_override() {
	let mut row = row_at(1);
	row.surface_mut()
		.set_attribute(ElementId(1), POSITION_OFFSET_ATTR, "100");
	reindex(&mut row, 4, &config());
	assert_eq!(row.surface().text(ElementId(1)), "104");

	let zero_based = Config {
		index_label_offset: 0,
		..config()
	};
	let mut row = row_at(1);
	reindex(&mut row, 4, &zero_based);
	assert_eq!(row.surface().text(ElementId(1)), "4");
}

#[test]
fn names_outside_inputs_are_not_field_names() {
	let mut row = row_at(1);
	row.surface_mut().set_attribute(ElementId(6), "name", "items[1]");
	reindex(&mut row, 0, &config());
	assert_eq!(attr(&row, 6, "name").as_deref(), Some("items[1]"));
}

#[test]
fn custom_known_attributes() {
	let config = Config {
		known_attributes: vec!["id".into(), "for".into(), "aria-describedby".into(), "data-note".into()],
		..config()
	};
	let mut row = row_at(2);
	reindex(&mut row, 1, &config);
	assert_eq!(attr(&row, 6, "data-note").as_deref(), Some("1"));
	// No longer listed, so untouched.
	assert_eq!(attr(&row, 3, "data-bv-field").as_deref(), Some("items[2][label]"));
}

#[test]
fn id_lists_mixing_separators_follow_their_targets() {
	let mut row = row_at(1);
	let s = row.surface_mut();
	s.set_attribute(ElementId(3), "aria-describedby", "help-1 error_1");
	s.set_attribute(ElementId(4), "id", "help-1");
	s.set_attribute(ElementId(6), "id", "error_1");

	let report = reindex(&mut row, 0, &config());
	assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
	assert_eq!(attr(&row, 3, "aria-describedby").as_deref(), Some("help-0 error_0"));
	assert_eq!(attr(&row, 4, "id").as_deref(), Some("help-0"));
	assert_eq!(attr(&row, 6, "id").as_deref(), Some("error_0"));
}
