//! End-to-end add/remove scenarios over the stock and adopted row markup.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rowset_collection::{
	AddControl, Capacity, Collection, CollectionBuilder, CollectionError, ConfirmationFlow, DeletionRequest,
	Diagnostic, FlowOutcome, RemoveOutcome, RowFactory, TemplateRowFactory,
};
use rowset_config::Config;
use rowset_primitives::{AttributeSurface, BoxFutureLocal, ElementId, ElementSpec, Fragment, Row};

const SPAN: ElementId = ElementId(1);
const INPUT: ElementId = ElementId(2);
const BUTTON: ElementId = ElementId(3);

fn init() {
	let _ = tracing_subscriber::fmt::try_init();
}

fn config(toml: &str) -> Config {
	Config::parse(toml).expect("valid config")
}

#[derive(Clone, Default)]
struct Button(Rc<RefCell<Vec<bool>>>);

impl AddControl for Button {
	fn set_enabled(&mut self, enabled: bool) {
		self.0.borrow_mut().push(enabled);
	}
}

struct Decline;

impl ConfirmationFlow<Fragment> for Decline {
	fn confirm<'a>(&'a self, _: &'a DeletionRequest, _: &'a Row<Fragment>) -> BoxFutureLocal<'a, FlowOutcome> {
		Box::pin(async { FlowOutcome::Declined })
	}
}

#[tokio::test]
async fn removing_first_of_two_renumbers_survivor() {
	init();
	let mut rows = Collection::new(config(r#"field_name = "items""#));
	rows.add().expect("room");
	let second = rows.add().expect("room");

	assert_eq!(rows.remove_at(0).await, Ok(RemoveOutcome::Removed));
	assert_eq!(rows.len(), 1);

	let survivor = &rows.rows()[0];
	let s = survivor.surface();
	assert_eq!(survivor.id(), second);
	assert_eq!(survivor.structural_id_raw(), Some("row_0"));
	assert_eq!(s.attribute(INPUT, "name"), Some("items[0]"));
	assert_eq!(s.attribute(BUTTON, "data-index"), Some("0"));
	assert_eq!(s.text(SPAN), "1");
}

#[test]
fn capacity_toggles_add_control() {
	init();
	let button = Button::default();
	let mut rows = CollectionBuilder::new(
		config("max_rows = 3"),
		TemplateRowFactory::new("row", "row_remove"),
	)
	.add_control(button.clone())
	.build();

	for _ in 0..3 {
		rows.add().expect("room");
	}
	assert_eq!(rows.add(), Err(CollectionError::CapacityExceeded { max: 3, len: 3 }));
	assert_eq!(rows.len(), 3);
	assert_eq!(rows.capacity(), Capacity::Full);
	assert_eq!(*button.0.borrow(), [true, true, true, false]);

	let first = rows.rows()[0].id();
	rows.begin_removal(first).expect("known row");
	assert_eq!(rows.capacity(), Capacity::Available { remaining: 1 });
	assert_eq!(button.0.borrow().last(), Some(&true));
}

#[tokio::test]
async fn declined_deletion_keeps_everything() {
	init();
	let cfg = config(
		r#"
field_name = "items"
id_field = "items[{index}]"

[deletion]
enabled = true
url = "/items/{id}"
"#,
	);
	let stored = TemplateRowFactory::from_config(&cfg);
	let rows: Vec<_> = (0..2)
		.map(|i| {
			let mut row = stored.build(i, "items");
			row.surface_mut().set_attribute(INPUT, "value", &format!("saved-{i}"));
			row
		})
		.collect();
	let mut rows = CollectionBuilder::new(cfg, stored).rows(rows).confirmation(Decline).build();
	let before = rows.rows().to_vec();

	let first = rows.rows()[0].id();
	assert_eq!(rows.remove(first).await, Ok(RemoveOutcome::Declined));
	assert_eq!(rows.rows(), before.as_slice());
}

#[tokio::test]
async fn confirmation_applies_with_default_settings() {
	init();
	let mut rows = CollectionBuilder::new(
		config(r#"field_name = "items""#),
		TemplateRowFactory::new("row", "row_remove"),
	)
	.confirmation(Decline)
	.build();
	let first = rows.add().expect("room");
	rows.add().expect("room");

	assert_eq!(rows.remove(first).await, Ok(RemoveOutcome::Declined));
	assert_eq!(rows.len(), 2);
	assert_eq!(rows.row(first).and_then(|r| r.structural_id_raw()), Some("row_0"));
}

#[test]
fn placeholder_template_rows_are_materialized() {
	init();
	let cfg = config(
		r#"
field_name = "items"
placeholder_token = "__i__"
"#,
	);
	let template = || {
		Row::new(Fragment::from_spec(
			ElementSpec::new("fieldset")
				.attr("id", "row___i__")
				.child(ElementSpec::new("label").attr("for", "items___i___label"))
				.child(
					ElementSpec::new("input")
						.attr("id", "items___i___label")
						.attr("name", "items[__i__][label]"),
				),
		))
	};
	let mut rows = CollectionBuilder::new(cfg, TemplateRowFactory::new("row", "row_remove"))
		.rows([template(), template()])
		.build();

	let second = &rows.rows()[1];
	let s = second.surface();
	assert_eq!(second.structural_id_raw(), Some("row_1"));
	assert_eq!(s.attribute(ElementId(1), "for"), Some("items_1_label"));
	assert_eq!(s.attribute(ElementId(2), "id"), Some("items_1_label"));
	assert_eq!(s.attribute(ElementId(2), "name"), Some("items[1][label]"));

	let diagnostics = rows.take_diagnostics();
	assert_eq!(diagnostics.len(), 2);
	assert!(diagnostics.iter().all(|d| matches!(
		d,
		Diagnostic::UnrecoverablePriorIndex { found: Some(found), .. } if found == "row___i__"
	)));
}

#[test]
fn ambiguous_attribute_is_left_alone() {
	init();
	let row = Row::new(Fragment::from_spec(
		ElementSpec::new("div")
			.attr("id", "row_1")
			.child(ElementSpec::new("input").attr("name", "items[1]").attr("aria-describedby", "hint_1-1")),
	));
	let id = row.id();
	let mut rows = CollectionBuilder::new(config(r#"field_name = "items""#), TemplateRowFactory::new("row", "row_remove"))
		.rows([row])
		.build();

	let s = rows.rows()[0].surface();
	assert_eq!(s.attribute(ElementId(1), "name"), Some("items[0]"));
	assert_eq!(s.attribute(ElementId(1), "aria-describedby"), Some("hint_1-1"));
	assert_eq!(
		rows.take_diagnostics(),
		[Diagnostic::AmbiguousRewrite {
			row: id,
			element: ElementId(1),
			attribute: "aria-describedby".to_string(),
			value: "hint_1-1".to_string(),
		}]
	);
}
