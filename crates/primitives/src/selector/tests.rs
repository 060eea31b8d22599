use rstest::rstest;

use super::*;
use crate::fragment::{ElementSpec, Fragment};

fn control() -> Fragment {
	Fragment::from_spec(
		ElementSpec::new("button")
			.attr("id", "remove_0")
			.attr("class", "btn row_remove")
			.attr("data-index", "0"),
	)
}

#[rstest]
#[case(".row_remove", true)]
#[case(".btn.row_remove", true)]
#[case("button.row_remove", true)]
#[case("BUTTON", true)]
#[case("*[data-index]", true)]
#[case("[data-index=0]", true)]
#[case("[data-index=\"0\"]", true)]
#[case("[data-index='1']", false)]
#[case("#remove_0", true)]
#[case("a.row_remove", false)]
#[case(".row", false)]
#[case("a, .row_remove", true)]
fn matches_compound_selectors(#[case] source: &str, #[case] expected: bool) {
	let frag = control();
	let selector = Selector::parse(source).expect("valid selector");
	assert_eq!(selector.matches(&frag, ElementId::ROOT), expected, "{source}");
}

#[rstest]
#[case("", SelectorError::Empty)]
#[case("a,", SelectorError::Empty)]
#[case(".", SelectorError::ExpectedName(1))]
#[case("[data-index", SelectorError::Unterminated(0))]
#[case("div > span", SelectorError::Unexpected { ch: ' ', offset: 3 })]
fn rejects_malformed(#[case] source: &str, #[case] expected: SelectorError) {
	assert_eq!(Selector::parse(source), Err(expected));
}

#[test]
fn primary_class_is_first_class() {
	let selector = Selector::parse("button.row_remove.btn").expect("valid selector");
	assert_eq!(selector.primary_class(), Some("row_remove"));
	assert_eq!(Selector::parse("[data-index]").expect("valid").primary_class(), None);
}

#[test]
fn display_is_source() {
	let selector: Selector = ".row_remove".parse().expect("valid selector");
	assert_eq!(selector.to_string(), ".row_remove");
}
