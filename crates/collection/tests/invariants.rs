//! Contiguity over arbitrary add/remove sequences.

use proptest::prelude::*;
use rowset_collection::{Collection, CollectionError, Removal};
use rowset_config::Config;
use rowset_primitives::{AttributeSurface, ElementId, RowId};

#[derive(Debug, Clone)]
enum Op {
	Add,
	Remove(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
	prop::collection::vec(prop_oneof![3 => Just(Op::Add), 2 => (0usize..16).prop_map(Op::Remove)], 0..40)
}

fn check_contiguous(rows: &Collection) -> Result<(), TestCaseError> {
	for (i, row) in rows.rows().iter().enumerate() {
		let s = row.surface();
		prop_assert_eq!(row.structural_id_raw().map(str::to_string), Some(format!("row_{i}")));
		prop_assert_eq!(s.text(ElementId(1)), (i + 1).to_string());
		prop_assert_eq!(s.attribute(ElementId(2), "name").map(str::to_string), Some(format!("items[{i}]")));
		prop_assert_eq!(s.attribute(ElementId(3), "data-index").map(str::to_string), Some(i.to_string()));
	}
	Ok(())
}

proptest! {
	/// Every operation leaves indices `0..n` in document order, and survivors
	/// keep their relative order.
	#[test]
	fn indices_stay_contiguous(ops in arb_ops()) {
		let config = Config::parse("field_name = \"items\"\nmax_rows = 6").expect("valid config");
		let mut rows = Collection::new(config);
		let mut model: Vec<RowId> = Vec::new();

		for op in ops {
			match op {
				Op::Add => match rows.add() {
					Ok(id) => model.push(id),
					Err(CollectionError::CapacityExceeded { max, len }) => {
						prop_assert_eq!((max, len), (6, model.len()));
					}
					Err(other) => prop_assert!(false, "unexpected error: {other}"),
				},
				Op::Remove(k) if !model.is_empty() => {
					let id = model.remove(k % model.len());
					prop_assert_eq!(rows.begin_removal(id), Ok(Removal::Completed));
				}
				Op::Remove(_) => {}
			}
			let ids: Vec<RowId> = rows.rows().iter().map(|r| r.id()).collect();
			prop_assert_eq!(&ids, &model);
			check_contiguous(&rows)?;
		}

		let reports = rows.reindex_all();
		prop_assert!(reports.iter().all(|r| !r.changed()));
		prop_assert!(rows.diagnostics().is_empty());
	}
}
