//! Capacity policy for the add affordance.

use tracing::debug;

use crate::collab::AddControl;

/// Capacity state after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
	/// More rows may be added.
	Available {
		/// How many more rows fit.
		remaining: usize,
	},
	/// The collection is at (or above) its maximum.
	Full,
}

/// Enables or disables the add affordance from the collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
	max: usize,
}

impl CapacityPolicy {
	/// Creates a policy allowing at most `max` rows.
	pub fn new(max: usize) -> Self {
		Self { max }
	}

	/// Configured maximum.
	pub fn max(&self) -> usize {
		self.max
	}

	/// Whether a row may be added to a collection of `len` rows.
	pub fn allows_add(&self, len: usize) -> bool {
		len < self.max
	}

	/// Capacity for a collection of `len` rows.
	pub fn capacity(&self, len: usize) -> Capacity {
		match self.max.checked_sub(len) {
			Some(remaining) if remaining > 0 => Capacity::Available { remaining },
			_ => Capacity::Full,
		}
	}

	/// Evaluates `len` and toggles `control` accordingly.
	pub fn evaluate(&self, len: usize, control: &mut dyn AddControl) -> Capacity {
		let capacity = self.capacity(len);
		let enabled = matches!(capacity, Capacity::Available { .. });
		debug!(len, max = self.max, enabled, "capacity evaluated");
		control.set_enabled(enabled);
		capacity
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[derive(Default)]
	struct Button(Vec<bool>);

	impl AddControl for Button {
		fn set_enabled(&mut self, enabled: bool) {
			self.0.push(enabled);
		}
	}

	#[rstest]
	#[case(0, Capacity::Available { remaining: 3 })]
	#[case(2, Capacity::Available { remaining: 1 })]
	#[case(3, Capacity::Full)]
	#[case(5, Capacity::Full)]
	fn capacity_from_len(#[case] len: usize, #[case] expected: Capacity) {
		assert_eq!(CapacityPolicy::new(3).capacity(len), expected);
		assert_eq!(CapacityPolicy::new(3).allows_add(len), expected != Capacity::Full);
	}

	#[test]
	fn evaluate_toggles_control() {
		let policy = CapacityPolicy::new(2);
		let mut button = Button::default();
		policy.evaluate(1, &mut button);
		policy.evaluate(2, &mut button);
		policy.evaluate(1, &mut button);
		assert_eq!(button.0, [true, false, true]);
	}
}
