use crate::fragment::Fragment;
use crate::ids::RowId;
use crate::structural::StructuralId;
use crate::surface::AttributeSurface;

/// One repeatable unit of a row collection.
///
/// A row pairs a stable [`RowId`] with the attribute surface holding its
/// elements. It deliberately stores no index: the position is owned by the
/// collection and mirrored into the surface's structural id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<S = Fragment> {
	id: RowId,
	surface: S,
}

impl<S: AttributeSurface> Row<S> {
	/// Wraps a surface in a row with a fresh id.
	pub fn new(surface: S) -> Self {
		Self {
			id: RowId::next(),
			surface,
		}
	}

	/// The row's stable identity.
	pub fn id(&self) -> RowId {
		self.id
	}

	/// Read access to the row's elements.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Write access to the row's elements.
	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Raw value of the root's `id` attribute.
	pub fn structural_id_raw(&self) -> Option<&str> {
		self.surface.attribute(self.surface.root(), "id")
	}

	/// Parses the root's `id` as a structural id under `prefix`.
	pub fn structural_id(&self, prefix: &str) -> Option<StructuralId> {
		StructuralId::parse(prefix, self.structural_id_raw()?)
	}

	/// Value of the first `name`-matching element's `value` attribute, trimmed.
	///
	/// Empty values count as absent.
	pub fn field_value(&self, field_name: &str) -> Option<&str> {
		let surface = &self.surface;
		surface
			.elements()
			.into_iter()
			.find(|&el| surface.attribute(el, "name") == Some(field_name))
			.and_then(|el| surface.attribute(el, "value"))
			.map(str::trim)
			.filter(|v| !v.is_empty())
	}

	/// Whether any element carries `name="<field_name>"`.
	pub fn has_field(&self, field_name: &str) -> bool {
		let surface = &self.surface;
		surface
			.elements()
			.into_iter()
			.any(|el| surface.attribute(el, "name") == Some(field_name))
	}
}
