use crate::ids::ElementId;
use crate::selector::Selector;

/// A row's queryable attribute surface.
///
/// The reindexer never sees markup. It only asks a surface which elements
/// exist, what their attributes hold, and writes new values back. Any
/// structured-document backend can implement this; [`Fragment`] is the
/// in-memory one.
///
/// [`Fragment`]: crate::Fragment
pub trait AttributeSurface {
	/// The row's root element (the one carrying the structural id).
	fn root(&self) -> ElementId;

	/// All elements in document order, root first.
	fn elements(&self) -> Vec<ElementId>;

	/// Lowercase tag name of `el`.
	fn tag(&self, el: ElementId) -> &str;

	/// Value of attribute `name` on `el`, if present.
	fn attribute(&self, el: ElementId, name: &str) -> Option<&str>;

	/// Sets (or adds) attribute `name` on `el`.
	fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

	/// Text content of `el`.
	fn text(&self, el: ElementId) -> &str;

	/// Replaces the text content of `el`.
	fn set_text(&mut self, el: ElementId, text: &str);

	/// Every element carrying attribute `name`, with its current value.
	fn find_all(&self, name: &str) -> Vec<(ElementId, String)> {
		self.elements()
			.into_iter()
			.filter_map(|el| self.attribute(el, name).map(|v| (el, v.to_string())))
			.collect()
	}

	/// Every element matching `selector`, in document order.
	fn select(&self, selector: &Selector) -> Vec<ElementId> {
		self.elements()
			.into_iter()
			.filter(|&el| selector.matches(self, el))
			.collect()
	}
}
