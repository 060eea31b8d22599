use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::ids::ElementId;
use crate::surface::AttributeSurface;


/// Declarative description of an element subtree.
///
/// Used by row factories and tests to build a [`Fragment`] without juggling
/// element handles.
///
/// ```
/// use rowset_primitives::ElementSpec;
///
/// let spec = ElementSpec::new("div")
/// 	.attr("id", "row_0")
/// 	.child(ElementSpec::new("input").attr("name", "items[0]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
	tag: String,
	attrs: Vec<(String, String)>,
	text: String,
	children: Vec<ElementSpec>,
}

impl ElementSpec {
	/// Starts an element with the given tag.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into().to_ascii_lowercase(),
			attrs: Vec::new(),
			text: String::new(),
			children: Vec::new(),
		}
	}

	/// Adds an attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Sets the text content.
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	/// Appends a child element.
	pub fn child(mut self, child: ElementSpec) -> Self {
		self.children.push(child);
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
	tag: String,
	attrs: IndexMap<String, String>,
	text: String,
	parent: Option<ElementId>,
	children: SmallVec<[ElementId; 4]>,
}

/// An in-memory element tree: the default [`AttributeSurface`].
///
/// Elements live in an arena; slot 0 is always the root. Attributes keep their
/// insertion order so rendered output is stable across reindex passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
	nodes: Vec<Node>,
}

impl Fragment {
	/// Creates a fragment holding a single empty root element.
	pub fn new(tag: impl Into<String>) -> Self {
		Self::from_spec(ElementSpec::new(tag))
	}

	/// Builds a fragment from a declarative spec; the spec's element is the root.
	pub fn from_spec(spec: ElementSpec) -> Self {
		let mut fragment = Self { nodes: Vec::new() };
		fragment.push_spec(spec, None);
		fragment
	}

	fn push_spec(&mut self, spec: ElementSpec, parent: Option<ElementId>) -> ElementId {
		let id = ElementId(self.nodes.len());
		self.nodes.push(Node {
			tag: spec.tag,
			attrs: spec.attrs.into_iter().collect(),
			text: spec.text,
			parent,
			children: SmallVec::new(),
		});
		if let Some(parent) = parent {
			self.nodes[parent.0].children.push(id);
		}
		for child in spec.children {
			self.push_spec(child, Some(id));
		}
		id
	}

	/// Appends a subtree under `parent` and returns the new subtree's root.
	pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
		self.push_spec(spec, Some(parent))
	}

	/// Number of elements, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// A fragment always has a root, so this is never true.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Parent of `el`, `None` for the root.
	pub fn parent(&self, el: ElementId) -> Option<ElementId> {
		self.nodes.get(el.0).and_then(|n| n.parent)
	}

	/// Direct children of `el`.
	pub fn children(&self, el: ElementId) -> &[ElementId] {
		self.nodes.get(el.0).map_or(&[][..], |n| n.children.as_slice())
	}

	/// Removes attribute `name` from `el`, returning its old value.
	pub fn remove_attribute(&mut self, el: ElementId, name: &str) -> Option<String> {
		self.nodes.get_mut(el.0)?.attrs.shift_remove(name)
	}

	/// Attributes of `el` in insertion order.
	pub fn attributes(&self, el: ElementId) -> impl Iterator<Item = (&str, &str)> {
		self.nodes
			.get(el.0)
			.into_iter()
			.flat_map(|n| n.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
	}

	/// First element (document order) whose `name` attribute equals `name`.
	pub fn by_name(&self, name: &str) -> Option<ElementId> {
		self.elements()
			.into_iter()
			.find(|&el| self.attribute(el, "name") == Some(name))
	}

	fn walk(&self, el: ElementId, out: &mut Vec<ElementId>) {
		out.push(el);
		for &child in &self.nodes[el.0].children {
			self.walk(child, out);
		}
	}
}

impl AttributeSurface for Fragment {
	fn root(&self) -> ElementId {
		ElementId::ROOT
	}

	fn elements(&self) -> Vec<ElementId> {
		let mut out = Vec::with_capacity(self.nodes.len());
		if !self.nodes.is_empty() {
			self.walk(ElementId::ROOT, &mut out);
		}
		out
	}

	fn tag(&self, el: ElementId) -> &str {
		self.nodes.get(el.0).map_or("", |n| n.tag.as_str())
	}

	fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
		self.nodes.get(el.0)?.attrs.get(name).map(String::as_str)
	}

	fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
		if let Some(node) = self.nodes.get_mut(el.0) {
			match node.attrs.get_mut(name) {
				Some(existing) => value.clone_into(existing),
				None => {
					node.attrs.insert(name.to_string(), value.to_string());
				}
			}
		}
	}

	fn text(&self, el: ElementId) -> &str {
		self.nodes.get(el.0).map_or("", |n| n.text.as_str())
	}

	fn set_text(&mut self, el: ElementId, text: &str) {
		if let Some(node) = self.nodes.get_mut(el.0) {
			text.clone_into(&mut node.text);
		}
	}
}
