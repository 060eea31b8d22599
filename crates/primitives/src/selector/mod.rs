use smallvec::SmallVec;
use thiserror::Error;

use crate::ids::ElementId;
use crate::surface::AttributeSurface;

#[cfg(test)]
mod tests;

/// Errors produced while parsing a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
	/// The selector (or one of its comma-separated parts) was empty.
	#[error("empty selector")]
	Empty,
	/// A `.`, `#` or `[` was not followed by a name.
	#[error("expected a name at offset {0}")]
	ExpectedName(usize),
	/// An attribute condition was not closed with `]`.
	#[error("unterminated attribute condition starting at offset {0}")]
	Unterminated(usize),
	/// A character that has no meaning in a simple selector.
	#[error("unexpected character {ch:?} at offset {offset}")]
	Unexpected {
		/// The offending character.
		ch: char,
		/// Byte offset into the selector source.
		offset: usize,
	},
}

/// One condition of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
	Class(String),
	Id(String),
	Has(String),
	Equals(String, String),
}

/// A tag plus conditions that must all hold for one element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
	tag: Option<String>,
	conditions: SmallVec<[Condition; 2]>,
}

/// A comma-separated list of compound simple selectors.
///
/// Supports tag names, `*`, `.class`, `#id`, `[attr]` and `[attr=value]`
/// (value optionally quoted). There are no combinators: selectors only ever
/// test a single element, and descendant scoping comes from the surface being
/// queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	source: String,
	alternatives: SmallVec<[Compound; 1]>,
}

impl Selector {
	/// Parses a selector such as `.row_remove` or `button[data-index]`.
	pub fn parse(source: &str) -> Result<Self, SelectorError> {
		let mut alternatives = SmallVec::new();
		let mut offset = 0;
		for part in source.split(',') {
			let trimmed = part.trim();
			let lead = part.len() - part.trim_start().len();
			if trimmed.is_empty() {
				return Err(SelectorError::Empty);
			}
			alternatives.push(parse_compound(trimmed, offset + lead)?);
			offset += part.len() + 1;
		}
		Ok(Self {
			source: source.to_string(),
			alternatives,
		})
	}

	/// A selector matching elements carrying class `name`.
	pub fn class(name: &str) -> Self {
		let mut compound = Compound::default();
		compound.conditions.push(Condition::Class(name.to_string()));
		Self {
			source: format!(".{name}"),
			alternatives: smallvec::smallvec![compound],
		}
	}

	/// Returns the source text this selector was parsed from.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Returns the first class name of the first alternative, if any.
	///
	/// Row templates use this to stamp removal controls with the class the
	/// selector looks for.
	pub fn primary_class(&self) -> Option<&str> {
		self.alternatives.first()?.conditions.iter().find_map(|c| match c {
			Condition::Class(name) => Some(name.as_str()),
			_ => None,
		})
	}

	/// Tests whether `el` on `surface` satisfies any alternative.
	pub fn matches<S: AttributeSurface + ?Sized>(&self, surface: &S, el: ElementId) -> bool {
		self.alternatives.iter().any(|compound| compound_matches(compound, surface, el))
	}
}

impl std::str::FromStr for Selector {
	type Err = SelectorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl std::fmt::Display for Selector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.source)
	}
}

fn compound_matches<S: AttributeSurface + ?Sized>(compound: &Compound, surface: &S, el: ElementId) -> bool {
	if let Some(tag) = &compound.tag
		&& !surface.tag(el).eq_ignore_ascii_case(tag)
	{
		return false;
	}
	compound.conditions.iter().all(|cond| match cond {
		Condition::Class(name) => surface
			.attribute(el, "class")
			.is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == name)),
		Condition::Id(id) => surface.attribute(el, "id") == Some(id.as_str()),
		Condition::Has(attr) => surface.attribute(el, attr).is_some(),
		Condition::Equals(attr, value) => surface.attribute(el, attr) == Some(value.as_str()),
	})
}

fn is_name_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn take_name(src: &str, start: usize) -> Result<(&str, usize), SelectorError> {
	let end = src[start..]
		.find(|c: char| !is_name_char(c))
		.map_or(src.len(), |n| start + n);
	if end == start {
		return Err(SelectorError::ExpectedName(start));
	}
	Ok((&src[start..end], end))
}

fn parse_compound(src: &str, base: usize) -> Result<Compound, SelectorError> {
	let shift = |e: SelectorError| match e {
		SelectorError::ExpectedName(o) => SelectorError::ExpectedName(o + base),
		SelectorError::Unterminated(o) => SelectorError::Unterminated(o + base),
		SelectorError::Unexpected { ch, offset } => SelectorError::Unexpected {
			ch,
			offset: offset + base,
		},
		SelectorError::Empty => SelectorError::Empty,
	};

	let mut compound = Compound::default();
	let mut pos = 0;

	if src.starts_with('*') {
		pos = 1;
	} else if src.starts_with(is_name_char) {
		let (tag, end) = take_name(src, 0).map_err(shift)?;
		compound.tag = Some(tag.to_ascii_lowercase());
		pos = end;
	}

	while pos < src.len() {
		let Some(ch) = src[pos..].chars().next() else {
			break;
		};
		match ch {
			'.' => {
				let (name, end) = take_name(src, pos + 1).map_err(shift)?;
				compound.conditions.push(Condition::Class(name.to_string()));
				pos = end;
			}
			'#' => {
				let (name, end) = take_name(src, pos + 1).map_err(shift)?;
				compound.conditions.push(Condition::Id(name.to_string()));
				pos = end;
			}
			'[' => {
				let close = src[pos..]
					.find(']')
					.map(|n| pos + n)
					.ok_or(SelectorError::Unterminated(pos + base))?;
				let (attr, end) = take_name(src, pos + 1).map_err(shift)?;
				let rest = src[end..close].trim();
				if rest.is_empty() {
					compound.conditions.push(Condition::Has(attr.to_string()));
				} else if let Some(value) = rest.strip_prefix('=') {
					let value = value.trim();
					let value = value
						.strip_prefix('"')
						.and_then(|v| v.strip_suffix('"'))
						.or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
						.unwrap_or(value);
					compound
						.conditions
						.push(Condition::Equals(attr.to_string(), value.to_string()));
				} else {
					let bad = src[end..].chars().next().unwrap_or(']');
					return Err(SelectorError::Unexpected {
						ch: bad,
						offset: end + base,
					});
				}
				pos = close + 1;
			}
			other => {
				return Err(SelectorError::Unexpected {
					ch: other,
					offset: pos + base,
				});
			}
		}
	}

	Ok(compound)
}
