//! Index matching and rewriting for row attribute values.
//!
//! Given an attribute value, the row's prior index (if known), its new index,
//! and the configured field name, a [`Matcher`] decides whether the value
//! encodes the prior position under a given [`PatternClass`] and computes the
//! rewritten value.
//!
//! When several classes could apply to the same value they are evaluated in
//! [`PatternClass::PRIORITY`] order and only the first match is applied.
//! Rewrites are never stacked on one attribute in one pass.
//!
//! ```
//! use rowset_matcher::{MatchContext, PatternClass, Rewrite, match_and_rewrite};
//!
//! let ctx = MatchContext::new(Some(2), 0, "items");
//! assert_eq!(
//! 	match_and_rewrite("items[2][label]", &ctx, PatternClass::BracketIndex),
//! 	Rewrite::Rewritten("items[0][label]".to_string()),
//! );
//! ```

pub mod bounded;
mod class;

use regex::Regex;
use tracing::warn;

pub use class::PatternClass;


/// Inputs shared by every rewrite in one reindex pass of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext<'a> {
	/// Index recovered from the structural id; `None` when unrecoverable.
	pub prior: Option<usize>,
	/// Index being assigned.
	pub new: usize,
	/// Field name the bracket classes anchor on (`items` in `items[3]`).
	pub field_name: &'a str,
	/// Literal placeholder token, if configured.
	pub token: Option<&'a str>,
}

impl<'a> MatchContext<'a> {
	/// Creates a context without a placeholder token.
	pub fn new(prior: Option<usize>, new: usize, field_name: &'a str) -> Self {
		Self {
			prior,
			new,
			field_name,
			token: None,
		}
	}

	/// Sets the placeholder token. Empty tokens are ignored.
	pub fn with_token(mut self, token: Option<&'a str>) -> Self {
		self.token = token.filter(|t| !t.is_empty());
		self
	}
}

/// Why a value was left alone despite containing the prior index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
	/// The numeral that was searched for.
	pub needle: String,
	/// Byte offsets of every bounded occurrence.
	pub positions: Vec<usize>,
}

/// Outcome of rewriting one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
	/// Nothing to do: no match, or the match already encodes the new index.
	Unchanged,
	/// The value with the new index substituted.
	Rewritten(String),
	/// The value matched at several positions with conflicting context and
	/// must be left untouched.
	Ambiguous(Ambiguity),
}

impl Rewrite {
	/// Returns the rewritten value, if any.
	pub fn into_value(self) -> Option<String> {
		match self {
			Rewrite::Rewritten(v) => Some(v),
			_ => None,
		}
	}
}

/// Result of [`Matcher::rewrite_first`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	/// The first class that matched, if any did.
	pub class: Option<PatternClass>,
	/// What that class produced.
	pub rewrite: Rewrite,
}

/// Raw per-class outcome: a match may still yield the original value.
enum Hit {
	Miss,
	Match(String),
	Ambiguous(Ambiguity),
}

/// Rewriter for one (prior, new, field name) triple.
///
/// Builds the anchored bracket pattern once so it can be reused across every
/// attribute of a row.
#[derive(Debug)]
pub struct Matcher<'a> {
	ctx: MatchContext<'a>,
	bracket: Option<Regex>,
	prior_text: Option<String>,
	new_text: String,
}

impl<'a> Matcher<'a> {
	/// Prepares a matcher for `ctx`.
	pub fn new(ctx: MatchContext<'a>) -> Self {
		let escaped = regex::escape(ctx.field_name);
		let pattern = match ctx.prior {
			Some(prior) => format!(r"^{escaped}\[{prior}\]"),
			None => format!(r"^{escaped}\[[0-9]+\]"),
		};
		let bracket = match Regex::new(&pattern) {
			Ok(re) => Some(re),
			Err(error) => {
				warn!(field = ctx.field_name, %error, "could not build bracket pattern");
				None
			}
		};

		Self {
			ctx,
			bracket,
			prior_text: ctx.prior.map(|p| p.to_string()),
			new_text: ctx.new.to_string(),
		}
	}

	/// Applies one class to `value`.
	pub fn rewrite(&self, value: &str, class: PatternClass) -> Rewrite {
		finish(value, self.hit(value, class))
	}

	/// Applies the first matching class among `classes`, taken in priority
	/// order regardless of the order given. Classes that need the prior index
	/// are skipped when it is unknown.
	pub fn rewrite_first(&self, value: &str, classes: &[PatternClass]) -> Resolution {
		let mut ordered: Vec<PatternClass> = classes
			.iter()
			.copied()
			.filter(|c| self.ctx.prior.is_some() || !c.needs_prior_index())
			.collect();
		ordered.sort_by_key(|c| c.rank());
		ordered.dedup();

		for class in ordered {
			match self.hit(value, class) {
				Hit::Miss => continue,
				hit => {
					return Resolution {
						class: Some(class),
						rewrite: finish(value, hit),
					};
				}
			}
		}
		Resolution {
			class: None,
			rewrite: Rewrite::Unchanged,
		}
	}

	fn hit(&self, value: &str, class: PatternClass) -> Hit {
		match class {
			PatternClass::BracketIndex => self.bracket_index(value),
			PatternClass::PlaceholderToken => self.placeholder(value),
			PatternClass::BoundedNumeral => self.bounded_numeral(value),
			PatternClass::CompositeFieldBinding => self.composite(value),
		}
	}

	fn bracket_index(&self, value: &str) -> Hit {
		let Some(found) = self.bracket.as_ref().and_then(|re| re.find(value)) else {
			return Hit::Miss;
		};
		let rest = &value[found.end()..];
		Hit::Match(format!("{}[{}]{}", self.ctx.field_name, self.new_text, rest))
	}

	fn placeholder(&self, value: &str) -> Hit {
		match self.ctx.token {
			Some(token) if value.contains(token) => Hit::Match(value.replace(token, &self.new_text)),
			_ => Hit::Miss,
		}
	}

	fn bounded_numeral(&self, value: &str) -> Hit {
		let Some(needle) = self.prior_text.as_deref() else {
			return Hit::Miss;
		};
		match bounded::scan(value, needle) {
			bounded::Scan::None => Hit::Miss,
			bounded::Scan::Consistent(occ) => Hit::Match(bounded::splice(value, needle.len(), &occ, &self.new_text)),
			// Already current: nothing would change, so there is nothing to disambiguate.
			bounded::Scan::Conflicting(_) if needle == self.new_text => Hit::Match(value.to_string()),
			bounded::Scan::Conflicting(occ) => Hit::Ambiguous(Ambiguity {
				needle: needle.to_string(),
				positions: occ.iter().map(|o| o.start).collect(),
			}),
		}
	}

	fn composite(&self, value: &str) -> Hit {
		let Some(prior) = self.prior_text.as_deref() else {
			return Hit::Miss;
		};
		let needle = format!("{}[{}]", self.ctx.field_name, prior);
		if !value.contains(&needle) {
			return Hit::Miss;
		}
		let replacement = format!("{}[{}]", self.ctx.field_name, self.new_text);
		Hit::Match(value.replace(&needle, &replacement))
	}
}

fn finish(original: &str, hit: Hit) -> Rewrite {
	match hit {
		Hit::Miss => Rewrite::Unchanged,
		Hit::Match(v) if v == original => Rewrite::Unchanged,
		Hit::Match(v) => Rewrite::Rewritten(v),
		Hit::Ambiguous(a) => Rewrite::Ambiguous(a),
	}
}

/// One-shot form of [`Matcher::rewrite`].
pub fn match_and_rewrite(value: &str, ctx: &MatchContext<'_>, class: PatternClass) -> Rewrite {
	Matcher::new(*ctx).rewrite(value, class)
}
