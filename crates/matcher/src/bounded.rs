//! Standalone numeral scanning.
//!
//! Occurrences are located and boundary-checked against the original value in
//! a single pass, and the replacement is assembled from those byte ranges
//! afterwards. Nothing is re-scanned mid-replacement, so a new index whose
//! digit count differs from the prior one can never create a fresh match.

use memchr::memmem;

/// One bounded occurrence of the needle inside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
	/// Byte offset of the first digit.
	pub start: usize,
	/// Character immediately before the numeral, `None` at the value start.
	pub lead: Option<char>,
	/// Byte offset of the whitespace-separated token holding the numeral.
	pub token: usize,
}

/// Result of scanning a value for a bounded numeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
	/// No bounded occurrence.
	None,
	/// One or more occurrences, each token using a single leading context.
	Consistent(Vec<Occurrence>),
	/// One token holds several occurrences introduced by different
	/// characters; which one is the row index cannot be decided safely.
	Conflicting(Vec<Occurrence>),
}

/// Finds every occurrence of `needle` (all ASCII digits) bounded by non-digits
/// or the value edges.
///
/// Leads are only compared within a whitespace-separated token, so id lists
/// such as `help-1 error_1` mixing separators across entries stay consistent.
pub fn scan(value: &str, needle: &str) -> Scan {
	debug_assert!(!needle.is_empty() && needle.bytes().all(|b| b.is_ascii_digit()));

	let bytes = value.as_bytes();
	let found: Vec<Occurrence> = memmem::find_iter(bytes, needle.as_bytes())
		.filter(|&start| {
			let end = start + needle.len();
			let before_ok = start == 0 || !bytes[start - 1].is_ascii_digit();
			let after_ok = end == bytes.len() || !bytes[end].is_ascii_digit();
			before_ok && after_ok
		})
		.map(|start| Occurrence {
			start,
			lead: value[..start].chars().next_back(),
			token: token_start(value, start),
		})
		.collect();

	if found.is_empty() {
		return Scan::None;
	}
	let conflicting = found
		.iter()
		.enumerate()
		.any(|(i, a)| found[i + 1..].iter().any(|b| a.token == b.token && a.lead != b.lead));
	if conflicting { Scan::Conflicting(found) } else { Scan::Consistent(found) }
}

fn token_start(value: &str, at: usize) -> usize {
	value[..at]
		.char_indices()
		.rev()
		.find(|(_, c)| c.is_whitespace())
		.map_or(0, |(i, c)| i + c.len_utf8())
}

/// Replaces each occurrence (found by [`scan`] on the same `value`) with
/// `replacement`.
pub fn splice(value: &str, needle_len: usize, occurrences: &[Occurrence], replacement: &str) -> String {
	let mut out = String::with_capacity(value.len() + occurrences.len() * replacement.len());
	let mut cursor = 0;
	for occ in occurrences {
		out.push_str(&value[cursor..occ.start]);
		out.push_str(replacement);
		cursor = occ.start + needle_len;
	}
	out.push_str(&value[cursor..]);
	out
}
