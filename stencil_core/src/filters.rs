use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// A template path with its `(tag)` filter annotations separated out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredName {
	/// The path with every `(tag)` group removed.
	pub name: String,
	/// Tags in left-to-right order of appearance. Duplicates are kept.
	pub filters: Vec<String>,
}

impl FilteredName {
	/// Whether this file should be emitted given the enabled filters.
	pub fn is_usable(&self, filters: &FilterSet) -> bool {
		is_usable(&self.filters, filters)
	}
}

/// Mapping of filter tag to whether it is enabled.
///
/// ```toml
/// [filters]
/// docker = true
/// ci = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, bool>);

impl FilterSet {
	/// Set a tag on or off, replacing any previous value.
	pub fn set(&mut self, tag: impl Into<String>, enabled: bool) {
		self.0.insert(tag.into(), enabled);
	}

	pub fn is_enabled(&self, tag: &str) -> bool {
		self.0.get(tag).copied().unwrap_or(false)
	}

	/// Tags whose value is `true`.
	pub fn enabled(&self) -> BTreeSet<&str> {
		self.0
			.iter()
			.filter(|(_, enabled)| **enabled)
			.map(|(tag, _)| tag.as_str())
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<S: Into<String>> FromIterator<(S, bool)> for FilterSet {
	fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(tag, enabled)| (tag.into(), enabled))
				.collect(),
		)
	}
}

impl<S: Into<String>> Extend<(S, bool)> for FilterSet {
	fn extend<T: IntoIterator<Item = (S, bool)>>(&mut self, iter: T) {
		for (tag, enabled) in iter {
			self.set(tag, enabled);
		}
	}
}

/// Split `(tag)` annotations out of a template path.
///
/// Every parenthesised group with non-empty contents is removed from the
/// path and its contents collected, so `foo(bar)(baz)/qux.txt` becomes
/// `foo/qux.txt` with filters `["bar", "baz"]`. Empty groups `()` and
/// unclosed parentheses are left in the path untouched.
pub fn parse_filter_name(raw: &str) -> FilteredName {
	let mut name = String::with_capacity(raw.len());
	let mut filters = Vec::new();
	let mut rest = raw;

	while let Some(open) = rest.find('(') {
		let after = &rest[open + 1..];
		match after.find(')') {
			Some(close) if close > 0 => {
				name.push_str(&rest[..open]);
				filters.push(after[..close].to_string());
				rest = &after[close + 1..];
			}
			_ => {
				name.push_str(&rest[..=open]);
				rest = after;
			}
		}
	}

	name.push_str(rest);
	FilteredName { name, filters }
}

/// Whether a file annotated with `filters` should be emitted.
///
/// Files without filters are always usable. Otherwise every tag must be
/// enabled in `enabled`; a repeated tag only needs to be enabled once.
pub fn is_usable(filters: &[String], enabled: &FilterSet) -> bool {
	if filters.is_empty() {
		return true;
	}

	let enabled = enabled.enabled();
	filters.iter().all(|tag| enabled.contains(tag.as_str()))
}
