use std::path::PathBuf;

use regex::Regex;

use crate::StencilError;
use crate::StencilResult;

/// A request to splice lines into a body of text after a marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
	/// The text to rewrite.
	pub haystack: String,
	/// Literal substring identifying the line to insert after.
	pub marker: String,
	/// Lines to insert, in order. Each line is indented to match the marker
	/// line.
	pub splicable: Vec<String>,
}

impl RewriteRequest {
	pub fn new<I, S>(haystack: impl Into<String>, marker: impl Into<String>, splicable: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			haystack: haystack.into(),
			marker: marker.into(),
			splicable: splicable.into_iter().map(Into::into).collect(),
		}
	}
}

/// A request to splice lines into a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteFileRequest {
	/// Directory the file is resolved against. Defaults to the current
	/// working directory.
	pub base_dir: Option<PathBuf>,
	/// Path of the file, relative to `base_dir`.
	pub file: PathBuf,
	/// Literal substring identifying the line to insert after.
	pub marker: String,
	/// Lines to insert, in order.
	pub splicable: Vec<String>,
}

/// Splice `request.splicable` into `request.haystack` immediately after the
/// last line containing `request.marker`.
///
/// The inserted lines are prefixed with the same number of leading spaces as
/// the marker line. The haystack is returned unchanged when:
///
/// - the lines are already present (consecutive, each allowed any leading
///   whitespace), which makes the operation idempotent;
/// - no line contains the marker;
/// - there is nothing to insert.
pub fn rewrite(request: &RewriteRequest) -> String {
	if request.splicable.is_empty() {
		return request.haystack.clone();
	}

	if is_already_spliced(&request.haystack, &request.splicable) {
		tracing::debug!(marker = %request.marker, "splice already present, skipping");
		return request.haystack.clone();
	}

	let mut lines: Vec<&str> = request.haystack.split('\n').collect();
	let Some(index) = find_marker_line(&lines, &request.marker) else {
		tracing::debug!(marker = %request.marker, "marker not found, skipping");
		return request.haystack.clone();
	};

	let indent = " ".repeat(leading_spaces(lines[index]));
	let block = request
		.splicable
		.iter()
		.map(|line| format!("{indent}{line}"))
		.collect::<Vec<_>>()
		.join("\n");

	lines.insert(index + 1, &block);
	lines.join("\n")
}

/// Read a file, splice lines into it with [`rewrite`] and write the result
/// back to the same path.
///
/// Returns `true` when the content changed. The file is always rewritten in
/// full, even when nothing was inserted.
pub fn rewrite_file(request: &RewriteFileRequest) -> StencilResult<bool> {
	if request.splicable.is_empty() {
		return Err(StencilError::EmptySplicable(request.marker.clone()));
	}

	let base_dir = match &request.base_dir {
		Some(dir) => dir.clone(),
		None => std::env::current_dir()?,
	};
	let full_path = base_dir.join(&request.file);
	let splice = RewriteRequest {
		haystack: std::fs::read_to_string(&full_path)?,
		marker: request.marker.clone(),
		splicable: request.splicable.clone(),
	};

	let body = rewrite(&splice);
	let changed = body != splice.haystack;
	std::fs::write(&full_path, body)?;

	tracing::debug!(path = %full_path.display(), changed, "rewrote file");
	Ok(changed)
}

/// Index of the last line containing `marker` as a substring.
///
/// When several lines contain the marker the last one wins.
pub fn find_marker_line(lines: &[&str], marker: &str) -> Option<usize> {
	lines.iter().rposition(|line| line.contains(marker))
}

/// Whether `splicable` already appears in `haystack` as consecutive lines,
/// each optionally preceded by whitespace.
pub fn is_already_spliced(haystack: &str, splicable: &[String]) -> bool {
	let pattern = splicable
		.iter()
		.map(|line| format!(r"\s*{}", regex::escape(line)))
		.collect::<Vec<_>>()
		.join("\n");

	match Regex::new(&pattern) {
		Ok(matcher) => matcher.is_match(haystack),
		// Only reachable when the pattern exceeds the regex size limit.
		Err(_) => haystack.contains(&splicable.join("\n")),
	}
}

/// Number of leading ASCII spaces. Tabs are not counted.
fn leading_spaces(line: &str) -> usize {
	line.bytes().take_while(|byte| *byte == b' ').count()
}
