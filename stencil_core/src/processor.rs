use std::path::Path;
use std::path::PathBuf;

use crate::FilterSet;
use crate::StencilError;
use crate::StencilResult;
use crate::filters::parse_filter_name;

/// Placeholder in template file names replaced by the project name.
pub const NAME_PLACEHOLDER: &str = "name";

/// Leading character of a template file name that is stripped from the
/// destination file name.
pub const HIDDEN_MARKER: char = '_';

/// Leading character of a template file name that forces a verbatim copy
/// instead of template rendering. Stripped from the destination file name.
pub const FORCE_COPY_MARKER: char = '!';

/// Pattern used to enumerate every file of a template directory.
pub const ALL_FILES_PATTERN: &str = "**";

/// Capabilities a host generator provides to [`process_directory`].
///
/// The processor never mutates the host configuration. `copy` and
/// `template` take `&mut self` so hosts can record or buffer writes.
pub trait Generator {
	/// Project name substituted for [`NAME_PLACEHOLDER`] in file names.
	fn name(&self) -> Option<&str>;

	/// Base directory relative template sources are resolved against.
	fn source_root(&self) -> &Path;

	fn is_path_absolute(&self, path: &Path) -> bool {
		path.is_absolute()
	}

	/// Filter tags and whether each is enabled.
	fn filters(&self) -> &FilterSet;

	/// Every file under `root` matching `pattern`, dot-files included, as
	/// paths relative to `root`.
	fn expand_files(&self, root: &Path, pattern: &str) -> StencilResult<Vec<PathBuf>>;

	/// Copy `src` to `dest` verbatim.
	fn copy(&mut self, src: &Path, dest: &Path) -> StencilResult<()>;

	/// Render `src` as a template and write the output to `dest`.
	fn template(&mut self, src: &Path, dest: &Path) -> StencilResult<()>;
}

/// Where a template file ends up and how it gets there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
	pub path: PathBuf,
	/// `true` when the file is copied verbatim rather than rendered.
	pub copy: bool,
}

/// Outcome of [`process_directory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
	/// Destination paths written by a verbatim copy.
	pub copied: Vec<PathBuf>,
	/// Destination paths written by template rendering.
	pub templated: Vec<PathBuf>,
	/// Source paths, relative to the template root, left out by filters.
	pub skipped: Vec<PathBuf>,
}

impl ProcessSummary {
	/// Number of files written.
	pub fn written(&self) -> usize {
		self.copied.len() + self.templated.len()
	}
}

/// Stamp out the template directory `source` into `destination`.
///
/// `source` is resolved against [`Generator::source_root`] unless it is
/// absolute. For each enumerated file the `(tag)` annotations are stripped
/// from its path, the first `name` substring is replaced with the project
/// name, and leading [`HIDDEN_MARKER`] / [`FORCE_COPY_MARKER`] characters are
/// stripped from the destination file name. Files whose filters are not all
/// enabled are skipped. Every other file is copied or rendered through the
/// host, in enumeration order. The first host error aborts processing.
#[tracing::instrument(level = "debug", skip(host))]
pub fn process_directory<G: Generator + ?Sized>(
	host: &mut G,
	source: &Path,
	destination: &Path,
) -> StencilResult<ProcessSummary> {
	let root = if host.is_path_absolute(source) {
		source.to_path_buf()
	} else {
		host.source_root().join(source)
	};

	let files = host.expand_files(&root, ALL_FILES_PATTERN)?;
	let mut summary = ProcessSummary::default();

	for relative in files {
		let filtered = parse_filter_name(&relative_file_key(&relative));
		if !filtered.is_usable(host.filters()) {
			tracing::debug!(file = %relative.display(), filters = ?filtered.filters, "skipping filtered file");
			summary.skipped.push(relative);
			continue;
		}

		let resolved = match host.name().filter(|name| !name.is_empty()) {
			Some(project) => substitute_name(&filtered.name, project),
			None => filtered.name.clone(),
		};
		let target = resolve_destination(destination, &resolved)?;

		let src = root.join(&relative);
		if target.copy {
			tracing::debug!(src = %src.display(), dest = %target.path.display(), "copying");
			host.copy(&src, &target.path)?;
			summary.copied.push(target.path);
		} else {
			tracing::debug!(src = %src.display(), dest = %target.path.display(), "templating");
			host.template(&src, &target.path)?;
			summary.templated.push(target.path);
		}
	}

	tracing::info!(
		root = %root.display(),
		copied = summary.copied.len(),
		templated = summary.templated.len(),
		skipped = summary.skipped.len(),
		"processed template directory"
	);

	Ok(summary)
}

/// Replace the first occurrence of [`NAME_PLACEHOLDER`] anywhere in `name`.
///
/// This is a plain substring match, so `filename.txt` is affected too.
pub fn substitute_name(name: &str, project: &str) -> String {
	name.replacen(NAME_PLACEHOLDER, project, 1)
}

/// Join `resolved_name` onto `destination_dir` and strip the marker
/// characters from the resulting file name.
///
/// The hidden marker is checked first, then the force-copy marker against
/// the possibly already stripped name, so `_!file` becomes `file` and is
/// copied. Only the file name is touched, never a directory component.
pub fn resolve_destination(destination_dir: &Path, resolved_name: &str) -> StencilResult<Destination> {
	let mut path = destination_dir.join(resolved_name);
	let mut copy = false;

	let file_name = base_name(&path)?;
	if let Some(stripped) = file_name.strip_prefix(HIDDEN_MARKER) {
		path.set_file_name(stripped);
	}

	let file_name = base_name(&path)?;
	if let Some(stripped) = file_name.strip_prefix(FORCE_COPY_MARKER) {
		path.set_file_name(stripped);
		copy = true;
	}

	Ok(Destination { path, copy })
}

fn base_name(path: &Path) -> StencilResult<String> {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.ok_or_else(|| StencilError::MissingFileName(path.display().to_string()))
}

/// Relative path rendered with `/` separators.
///
/// Non UTF-8 components are converted lossily, so such a template file is
/// written to a destination containing U+FFFD in place of the invalid bytes.
pub(crate) fn relative_file_key(path: &Path) -> String {
	path.to_string_lossy().replace('\\', "/")
}
