//! Relative path helpers for generated module references.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::processor::relative_file_key;

const INDEX_MODULE_SUFFIX: &str = "/index.js";

/// Module reference to `to_file` as written from inside `from_file`.
///
/// The path is relative to the directory containing `from_file`, uses `/`
/// separators, starts with `./` unless it climbs with `..`, and drops a
/// trailing `/index.js` so the directory itself is referenced.
///
/// Returns `None` when the path cannot be computed lexically, see
/// [`relative_path`].
///
/// ```rust
/// use std::path::Path;
/// use stencil_core::paths::relative_require;
///
/// let reference = relative_require(
/// 	Path::new("client/app/app.js"),
/// 	Path::new("client/components/nav/index.js"),
/// );
/// assert_eq!(reference.as_deref(), Some("../components/nav"));
/// ```
pub fn relative_require(from_file: &Path, to_file: &Path) -> Option<String> {
	let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
	let relative = relative_file_key(&relative_path(from_dir, to_file)?);

	let reference = if relative.starts_with("..") {
		relative
	} else {
		format!("./{relative}")
	};

	match reference.strip_suffix(INDEX_MODULE_SUFFIX) {
		Some(stripped) => Some(stripped.to_string()),
		None => Some(reference),
	}
}

/// Lexical path from the directory `from` to `to`.
///
/// Both paths should share the same base: both absolute, or both relative
/// to the same directory. `.` and `..` components are resolved without
/// touching the filesystem.
///
/// Returns `None` when `from` still climbs above the shared prefix with
/// `..` after normalisation (`../a` to `b`), since the name of the directory
/// to come back through is unknown.
pub fn relative_path(from: &Path, to: &Path) -> Option<PathBuf> {
	let from = normalize(from);
	let to = normalize(to);

	let common = from
		.iter()
		.zip(to.iter())
		.take_while(|(left, right)| left == right)
		.count();

	if from[common..]
		.iter()
		.any(|component| matches!(component, Component::ParentDir))
	{
		return None;
	}

	let mut relative = PathBuf::new();
	for _ in common..from.len() {
		relative.push(Component::ParentDir.as_os_str());
	}
	for component in &to[common..] {
		relative.push(component.as_os_str());
	}

	Some(relative)
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
	let mut components: Vec<Component<'_>> = Vec::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				if matches!(components.last(), Some(Component::Normal(_))) {
					components.pop();
				} else if !matches!(
					components.last(),
					Some(Component::RootDir | Component::Prefix(_))
				) {
					components.push(component);
				}
			}
			_ => components.push(component),
		}
	}

	components
}
