use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use crate::FilterSet;
use crate::Generator;
use crate::StencilResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	Copy { src: PathBuf, dest: PathBuf },
	Template { src: PathBuf, dest: PathBuf },
}

/// A generator that records what it was asked to do instead of touching the
/// filesystem.
#[derive(Debug)]
pub struct RecordingGenerator {
	pub name: Option<String>,
	pub source_root: PathBuf,
	pub filters: FilterSet,
	pub files: Vec<PathBuf>,
	pub operations: Vec<Operation>,
	pub expanded: RefCell<Vec<(PathBuf, String)>>,
	/// Source path whose dispatch fails with a permission error.
	pub fail_on: Option<PathBuf>,
}

impl RecordingGenerator {
	pub fn new<I, S>(files: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<PathBuf>,
	{
		Self {
			name: None,
			source_root: PathBuf::from("/generator/templates"),
			filters: FilterSet::default(),
			files: files.into_iter().map(Into::into).collect(),
			operations: Vec::new(),
			expanded: RefCell::new(Vec::new()),
			fail_on: None,
		}
	}

	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	pub fn with_filters(mut self, filters: &[(&str, bool)]) -> Self {
		self.filters = filters.iter().copied().collect();
		self
	}

	fn check(&self, src: &Path) -> StencilResult<()> {
		if self.fail_on.as_deref() == Some(src) {
			return Err(std::io::Error::new(
				std::io::ErrorKind::PermissionDenied,
				format!("cannot read {}", src.display()),
			)
			.into());
		}
		Ok(())
	}
}

impl Generator for RecordingGenerator {
	fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	fn source_root(&self) -> &Path {
		&self.source_root
	}

	fn filters(&self) -> &FilterSet {
		&self.filters
	}

	fn expand_files(&self, root: &Path, pattern: &str) -> StencilResult<Vec<PathBuf>> {
		self.expanded
			.borrow_mut()
			.push((root.to_path_buf(), pattern.to_string()));
		Ok(self.files.clone())
	}

	fn copy(&mut self, src: &Path, dest: &Path) -> StencilResult<()> {
		self.check(src)?;
		self.operations.push(Operation::Copy {
			src: src.to_path_buf(),
			dest: dest.to_path_buf(),
		});
		Ok(())
	}

	fn template(&mut self, src: &Path, dest: &Path) -> StencilResult<()> {
		self.check(src)?;
		self.operations.push(Operation::Template {
			src: src.to_path_buf(),
			dest: dest.to_path_buf(),
		});
		Ok(())
	}
}

pub fn copy_op(src: &str, dest: &str) -> Operation {
	Operation::Copy {
		src: PathBuf::from(src),
		dest: PathBuf::from(dest),
	}
}

pub fn template_op(src: &str, dest: &str) -> Operation {
	Operation::Template {
		src: PathBuf::from(src),
		dest: PathBuf::from(dest),
	}
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
}
