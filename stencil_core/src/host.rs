//! A [`Generator`] backed by the local filesystem.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use ignore::WalkBuilder;

use crate::FilterSet;
use crate::Generator;
use crate::StencilConfig;
use crate::StencilError;
use crate::StencilResult;

/// Template variable holding the project name.
pub const NAME_VARIABLE: &str = "name";

/// Writes generated files straight to disk.
///
/// Templates are rendered with [`minijinja`] using the configured data plus
/// the project name under [`NAME_VARIABLE`].
#[derive(Debug, Clone)]
pub struct FsGenerator {
	name: Option<String>,
	source_root: PathBuf,
	filters: FilterSet,
	data: BTreeMap<String, serde_json::Value>,
}

impl FsGenerator {
	pub fn new(source_root: impl Into<PathBuf>) -> Self {
		Self {
			name: None,
			source_root: source_root.into(),
			filters: FilterSet::default(),
			data: BTreeMap::new(),
		}
	}

	/// Build a generator for the project at `root` from its config.
	pub fn from_config(root: &Path, config: &StencilConfig) -> Self {
		Self {
			name: config.name.clone(),
			source_root: config.source_root_in(root),
			filters: config.filters.clone(),
			data: config.data.clone(),
		}
	}

	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[must_use]
	pub fn with_filters(mut self, filters: FilterSet) -> Self {
		self.filters = filters;
		self
	}

	#[must_use]
	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = Some(name.into());
	}

	pub fn filters_mut(&mut self) -> &mut FilterSet {
		&mut self.filters
	}

	/// Variables passed to every rendered template.
	pub fn context(&self) -> BTreeMap<String, serde_json::Value> {
		let mut context = self.data.clone();
		if let Some(name) = &self.name {
			context.insert(NAME_VARIABLE.to_string(), serde_json::Value::from(name.as_str()));
		}
		context
	}
}

impl Generator for FsGenerator {
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
		let matcher = Glob::new(pattern)
			.map_err(|e| {
				StencilError::InvalidPattern {
					pattern: pattern.to_string(),
					reason: e.to_string(),
				}
			})?
			.compile_matcher();

		// Dot-files and git-ignored files are part of the template.
		let walker = WalkBuilder::new(root).standard_filters(false).build();
		let mut files = Vec::new();

		for entry in walker {
			let entry = entry.map_err(|e| {
				StencilError::Walk {
					path: root.display().to_string(),
					reason: e.to_string(),
				}
			})?;

			if !entry.file_type().is_some_and(|kind| kind.is_file()) {
				continue;
			}

			let Ok(relative) = entry.path().strip_prefix(root) else {
				continue;
			};

			if matcher.is_match(relative) {
				files.push(relative.to_path_buf());
			}
		}

		// Sort for deterministic ordering.
		files.sort();
		Ok(files)
	}

	fn copy(&mut self, src: &Path, dest: &Path) -> StencilResult<()> {
		create_parent_dir(dest)?;
		std::fs::copy(src, dest)?;
		Ok(())
	}

	fn template(&mut self, src: &Path, dest: &Path) -> StencilResult<()> {
		let content = std::fs::read_to_string(src)?;
		let rendered = render_template(&content, &self.context()).map_err(|e| {
			StencilError::TemplateRender {
				path: src.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		create_parent_dir(dest)?;
		std::fs::write(dest, rendered)?;
		Ok(())
	}
}

/// Render `content` through minijinja with `context` as the root variables.
/// Trailing newlines are kept and undefined variables render as empty.
pub fn render_template(
	content: &str,
	context: &BTreeMap<String, serde_json::Value>,
) -> Result<String, minijinja::Error> {
	let mut env = minijinja::Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);
	env.add_template("__template__", content)?;

	let template = env.get_template("__template__")?;
	template.render(minijinja::Value::from_serialize(context))
}

fn create_parent_dir(path: &Path) -> StencilResult<()> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)?;
	}
	Ok(())
}
