use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::FilterSet;
use crate::StencilError;
use crate::StencilResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"stencil.toml",
	".stencil.toml",
	".config/stencil.toml",
];

/// Directory relative template sources are resolved against when the config
/// does not name one.
pub const DEFAULT_SOURCE_ROOT: &str = "templates";

/// Configuration loaded from a `stencil.toml` file.
///
/// ```toml
/// name = "acme"
/// source_root = "templates"
///
/// [filters]
/// docker = true
/// ci = false
///
/// [data]
/// author = "Jane Doe"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StencilConfig {
	/// Project name substituted into template file names and exposed to
	/// templates as `name`.
	#[serde(default)]
	pub name: Option<String>,
	/// Base directory for relative template sources, relative to the project
	/// root.
	#[serde(default = "default_source_root")]
	pub source_root: PathBuf,
	/// Filter tags gating which annotated template files are emitted.
	#[serde(default)]
	pub filters: FilterSet,
	/// Extra variables available while rendering templates.
	#[serde(default)]
	pub data: BTreeMap<String, serde_json::Value>,
}

impl Default for StencilConfig {
	fn default() -> Self {
		Self {
			name: None,
			source_root: default_source_root(),
			filters: FilterSet::default(),
			data: BTreeMap::new(),
		}
	}
}

fn default_source_root() -> PathBuf {
	PathBuf::from(DEFAULT_SOURCE_ROOT)
}

impl StencilConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> StencilResult<Option<StencilConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> StencilResult<StencilConfig> {
		toml::from_str(content).map_err(|e| StencilError::ConfigParse(e.to_string()))
	}

	/// The configured source root resolved against the project `root`.
	pub fn source_root_in(&self, root: &Path) -> PathBuf {
		root.join(&self.source_root)
	}
}
