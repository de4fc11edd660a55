use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StencilError {
	#[error(transparent)]
	#[diagnostic(code(stencil::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(stencil::config_parse),
		help("check that stencil.toml is valid TOML with optional [filters] and [data] tables")
	)]
	ConfigParse(String),

	#[error("invalid file pattern `{pattern}`: {reason}")]
	#[diagnostic(code(stencil::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("failed to walk template directory `{path}`: {reason}")]
	#[diagnostic(code(stencil::walk))]
	Walk { path: String, reason: String },

	#[error("template rendering failed for `{path}`: {reason}")]
	#[diagnostic(code(stencil::template_render))]
	TemplateRender { path: String, reason: String },

	#[error("nothing to insert after marker `{0}`")]
	#[diagnostic(
		code(stencil::empty_splicable),
		help("pass at least one line to insert")
	)]
	EmptySplicable(String),

	#[error("destination has no file name: `{0}`")]
	#[diagnostic(code(stencil::missing_file_name))]
	MissingFileName(String),
}

pub type StencilResult<T> = Result<T, StencilError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
