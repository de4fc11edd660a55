//! `stencil_core` holds the file-templating routines behind the `stencil`
//! scaffolding tool. It splices snippets into existing files next to marker
//! lines, computes relative module references between generated files, and
//! stamps out template directories with name substitution and filename
//! filters.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template directory
//!   -> Generator::expand_files (every file, dot-files included)
//!   -> parse_filter_name ("(tag)" annotations stripped and collected)
//!   -> substitute_name (first "name" replaced with the project name)
//!   -> resolve_destination ("_" stripped, "!" stripped and forces a copy)
//!   -> is_usable (all tags enabled?)
//!   -> Generator::copy / Generator::template
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading from `stencil.toml`: project name,
//!   source root, filters, and template data.
//! - [`host`] - [`FsGenerator`], a [`Generator`] that renders with
//!   `minijinja` and writes to disk.
//! - [`paths`] - Relative module references between two files.
//!
//! ## Splicing
//!
//! ```rust
//! use stencil_core::RewriteRequest;
//! use stencil_core::rewrite;
//!
//! let request = RewriteRequest::new(
//! 	"line1\n  // insert-here\nline3",
//! 	"insert-here",
//! 	["// added"],
//! );
//! assert_eq!(
//! 	rewrite(&request),
//! 	"line1\n  // insert-here\n  // added\nline3"
//! );
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use stencil_core::FsGenerator;
//! use stencil_core::StencilConfig;
//! use stencil_core::process_directory;
//!
//! let root = Path::new(".");
//! let config = StencilConfig::load(root).unwrap().unwrap_or_default();
//! let mut generator = FsGenerator::from_config(root, &config);
//!
//! let summary = process_directory(&mut generator, Path::new("app"), Path::new("out")).unwrap();
//! println!("{} file(s) written", summary.written());
//! ```

pub use config::*;
pub use error::*;
pub use filters::*;
pub use host::FsGenerator;
pub use processor::*;
pub use splice::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod filters;
pub mod host;
pub mod paths;
mod processor;
mod splice;

#[cfg(test)]
mod __fixtures;
