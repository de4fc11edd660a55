use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Stamp out project trees from template directories.",
	long_about = "stencil generates boilerplate from template directories and splices snippets \
	              into existing files.\n\nTemplate file names may carry `(tag)` filters that are \
	              only emitted when the tag is enabled, a leading `_` that is dropped from the \
	              output name, and a leading `!` that copies the file verbatim instead of \
	              rendering it.\n\nQuick start:\n  stencil generate app .        Render \
	              templates/app into the project\n  stencil inject src/lib.rs -m '// mods' -l \
	              'mod api;'\n  stencil relative a/b.js c/index.js"
)]
pub struct StencilCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a template directory into a destination directory.
	///
	/// Relative sources are resolved against the configured source root
	/// (`templates` by default). Every file, including dot-files, is either
	/// rendered with the project data or copied verbatim when its name starts
	/// with `!`. Files annotated with `(tag)` are skipped unless every tag is
	/// enabled.
	Generate {
		/// Template directory, absolute or relative to the source root.
		source: PathBuf,

		/// Output directory, relative to the project root.
		destination: PathBuf,

		/// Project name substituted for `name` in file names and exposed to
		/// templates. Overrides the config.
		#[arg(long, short)]
		name: Option<String>,

		/// Enable a filter tag. May be repeated.
		#[arg(long = "filter", value_name = "TAG")]
		filters: Vec<String>,

		/// Disable a filter tag. May be repeated.
		#[arg(long = "no-filter", value_name = "TAG")]
		disabled_filters: Vec<String>,
	},
	/// Insert lines after the last line containing a marker.
	///
	/// Inserted lines are indented like the marker line. Nothing changes when
	/// the marker is missing or the lines are already present.
	Inject {
		/// File to rewrite, relative to the project root.
		file: PathBuf,

		/// Literal text identifying the line to insert after.
		#[arg(long, short)]
		marker: String,

		/// Line to insert. May be repeated; lines keep their order.
		#[arg(long = "line", short, value_name = "LINE", required = true)]
		lines: Vec<String>,
	},
	/// Print the module reference to TO as written from inside FROM.
	Relative {
		/// File the reference is written in.
		from: PathBuf,

		/// File being referenced.
		to: PathBuf,
	},
}
