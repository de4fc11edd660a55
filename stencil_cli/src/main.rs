use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use stencil_cli::Commands;
use stencil_cli::StencilCli;
use stencil_core::AnyEmptyResult;
use stencil_core::FsGenerator;
use stencil_core::RewriteFileRequest;
use stencil_core::StencilConfig;
use stencil_core::paths::relative_require;
use stencil_core::process_directory;
use stencil_core::rewrite_file;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "STENCIL_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = StencilCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Generate {
			source,
			destination,
			name,
			filters,
			disabled_filters,
		}) => {
			run_generate(
				&args,
				source,
				destination,
				name.as_deref(),
				filters,
				disabled_filters,
			)
		}
		Some(Commands::Inject {
			file,
			marker,
			lines,
		}) => run_inject(&args, file, marker, lines),
		Some(Commands::Relative { from, to }) => run_relative(from, to),
		None => {
			eprintln!("No subcommand specified. Run `stencil --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render through miette for error codes and help text.
		match e.downcast::<stencil_core::StencilError>() {
			Ok(stencil_err) => {
				let report: miette::Report = (*stencil_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &StencilCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_generate(
	args: &StencilCli,
	source: &Path,
	destination: &Path,
	name: Option<&str>,
	filters: &[String],
	disabled_filters: &[String],
) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config = StencilConfig::load(&root)?.unwrap_or_default();
	let mut generator = FsGenerator::from_config(&root, &config);

	if let Some(name) = name {
		generator.set_name(name);
	}
	generator
		.filters_mut()
		.extend(filters.iter().map(|tag| (tag.as_str(), true)));
	generator
		.filters_mut()
		.extend(disabled_filters.iter().map(|tag| (tag.as_str(), false)));

	let destination = root.join(destination);
	let summary = process_directory(&mut generator, source, &destination)?;

	for path in &summary.templated {
		println!("{} {}", colored!("create", green), display_path(&root, path));
	}
	for path in &summary.copied {
		println!("{} {}", colored!("copy  ", green), display_path(&root, path));
	}
	if args.verbose {
		for path in &summary.skipped {
			println!("{} {}", colored!("skip  ", dimmed), path.display());
		}
	}

	println!(
		"Generated {} file(s), skipped {}.",
		summary.written(),
		summary.skipped.len()
	);

	Ok(())
}

fn run_inject(args: &StencilCli, file: &Path, marker: &str, lines: &[String]) -> AnyEmptyResult {
	let request = RewriteFileRequest {
		base_dir: Some(resolve_root(args)),
		file: file.to_path_buf(),
		marker: marker.to_string(),
		splicable: lines.to_vec(),
	};

	if rewrite_file(&request)? {
		println!("{} {}", colored!("update", green), file.display());
	} else {
		println!("No changes to {}", file.display());
	}

	Ok(())
}

fn run_relative(from: &Path, to: &Path) -> AnyEmptyResult {
	let Some(reference) = relative_require(from, to) else {
		return Err(format!(
			"cannot compute a reference from `{}` to `{}`: `{}` climbs above the shared prefix",
			from.display(),
			to.display(),
			from.display()
		)
		.into());
	};

	println!("{reference}");
	Ok(())
}

fn display_path(root: &Path, path: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
