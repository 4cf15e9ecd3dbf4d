use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
	name = "idlgen",
	version,
	about = "Generate client libraries from on-chain program IDLs"
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Normalize a single IDL and emit the transformed schema graph as JSON.
	Transform {
		/// IDL file path.
		#[arg(short, long)]
		idl: PathBuf,

		/// Output file. Writes to stdout when omitted.
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Pretty-print the JSON output.
		#[arg(long, default_value_t = true)]
		pretty: bool,
	},
	/// Generate Rust and JS clients for one or more IDLs.
	Generate {
		/// A single IDL file path. Can be provided multiple times.
		#[arg(long = "idl")]
		idls: Vec<PathBuf>,

		/// A directory containing `*.json` IDLs.
		#[arg(long)]
		idl_dir: Option<PathBuf>,

		/// Output directory for generated Rust clients.
		#[arg(long, default_value = "clients/rust")]
		rust_out: PathBuf,

		/// Output directory for generated JS clients.
		#[arg(long, default_value = "clients/js")]
		js_out: PathBuf,

		/// External Rust renderer command. When omitted the normalized
		/// graph JSON is written as the hand-off.
		#[arg(long)]
		rust_renderer: Option<String>,

		/// External JS renderer command. When omitted the normalized graph
		/// JSON is written as the hand-off.
		#[arg(long)]
		js_renderer: Option<String>,
	},
}

fn main() {
	let cli = Cli::parse();

	match cli.command {
		Commands::Transform { idl, output, pretty } => {
			run_transform(idl.as_path(), output.as_deref(), pretty);
		}
		Commands::Generate {
			idls,
			idl_dir,
			rust_out,
			js_out,
			rust_renderer,
			js_renderer,
		} => {
			run_generate(idlgen_cli::GenerateOptions {
				idls,
				idl_dir,
				rust_out,
				js_out,
				rust_renderer,
				js_renderer,
			});
		}
	}
}

fn run_transform(idl: &std::path::Path, output: Option<&std::path::Path>, pretty: bool) {
	let normalized = match idlgen_cli::normalize_idl(idl) {
		Ok(graph) => graph,
		Err(e) => {
			eprintln!("Error: {e}");
			std::process::exit(1);
		}
	};

	let json = if pretty {
		serde_json::to_string_pretty(&normalized)
	} else {
		serde_json::to_string(&normalized)
	};

	let json = match json {
		Ok(j) => j,
		Err(e) => {
			eprintln!("JSON serialization error: {e}");
			std::process::exit(1);
		}
	};

	if let Some(output) = output {
		if let Err(e) = std::fs::write(output, &json) {
			eprintln!("Failed to write {}: {e}", output.display());
			std::process::exit(1);
		}
	} else {
		println!("{json}");
	}
}

fn run_generate(options: idlgen_cli::GenerateOptions) {
	let programs = match idlgen_cli::generate_clients(&options) {
		Ok(programs) => programs,
		Err(err) => {
			eprintln!("Error: {err}");
			std::process::exit(1);
		}
	};

	println!(
		"Generated Rust/JS clients for {} program(s): {}",
		programs.len(),
		programs.join(", "),
	);
}
