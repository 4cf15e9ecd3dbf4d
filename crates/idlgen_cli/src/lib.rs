//! Client generation pipeline: load each program's IDL, normalize it with
//! the built-in rule set, and hand the result to one renderer per target
//! language.

pub mod error;

use std::path::Path;
use std::path::PathBuf;

use idlgen::builtin_rules;
use idlgen::load_schema;
use idlgen::schema::SchemaGraph;
use idlgen::transform;
use idlgen_renderer::CommandRenderer;
use idlgen_renderer::JsonRenderer;
use idlgen_renderer::Renderer;

pub use crate::error::PipelineError;

/// Options for [`generate_clients`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
	/// Explicit IDL file paths.
	pub idls: Vec<PathBuf>,
	/// Directory scanned for `*.json` IDLs.
	pub idl_dir: Option<PathBuf>,
	/// Output directory for the Rust client of each program.
	pub rust_out: PathBuf,
	/// Output directory for the JavaScript client of each program.
	pub js_out: PathBuf,
	/// External Rust renderer command. The JSON hand-off is written when
	/// omitted.
	pub rust_renderer: Option<String>,
	/// External JavaScript renderer command. The JSON hand-off is written
	/// when omitted.
	pub js_renderer: Option<String>,
}

/// Load one IDL and apply the built-in rule set.
pub fn normalize_idl(path: &Path) -> Result<SchemaGraph, PipelineError> {
	let graph = load_schema(path).map_err(|source| {
		PipelineError::Load {
			path: path.to_path_buf(),
			source,
		}
	})?;

	transform(&graph, &builtin_rules()).map_err(|source| {
		PipelineError::Transform {
			program: graph.name.clone(),
			source,
		}
	})
}

/// Generate clients for every input IDL. Returns the program names in the
/// order they were processed.
pub fn generate_clients(options: &GenerateOptions) -> Result<Vec<String>, PipelineError> {
	let idl_paths = collect_idl_paths(options)?;

	let renderers: Vec<(Box<dyn Renderer>, &Path)> = vec![
		(
			renderer_for("rust", options.rust_renderer.as_deref()),
			options.rust_out.as_path(),
		),
		(
			renderer_for("js", options.js_renderer.as_deref()),
			options.js_out.as_path(),
		),
	];

	let mut programs = Vec::with_capacity(idl_paths.len());
	for idl_path in &idl_paths {
		let normalized = normalize_idl(idl_path)?;

		for (renderer, out_root) in &renderers {
			let out_dir = out_root.join(&normalized.name);
			renderer.render(&normalized, &out_dir).map_err(|source| {
				PipelineError::Render {
					target: renderer.target().to_owned(),
					program: normalized.name.clone(),
					source,
				}
			})?;
		}

		programs.push(normalized.name);
	}

	Ok(programs)
}

fn renderer_for(target: &str, command: Option<&str>) -> Box<dyn Renderer> {
	match command {
		Some(command) => Box::new(CommandRenderer::new(target, command)),
		None => Box::new(JsonRenderer::new(target)),
	}
}

fn collect_idl_paths(options: &GenerateOptions) -> Result<Vec<PathBuf>, PipelineError> {
	let mut idl_paths = options.idls.clone();

	if let Some(idl_dir) = &options.idl_dir {
		let entries = std::fs::read_dir(idl_dir).map_err(|source| {
			PipelineError::ReadIdlDir {
				path: idl_dir.clone(),
				source,
			}
		})?;

		for entry in entries {
			let entry = entry.map_err(|source| {
				PipelineError::ReadIdlDir {
					path: idl_dir.clone(),
					source,
				}
			})?;
			let path = entry.path();
			let is_json = path
				.extension()
				.and_then(|ext| ext.to_str())
				.is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
			if is_json {
				idl_paths.push(path);
			}
		}
	}

	idl_paths.sort();
	idl_paths.dedup();

	if idl_paths.is_empty() {
		return Err(PipelineError::NoInputs);
	}

	Ok(idl_paths)
}
