use std::path::Path;
use std::path::PathBuf;

use heck::ToSnakeCase;
use idlgen::schema::SchemaGraph;

use crate::Renderer;
use crate::error::RenderError;
use crate::error::Result;

/// Writes the normalized schema graph as JSON under the output directory.
///
/// This is the serialized hand-off contract: downstream language renderers
/// consume the emitted file instead of the raw IDL.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
	target: String,
	pretty: bool,
}

impl JsonRenderer {
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			pretty: true,
		}
	}

	#[must_use]
	pub const fn compact(mut self) -> Self {
		self.pretty = false;
		self
	}
}

impl Renderer for JsonRenderer {
	fn target(&self) -> &str {
		&self.target
	}

	fn render(&self, graph: &SchemaGraph, out_dir: &Path) -> Result<()> {
		write_graph_json(graph, out_dir, self.pretty)?;
		Ok(())
	}
}

/// Serialize `graph` to `<snake_case name>.json` in `out_dir`, creating the
/// directory if needed. Returns the written path.
pub fn write_graph_json(graph: &SchemaGraph, out_dir: &Path, pretty: bool) -> Result<PathBuf> {
	std::fs::create_dir_all(out_dir).map_err(|source| {
		RenderError::CreateDir {
			path: out_dir.to_path_buf(),
			source,
		}
	})?;

	let json = if pretty {
		serde_json::to_string_pretty(graph)
	} else {
		serde_json::to_string(graph)
	}
	.map_err(|source| {
		RenderError::SerializeGraph {
			name: graph.name.clone(),
			source,
		}
	})?;

	let path = out_dir.join(format!("{}.json", graph.name.to_snake_case()));
	std::fs::write(&path, json).map_err(|source| {
		RenderError::WriteFile {
			path: path.clone(),
			source,
		}
	})?;

	Ok(path)
}
