//! Renderer surface for normalized schema graphs.
//!
//! The transformer's contract ends at producing a valid graph; everything
//! after that goes through the [`Renderer`] trait so any number of backends
//! can be registered per target language. Two implementations ship here:
//! [`JsonRenderer`] emits the serialized hand-off contract, and
//! [`CommandRenderer`] delegates to an external renderer executable.

pub mod command;
pub mod error;
pub mod json;

use std::path::Path;

use idlgen::schema::SchemaGraph;

pub use crate::command::CommandRenderer;
pub use crate::error::RenderError;
pub use crate::json::JsonRenderer;

/// A per-target-language rendering backend.
pub trait Renderer {
	/// Target language identifier (`"rust"`, `"js"`, ...), used in
	/// diagnostics.
	fn target(&self) -> &str;

	/// Render the normalized graph into `out_dir`.
	fn render(&self, graph: &SchemaGraph, out_dir: &Path) -> Result<(), RenderError>;
}
