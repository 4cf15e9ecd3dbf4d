use std::path::PathBuf;

use idlgen::RuleApplicationError;
use idlgen::SchemaLoadError;
use idlgen_renderer::RenderError;

/// Errors produced by the end-to-end generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
	#[error("failed to read IDL directory `{path}`: {source}")]
	ReadIdlDir {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("no IDL inputs: provide at least one --idl or --idl-dir")]
	NoInputs,

	#[error("failed to load IDL `{path}`: {source}")]
	Load {
		path: PathBuf,
		source: SchemaLoadError,
	},

	#[error("transformation failed for `{program}`: {source}")]
	Transform {
		program: String,
		source: RuleApplicationError,
	},

	#[error("{target} rendering failed for `{program}`: {source}")]
	Render {
		target: String,
		program: String,
		source: RenderError,
	},
}
