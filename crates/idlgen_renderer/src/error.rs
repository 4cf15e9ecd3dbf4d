use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
	#[error("failed to create directory `{path}`: {source}")]
	CreateDir {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("failed to write `{path}`: {source}")]
	WriteFile {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("failed to serialize schema graph `{name}`: {source}")]
	SerializeGraph {
		name: String,
		source: serde_json::Error,
	},
	#[error("failed to run renderer command `{command}`: {source}")]
	CommandExec {
		command: String,
		source: std::io::Error,
	},
	#[error("renderer command `{command}` failed with status {status}{details}")]
	CommandFailed {
		command: String,
		status: i32,
		details: String,
	},
}
