use std::path::Path;
use std::process::Command;

use idlgen::schema::SchemaGraph;

use crate::Renderer;
use crate::error::RenderError;
use crate::error::Result;
use crate::json::write_graph_json;

/// Invokes an external renderer executable on the serialized graph.
///
/// The graph is written as JSON into the output directory first, then the
/// command is run as `<command> [args..] <graph.json> <out_dir>`. A non-zero
/// exit status is surfaced with the command's stderr attached.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
	target: String,
	command: String,
	args: Vec<String>,
}

impl CommandRenderer {
	pub fn new(target: impl Into<String>, command: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			command: command.into(),
			args: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
		self.args.extend(args);
		self
	}
}

impl Renderer for CommandRenderer {
	fn target(&self) -> &str {
		&self.target
	}

	fn render(&self, graph: &SchemaGraph, out_dir: &Path) -> Result<()> {
		let graph_path = write_graph_json(graph, out_dir, true)?;

		let output = Command::new(&self.command)
			.args(&self.args)
			.arg(&graph_path)
			.arg(out_dir)
			.output()
			.map_err(|source| {
				RenderError::CommandExec {
					command: self.command.clone(),
					source,
				}
			})?;

		if output.status.success() {
			return Ok(());
		}

		let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
		let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
		let details = if !stderr.is_empty() {
			format!(": {stderr}")
		} else if !stdout.is_empty() {
			format!(": {stdout}")
		} else {
			String::new()
		};

		Err(RenderError::CommandFailed {
			command: self.command.clone(),
			status: output.status.code().unwrap_or(-1),
			details,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_graph() -> SchemaGraph {
		SchemaGraph {
			name: "example".to_owned(),
			public_key: String::new(),
			accounts: Vec::new(),
			instructions: Vec::new(),
			types: Vec::new(),
		}
	}

	#[test]
	fn missing_executable_is_a_command_exec_error() {
		let dir = tempfile::tempdir().unwrap();
		let renderer = CommandRenderer::new("js", "idlgen-renderer-that-does-not-exist");

		let error = renderer.render(&sample_graph(), dir.path()).unwrap_err();
		assert!(matches!(error, RenderError::CommandExec { .. }));
	}

	#[cfg(unix)]
	#[test]
	fn non_zero_exit_is_a_command_failed_error() {
		let dir = tempfile::tempdir().unwrap();
		let renderer = CommandRenderer::new("js", "sh")
			.with_args(["-c".to_owned(), "exit 3".to_owned()]);

		let error = renderer.render(&sample_graph(), dir.path()).unwrap_err();
		match error {
			RenderError::CommandFailed { status, .. } => assert_eq!(status, 3),
			other => panic!("expected CommandFailed, got {other:?}"),
		}
	}

	#[cfg(unix)]
	#[test]
	fn successful_command_receives_graph_path_and_out_dir() {
		let dir = tempfile::tempdir().unwrap();
		// `test -f $1` against the serialized graph path.
		let renderer = CommandRenderer::new("js", "sh")
			.with_args(["-c".to_owned(), r#"test -f "$1""#.to_owned(), "sh".to_owned()]);

		renderer.render(&sample_graph(), dir.path()).unwrap();
		assert!(dir.path().join("example.json").is_file());
	}
}
