use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading an IDL artifact into a schema graph.
///
/// Loading fails fast: no partial graph is ever produced.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
	#[error("failed to read `{path}`: {source}")]
	ReadFile {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("failed to parse IDL `{path}`: {source}")]
	ParseIdl {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("unsupported type tag `{tag}` at `{context}`")]
	UnsupportedType { context: String, tag: String },

	#[error("unsupported definition kind `{kind}` at `{context}`: only struct definitions are supported")]
	UnsupportedKind { context: String, kind: String },
}

/// A rule's `rewrite` returned a node whose kind the parent slot cannot
/// accept. This indicates a defect in the rule definition; the condition is
/// fatal and re-running without changing the rule set will fail identically.
#[derive(Debug, Error)]
#[error("rule `{rule}` rewrote `{path}` into a {actual} node where a {expected} node was required")]
pub struct RuleApplicationError {
	pub rule: String,
	pub path: String,
	pub expected: &'static str,
	pub actual: &'static str,
}
