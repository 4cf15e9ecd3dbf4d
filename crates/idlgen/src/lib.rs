//! Schema graph model, IDL loader, and bottom-up transformer for on-chain
//! client generation.
//!
//! The pipeline is linear: [`load_schema`] reads a shank-style IDL artifact
//! into a [`schema::SchemaGraph`], [`transform`] applies an ordered rule set
//! bottom-up producing a new graph, and the result is handed to a renderer
//! (see the `idlgen_renderer` crate).

pub mod error;
pub mod loader;
pub mod rules;
pub mod schema;
pub mod transform;

pub use crate::error::RuleApplicationError;
pub use crate::error::SchemaLoadError;
pub use crate::loader::load_schema;
pub use crate::loader::parse_schema;
pub use crate::rules::builtin_rules;
pub use crate::transform::Node;
pub use crate::transform::Rule;
pub use crate::transform::transform;
