//! Loads a shank-style IDL JSON artifact into a [`SchemaGraph`].
//!
//! The raw artifact uses the anchor-legacy vocabulary: primitive type tags as
//! plain strings (`"u64"`, `"publicKey"`), pod types behind `{"defined": ..}`,
//! and `{"array": [..]}` / `{"vec": ..}` / `{"option": ..}` wrappers. Lowering
//! maps that vocabulary onto [`TypeDescriptor`] and rejects anything outside
//! it.

use std::path::Path;

use serde::Deserialize;

use crate::error::SchemaLoadError;
use crate::schema::AccountDefinition;
use crate::schema::FieldDefinition;
use crate::schema::InstructionAccount;
use crate::schema::InstructionDefinition;
use crate::schema::NumericWidth;
use crate::schema::SchemaGraph;
use crate::schema::TypeDefinition;
use crate::schema::TypeDescriptor;

/// Read and parse an IDL file into a schema graph.
pub fn load_schema(path: &Path) -> Result<SchemaGraph, SchemaLoadError> {
	let json = std::fs::read_to_string(path).map_err(|source| {
		SchemaLoadError::ReadFile {
			path: path.to_path_buf(),
			source,
		}
	})?;
	parse_schema(&json, path)
}

/// Parse IDL JSON into a schema graph. `path` is used for diagnostics only.
pub fn parse_schema(json: &str, path: &Path) -> Result<SchemaGraph, SchemaLoadError> {
	let raw: RawIdl = serde_json::from_str(json).map_err(|source| {
		SchemaLoadError::ParseIdl {
			path: path.to_path_buf(),
			source,
		}
	})?;

	lower_idl(raw)
}

#[derive(Debug, Deserialize)]
struct RawIdl {
	name: String,
	#[serde(default)]
	metadata: Option<RawMetadata>,
	#[serde(default)]
	accounts: Vec<RawDefinition>,
	#[serde(default)]
	instructions: Vec<RawInstruction>,
	#[serde(default)]
	types: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
	#[serde(default)]
	address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
	name: String,
	#[serde(default)]
	docs: Vec<String>,
	#[serde(rename = "type")]
	ty: RawStruct,
}

#[derive(Debug, Deserialize)]
struct RawStruct {
	kind: String,
	#[serde(default)]
	fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
	name: String,
	#[serde(default)]
	docs: Vec<String>,
	#[serde(rename = "type")]
	ty: RawType,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
	Primitive(String),
	Defined { defined: String },
	Array { array: (Box<RawType>, usize) },
	Vec { vec: Box<RawType> },
	Option { option: Box<RawType> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstruction {
	name: String,
	#[serde(default)]
	docs: Vec<String>,
	#[serde(default)]
	accounts: Vec<RawInstructionAccount>,
	#[serde(default)]
	args: Vec<RawField>,
	#[serde(default)]
	discriminant: Option<RawDiscriminant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstructionAccount {
	name: String,
	#[serde(default)]
	is_mut: bool,
	#[serde(default)]
	is_signer: bool,
	#[serde(default)]
	docs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDiscriminant {
	value: u64,
}

fn lower_idl(raw: RawIdl) -> Result<SchemaGraph, SchemaLoadError> {
	let public_key = raw
		.metadata
		.and_then(|metadata| metadata.address)
		.unwrap_or_default();

	let accounts = raw
		.accounts
		.into_iter()
		.map(|account| {
			let context = format!("accounts.{}", account.name);
			let fields = lower_struct(account.ty, &context)?;
			Ok(AccountDefinition {
				name: account.name,
				docs: account.docs,
				fields,
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let instructions = raw
		.instructions
		.into_iter()
		.map(|instruction| {
			let context = format!("instructions.{}", instruction.name);
			let arguments = instruction
				.args
				.into_iter()
				.map(|field| lower_field(field, &context))
				.collect::<Result<Vec<_>, _>>()?;
			Ok(InstructionDefinition {
				name: instruction.name,
				docs: instruction.docs,
				accounts: instruction
					.accounts
					.into_iter()
					.map(|account| {
						InstructionAccount {
							name: account.name,
							writable: account.is_mut,
							signer: account.is_signer,
							docs: account.docs,
						}
					})
					.collect(),
				arguments,
				discriminant: instruction.discriminant.map(|d| d.value),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let types = raw
		.types
		.into_iter()
		.map(|definition| {
			let context = format!("types.{}", definition.name);
			let fields = lower_struct(definition.ty, &context)?;
			Ok(TypeDefinition {
				name: definition.name,
				fields,
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(SchemaGraph {
		name: raw.name,
		public_key,
		accounts,
		instructions,
		types,
	})
}

fn lower_struct(raw: RawStruct, context: &str) -> Result<Vec<FieldDefinition>, SchemaLoadError> {
	if raw.kind != "struct" {
		return Err(SchemaLoadError::UnsupportedKind {
			context: context.to_owned(),
			kind: raw.kind,
		});
	}

	raw.fields
		.into_iter()
		.map(|field| lower_field(field, context))
		.collect()
}

fn lower_field(raw: RawField, context: &str) -> Result<FieldDefinition, SchemaLoadError> {
	let context = format!("{context}.{}", raw.name);
	let ty = lower_type(raw.ty, &context)?;
	Ok(FieldDefinition {
		name: raw.name,
		docs: raw.docs,
		ty,
	})
}

fn lower_type(raw: RawType, context: &str) -> Result<TypeDescriptor, SchemaLoadError> {
	match raw {
		RawType::Primitive(tag) => lower_primitive(&tag, context),
		RawType::Defined { defined } => Ok(lower_defined(defined)),
		RawType::Array { array: (element, len) } => {
			// `[u8; N]` is a byte blob, not an array of numerics.
			if matches!(&*element, RawType::Primitive(tag) if tag == "u8") {
				return Ok(TypeDescriptor::Bytes { size: len });
			}
			let element = lower_type(*element, context)?;
			Ok(TypeDescriptor::FixedArray {
				element: Box::new(element),
				len,
			})
		}
		RawType::Vec { vec } => {
			let element = lower_type(*vec, context)?;
			Ok(TypeDescriptor::Sequence {
				element: Box::new(element),
			})
		}
		RawType::Option { option } => {
			let element = lower_type(*option, context)?;
			Ok(TypeDescriptor::Option {
				element: Box::new(element),
			})
		}
	}
}

fn lower_primitive(tag: &str, context: &str) -> Result<TypeDescriptor, SchemaLoadError> {
	let ty = match tag {
		"u8" => TypeDescriptor::unsigned(NumericWidth::W8),
		"u16" => TypeDescriptor::unsigned(NumericWidth::W16),
		"u32" => TypeDescriptor::unsigned(NumericWidth::W32),
		"u64" => TypeDescriptor::unsigned(NumericWidth::W64),
		"u128" => TypeDescriptor::unsigned(NumericWidth::W128),
		"i8" => signed(NumericWidth::W8),
		"i16" => signed(NumericWidth::W16),
		"i32" => signed(NumericWidth::W32),
		"i64" => signed(NumericWidth::W64),
		"i128" => signed(NumericWidth::W128),
		"bool" => TypeDescriptor::Boolean,
		"publicKey" => TypeDescriptor::PublicKey,
		other => {
			return Err(SchemaLoadError::UnsupportedType {
				context: context.to_owned(),
				tag: other.to_owned(),
			});
		}
	};
	Ok(ty)
}

/// Map a `{"defined": ..}` reference. The pod names are the alignment-relaxed
/// integer wrappers used by zero-copy account layouts; everything else is a
/// reference to a named type definition.
fn lower_defined(name: String) -> TypeDescriptor {
	pod_descriptor(&name).unwrap_or(TypeDescriptor::Composite { name })
}

fn pod_descriptor(name: &str) -> Option<TypeDescriptor> {
	let ty = match name {
		"PodU16" => TypeDescriptor::packed_unsigned(NumericWidth::W16),
		"PodU32" => TypeDescriptor::packed_unsigned(NumericWidth::W32),
		"PodU64" => TypeDescriptor::packed_unsigned(NumericWidth::W64),
		"PodU128" => TypeDescriptor::packed_unsigned(NumericWidth::W128),
		"PodI16" => TypeDescriptor::Packed {
			width: NumericWidth::W16,
			signed: true,
		},
		"PodI32" => TypeDescriptor::Packed {
			width: NumericWidth::W32,
			signed: true,
		},
		"PodI64" => TypeDescriptor::Packed {
			width: NumericWidth::W64,
			signed: true,
		},
		"PodBool" => TypeDescriptor::Boolean,
		_ => return None,
	};
	Some(ty)
}

const fn signed(width: NumericWidth) -> TypeDescriptor {
	TypeDescriptor::Numeric {
		width,
		signed: true,
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;

	fn parse(json: &str) -> Result<SchemaGraph, SchemaLoadError> {
		parse_schema(json, Path::new("test.json"))
	}

	#[test]
	fn lowers_pod_types_to_packed() {
		let graph = parse(
			r#"{
				"name": "example",
				"accounts": [{
					"name": "Table",
					"type": {
						"kind": "struct",
						"fields": [
							{ "name": "epochSlot", "type": { "defined": "PodU64" } },
							{ "name": "count", "type": { "defined": "PodU16" } }
						]
					}
				}]
			}"#,
		)
		.unwrap();

		let fields = &graph.accounts[0].fields;
		assert_eq!(fields[0].ty, TypeDescriptor::packed_unsigned(NumericWidth::W64));
		assert_eq!(fields[1].ty, TypeDescriptor::packed_unsigned(NumericWidth::W16));
	}

	#[test]
	fn lowers_byte_arrays_and_collections() {
		let graph = parse(
			r#"{
				"name": "example",
				"accounts": [{
					"name": "Table",
					"type": {
						"kind": "struct",
						"fields": [
							{ "name": "reserved", "type": { "array": ["u8", 32] } },
							{ "name": "entries", "type": { "array": [{ "defined": "Entry" }, 8] } },
							{ "name": "extra", "type": { "vec": "u64" } }
						]
					}
				}]
			}"#,
		)
		.unwrap();

		let fields = &graph.accounts[0].fields;
		assert_eq!(fields[0].ty, TypeDescriptor::Bytes { size: 32 });
		assert_eq!(
			fields[1].ty,
			TypeDescriptor::FixedArray {
				element: Box::new(TypeDescriptor::Composite {
					name: "Entry".to_owned()
				}),
				len: 8,
			}
		);
		assert_eq!(
			fields[2].ty,
			TypeDescriptor::Sequence {
				element: Box::new(TypeDescriptor::unsigned(NumericWidth::W64)),
			}
		);
	}

	#[test]
	fn lowers_instructions_with_accounts_and_args() {
		let graph = parse(
			r#"{
				"name": "example",
				"metadata": { "address": "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS" },
				"instructions": [{
					"name": "InitializeTable",
					"accounts": [
						{ "name": "table", "isMut": true, "isSigner": true },
						{ "name": "admin", "isSigner": true }
					],
					"args": [
						{ "name": "firstSlot", "type": { "option": "u64" } }
					],
					"discriminant": { "type": "u8", "value": 0 }
				}]
			}"#,
		)
		.unwrap();

		assert_eq!(graph.public_key, "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");
		let instruction = &graph.instructions[0];
		assert!(instruction.accounts[0].writable);
		assert!(instruction.accounts[0].signer);
		assert!(!instruction.accounts[1].writable);
		assert_eq!(instruction.discriminant, Some(0));
		assert_eq!(
			instruction.arguments[0].ty,
			TypeDescriptor::Option {
				element: Box::new(TypeDescriptor::unsigned(NumericWidth::W64)),
			}
		);
	}

	#[test]
	fn rejects_unknown_type_tag() {
		let error = parse(
			r#"{
				"name": "example",
				"accounts": [{
					"name": "Table",
					"type": {
						"kind": "struct",
						"fields": [{ "name": "label", "type": "string" }]
					}
				}]
			}"#,
		)
		.unwrap_err();

		match error {
			SchemaLoadError::UnsupportedType { context, tag } => {
				assert_eq!(context, "accounts.Table.label");
				assert_eq!(tag, "string");
			}
			other => panic!("expected UnsupportedType, got {other:?}"),
		}
	}

	#[test]
	fn rejects_non_struct_definitions() {
		let error = parse(
			r#"{
				"name": "example",
				"types": [{
					"name": "Mode",
					"type": { "kind": "enum", "variants": [] }
				}]
			}"#,
		)
		.unwrap_err();

		assert!(matches!(error, SchemaLoadError::UnsupportedKind { kind, .. } if kind == "enum"));
	}

	#[test]
	fn rejects_malformed_json() {
		let error = parse("{ not json").unwrap_err();
		assert!(matches!(error, SchemaLoadError::ParseIdl { .. }));
	}
}
