//! Schema graph produced by the loader and consumed by renderers.
//!
//! The graph is a plain tree of owned values. The transformer never mutates a
//! graph in place; every pass produces a new value, so a loaded graph can be
//! transformed any number of times and each result is independent.

use serde::Deserialize;
use serde::Serialize;

/// A program schema: ordered top-level account, instruction, and type
/// definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaGraph {
	pub name: String,
	pub public_key: String,
	#[serde(default)]
	pub accounts: Vec<AccountDefinition>,
	#[serde(default)]
	pub instructions: Vec<InstructionDefinition>,
	#[serde(default)]
	pub types: Vec<TypeDefinition>,
}

/// An on-chain account record with an ordered field sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDefinition {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	pub fields: Vec<FieldDefinition>,
}

/// An instruction: account slots plus typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDefinition {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(default)]
	pub accounts: Vec<InstructionAccount>,
	#[serde(default)]
	pub arguments: Vec<FieldDefinition>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discriminant: Option<u64>,
}

/// A single account slot inside an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionAccount {
	pub name: String,
	pub writable: bool,
	pub signer: bool,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
}

/// A named struct type referenced by `TypeDescriptor::Composite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
	pub name: String,
	pub fields: Vec<FieldDefinition>,
}

/// A named, typed field (account state field or instruction argument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(rename = "type")]
	pub ty: TypeDescriptor,
}

/// The type of a field, drawn from the fixed IDL vocabulary.
///
/// `Packed` denotes an alignment-relaxed encoding of the equivalent plain
/// numeric of the same width and signedness, as used in zero-copy on-chain
/// layouts. The built-in rule set rewrites packed fields back to their plain
/// counterparts before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDescriptor {
	Numeric { width: NumericWidth, signed: bool },
	Packed { width: NumericWidth, signed: bool },
	Boolean,
	PublicKey,
	Bytes { size: usize },
	Composite { name: String },
	FixedArray { element: Box<TypeDescriptor>, len: usize },
	Sequence { element: Box<TypeDescriptor> },
	Option { element: Box<TypeDescriptor> },
}

/// Bit width of a numeric type. Serialized as the bit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum NumericWidth {
	W8,
	W16,
	W32,
	W64,
	W128,
}

impl NumericWidth {
	pub const fn bits(self) -> u16 {
		match self {
			Self::W8 => 8,
			Self::W16 => 16,
			Self::W32 => 32,
			Self::W64 => 64,
			Self::W128 => 128,
		}
	}
}

impl From<NumericWidth> for u16 {
	fn from(width: NumericWidth) -> Self {
		width.bits()
	}
}

impl TryFrom<u16> for NumericWidth {
	type Error = String;

	fn try_from(bits: u16) -> Result<Self, Self::Error> {
		match bits {
			8 => Ok(Self::W8),
			16 => Ok(Self::W16),
			32 => Ok(Self::W32),
			64 => Ok(Self::W64),
			128 => Ok(Self::W128),
			other => Err(format!("unsupported numeric width `{other}`")),
		}
	}
}

impl TypeDescriptor {
	/// Plain unsigned numeric of the given width.
	pub const fn unsigned(width: NumericWidth) -> Self {
		Self::Numeric {
			width,
			signed: false,
		}
	}

	/// Alignment-relaxed unsigned numeric of the given width.
	pub const fn packed_unsigned(width: NumericWidth) -> Self {
		Self::Packed {
			width,
			signed: false,
		}
	}
}
