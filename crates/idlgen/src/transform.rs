//! Bottom-up schema transformation.
//!
//! A [`Rule`] is a pair of pure functions over [`Node`] values. [`transform`]
//! walks the graph bottom-up: a node's children are fully transformed before
//! the node itself is offered to the rule set, so a rule matching on an
//! aggregate shape (an account, say) always observes already-normalized
//! children. At each node position the first matching rule in declaration
//! order is applied, exactly once; the rewritten node is not re-matched at
//! the same position.

use crate::error::RuleApplicationError;
use crate::schema::AccountDefinition;
use crate::schema::FieldDefinition;
use crate::schema::InstructionDefinition;
use crate::schema::SchemaGraph;
use crate::schema::TypeDefinition;
use crate::schema::TypeDescriptor;

/// A node of the schema graph as seen by rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Account(AccountDefinition),
	Instruction(InstructionDefinition),
	DefinedType(TypeDefinition),
	Field(FieldDefinition),
	Type(TypeDescriptor),
}

impl Node {
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Account(_) => "account",
			Self::Instruction(_) => "instruction",
			Self::DefinedType(_) => "type definition",
			Self::Field(_) => "field",
			Self::Type(_) => "type",
		}
	}
}

/// A rewrite rule: a `matches` predicate plus a `rewrite` function.
///
/// Both functions are expected to be total and side-effect-free. `rewrite`
/// must return a node of the same kind the parent slot holds; returning a
/// different kind is a defect in the rule and fails the whole transform.
pub struct Rule {
	name: String,
	matches: Box<dyn Fn(&Node) -> bool>,
	rewrite: Box<dyn Fn(Node) -> Node>,
}

impl Rule {
	pub fn new(
		name: impl Into<String>,
		matches: impl Fn(&Node) -> bool + 'static,
		rewrite: impl Fn(Node) -> Node + 'static,
	) -> Self {
		Self {
			name: name.into(),
			matches: Box::new(matches),
			rewrite: Box::new(rewrite),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl std::fmt::Debug for Rule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Rule").field("name", &self.name).finish()
	}
}

/// Apply an ordered rule set to every node of `graph`, bottom-up, producing
/// a new graph. The input graph is never mutated.
pub fn transform(
	graph: &SchemaGraph,
	rules: &[Rule],
) -> Result<SchemaGraph, RuleApplicationError> {
	let accounts = graph
		.accounts
		.iter()
		.map(|account| transform_account(account.clone(), rules))
		.collect::<Result<Vec<_>, _>>()?;

	let instructions = graph
		.instructions
		.iter()
		.map(|instruction| transform_instruction(instruction.clone(), rules))
		.collect::<Result<Vec<_>, _>>()?;

	let types = graph
		.types
		.iter()
		.map(|definition| transform_defined_type(definition.clone(), rules))
		.collect::<Result<Vec<_>, _>>()?;

	Ok(SchemaGraph {
		name: graph.name.clone(),
		public_key: graph.public_key.clone(),
		accounts,
		instructions,
		types,
	})
}

fn transform_account(
	mut account: AccountDefinition,
	rules: &[Rule],
) -> Result<AccountDefinition, RuleApplicationError> {
	let path = format!("accounts.{}", account.name);
	account.fields = transform_fields(account.fields, rules, &path)?;

	let (node, rule) = apply_rules(Node::Account(account), rules);
	match node {
		Node::Account(account) => Ok(account),
		other => Err(contract_violation(rule, &path, "account", &other)),
	}
}

fn transform_instruction(
	mut instruction: InstructionDefinition,
	rules: &[Rule],
) -> Result<InstructionDefinition, RuleApplicationError> {
	let path = format!("instructions.{}", instruction.name);
	instruction.arguments = transform_fields(instruction.arguments, rules, &path)?;

	let (node, rule) = apply_rules(Node::Instruction(instruction), rules);
	match node {
		Node::Instruction(instruction) => Ok(instruction),
		other => Err(contract_violation(rule, &path, "instruction", &other)),
	}
}

fn transform_defined_type(
	mut definition: TypeDefinition,
	rules: &[Rule],
) -> Result<TypeDefinition, RuleApplicationError> {
	let path = format!("types.{}", definition.name);
	definition.fields = transform_fields(definition.fields, rules, &path)?;

	let (node, rule) = apply_rules(Node::DefinedType(definition), rules);
	match node {
		Node::DefinedType(definition) => Ok(definition),
		other => Err(contract_violation(rule, &path, "type definition", &other)),
	}
}

fn transform_fields(
	fields: Vec<FieldDefinition>,
	rules: &[Rule],
	parent_path: &str,
) -> Result<Vec<FieldDefinition>, RuleApplicationError> {
	fields
		.into_iter()
		.map(|field| transform_field(field, rules, parent_path))
		.collect()
}

fn transform_field(
	mut field: FieldDefinition,
	rules: &[Rule],
	parent_path: &str,
) -> Result<FieldDefinition, RuleApplicationError> {
	let path = format!("{parent_path}.{}", field.name);
	field.ty = transform_type(field.ty, rules, &path)?;

	let (node, rule) = apply_rules(Node::Field(field), rules);
	match node {
		Node::Field(field) => Ok(field),
		other => Err(contract_violation(rule, &path, "field", &other)),
	}
}

fn transform_type(
	ty: TypeDescriptor,
	rules: &[Rule],
	path: &str,
) -> Result<TypeDescriptor, RuleApplicationError> {
	// Element types are children; transform them before the wrapper.
	let ty = match ty {
		TypeDescriptor::FixedArray { element, len } => {
			TypeDescriptor::FixedArray {
				element: Box::new(transform_type(*element, rules, path)?),
				len,
			}
		}
		TypeDescriptor::Sequence { element } => {
			TypeDescriptor::Sequence {
				element: Box::new(transform_type(*element, rules, path)?),
			}
		}
		TypeDescriptor::Option { element } => {
			TypeDescriptor::Option {
				element: Box::new(transform_type(*element, rules, path)?),
			}
		}
		other => other,
	};

	let (node, rule) = apply_rules(Node::Type(ty), rules);
	match node {
		Node::Type(ty) => Ok(ty),
		other => Err(contract_violation(rule, path, "type", &other)),
	}
}

/// Offer `node` to the rule set; the first matching rule is applied once.
fn apply_rules<'r>(node: Node, rules: &'r [Rule]) -> (Node, Option<&'r Rule>) {
	for rule in rules {
		if (rule.matches)(&node) {
			return ((rule.rewrite)(node), Some(rule));
		}
	}
	(node, None)
}

fn contract_violation(
	rule: Option<&Rule>,
	path: &str,
	expected: &'static str,
	actual: &Node,
) -> RuleApplicationError {
	RuleApplicationError {
		// A kind mismatch is only reachable through a rule rewrite.
		rule: rule.map_or_else(|| "<none>".to_owned(), |rule| rule.name().to_owned()),
		path: path.to_owned(),
		expected,
		actual: actual.kind(),
	}
}
