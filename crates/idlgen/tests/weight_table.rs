use std::path::Path;

use idlgen::builtin_rules;
use idlgen::parse_schema;
use idlgen::rules::DISCRIMINATOR_FIELD;
use idlgen::schema::NumericWidth;
use idlgen::schema::SchemaGraph;
use idlgen::schema::TypeDescriptor;
use idlgen::transform;
use serde_json::Value;
use serde_json::json;

const FIXTURE: &str = include_str!("fixtures/jito_weight_table.json");

fn load_fixture() -> SchemaGraph {
	parse_schema(FIXTURE, Path::new("jito_weight_table.json"))
		.unwrap_or_else(|e| panic!("fixture should parse: {e}"))
}

#[test]
fn fixture_loads_with_expected_shape() {
	let graph = load_fixture();

	assert_eq!(graph.name, "jito_weight_table");
	assert_eq!(graph.public_key, "4pikoS8jwGHevjpfWp2DXDS4VcfKMqkdkAZVifFBkWcs");
	assert_eq!(graph.accounts.len(), 1);
	assert_eq!(graph.instructions.len(), 3);
	assert_eq!(graph.types.len(), 2);

	let weight_table = &graph.accounts[0];
	assert_eq!(weight_table.name, "WeightTable");
	assert_eq!(
		weight_table.fields[1].ty,
		TypeDescriptor::packed_unsigned(NumericWidth::W64)
	);
	assert_eq!(weight_table.fields[3].ty, TypeDescriptor::Bytes { size: 128 });

	let initialize = &graph.instructions[0];
	assert_eq!(initialize.discriminant, Some(0));
	assert_eq!(initialize.accounts.len(), 6);
	assert!(initialize.accounts[2].writable);
	assert!(initialize.accounts[2].signer);
}

#[test]
fn builtin_rules_normalize_the_weight_table() {
	let graph = load_fixture();
	let normalized = transform(&graph, &builtin_rules()).unwrap();

	// The source graph is untouched.
	assert_eq!(graph.accounts[0].fields.len(), 5);

	let weight_table = &normalized.accounts[0];
	assert_eq!(weight_table.fields.len(), 6);
	assert_eq!(weight_table.fields[0].name, DISCRIMINATOR_FIELD);
	assert_eq!(
		weight_table.fields[0].ty,
		TypeDescriptor::unsigned(NumericWidth::W64)
	);

	// PodU64 narrowed in place, name and position preserved.
	assert_eq!(weight_table.fields[2].name, "ncnEpochSlot");
	assert_eq!(
		weight_table.fields[2].ty,
		TypeDescriptor::unsigned(NumericWidth::W64)
	);

	// Pod fields inside named type definitions are narrowed as well.
	let weight = normalized
		.types
		.iter()
		.find(|t| t.name == "Weight")
		.expect("Weight type present");
	for field in &weight.fields {
		assert_eq!(field.ty, TypeDescriptor::unsigned(NumericWidth::W64));
	}
}

#[test]
fn rerunning_narrowing_rules_is_a_no_op() {
	use idlgen::rules::narrow_packed;

	let graph = load_fixture();
	let normalized = transform(&graph, &builtin_rules()).unwrap();

	let narrowing_only = [
		narrow_packed(NumericWidth::W16),
		narrow_packed(NumericWidth::W32),
		narrow_packed(NumericWidth::W64),
	];
	let again = transform(&normalized, &narrowing_only).unwrap();
	assert_eq!(again, normalized);
}

#[test]
fn normalized_account_serializes_to_the_output_contract() {
	let graph = load_fixture();
	let normalized = transform(&graph, &builtin_rules()).unwrap();

	let value = serde_json::to_value(&normalized.accounts[0]).unwrap();
	let fields = value
		.get("fields")
		.and_then(Value::as_array)
		.expect("fields array");

	assert_eq!(
		fields[0],
		json!({
			"name": "discriminator",
			"type": { "kind": "numeric", "width": 64, "signed": false }
		})
	);
	assert_eq!(
		fields[2],
		json!({
			"name": "ncnEpochSlot",
			"docs": ["The slot starting the NCN epoch"],
			"type": { "kind": "numeric", "width": 64, "signed": false }
		})
	);
	assert_eq!(
		fields[5],
		json!({
			"name": "table",
			"type": {
				"kind": "fixedArray",
				"element": { "kind": "composite", "name": "WeightEntry" },
				"len": 32
			}
		})
	);
}
