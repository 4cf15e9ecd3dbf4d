//! Built-in rule set applied before rendering.
//!
//! Mirrors the normalization the client generation pipeline has always done:
//! packed (alignment-relaxed) unsigned integers become plain integers of the
//! same width, and every account gains a leading `discriminator` field.

use crate::schema::FieldDefinition;
use crate::schema::NumericWidth;
use crate::schema::TypeDescriptor;
use crate::transform::Node;
use crate::transform::Rule;

/// Name of the synthetic field prepended to every account.
pub const DISCRIMINATOR_FIELD: &str = "discriminator";

/// Rewrite a field whose type is a packed unsigned integer of `width` to the
/// plain unsigned integer of the same width. One rule instance per supported
/// width; widths outside the set are left untouched until a rule for them is
/// added here.
pub fn narrow_packed(width: NumericWidth) -> Rule {
	Rule::new(
		format!("narrow_packed_u{}", width.bits()),
		move |node| {
			matches!(
				node,
				Node::Field(field) if field.ty == TypeDescriptor::packed_unsigned(width)
			)
		},
		move |node| {
			match node {
				Node::Field(mut field) => {
					if field.ty == TypeDescriptor::packed_unsigned(width) {
						field.ty = TypeDescriptor::unsigned(width);
					}
					Node::Field(field)
				}
				other => other,
			}
		},
	)
}

/// Prepend a `discriminator` field (plain u64) to an account's field
/// sequence.
///
/// The predicate skips accounts whose first field is already the
/// discriminator, so re-running the pipeline over an already-normalized
/// graph does not duplicate the field.
pub fn inject_discriminator() -> Rule {
	Rule::new(
		"inject_discriminator",
		|node| {
			match node {
				Node::Account(account) => {
					account
						.fields
						.first()
						.is_none_or(|field| field.name != DISCRIMINATOR_FIELD)
				}
				_ => false,
			}
		},
		|node| {
			match node {
				Node::Account(mut account) => {
					account.fields.insert(
						0,
						FieldDefinition {
							name: DISCRIMINATOR_FIELD.to_owned(),
							docs: Vec::new(),
							ty: TypeDescriptor::unsigned(NumericWidth::W64),
						},
					);
					Node::Account(account)
				}
				other => other,
			}
		},
	)
}

/// The ordered rule set used by the generation pipeline: narrow PodU16,
/// PodU32, and PodU64 fields, then discriminate accounts.
pub fn builtin_rules() -> Vec<Rule> {
	vec![
		narrow_packed(NumericWidth::W16),
		narrow_packed(NumericWidth::W32),
		narrow_packed(NumericWidth::W64),
		inject_discriminator(),
	]
}
