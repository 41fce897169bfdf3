//! Small query helpers over [`crate::types`] used by producers and the
//! analyzer, kept here so both depend on one implementation of each rule
//! rather than re-deriving it.

use crate::constants::is_system_timestamp_field_name;
use crate::types::{ParsedField, ParsedModel, ParsedSchema, PrismaDefaultValue, ScalarLiteral};

/// `Number.MAX_SAFE_INTEGER` (2^53 - 1) — the largest magnitude a `BigInt`
/// default can have and still round-trip through a JS numeric literal.
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Look up a field on a model by name.
#[must_use]
pub fn get_field<'a>(model: &'a ParsedModel, name: &str) -> Option<&'a ParsedField> {
    model.field(name)
}

/// Resolve the model a relation field points at.
#[must_use]
pub fn get_relation_target<'a>(
    schema: &'a ParsedSchema,
    field: &ParsedField,
) -> Option<&'a ParsedModel> {
    schema.model(field.type_name())
}

/// A field is excluded from a generated `Create` DTO when it is DB-managed
/// (autoincrement id, `dbgenerated` default) or a system timestamp with a
/// DB-managed default. A system timestamp with a client-managed default
/// (e.g. `createdAt DateTime @default(now())` generated client-side) stays
/// writable.
#[must_use]
pub fn is_optional_for_create(field: &ParsedField) -> bool {
    if field.is_id() && field.has_db_default() {
        return true;
    }
    if is_system_timestamp_field_name(field.name()) && field.has_db_default() {
        return true;
    }
    field.is_required() && !field.has_default_value() && !field.is_list()
        || field.is_nullable()
        || field.has_default_value()
}

/// Whether a field's TypeScript type should be unioned with `null`.
#[must_use]
pub fn is_nullable(field: &ParsedField) -> bool {
    field.is_nullable() && !field.is_list()
}

/// Render a default value as source text suitable for an inline TSDoc
/// `@default` tag. Generator calls render as `name(args...)`; literals
/// render as their TypeScript literal form.
#[must_use]
pub fn format_default_for_doc_comment(default: &PrismaDefaultValue) -> String {
    match default {
        PrismaDefaultValue::Literal(ScalarLiteral::Int(v)) => v.to_string(),
        PrismaDefaultValue::Literal(ScalarLiteral::Float(v)) => v.to_string(),
        PrismaDefaultValue::Literal(ScalarLiteral::Bool(v)) => v.to_string(),
        PrismaDefaultValue::Literal(ScalarLiteral::Str(v)) => {
            format!("\"{}\"", crate::security::escape_string_literal(v))
        }
        PrismaDefaultValue::Literal(ScalarLiteral::EnumValue(v)) => v.clone(),
        PrismaDefaultValue::Generator(gen) => {
            let args: Vec<String> = gen.args().iter().map(ToString::to_string).collect();
            format!("{}({})", gen.name(), args.join(", "))
        }
    }
}

/// Render `field`'s default as a literal suitable for embedding directly in
/// generated source (a DTO property initializer, an OpenAPI example), as
/// opposed to [`format_default_for_doc_comment`]'s looser doc-tag text.
///
/// Returns `None` when there is nothing safe to embed: no default at all,
/// a DB-managed default (the database picks the value, not generated code),
/// a non-finite float, or a non-integer value on a `BigInt` field. Enum
/// defaults render as `EnumName.VALUE` rather than the bare variant name,
/// since the parser stores an enum default's DMMF string as a plain
/// [`ScalarLiteral::Str`] with no enum-name context of its own.
#[must_use]
pub fn get_default_value_string(field: &ParsedField) -> Option<String> {
    if field.has_db_default() {
        return None;
    }
    match field.default()? {
        PrismaDefaultValue::Literal(ScalarLiteral::Int(v)) => {
            if field.type_name() == "BigInt" && v.unsigned_abs() > MAX_SAFE_INTEGER {
                return None;
            }
            Some(v.to_string())
        }
        PrismaDefaultValue::Literal(ScalarLiteral::Float(v)) => {
            if !v.is_finite() {
                return None;
            }
            if field.type_name() == "BigInt" && v.fract() != 0.0 {
                return None;
            }
            Some(v.to_string())
        }
        PrismaDefaultValue::Literal(ScalarLiteral::Bool(v)) => Some(v.to_string()),
        PrismaDefaultValue::Literal(ScalarLiteral::Str(v)) => {
            if field.kind() == crate::constants::FieldKind::Enum {
                Some(format!("{}.{v}", field.type_name()))
            } else {
                Some(format!("\"{}\"", crate::security::escape_string_literal(v)))
            }
        }
        PrismaDefaultValue::Literal(ScalarLiteral::EnumValue(v)) => {
            Some(format!("{}.{v}", field.type_name()))
        }
        // A client-managed generator call (`now()`, `uuid()`, `cuid()`) has no
        // literal source form; it is evaluated, not embedded.
        PrismaDefaultValue::Generator(_) => None,
    }
}

/// Whether a default is produced client-side (at generation/runtime) rather
/// than by the database — i.e. the complement of `has_db_default`, derived
/// from the generator name rather than trusted blindly from the DMMF flag.
#[must_use]
pub fn is_client_managed_default(default: &PrismaDefaultValue) -> bool {
    match default {
        PrismaDefaultValue::Literal(_) => true,
        PrismaDefaultValue::Generator(gen) => {
            crate::constants::CLIENT_MANAGED_DEFAULT_GENERATORS.contains(&gen.name())
        }
    }
}
