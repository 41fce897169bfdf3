//! Maps a [`ParsedField`] to the TypeScript type it should render as.
//!
//! Shared by every producer that needs to emit a property signature
//! (DTOs, validators, the SDK client) so the DMMF scalar → TS mapping lives
//! in exactly one place.

use dmmf_core::constants::FieldKind;
use dmmf_core::types::ParsedField;

/// The base TypeScript type for a field, ignoring `?`/`| null`/`[]`
/// modifiers — those are layered on by the caller via
/// [`render_property_type`].
#[must_use]
pub fn base_ts_type(field: &ParsedField) -> String {
    match field.kind() {
        FieldKind::Enum => field.type_name().to_string(),
        FieldKind::Object => field.type_name().to_string(),
        FieldKind::Scalar => scalar_ts_type(field.type_name()).to_string(),
        FieldKind::Unsupported => "unknown".to_string(),
    }
}

fn scalar_ts_type(dmmf_type: &str) -> &'static str {
    match dmmf_type {
        "String" | "Uuid" | "Decimal" => "string",
        "Int" | "Float" => "number",
        "BigInt" => "bigint",
        "Boolean" => "boolean",
        "DateTime" => "Date",
        "Json" => "Record<string, unknown>",
        "Bytes" => "Buffer",
        _ => "unknown",
    }
}

/// Render a field's full TypeScript type, including list, nullable, and
/// optional modifiers, as it would appear in a property signature:
/// `name<?>: Type<[]><| null>`.
#[must_use]
pub fn render_property_type(field: &ParsedField) -> String {
    let mut ty = base_ts_type(field);
    if field.is_list() {
        ty = format!("{ty}[]");
    }
    if field.is_nullable() && !field.is_list() {
        ty = format!("{ty} | null");
    }
    ty
}

/// Render the `name` / `name?` portion of a property signature.
#[must_use]
pub fn property_name(field: &ParsedField, optional: bool) -> String {
    if optional {
        format!("{}?", field.name())
    } else {
        field.name().to_string()
    }
}
