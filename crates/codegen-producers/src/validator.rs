//! Renders `zod` request-validation schemas paired to the DTOs this model
//! produces. Consumes the same field buckets as [`crate::dto`] so a field
//! can never be optional in one and required in the other.

use dmmf_core::types::ParsedModel;

use crate::dto_validator::{create_field_specs, update_field_specs, FieldSpec};

#[must_use]
pub fn render_validator_file(model: &ParsedModel) -> String {
    let mut out = String::new();
    out.push_str("import { z } from 'zod';\n\n");
    out.push_str(&render_schema(
        &format!("create{}Schema", model.name()),
        &create_field_specs(model),
    ));
    out.push('\n');
    out.push_str(&render_schema(
        &format!("update{}Schema", model.name()),
        &update_field_specs(model),
    ));
    out
}

fn render_schema(name: &str, fields: &[FieldSpec]) -> String {
    let mut out = format!("export const {name} = z.object({{\n");
    for field in fields {
        out.push_str(&format!(
            "  {}: {},\n",
            field.name,
            zod_type(&field.ts_type, field.optional)
        ));
    }
    out.push_str("});\n");
    out
}

fn zod_type(ts_type: &str, optional: bool) -> String {
    let base = ts_type.strip_suffix(" | null");
    let (core, nullable) = match base {
        Some(inner) => (inner, true),
        None => (ts_type, false),
    };
    let mut zod = match core {
        "string" => "z.string()".to_string(),
        "number" => "z.number()".to_string(),
        "bigint" => "z.bigint()".to_string(),
        "boolean" => "z.boolean()".to_string(),
        "Date" => "z.coerce.date()".to_string(),
        "Buffer" => "z.instanceof(Buffer)".to_string(),
        "Record<string, unknown>" => "z.record(z.unknown())".to_string(),
        other if other.ends_with("[]") => {
            format!("z.array({})", zod_type(&other[..other.len() - 2], false))
        }
        other => format!("z.custom<{other}>()"),
    };
    if nullable {
        zod = format!("{zod}.nullable()");
    }
    if optional {
        zod = format!("{zod}.optional()");
    }
    zod
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;

    #[test]
    fn scalar_field_maps_to_zod_string() {
        assert_eq!(zod_type("string", false), "z.string()");
    }

    #[test]
    fn nullable_optional_field_chains_both_modifiers() {
        assert_eq!(
            zod_type("string | null", true),
            "z.string().nullable().optional()"
        );
    }

    #[test]
    fn renders_both_schemas_for_a_model() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_validator_file(user);
        assert!(body.contains("export const createUserSchema"));
        assert!(body.contains("export const updateUserSchema"));
    }
}
