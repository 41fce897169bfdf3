//! Renders the `Create`/`Update`/`Read`/`Query<Model>Dto` classes for one
//! model, built from the field buckets [`crate::dto_validator`] derives.

use dmmf_core::types::ParsedModel;

use crate::dto_validator::{
    create_field_specs, query_field_specs, read_field_specs, update_field_specs, FieldSpec,
};

/// The four DTO classes generated for a model, as a single file body.
#[must_use]
pub fn render_dto_file(model: &ParsedModel, search_fields: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Generated DTOs for {}. Do not edit by hand.\n\n",
        model.name()
    ));
    out.push_str(&render_class(
        &format!("Create{}Dto", model.name()),
        &create_field_specs(model),
    ));
    out.push('\n');
    out.push_str(&render_class(
        &format!("Update{}Dto", model.name()),
        &update_field_specs(model),
    ));
    out.push('\n');
    out.push_str(&render_class(
        &format!("Read{}Dto", model.name()),
        &read_field_specs(model),
    ));
    out.push('\n');
    out.push_str(&render_class(
        &format!("Query{}Dto", model.name()),
        &query_field_specs(model, search_fields),
    ));
    out
}

fn render_class(name: &str, fields: &[FieldSpec]) -> String {
    let mut out = format!("export class {name} {{\n");
    for field in fields {
        if !field.doc.is_empty() {
            out.push_str(&format!("  /** {} */\n", field.doc));
        }
        out.push_str(&format!("  {};\n", field.signature()));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;

    #[test]
    fn renders_all_four_classes_for_a_model() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_dto_file(user, &[]);
        assert!(body.contains("export class CreateUserDto"));
        assert!(body.contains("export class UpdateUserDto"));
        assert!(body.contains("export class ReadUserDto"));
        assert!(body.contains("export class QueryUserDto"));
    }

    #[test]
    fn update_dto_fields_are_all_optional() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_dto_file(user, &[]);
        let update_block = body
            .split("export class UpdateUserDto")
            .nth(1)
            .unwrap()
            .split("}\n")
            .next()
            .unwrap();
        for line in update_block.lines().filter(|l| l.contains(':')) {
            assert!(line.contains("?:"), "expected optional field, got: {line}");
        }
    }
}
