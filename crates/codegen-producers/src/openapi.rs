//! Assembles `openapi/openapi.json`: one schema object per model plus a
//! CRUD path set, built from the same field buckets the DTO producer uses
//! so the two never drift apart.

use serde_json::{json, Map, Value};

use dmmf_core::types::ParsedModel;

use crate::ts_types::base_ts_type;

fn openapi_type(ts_type: &str) -> Value {
    match ts_type {
        "string" => json!({"type": "string"}),
        "number" => json!({"type": "number"}),
        "bigint" => json!({"type": "integer", "format": "int64"}),
        "boolean" => json!({"type": "boolean"}),
        "Date" => json!({"type": "string", "format": "date-time"}),
        "Record<string, unknown>" => json!({"type": "object"}),
        "Buffer" => json!({"type": "string", "format": "byte"}),
        _ => json!({}),
    }
}

fn model_schema(model: &ParsedModel) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in model.scalar_fields() {
        properties.insert(field.name().to_string(), openapi_type(&base_ts_type(field)));
        if field.is_required() && !field.is_nullable() {
            required.push(Value::String(field.name().to_string()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn model_paths(model: &ParsedModel) -> Value {
    let name = model.name();
    let collection = format!("/{}", model.name_lower());
    let item = format!("/{}/{{id}}", model.name_lower());
    json!({
        collection: {
            "get": {"operationId": format!("list{name}"), "responses": {"200": {"description": "OK"}}},
            "post": {"operationId": format!("create{name}"), "responses": {"201": {"description": "Created"}}},
        },
        item: {
            "get": {"operationId": format!("get{name}"), "responses": {"200": {"description": "OK"}, "404": {"description": "Not found"}}},
            "patch": {"operationId": format!("update{name}"), "responses": {"200": {"description": "OK"}}},
            "delete": {"operationId": format!("delete{name}"), "responses": {"204": {"description": "No content"}}},
        },
    })
}

/// Build the full OpenAPI document body for a schema's models, sorted by
/// model name for a reproducible file.
#[must_use]
pub fn render_openapi_document(models: &[&ParsedModel]) -> String {
    let mut sorted: Vec<&&ParsedModel> = models.iter().collect();
    sorted.sort_by_key(|m| m.name().to_string());

    let mut schemas = Map::new();
    let mut paths = Map::new();
    for model in sorted {
        schemas.insert(model.name().to_string(), model_schema(model));
        if let Value::Object(model_path_entries) = model_paths(model) {
            paths.extend(model_path_entries);
        }
    }

    let document = json!({
        "openapi": "3.0.3",
        "info": {"title": "Generated API", "version": "1.0.0"},
        "paths": paths,
        "components": {"schemas": schemas},
    });

    serde_json::to_string_pretty(&document).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;

    #[test]
    fn document_includes_a_schema_and_paths_per_model() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let post = schema.model("Post").unwrap();
        let body = render_openapi_document(&[user, post]);
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert!(parsed["components"]["schemas"]["User"].is_object());
        assert!(parsed["paths"]["/post"]["post"].is_object());
    }
}
