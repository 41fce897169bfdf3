//! Fixture builders for constructing schemas without hand-writing DMMF JSON
//! in every test. Gated behind `test-support` so other crates' test code can
//! depend on it without pulling it into release builds of this crate.

use serde_json::{json, Value};

use crate::parser::parse;
use crate::types::ParsedSchema;

/// A minimal scalar `Int` id field, the shape most fixture models start
/// with.
#[must_use]
pub fn autoincrement_id_field(name: &str) -> Value {
    json!({
        "name": name,
        "kind": "scalar",
        "type": "Int",
        "isRequired": true,
        "isId": true,
        "hasDefaultValue": true,
        "default": {"name": "autoincrement", "args": []}
    })
}

/// A required scalar field of the given DMMF type name.
#[must_use]
pub fn scalar_field(name: &str, type_name: &str) -> Value {
    json!({
        "name": name,
        "kind": "scalar",
        "type": type_name,
        "isRequired": true
    })
}

/// A to-one relation field owning the foreign key.
#[must_use]
pub fn relation_field(name: &str, target_model: &str, fk_field: &str, required: bool) -> Value {
    json!({
        "name": name,
        "kind": "object",
        "type": target_model,
        "isRequired": required,
        "relationFromFields": [fk_field],
        "relationToFields": ["id"]
    })
}

/// A to-many inverse relation field (no owned foreign key).
#[must_use]
pub fn list_relation_field(name: &str, target_model: &str) -> Value {
    json!({
        "name": name,
        "kind": "object",
        "type": target_model,
        "isList": true
    })
}

/// A model with the given name and fields, assembled as raw DMMF JSON.
#[must_use]
pub fn model(name: &str, fields: Vec<Value>) -> Value {
    json!({
        "name": name,
        "fields": fields
    })
}

/// A DMMF enum with the given member names.
#[must_use]
pub fn r#enum(name: &str, values: &[&str]) -> Value {
    json!({
        "name": name,
        "values": values.iter().map(|v| json!({"name": v})).collect::<Vec<_>>()
    })
}

/// Assemble a full raw DMMF document from models and enums, and parse it.
///
/// # Panics
///
/// Panics if the assembled document fails to parse — fixtures are expected
/// to be structurally valid by construction; a panic here means the
/// fixture itself is wrong, not the code under test.
#[must_use]
pub fn parsed_schema(models: Vec<Value>, enums: Vec<Value>) -> ParsedSchema {
    let document = json!({
        "datamodel": {
            "models": models,
            "enums": enums
        }
    });
    let raw = serde_json::from_value(document).expect("fixture document must deserialize");
    parse(raw).expect("fixture document must parse")
}

/// A minimal two-model blog schema (`User` has many `Post`s), useful as a
/// baseline for tests that don't care about schema shape beyond "a
/// relation exists".
#[must_use]
pub fn blog_schema() -> ParsedSchema {
    parsed_schema(
        vec![
            model(
                "User",
                vec![
                    autoincrement_id_field("id"),
                    scalar_field("email", "String"),
                    list_relation_field("posts", "Post"),
                ],
            ),
            model(
                "Post",
                vec![
                    autoincrement_id_field("id"),
                    scalar_field("title", "String"),
                    relation_field("author", "User", "authorId", true),
                    scalar_field("authorId", "Int"),
                ],
            ),
        ],
        vec![],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_schema_fixture_parses() {
        let schema = blog_schema();
        assert!(schema.model("User").is_some());
        assert!(schema.model("Post").is_some());
    }
}
