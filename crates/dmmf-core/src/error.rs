//! Closed error types for parsing and validation.
//!
//! Kept as `thiserror` enums rather than `anyhow::Error` — this crate is a
//! library boundary, and callers (`codegen-pipeline`) need to match on
//! specific failure kinds rather than just print a message. `anyhow` only
//! shows up at the `codegen-cli` binary boundary.

use thiserror::Error;

/// A problem found while deserializing or structurally translating a raw
/// DMMF document, before any schema-level validation runs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to deserialize DMMF document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model {model} field {field} has unrecognized DMMF kind {kind:?}")]
    UnrecognizedFieldKind {
        model: String,
        field: String,
        kind: String,
    },

    #[error("model {model} field {field} is kind=enum but no enum named {type_name} exists")]
    DanglingEnumReference {
        model: String,
        field: String,
        type_name: String,
    },

    #[error("model {model} field {field} has a malformed default value: {reason}")]
    MalformedDefault {
        model: String,
        field: String,
        reason: String,
    },
}

/// One validation failure found by [`crate::validate::validate_detailed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("enum {name} has no values")]
    EmptyEnum { name: String },

    #[error(
        "model {model} field {field} is a required self-relation with no nullable foreign key; \
         add `?` to the scalar relation field or make the relation field a list"
    )]
    RequiredSelfRelationWithoutNullableForeignKey { model: String, field: String },

    #[error("models {first} and {second} collide case-insensitively as {canonical}")]
    CaseInsensitiveModelCollision {
        first: String,
        second: String,
        canonical: String,
    },

    #[error("circular relation detected: {cycle}")]
    CircularRelation { cycle: String },

    #[error("model {model} has no primary key and no unique field")]
    MissingIdentity { model: String },

    #[error("model {model} field {field} references unknown relation target {target}")]
    UnknownRelationTarget {
        model: String,
        field: String,
        target: String,
    },
}

/// The aggregate failure returned when a schema fails validation: every rule
/// violation found in one pass, not just the first.
#[derive(Debug, Error)]
#[error("schema validation failed with {} error(s)", .errors.len())]
pub struct SchemaValidationFailed {
    pub errors: Vec<ValidationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_validation_failed_message_reports_count() {
        let err = SchemaValidationFailed {
            errors: vec![ValidationError::EmptyEnum {
                name: "Role".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "schema validation failed with 1 error(s)");
    }
}
