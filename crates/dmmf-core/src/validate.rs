//! Schema-level rule checking, run after [`crate::parser::parse`] has
//! already produced a structurally valid [`ParsedSchema`].
//!
//! `validate` is the fast boolean check the pipeline calls on the hot path;
//! `validate_detailed` collects every violation in one pass, for callers
//! (the CLI `check` subcommand, the `validate-schema` pipeline phase) that
//! want the full list rather than a yes/no.

use std::collections::{HashMap, HashSet};

use crate::error::{SchemaValidationFailed, ValidationError};
use crate::types::ParsedSchema;

/// Returns `true` if the schema has no validation errors.
#[must_use]
pub fn validate(schema: &ParsedSchema) -> bool {
    collect_errors(schema).is_empty()
}

/// Run every validation rule and return every violation found, rather than
/// stopping at the first.
///
/// # Errors
///
/// Returns [`SchemaValidationFailed`] carrying the full error list if any
/// rule is violated.
pub fn validate_detailed(schema: &ParsedSchema) -> Result<(), SchemaValidationFailed> {
    let errors = collect_errors(schema);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationFailed { errors })
    }
}

fn collect_errors(schema: &ParsedSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_empty_enums(schema, &mut errors);
    check_required_self_relations(schema, &mut errors);
    check_case_insensitive_model_collisions(schema, &mut errors);
    check_missing_identity(schema, &mut errors);
    check_unknown_relation_targets(schema, &mut errors);
    check_circular_relations(schema, &mut errors);

    errors
}

fn check_empty_enums(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    for e in schema.enums() {
        if e.values().is_empty() {
            errors.push(ValidationError::EmptyEnum {
                name: e.name().to_string(),
            });
        }
    }
}

/// A required (non-nullable) self-relation object field must have a
/// nullable scalar foreign key backing it, or the relation can never be
/// null and a root node (no parent) becomes unrepresentable.
fn check_required_self_relations(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    for model in schema.models() {
        for field in model.fields() {
            if !field.is_self_relation() || field.is_list() {
                continue;
            }
            let Some(relation) = field.relation() else {
                continue;
            };
            if relation.from_fields().is_empty() {
                continue;
            }
            let fk_is_nullable = relation
                .from_fields()
                .iter()
                .all(|fk_name| model.field(fk_name).is_some_and(|fk| fk.is_nullable()));
            if field.is_required() && !fk_is_nullable {
                errors.push(ValidationError::RequiredSelfRelationWithoutNullableForeignKey {
                    model: model.name().to_string(),
                    field: field.name().to_string(),
                });
            }
        }
    }
}

fn check_case_insensitive_model_collisions(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for model in schema.models() {
        let canonical = model.name_lower();
        if let Some(&first) = seen.get(canonical) {
            if first != model.name() {
                errors.push(ValidationError::CaseInsensitiveModelCollision {
                    first: first.to_string(),
                    second: model.name().to_string(),
                    canonical: canonical.to_string(),
                });
            }
        } else {
            seen.insert(canonical.to_string(), model.name());
        }
    }
}

fn check_missing_identity(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    for model in schema.models() {
        let has_id = model.id_field().is_some() || !model.primary_key().is_empty();
        let has_unique = !model.unique_fields().is_empty() || model.fields().iter().any(|f| f.is_unique());
        if !has_id && !has_unique {
            errors.push(ValidationError::MissingIdentity {
                model: model.name().to_string(),
            });
        }
    }
}

fn check_unknown_relation_targets(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    for model in schema.models() {
        for field in model.relation_fields() {
            if schema.model(field.type_name()).is_none() {
                errors.push(ValidationError::UnknownRelationTarget {
                    model: model.name().to_string(),
                    field: field.name().to_string(),
                    target: field.type_name().to_string(),
                });
            }
        }
    }
}

/// Detect relation cycles with a single global DFS over the model graph,
/// rather than one DFS per model — a per-model run would rediscover and
/// report the same cycle once per model on it. Cycles are canonicalized by
/// sorting their member names and joining them, so the same cycle found
/// from two different starting points (or in either traversal direction)
/// dedups to one error.
fn check_circular_relations(schema: &ParsedSchema, errors: &mut Vec<ValidationError>) {
    let mut reported: HashSet<String> = HashSet::new();
    let mut visiting: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();

    for model in schema.models() {
        if !visited.contains(model.name()) {
            dfs(
                schema,
                model.name(),
                &mut visiting,
                &mut visited,
                &mut reported,
                errors,
            );
        }
    }
}

fn dfs(
    schema: &ParsedSchema,
    model_name: &str,
    visiting: &mut Vec<String>,
    visited: &mut HashSet<String>,
    reported: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(pos) = visiting.iter().position(|m| m == model_name) {
        let mut cycle_members: Vec<String> = visiting[pos..].to_vec();
        cycle_members.sort();
        let canonical = cycle_members.join(",");
        if reported.insert(canonical.clone()) {
            errors.push(ValidationError::CircularRelation { cycle: canonical });
        }
        return;
    }
    if visited.contains(model_name) {
        return;
    }

    visiting.push(model_name.to_string());

    if let Some(model) = schema.model(model_name) {
        for field in model.relation_fields() {
            if field.is_self_relation() {
                continue;
            }
            // Only a required, non-list relation forces the chain onward —
            // the list side of a 1:N (e.g. `User.posts: Post[]`) is an
            // inverse back-reference, not itself a cycle-forming edge.
            if !field.is_required() || field.is_list() {
                continue;
            }
            dfs(schema, field.type_name(), visiting, visited, reported, errors);
        }
    }

    visiting.pop();
    visited.insert(model_name.to_string());
}
