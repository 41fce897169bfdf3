//! The single-pass per-model analyzer.
//!
//! Each model is walked exactly once: every field is classified into at
//! most one relationship entry, special-field slot, or plain scalar, and the
//! capability flags are derived from what that single walk found. No field
//! is inspected twice, and no model's analysis depends on another model's
//! analysis having already run — `analyze_schema` could run each model
//! concurrently, though today it doesn't need to.

use dmmf_core::constants::FieldKind;
use dmmf_core::types::{ParsedModel, ParsedSchema};

use crate::cache::{
    is_secret_field, AnalysisCache, ModelCapabilities, RelationCardinality, RelationshipInfo,
    SpecialFields, UnifiedModelAnalysis,
};

/// The lightweight pre-filter a model must pass before it's considered a
/// junction-table candidate: exactly two required relation object fields
/// that each own a foreign key, and the first object field differs from the
/// second object field's target (ruling out a pure self-relation pair).
const JUNCTION_CANDIDATE_FK_COUNT: usize = 2;

/// Analyze every model in a schema and return the filled cache.
#[must_use]
pub fn analyze_schema(schema: &ParsedSchema) -> AnalysisCache {
    let mut cache = AnalysisCache::new();
    for model in schema.models() {
        cache.insert(analyze_model(model));
    }
    cache
}

/// Analyze a single model.
#[must_use]
pub fn analyze_model(model: &ParsedModel) -> UnifiedModelAnalysis {
    let mut relationships = Vec::new();
    let mut secret_fields = Vec::new();
    let mut foreign_keys = Vec::new();
    let mut search_fields = Vec::new();
    let mut id_field = None;
    let mut created_at_field = None;
    let mut updated_at_field = None;
    let mut deleted_at_field = None;
    let mut slug_field = None;
    let mut has_featured = false;
    let mut owning_fk_relation_count = 0;

    for field in model.fields() {
        if field.is_id() {
            id_field = Some(field.name().to_string());
        }
        if field.is_updated_at() {
            updated_at_field = Some(field.name().to_string());
        }
        if field.name() == "createdAt" && field.kind() == FieldKind::Scalar {
            created_at_field = Some(field.name().to_string());
        }
        if field.name() == "deletedAt" && field.kind() == FieldKind::Scalar && field.is_nullable() {
            deleted_at_field = Some(field.name().to_string());
        }
        if field.kind() == FieldKind::Scalar
            && field.type_name() == "String"
            && field.is_unique()
            && matches!(field.name_lower().as_str(), "slug" | "handle")
        {
            slug_field = Some(field.name().to_string());
        }
        if field.kind() == FieldKind::Scalar && field.type_name() == "Boolean" && field.name_lower() == "featured" {
            has_featured = true;
        }
        if field.kind() == FieldKind::Scalar && field.type_name() == "String" && !field.is_unique() && !field.is_id() {
            search_fields.push(field.name().to_string());
        }
        if field.kind() == FieldKind::Scalar && is_secret_field(field) {
            secret_fields.push(field.name().to_string());
        }

        if field.kind() == FieldKind::Object {
            let Some(relation) = field.relation() else {
                continue;
            };
            let owns_fk = !relation.from_fields().is_empty();
            if owns_fk {
                foreign_keys.extend(relation.from_fields().iter().cloned());
                if field.is_required() {
                    owning_fk_relation_count += 1;
                }
            }
            let cardinality = classify_cardinality(field.is_list(), owns_fk);
            relationships.push(RelationshipInfo::new(
                field.name(),
                field.type_name(),
                cardinality,
                field.is_self_relation(),
            ));
        }
    }

    let special_fields = SpecialFields::new(
        id_field,
        created_at_field,
        updated_at_field,
        deleted_at_field,
        slug_field,
        secret_fields,
    );

    let is_junction_table = is_junction_candidate(model, owning_fk_relation_count);
    let has_search = !search_fields.is_empty();

    let capabilities = ModelCapabilities {
        has_composite_primary_key: model.is_composite_primary_key(),
        has_self_relation: model.has_self_relation(),
        is_junction_table,
        has_secret_fields: !special_fields.secret_fields().is_empty(),
        has_updated_at: special_fields.updated_at_field().is_some(),
        has_search,
        has_featured,
        foreign_keys,
        search_fields,
    };

    UnifiedModelAnalysis::new(model.name(), relationships, special_fields, capabilities)
}

fn classify_cardinality(is_list: bool, owns_fk: bool) -> RelationCardinality {
    match (is_list, owns_fk) {
        (true, _) => RelationCardinality::OneToMany,
        (false, true) => RelationCardinality::ManyToOne,
        (false, false) => RelationCardinality::OneToOne,
    }
}

/// A model is a junction-table candidate when exactly two of its fields are
/// required relation fields that each own a foreign key, and every
/// remaining field is either part of the composite primary key or a
/// read-only system timestamp — a payload column that is neither rules the
/// model out. This is a pre-filter, not a semantic guarantee; downstream
/// phases still treat the flag as a hint rather than an exclusive switch.
fn is_junction_candidate(model: &ParsedModel, owning_fk_relation_count: usize) -> bool {
    if owning_fk_relation_count != JUNCTION_CANDIDATE_FK_COUNT {
        return false;
    }

    model.fields().iter().all(|field| {
        let is_fk_relation =
            field.kind() == FieldKind::Object && field.relation().is_some_and(|r| !r.from_fields().is_empty());
        is_fk_relation || field.is_part_of_composite_primary_key() || field.is_read_only()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;
    use pretty_assertions::assert_eq;

    #[test]
    fn blog_schema_post_has_one_relationship_to_user() {
        let schema = testing::blog_schema();
        let post = schema.model("Post").unwrap();
        let analysis = analyze_model(post);
        assert_eq!(analysis.relationships().len(), 1);
        assert_eq!(analysis.relationships()[0].target_model(), "User");
        assert_eq!(
            analysis.relationships()[0].cardinality(),
            RelationCardinality::ManyToOne
        );
    }

    #[test]
    fn junction_table_with_two_required_fks_is_flagged() {
        let schema = testing::parsed_schema(
            vec![
                testing::model(
                    "User",
                    vec![testing::autoincrement_id_field("id")],
                ),
                testing::model(
                    "Tag",
                    vec![testing::autoincrement_id_field("id")],
                ),
                serde_json::json!({
                    "name": "UserTag",
                    "primaryKey": {"fields": ["userId", "tagId"]},
                    "fields": [
                        testing::relation_field("user", "User", "userId", true),
                        testing::scalar_field("userId", "Int"),
                        testing::relation_field("tag", "Tag", "tagId", true),
                        testing::scalar_field("tagId", "Int"),
                    ],
                }),
            ],
            vec![],
        );
        let user_tag = schema.model("UserTag").unwrap();
        let analysis = analyze_model(user_tag);
        assert!(analysis.capabilities().is_junction_table);
        assert!(user_tag.field("userId").unwrap().is_part_of_composite_primary_key());
    }

    #[test]
    fn join_table_with_non_key_payload_column_is_not_flagged_a_junction() {
        let schema = testing::parsed_schema(
            vec![
                testing::model("User", vec![testing::autoincrement_id_field("id")]),
                testing::model("Tag", vec![testing::autoincrement_id_field("id")]),
                serde_json::json!({
                    "name": "UserTag",
                    "primaryKey": {"fields": ["userId", "tagId"]},
                    "fields": [
                        testing::relation_field("user", "User", "userId", true),
                        testing::scalar_field("userId", "Int"),
                        testing::relation_field("tag", "Tag", "tagId", true),
                        testing::scalar_field("tagId", "Int"),
                        testing::scalar_field("note", "String"),
                    ],
                }),
            ],
            vec![],
        );
        let user_tag = schema.model("UserTag").unwrap();
        let analysis = analyze_model(user_tag);
        assert!(!analysis.capabilities().is_junction_table);
    }

    #[test]
    fn non_junction_model_with_one_relation_is_not_flagged() {
        let schema = testing::blog_schema();
        let post = schema.model("Post").unwrap();
        let analysis = analyze_model(post);
        assert!(!analysis.capabilities().is_junction_table);
    }

    #[test]
    fn secret_shaped_field_is_captured() {
        let schema = testing::parsed_schema(
            vec![testing::model(
                "User",
                vec![
                    testing::autoincrement_id_field("id"),
                    testing::scalar_field("passwordHash", "String"),
                ],
            )],
            vec![],
        );
        let user = schema.model("User").unwrap();
        let analysis = analyze_model(user);
        assert!(analysis.capabilities().has_secret_fields);
        assert_eq!(analysis.special_fields().secret_fields(), &["passwordHash".to_string()]);
    }

    #[test]
    fn soft_delete_marker_is_captured_only_when_nullable() {
        let schema = testing::parsed_schema(
            vec![testing::model(
                "Post",
                vec![
                    testing::autoincrement_id_field("id"),
                    json_field("deletedAt", "DateTime", false),
                ],
            )],
            vec![],
        );
        let post = schema.model("Post").unwrap();
        let analysis = analyze_model(post);
        assert!(analysis.special_fields().has_soft_delete());
    }

    #[test]
    fn search_and_foreign_key_capabilities_are_derived() {
        let schema = testing::parsed_schema(
            vec![
                testing::model("User", vec![testing::autoincrement_id_field("id")]),
                testing::model(
                    "Post",
                    vec![
                        testing::autoincrement_id_field("id"),
                        testing::scalar_field("title", "String"),
                        testing::relation_field("author", "User", "authorId", true),
                        testing::scalar_field("authorId", "Int"),
                    ],
                ),
            ],
            vec![],
        );
        let post = schema.model("Post").unwrap();
        let analysis = analyze_model(post);
        assert!(analysis.capabilities().has_search);
        assert_eq!(analysis.capabilities().search_fields, vec!["title".to_string()]);
        assert_eq!(analysis.capabilities().foreign_keys, vec!["authorId".to_string()]);
    }

    /// A required-optional scalar field builder with a non-unique flag
    /// outside what `dmmf_core::testing` provides directly.
    fn json_field(name: &str, type_name: &str, required: bool) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "kind": "scalar",
            "type": type_name,
            "isRequired": required
        })
    }
}
