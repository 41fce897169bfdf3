//! Shared field-shape helper consumed by both the DTO and validator
//! producers, so the two never independently decide which fields belong in
//! a model's create/update/read shape.
//!
//! This mirrors the DTO-bucket-disjointness invariant `dmmf-core` already
//! derives (`ParsedModel::create_fields`/`update_fields`) — this module just
//! adds the TypeScript-rendering layer on top of those buckets, once, for
//! both producers to reuse.

use dmmf_core::types::{ParsedField, ParsedModel};

use crate::ts_types::{property_name, render_property_type};

/// One property to render into a DTO class or a validator schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
    pub doc: String,
}

impl FieldSpec {
    fn from_field(field: &ParsedField, optional: bool) -> Self {
        Self {
            name: field.name().to_string(),
            ts_type: render_property_type(field),
            optional,
            doc: field.documentation().to_string(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}: {}", property_name_for(self), self.ts_type)
    }
}

fn property_name_for(spec: &FieldSpec) -> String {
    if spec.optional {
        format!("{}?", spec.name)
    } else {
        spec.name.clone()
    }
}

/// Fields that belong in the generated `Create<Model>Dto`: exactly
/// `model.create_fields()`, rendered optional when
/// `dmmf_core::helpers::is_optional_for_create` says the field may be
/// omitted at insert time.
#[must_use]
pub fn create_field_specs(model: &ParsedModel) -> Vec<FieldSpec> {
    model
        .create_fields()
        .map(|field| FieldSpec::from_field(field, dmmf_core::helpers::is_optional_for_create(field)))
        .collect()
}

/// Fields that belong in the generated `Update<Model>Dto`: every update
/// field, rendered optional — a `PATCH`-shaped update never requires every
/// column.
#[must_use]
pub fn update_field_specs(model: &ParsedModel) -> Vec<FieldSpec> {
    model
        .update_fields()
        .map(|field| FieldSpec::from_field(field, true))
        .collect()
}

/// Fields that belong in the generated `Read<Model>Dto`: every non-relation
/// field as returned by the database, required/nullable exactly as stored.
#[must_use]
pub fn read_field_specs(model: &ParsedModel) -> Vec<FieldSpec> {
    model
        .scalar_fields()
        .map(|field| FieldSpec::from_field(field, false))
        .collect()
}

/// Fields searchable/filterable through the generated `Query<Model>Dto`:
/// the id field, plus every scalar the analyzer flagged as a search field.
#[must_use]
pub fn query_field_specs(model: &ParsedModel, search_fields: &[String]) -> Vec<FieldSpec> {
    model
        .scalar_fields()
        .filter(|field| search_fields.iter().any(|name| name == field.name()) || field.is_id())
        .map(|field| FieldSpec::from_field(field, true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_fields_exclude_autoincrement_id() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let specs = create_field_specs(user);
        assert!(specs.iter().all(|s| s.name != "id"));
    }

    #[test]
    fn update_fields_are_always_optional() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let specs = update_field_specs(user);
        assert!(specs.iter().all(|s| s.optional));
    }

    #[test]
    fn signature_renders_optional_marker() {
        let spec = FieldSpec {
            name: "bio".to_string(),
            ts_type: "string".to_string(),
            optional: true,
            doc: String::new(),
        };
        assert_eq!(spec.signature(), "bio?: string");
    }
}
