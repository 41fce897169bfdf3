//! Turns a [`crate::raw::RawDocument`] into a frozen [`ParsedSchema`].
//!
//! Parsing runs in four stages, in order: enums, models/fields, the
//! reverse-relation index, then a model enhancement pass that buckets each
//! model's fields and derives its `id_field`/`has_self_relation` flags. Each
//! stage only reads the output of the stage before it — nothing here
//! revisits an earlier stage's decision.

use std::collections::HashMap;

use serde_json::Value;

use crate::constants::is_db_managed_generator;
use crate::error::ParseError;
use crate::guards::classify_field_kind;
use crate::raw::{RawDefaultGenerator, RawDocument, RawEnum, RawField, RawModel};
use crate::types::{
    DefaultGenerator, ParsedEnum, ParsedField, ParsedFieldInit, ParsedModel, ParsedModelInit,
    ParsedSchema, PrismaDefaultValue, RelationMetadata, ReverseRelation, ScalarLiteral,
    UniqueFieldSet,
};

/// Parse a raw DMMF document into the frozen IR.
///
/// This performs structural parsing only (stage 1 through the enhancement
/// pass) — schema-level rule checking (empty enums, circular relations,
/// collisions) is [`crate::validate::validate_detailed`], run separately so
/// callers can choose whether a structurally-valid-but-rule-violating
/// schema should abort or just warn.
pub fn parse(raw: RawDocument) -> Result<ParsedSchema, ParseError> {
    let enums = parse_enums(&raw.datamodel.enums);
    let enum_names: Vec<&str> = enums.iter().map(ParsedEnum::name).collect();

    let mut models = Vec::with_capacity(raw.datamodel.models.len());
    for raw_model in &raw.datamodel.models {
        models.push(parse_model(raw_model, &enum_names)?);
    }

    let reverse_relation_map = build_reverse_relation_index(&models);

    let models = models
        .into_iter()
        .map(|(init, relation_field_indices)| enhance(init, &relation_field_indices))
        .collect();

    Ok(ParsedSchema::new(models, enums, reverse_relation_map))
}

fn parse_enums(raw_enums: &[RawEnum]) -> Vec<ParsedEnum> {
    raw_enums
        .iter()
        .map(|e| {
            let values = e.values.iter().map(|v| v.name.clone()).collect();
            ParsedEnum::new(e.name.clone(), values)
        })
        .collect()
}

/// Parse one model's fields. Returns the not-yet-enhanced init struct
/// alongside the indices of fields that are self-relations, which
/// `enhance` needs without re-scanning.
fn parse_model(
    raw_model: &RawModel,
    enum_names: &[&str],
) -> Result<(ParsedModelInit, Vec<usize>), ParseError> {
    let mut fields = Vec::with_capacity(raw_model.fields.len());
    let mut self_relation_indices = Vec::new();

    let primary_key = raw_model
        .primary_key
        .as_ref()
        .map(|pk| pk.fields.clone())
        .unwrap_or_default();
    let is_composite_pk = primary_key.len() > 1;

    for (idx, raw_field) in raw_model.fields.iter().enumerate() {
        let mut field = parse_field(&raw_model.name, raw_field, enum_names)?;
        if is_composite_pk && primary_key.iter().any(|pk_name| pk_name == field.name()) {
            field = mark_part_of_composite_primary_key(field);
        }
        if field.is_self_relation() {
            self_relation_indices.push(idx);
        }
        fields.push(field);
    }

    let unique_fields = raw_model
        .unique_fields
        .iter()
        .cloned()
        .map(UniqueFieldSet::new)
        .collect();

    let init = ParsedModelInit {
        name: raw_model.name.clone(),
        db_name: raw_model.db_name.clone(),
        fields,
        primary_key,
        unique_fields,
        documentation: raw_model
            .documentation
            .as_deref()
            .map(crate::security::sanitize_documentation)
            .unwrap_or_default(),
    };

    Ok((init, self_relation_indices))
}

fn parse_field(
    model_name: &str,
    raw_field: &RawField,
    enum_names: &[&str],
) -> Result<ParsedField, ParseError> {
    let kind = classify_field_kind(&raw_field.kind).ok_or_else(|| ParseError::UnrecognizedFieldKind {
        model: model_name.to_string(),
        field: raw_field.name.clone(),
        kind: raw_field.kind.clone(),
    })?;

    if kind == crate::constants::FieldKind::Enum && !enum_names.contains(&raw_field.type_name.as_str()) {
        return Err(ParseError::DanglingEnumReference {
            model: model_name.to_string(),
            field: raw_field.name.clone(),
            type_name: raw_field.type_name.clone(),
        });
    }

    let is_self_relation =
        kind == crate::constants::FieldKind::Object && raw_field.type_name == model_name;

    let relation = if kind == crate::constants::FieldKind::Object {
        Some(RelationMetadata::new(
            raw_field.relation_from_fields.clone(),
            raw_field.relation_to_fields.clone(),
            raw_field.relation_name.clone(),
        ))
    } else {
        None
    };

    let default = raw_field
        .default
        .as_ref()
        .map(|value| parse_default_value(model_name, &raw_field.name, value))
        .transpose()?;

    let has_db_default = default
        .as_ref()
        .is_some_and(|d| matches!(d, PrismaDefaultValue::Generator(gen) if is_db_managed_generator(gen.name())));

    Ok(ParsedField::new(ParsedFieldInit {
        name: raw_field.name.clone(),
        type_name: raw_field.type_name.clone(),
        kind,
        is_required: raw_field.is_required,
        is_nullable: !raw_field.is_required && !raw_field.is_list,
        is_optional: !raw_field.is_required,
        is_list: raw_field.is_list,
        is_id: raw_field.is_id,
        is_unique: raw_field.is_unique,
        is_part_of_composite_primary_key: false,
        is_read_only: raw_field.is_read_only,
        is_updated_at: raw_field.is_updated_at,
        is_self_relation,
        has_default_value: raw_field.has_default_value,
        has_db_default,
        default,
        relation,
        documentation: raw_field
            .documentation
            .as_deref()
            .map(crate::security::sanitize_documentation)
            .unwrap_or_default(),
    }))
}

/// Rebuild a field with `is_part_of_composite_primary_key` set, since
/// `ParsedField` exposes no mutation API once constructed.
fn mark_part_of_composite_primary_key(field: ParsedField) -> ParsedField {
    ParsedField::new(ParsedFieldInit {
        name: field.name().to_string(),
        type_name: field.type_name().to_string(),
        kind: field.kind(),
        is_required: field.is_required(),
        is_nullable: field.is_nullable(),
        is_optional: field.is_optional(),
        is_list: field.is_list(),
        is_id: field.is_id(),
        is_unique: field.is_unique(),
        is_part_of_composite_primary_key: true,
        is_read_only: field.is_read_only(),
        is_updated_at: field.is_updated_at(),
        is_self_relation: field.is_self_relation(),
        has_default_value: field.has_default_value(),
        has_db_default: field.has_db_default(),
        default: field.default().cloned(),
        relation: field.relation().cloned(),
        documentation: field.documentation().to_string(),
    })
}

fn parse_default_value(
    model_name: &str,
    field_name: &str,
    value: &Value,
) -> Result<PrismaDefaultValue, ParseError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PrismaDefaultValue::Literal(ScalarLiteral::Int(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(PrismaDefaultValue::Literal(ScalarLiteral::Float(f)))
            } else {
                Err(ParseError::MalformedDefault {
                    model: model_name.to_string(),
                    field: field_name.to_string(),
                    reason: "number out of range".to_string(),
                })
            }
        }
        Value::Bool(b) => Ok(PrismaDefaultValue::Literal(ScalarLiteral::Bool(*b))),
        Value::String(s) => Ok(PrismaDefaultValue::Literal(ScalarLiteral::Str(s.clone()))),
        Value::Object(_) => {
            let gen: RawDefaultGenerator =
                serde_json::from_value(value.clone()).map_err(|e| ParseError::MalformedDefault {
                    model: model_name.to_string(),
                    field: field_name.to_string(),
                    reason: e.to_string(),
                })?;
            Ok(PrismaDefaultValue::Generator(DefaultGenerator::new(
                gen.name, gen.args,
            )))
        }
        other => Err(ParseError::MalformedDefault {
            model: model_name.to_string(),
            field: field_name.to_string(),
            reason: format!("unsupported default shape: {other}"),
        }),
    }
}

fn build_reverse_relation_index(
    models: &[(ParsedModelInit, Vec<usize>)],
) -> HashMap<String, Vec<ReverseRelation>> {
    let mut index: HashMap<String, Vec<ReverseRelation>> = HashMap::new();
    for (init, _) in models {
        for field in &init.fields {
            if field.kind() == crate::constants::FieldKind::Object {
                index
                    .entry(field.type_name().to_string())
                    .or_default()
                    .push(ReverseRelation::new(init.name.clone(), field.name().to_string()));
            }
        }
    }
    index
}

/// Bucket a model's fields and derive its `id_field`/`has_self_relation`
/// flags, consuming the init struct built by [`parse_model`].
fn enhance(init: ParsedModelInit, self_relation_indices: &[usize]) -> ParsedModel {
    let mut id_field = None;
    let mut scalar_fields = Vec::new();
    let mut relation_fields = Vec::new();
    let mut create_fields = Vec::new();
    let mut update_fields = Vec::new();

    for (idx, field) in init.fields.iter().enumerate() {
        if field.is_id() {
            id_field = Some(idx);
        }
        match field.kind() {
            crate::constants::FieldKind::Scalar | crate::constants::FieldKind::Enum => {
                scalar_fields.push(idx);
            }
            crate::constants::FieldKind::Object => relation_fields.push(idx),
            crate::constants::FieldKind::Unsupported => {}
        }

        let is_db_managed_timestamp =
            field.has_db_default() && crate::constants::is_system_timestamp_field_name(field.name());
        let excluded_from_create_and_update = field.is_id()
            || field.is_read_only()
            || field.is_updated_at()
            || is_db_managed_timestamp
            // Relations live in `relation_fields`, never in `create_fields`/
            // `update_fields` — they're handled through FK scalars, and the
            // DTO-bucket-disjointness invariant requires create ∩ relation = ∅.
            || field.kind() == crate::constants::FieldKind::Object
            || field.kind() == crate::constants::FieldKind::Unsupported;

        if !excluded_from_create_and_update {
            create_fields.push(idx);
            update_fields.push(idx);
        }
    }

    let has_self_relation = !self_relation_indices.is_empty();

    ParsedModel::new_enhanced(
        init,
        id_field,
        has_self_relation,
        scalar_fields,
        relation_fields,
        create_fields,
        update_fields,
    )
}
