//! Deserialization shapes for the Prisma DMMF JSON document.
//!
//! These mirror the wire format field-for-field (including its camelCase
//! naming) and carry no derived state — `crate::parser` is the only place
//! that turns these into the frozen [`crate::types`] IR. Unknown top-level
//! DMMF sections (`schema`, `mappings`) are intentionally not modeled here;
//! only `datamodel` is consumed.

use serde::Deserialize;
use serde_json::Value;

/// The root of a DMMF document, as read from `prisma generate` output or a
/// hand-authored fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub datamodel: RawDatamodel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDatamodel {
    #[serde(default)]
    pub models: Vec<RawModel>,
    #[serde(default)]
    pub enums: Vec<RawEnum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnumValue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModel {
    pub name: String,
    #[serde(rename = "dbName", default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
    #[serde(rename = "primaryKey", default)]
    pub primary_key: Option<RawPrimaryKey>,
    #[serde(rename = "uniqueFields", default)]
    pub unique_fields: Vec<Vec<String>>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(rename = "isGenerated", default)]
    pub is_generated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrimaryKey {
    #[serde(default)]
    pub fields: Vec<String>,
}

/// A single DMMF field. `kind` is a DMMF-defined string (`"scalar"`,
/// `"object"`, `"enum"`, `"unsupported"`) rather than an enum here, since
/// this layer has no business rejecting a kind it doesn't recognize —
/// `crate::guards` does that translation and rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    pub name: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "isRequired", default)]
    pub is_required: bool,
    #[serde(rename = "isList", default)]
    pub is_list: bool,
    #[serde(rename = "isUnique", default)]
    pub is_unique: bool,
    #[serde(rename = "isId", default)]
    pub is_id: bool,
    #[serde(rename = "isReadOnly", default)]
    pub is_read_only: bool,
    #[serde(rename = "isUpdatedAt", default)]
    pub is_updated_at: bool,
    #[serde(rename = "hasDefaultValue", default)]
    pub has_default_value: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(rename = "relationName", default)]
    pub relation_name: Option<String>,
    #[serde(rename = "relationFromFields", default)]
    pub relation_from_fields: Vec<String>,
    #[serde(rename = "relationToFields", default)]
    pub relation_to_fields: Vec<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// The shape of `RawField::default` when it is a generator call object
/// (`{"name": "autoincrement", "args": []}`) rather than a literal.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDefaultGenerator {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}
