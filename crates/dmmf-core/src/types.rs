//! The frozen intermediate representation produced by the parser.
//!
//! Every public type here exposes only shared (`&self`) accessors — there is
//! no `&mut` path back into a constructed `ParsedSchema`. That is how
//! "frozen" is expressed in Rust: not a runtime `Object.freeze` check, but
//! the absence of a mutation API, enforced by the borrow checker at every
//! call site. Construction is confined to `crate::parser`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::FieldKind;

/// A literal scalar default value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarLiteral {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// An already-resolved enum member name (rendered as `EnumName.VALUE`).
    EnumValue(String),
}

/// A `{name, args}` default generator call, e.g. `autoincrement()`,
/// `now()`, `dbgenerated("gen_random_uuid()")`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultGenerator {
    name: String,
    args: Arc<[serde_json::Value]>,
}

impl DefaultGenerator {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[serde_json::Value] {
        &self.args
    }
}

/// A field's default value: either a literal or a generator call. `None` at
/// the `ParsedField` level means "no default declared".
#[derive(Debug, Clone, PartialEq)]
pub enum PrismaDefaultValue {
    Literal(ScalarLiteral),
    Generator(DefaultGenerator),
}

/// A DMMF enum, frozen after parsing.
///
/// `values` may legitimately be empty — the parser retains empty enums
/// rather than rejecting them outright so validation can report them by
/// name (see [`crate::validate::validate_detailed`]).
#[derive(Debug, Clone)]
pub struct ParsedEnum {
    name: String,
    values: Arc<[String]>,
}

impl ParsedEnum {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Relation metadata carried only by `kind = Object` fields.
#[derive(Debug, Clone)]
pub struct RelationMetadata {
    from_fields: Arc<[String]>,
    to_fields: Arc<[String]>,
    relation_name: Option<String>,
}

impl RelationMetadata {
    #[must_use]
    pub fn new(
        from_fields: Vec<String>,
        to_fields: Vec<String>,
        relation_name: Option<String>,
    ) -> Self {
        Self {
            from_fields: from_fields.into(),
            to_fields: to_fields.into(),
            relation_name,
        }
    }

    #[must_use]
    pub fn from_fields(&self) -> &[String] {
        &self.from_fields
    }

    #[must_use]
    pub fn to_fields(&self) -> &[String] {
        &self.to_fields
    }

    #[must_use]
    pub fn relation_name(&self) -> Option<&str> {
        self.relation_name.as_deref()
    }

    /// A list relation whose `from_fields` is empty is an implicit
    /// many-to-many join.
    #[must_use]
    pub fn is_implicit_join(&self) -> bool {
        self.from_fields.is_empty()
    }
}

/// One field of a `ParsedModel`, frozen after the parser's enhancement pass.
#[derive(Debug, Clone)]
pub struct ParsedField {
    name: String,
    name_lower: String,
    type_name: String,
    kind: FieldKind,
    is_required: bool,
    is_nullable: bool,
    is_optional: bool,
    is_list: bool,
    is_id: bool,
    is_unique: bool,
    is_part_of_composite_primary_key: bool,
    is_read_only: bool,
    is_updated_at: bool,
    is_self_relation: bool,
    has_default_value: bool,
    has_db_default: bool,
    default: Option<PrismaDefaultValue>,
    relation: Option<RelationMetadata>,
    documentation: String,
}

/// Inputs needed to construct a [`ParsedField`].
///
/// A plain struct rather than a long constructor argument list — the parser
/// fills every field explicitly at each stage, so named fields make it clear
/// at the call site which derived flag is being set.
#[derive(Debug, Clone)]
pub struct ParsedFieldInit {
    pub name: String,
    pub type_name: String,
    pub kind: FieldKind,
    pub is_required: bool,
    pub is_nullable: bool,
    pub is_optional: bool,
    pub is_list: bool,
    pub is_id: bool,
    pub is_unique: bool,
    pub is_part_of_composite_primary_key: bool,
    pub is_read_only: bool,
    pub is_updated_at: bool,
    pub is_self_relation: bool,
    pub has_default_value: bool,
    pub has_db_default: bool,
    pub default: Option<PrismaDefaultValue>,
    pub relation: Option<RelationMetadata>,
    pub documentation: String,
}

impl ParsedField {
    #[must_use]
    pub fn new(init: ParsedFieldInit) -> Self {
        let name_lower = init.name.to_lowercase();
        Self {
            name: init.name,
            name_lower,
            type_name: init.type_name,
            kind: init.kind,
            is_required: init.is_required,
            is_nullable: init.is_nullable,
            is_optional: init.is_optional,
            is_list: init.is_list,
            is_id: init.is_id,
            is_unique: init.is_unique,
            is_part_of_composite_primary_key: init.is_part_of_composite_primary_key,
            is_read_only: init.is_read_only,
            is_updated_at: init.is_updated_at,
            is_self_relation: init.is_self_relation,
            has_default_value: init.has_default_value,
            has_db_default: init.has_db_default,
            default: init.default,
            relation: init.relation,
            documentation: init.documentation,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.is_required
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.is_optional
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.is_list
    }

    #[must_use]
    pub const fn is_id(&self) -> bool {
        self.is_id
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.is_unique
    }

    #[must_use]
    pub const fn is_part_of_composite_primary_key(&self) -> bool {
        self.is_part_of_composite_primary_key
    }

    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    #[must_use]
    pub const fn is_updated_at(&self) -> bool {
        self.is_updated_at
    }

    #[must_use]
    pub const fn is_self_relation(&self) -> bool {
        self.is_self_relation
    }

    #[must_use]
    pub const fn has_default_value(&self) -> bool {
        self.has_default_value
    }

    #[must_use]
    pub const fn has_db_default(&self) -> bool {
        self.has_db_default
    }

    #[must_use]
    pub fn default(&self) -> Option<&PrismaDefaultValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn relation(&self) -> Option<&RelationMetadata> {
        self.relation.as_ref()
    }

    #[must_use]
    pub fn documentation(&self) -> &str {
        &self.documentation
    }
}

/// Unique-field declarations on a model: either a single field or a
/// composite set.
#[derive(Debug, Clone)]
pub struct UniqueFieldSet {
    fields: Arc<[String]>,
}

impl UniqueFieldSet {
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }
}

/// A DMMF model after the parser's enhancement pass.
#[derive(Debug, Clone)]
pub struct ParsedModel {
    name: String,
    name_lower: String,
    db_name: Option<String>,
    fields: Arc<[ParsedField]>,
    primary_key: Arc<[String]>,
    unique_fields: Arc<[UniqueFieldSet]>,
    documentation: String,

    // Populated by the enhancement stage.
    id_field: Option<usize>,
    has_self_relation: bool,
    scalar_fields: Arc<[usize]>,
    relation_fields: Arc<[usize]>,
    create_fields: Arc<[usize]>,
    update_fields: Arc<[usize]>,
}

/// Inputs needed to construct a [`ParsedModel`] before enhancement.
#[derive(Debug, Clone)]
pub struct ParsedModelInit {
    pub name: String,
    pub db_name: Option<String>,
    pub fields: Vec<ParsedField>,
    pub primary_key: Vec<String>,
    pub unique_fields: Vec<UniqueFieldSet>,
    pub documentation: String,
}

impl ParsedModel {
    /// Build an enhanced model from its raw fields and the derived buckets.
    ///
    /// Only `crate::parser::enhance` is expected to compute these buckets —
    /// this constructor just assembles the already-derived indices into the
    /// frozen record.
    #[must_use]
    pub fn new_enhanced(
        init: ParsedModelInit,
        id_field: Option<usize>,
        has_self_relation: bool,
        scalar_fields: Vec<usize>,
        relation_fields: Vec<usize>,
        create_fields: Vec<usize>,
        update_fields: Vec<usize>,
    ) -> Self {
        let name_lower = init.name.to_lowercase();
        Self {
            name: init.name,
            name_lower,
            db_name: init.db_name,
            fields: init.fields.into(),
            primary_key: init.primary_key.into(),
            unique_fields: init.unique_fields.into(),
            documentation: init.documentation,
            id_field,
            has_self_relation,
            scalar_fields: scalar_fields.into(),
            relation_fields: relation_fields.into(),
            create_fields: create_fields.into(),
            update_fields: update_fields.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    #[must_use]
    pub fn db_name(&self) -> Option<&str> {
        self.db_name.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[ParsedField] {
        &self.fields
    }

    #[must_use]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    #[must_use]
    pub fn is_composite_primary_key(&self) -> bool {
        self.primary_key.len() > 1
    }

    #[must_use]
    pub fn unique_fields(&self) -> &[UniqueFieldSet] {
        &self.unique_fields
    }

    #[must_use]
    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    #[must_use]
    pub fn id_field(&self) -> Option<&ParsedField> {
        self.id_field.map(|idx| &self.fields[idx])
    }

    #[must_use]
    pub const fn has_self_relation(&self) -> bool {
        self.has_self_relation
    }

    #[must_use]
    pub fn scalar_fields(&self) -> impl Iterator<Item = &ParsedField> {
        self.scalar_fields.iter().map(move |&idx| &self.fields[idx])
    }

    #[must_use]
    pub fn relation_fields(&self) -> impl Iterator<Item = &ParsedField> {
        self.relation_fields
            .iter()
            .map(move |&idx| &self.fields[idx])
    }

    #[must_use]
    pub fn create_fields(&self) -> impl Iterator<Item = &ParsedField> {
        self.create_fields.iter().map(move |&idx| &self.fields[idx])
    }

    #[must_use]
    pub fn update_fields(&self) -> impl Iterator<Item = &ParsedField> {
        self.update_fields.iter().map(move |&idx| &self.fields[idx])
    }

    /// Find a field by exact name. `O(n)` — models rarely exceed a few dozen
    /// fields, and this keeps `ParsedField` storage as a flat `Arc<[_]>`
    /// instead of paying for a parallel name index nobody else needs.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ParsedField> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

/// The full, frozen schema: every model, every enum, and the indices derived
/// across all of them.
#[derive(Debug, Clone)]
pub struct ParsedSchema {
    models: Arc<[ParsedModel]>,
    enums: Arc<[ParsedEnum]>,
    model_map: Arc<HashMap<String, usize>>,
    enum_map: Arc<HashMap<String, usize>>,
    reverse_relation_map: Arc<HashMap<String, Arc<[ReverseRelation]>>>,
}

/// One entry in the reverse-relation index: a field on `owning_model` that
/// points at the schema's relation target.
#[derive(Debug, Clone)]
pub struct ReverseRelation {
    owning_model: String,
    field_name: String,
}

impl ReverseRelation {
    #[must_use]
    pub fn new(owning_model: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            owning_model: owning_model.into(),
            field_name: field_name.into(),
        }
    }

    #[must_use]
    pub fn owning_model(&self) -> &str {
        &self.owning_model
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl ParsedSchema {
    #[must_use]
    pub fn new(
        models: Vec<ParsedModel>,
        enums: Vec<ParsedEnum>,
        reverse_relation_map: HashMap<String, Vec<ReverseRelation>>,
    ) -> Self {
        let model_map = models
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.name().to_string(), idx))
            .collect();
        let enum_map = enums
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.name().to_string(), idx))
            .collect();
        let reverse_relation_map = reverse_relation_map
            .into_iter()
            .map(|(k, v)| (k, Arc::from(v)))
            .collect();

        Self {
            models: models.into(),
            enums: enums.into(),
            model_map: Arc::new(model_map),
            enum_map: Arc::new(enum_map),
            reverse_relation_map: Arc::new(reverse_relation_map),
        }
    }

    #[must_use]
    pub fn models(&self) -> &[ParsedModel] {
        &self.models
    }

    #[must_use]
    pub fn enums(&self) -> &[ParsedEnum] {
        &self.enums
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ParsedModel> {
        self.model_map.get(name).map(|&idx| &self.models[idx])
    }

    #[must_use]
    pub fn r#enum(&self, name: &str) -> Option<&ParsedEnum> {
        self.enum_map.get(name).map(|&idx| &self.enums[idx])
    }

    /// All fields on other models whose relation points at `target_model`.
    #[must_use]
    pub fn reverse_relations(&self, target_model: &str) -> &[ReverseRelation] {
        self.reverse_relation_map
            .get(target_model)
            .map_or(&[], |v| &v[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_name_lower_is_derived_at_construction() {
        let field = ParsedField::new(ParsedFieldInit {
            name: "UserId".to_string(),
            type_name: "String".to_string(),
            kind: FieldKind::Scalar,
            is_required: true,
            is_nullable: false,
            is_optional: false,
            is_list: false,
            is_id: false,
            is_unique: false,
            is_part_of_composite_primary_key: false,
            is_read_only: false,
            is_updated_at: false,
            is_self_relation: false,
            has_default_value: false,
            has_db_default: false,
            default: None,
            relation: None,
            documentation: String::new(),
        });
        assert_eq!(field.name_lower(), "userid");
    }

    #[test]
    fn model_name_lower_is_derived_at_construction() {
        let model = ParsedModel::new_enhanced(
            ParsedModelInit {
                name: "UserProfile".to_string(),
                db_name: None,
                fields: Vec::new(),
                primary_key: Vec::new(),
                unique_fields: Vec::new(),
                documentation: String::new(),
            },
            None,
            false,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(model.name_lower(), "userprofile");
    }

    #[test]
    fn composite_primary_key_flag() {
        let model = ParsedModel::new_enhanced(
            ParsedModelInit {
                name: "Membership".to_string(),
                db_name: None,
                fields: Vec::new(),
                primary_key: vec!["userId".to_string(), "orgId".to_string()],
                unique_fields: Vec::new(),
                documentation: String::new(),
            },
            None,
            false,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(model.is_composite_primary_key());
    }

    #[test]
    fn schema_maps_resolve_by_name() {
        let model = ParsedModel::new_enhanced(
            ParsedModelInit {
                name: "User".to_string(),
                db_name: None,
                fields: Vec::new(),
                primary_key: Vec::new(),
                unique_fields: Vec::new(),
                documentation: String::new(),
            },
            None,
            false,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let schema = ParsedSchema::new(vec![model], vec![], HashMap::new());
        assert!(schema.model("User").is_some());
        assert!(schema.model("Missing").is_none());
    }

    #[test]
    fn reverse_relations_default_to_empty_slice() {
        let schema = ParsedSchema::new(vec![], vec![], HashMap::new());
        assert!(schema.reverse_relations("User").is_empty());
    }
}
