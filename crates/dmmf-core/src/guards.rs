//! Type guards translating the DMMF wire vocabulary (`kind` strings) into
//! the closed [`FieldKind`] enum the rest of the crate matches on.

use crate::constants::FieldKind;

/// Translate a raw DMMF `kind` string into a [`FieldKind`].
///
/// Returns `None` for anything other than the four kinds DMMF documents:
/// `"scalar"`, `"object"`, `"enum"`, `"unsupported"`. The parser turns a
/// `None` here into a [`crate::error::ParseError::UnrecognizedFieldKind`]
/// rather than silently defaulting to `Unsupported` — a genuinely new DMMF
/// kind should fail loudly, not get quietly dropped from generated output.
#[must_use]
pub fn classify_field_kind(raw_kind: &str) -> Option<FieldKind> {
    match raw_kind {
        "scalar" => Some(FieldKind::Scalar),
        "object" => Some(FieldKind::Object),
        "enum" => Some(FieldKind::Enum),
        "unsupported" => Some(FieldKind::Unsupported),
        _ => None,
    }
}

/// A field is a relation scalar (the FK-holding side) when it is `kind =
/// object` and declares `relationFromFields` — i.e. it is the side that
/// owns the foreign key columns, as opposed to the inverse side of a
/// one-to-many which declares no `relationFromFields`.
#[must_use]
pub fn is_relation_owning_side(kind: FieldKind, relation_from_fields: &[String]) -> bool {
    kind == FieldKind::Object && !relation_from_fields.is_empty()
}

/// A relation field is an implicit many-to-many junction side when it is a
/// list relation with no declared `relationFromFields` and no
/// `relationToFields` — Prisma generates the join table itself in this
/// case rather than the schema declaring one.
#[must_use]
pub fn is_implicit_many_to_many(
    kind: FieldKind,
    is_list: bool,
    relation_from_fields: &[String],
    relation_to_fields: &[String],
) -> bool {
    kind == FieldKind::Object
        && is_list
        && relation_from_fields.is_empty()
        && relation_to_fields.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_known_kinds() {
        assert_eq!(classify_field_kind("scalar"), Some(FieldKind::Scalar));
        assert_eq!(classify_field_kind("object"), Some(FieldKind::Object));
        assert_eq!(classify_field_kind("enum"), Some(FieldKind::Enum));
        assert_eq!(
            classify_field_kind("unsupported"),
            Some(FieldKind::Unsupported)
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(classify_field_kind("vector"), None);
    }

    #[test]
    fn owning_side_requires_from_fields() {
        assert!(is_relation_owning_side(
            FieldKind::Object,
            &["authorId".to_string()]
        ));
        assert!(!is_relation_owning_side(FieldKind::Object, &[]));
        assert!(!is_relation_owning_side(FieldKind::Scalar, &[]));
    }

    #[test]
    fn implicit_join_requires_list_and_no_declared_fields() {
        assert!(is_implicit_many_to_many(FieldKind::Object, true, &[], &[]));
        assert!(!is_implicit_many_to_many(
            FieldKind::Object,
            false,
            &[],
            &[]
        ));
        assert!(!is_implicit_many_to_many(
            FieldKind::Object,
            true,
            &["a".to_string()],
            &["b".to_string()]
        ));
    }
}
