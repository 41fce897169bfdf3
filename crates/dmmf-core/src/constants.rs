//! Closed enumerations shared across the parser and analyzer.
//!
//! Kept as plain constants/enums rather than open strings so that every
//! downstream `match` is exhaustive and a new DMMF field kind or default
//! generator can't silently fall through unhandled.

/// Generator names the database (not the client) is responsible for
/// producing. A field carrying one of these is `has_db_default = true`.
///
/// `now()` is deliberately excluded: the query engine evaluates it
/// client-side at insert time, so a `createdAt DateTime @default(now())`
/// field stays writable on create; only `dbgenerated("now()")` hands that
/// job to the database.
pub const DB_MANAGED_DEFAULT_GENERATORS: &[&str] = &["autoincrement", "uuid", "cuid", "dbgenerated"];

/// Field names treated as system-managed timestamps for the purposes of the
/// create/update exclusion rule.
///
/// `createdAt` only counts when its default is DB-managed (e.g.
/// `dbgenerated("now()")`); a client-managed `now()` default keeps it
/// writable, per the `createdAt`-writable invariant.
pub const SYSTEM_TIMESTAMP_FIELD_NAMES: &[&str] = &["createdAt", "updatedAt"];

/// Field-name substrings that mark a default value as secret-shaped for the
/// purposes of redaction (case-insensitive).
pub const SECRET_FIELD_NAME_HINTS: &[&str] =
    &["password", "secret", "token", "apikey", "privatekey"];

/// Client-side default generators — evaluated at generation/insert time
/// rather than by the database.
pub const CLIENT_MANAGED_DEFAULT_GENERATORS: &[&str] = &["now"];

/// Returns `true` when `generator_name` is a DB-managed default generator.
#[must_use]
pub fn is_db_managed_generator(generator_name: &str) -> bool {
    DB_MANAGED_DEFAULT_GENERATORS.contains(&generator_name)
}

/// Returns `true` when `field_name` is one of the recognized system
/// timestamp field names.
#[must_use]
pub fn is_system_timestamp_field_name(field_name: &str) -> bool {
    SYSTEM_TIMESTAMP_FIELD_NAMES.contains(&field_name)
}

/// Returns `true` when `field_name` looks like it stores a secret, using a
/// case-insensitive substring heuristic.
#[must_use]
pub fn looks_like_secret_field_name(field_name: &str) -> bool {
    let lower = field_name.to_ascii_lowercase();
    SECRET_FIELD_NAME_HINTS
        .iter()
        .any(|hint| lower.contains(hint))
}

/// The kind of a parsed field, determined once at parse time.
///
/// Lookup order when classifying a raw DMMF field: enum name match first,
/// then DMMF-declared relation (`Object`), then scalar, then `Unsupported`
/// for anything the parser cannot represent. `Unsupported` fields are
/// filtered out of every enhanced-model bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar database column (string, int, bool, date, json, bytes, ...).
    Scalar,
    /// A relation to another model.
    Object,
    /// A reference to a `ParsedEnum`.
    Enum,
    /// A DMMF type the parser has no representation for.
    Unsupported,
}

/// Hook frameworks the `generate-hooks` phase is permitted to target.
///
/// Closed per spec Open Questions: anything outside this set is rejected at
/// config-normalization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookFramework {
    React,
    Vue,
    Svelte,
    Solid,
}

impl HookFramework {
    /// Parse a config string into a known hook framework.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "react" => Some(Self::React),
            "vue" => Some(Self::Vue),
            "svelte" => Some(Self::Svelte),
            "solid" => Some(Self::Solid),
            _ => None,
        }
    }

    /// The canonical lowercase name, as used in config and file paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Solid => "solid",
        }
    }
}

/// Target HTTP framework for controller/route generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpFramework {
    Express,
    Fastify,
}

impl HttpFramework {
    /// Parse a config string into a known HTTP framework.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "express" => Some(Self::Express),
            "fastify" => Some(Self::Fastify),
            _ => None,
        }
    }

    /// The canonical lowercase name, as used in config and file paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Fastify => "fastify",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn db_managed_generators_are_recognized() {
        assert!(is_db_managed_generator("autoincrement"));
        assert!(is_db_managed_generator("uuid"));
        assert!(is_db_managed_generator("dbgenerated"));
        assert!(!is_db_managed_generator("now"));
        assert!(!is_db_managed_generator("made_up"));
    }

    #[test]
    fn system_timestamp_names_are_closed() {
        assert!(is_system_timestamp_field_name("createdAt"));
        assert!(is_system_timestamp_field_name("updatedAt"));
        assert!(!is_system_timestamp_field_name("deletedAt"));
    }

    #[test]
    fn secret_heuristic_is_case_insensitive() {
        assert!(looks_like_secret_field_name("Password"));
        assert!(looks_like_secret_field_name("apiKey"));
        assert!(looks_like_secret_field_name("PRIVATE_KEY".replace('_', "").as_str()));
        assert!(!looks_like_secret_field_name("username"));
    }

    #[test]
    fn hook_framework_parse_rejects_unknown() {
        assert_eq!(HookFramework::parse("react"), Some(HookFramework::React));
        assert_eq!(HookFramework::parse("angular"), None);
    }

    #[test]
    fn http_framework_round_trip() {
        assert_eq!(HttpFramework::parse("fastify").map(HttpFramework::as_str), Some("fastify"));
    }
}
