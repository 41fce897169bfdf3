//! Parses a Prisma DMMF document into a frozen intermediate representation
//! and validates it against the rules a generator needs before it can trust
//! the schema enough to emit files from it.
//!
//! This crate owns no code generation. It hands `codegen-analyzer` and
//! `codegen-pipeline` a [`types::ParsedSchema`] that exposes only shared
//! accessors — there is no API to mutate a schema once parsed.

pub mod constants;
pub mod error;
pub mod guards;
pub mod helpers;
pub mod parser;
pub mod raw;
pub mod security;
pub mod types;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{ParseError, SchemaValidationFailed, ValidationError};
pub use parser::parse;
pub use raw::RawDocument;
pub use types::{ParsedEnum, ParsedField, ParsedModel, ParsedSchema};
pub use validate::{validate, validate_detailed};

/// Parse and validate a raw DMMF JSON document in one call.
///
/// # Errors
///
/// Returns [`ParseFailure::Structural`] if the document doesn't deserialize
/// or references are malformed, or [`ParseFailure::Validation`] if parsing
/// succeeds but the schema violates a rule `validate_detailed` checks.
pub fn parse_and_validate(raw_json: &str) -> Result<types::ParsedSchema, ParseFailure> {
    let document: raw::RawDocument =
        serde_json::from_str(raw_json).map_err(|e| ParseFailure::Structural(ParseError::Malformed(e)))?;
    let schema = parser::parse(document).map_err(ParseFailure::Structural)?;
    validate::validate_detailed(&schema).map_err(ParseFailure::Validation)?;
    Ok(schema)
}

/// The two ways [`parse_and_validate`] can fail, kept distinct so a caller
/// (the `codegen-pipeline` error escalation policy) can treat a malformed
/// document and a merely-rule-violating one differently.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Structural(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] SchemaValidationFailed),
}
