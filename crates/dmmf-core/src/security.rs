//! Sanitization for text that gets embedded into generated TypeScript source,
//! plus redaction of secret-shaped default values before they are logged.
//!
//! DMMF documentation strings and default literals are the only user-
//! controlled text that the core ever writes into generated files or log
//! output, so this module is the single place that does escaping.

use crate::constants::looks_like_secret_field_name;
use crate::types::PrismaDefaultValue;

/// Sanitize a DMMF documentation comment for embedding inside a generated
/// TSDoc block comment.
///
/// Comment-terminator sequences (`*/`) are escaped, not stripped, so the
/// original text is still recoverable from the generated output. Backticks
/// are tracked with a small state machine so that a documentation string
/// containing a template literal (`` `like this` ``) doesn't get mangled —
/// runs of text inside backticks are passed through unescaped except for the
/// same `*/` escaping, since the doc comment wrapper is what actually needs
/// protecting.
#[must_use]
pub fn sanitize_documentation(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_backtick = false;

    while let Some(c) = chars.next() {
        match c {
            '`' => {
                in_backtick = !in_backtick;
                out.push(c);
            }
            '*' if !in_backtick && chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("*\\/");
            }
            _ => out.push(c),
        }
    }

    out
}

/// Escape a string literal for safe embedding inside a double-quoted
/// TypeScript string.
///
/// Escapes backslashes first (so later escapes aren't double-escaped),
/// then quotes, then embedded `*/` sequences so the same literal is also
/// safe if it ends up quoted inside a doc comment (e.g. an example default
/// value rendered in a TSDoc `@default` tag).
#[must_use]
pub fn escape_string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.replace("*/", "*\\/")
}

/// Redact a default value before it is written to a log line or diagnostic
/// message, using the field name as the secret heuristic.
///
/// Non-secret fields are returned unchanged (as a debug-formatted string);
/// secret-shaped fields collapse to a fixed placeholder regardless of the
/// actual default, so the shape of the default can't leak length or
/// structure of a real secret.
#[must_use]
pub fn redact_default_for_logging(
    field_name: &str,
    default: Option<&PrismaDefaultValue>,
) -> String {
    if looks_like_secret_field_name(field_name) {
        return "<redacted>".to_string();
    }
    match default {
        Some(value) => format!("{value:?}"),
        None => "<none>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_comment_terminator() {
        assert_eq!(sanitize_documentation("a */ b"), "a *\\/ b");
    }

    #[test]
    fn preserves_template_literal_backticks() {
        let input = "call `fn(${x})` please";
        assert_eq!(sanitize_documentation(input), input);
    }

    #[test]
    fn escapes_comment_terminator_inside_backticks_too() {
        // The wrapper comment still needs protecting even inside a template
        // literal snippet quoted in documentation.
        assert_eq!(sanitize_documentation("`a */ b`"), "`a *\\/ b`");
    }

    #[test]
    fn string_literal_escapes_quotes_and_backslashes() {
        assert_eq!(escape_string_literal(r#"a"b\c"#), r#"a\"b\\c"#);
    }

    #[test]
    fn string_literal_escapes_comment_terminator() {
        assert_eq!(escape_string_literal("*/"), "*\\/");
    }

    #[test]
    fn redacts_secret_shaped_field() {
        assert_eq!(
            redact_default_for_logging("apiKey", None),
            "<redacted>"
        );
    }

    #[test]
    fn keeps_non_secret_field_visible() {
        assert_eq!(redact_default_for_logging("title", None), "<none>");
    }
}
