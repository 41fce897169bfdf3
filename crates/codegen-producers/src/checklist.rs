//! Renders the per-model operational readiness checklist: a plain-text
//! summary of what the pipeline emitted and flagged for a model, meant for
//! a human reviewing generated output before shipping it.

use codegen_analyzer::UnifiedModelAnalysis;
use dmmf_core::types::ParsedModel;

#[must_use]
pub fn render_checklist_entry(model: &ParsedModel, analysis: &UnifiedModelAnalysis) -> String {
    let name = model.name();
    let capabilities = analysis.capabilities();
    let special = analysis.special_fields();

    let mut lines = vec![format!("## {name}")];
    lines.push(format!(
        "- Identity: {}",
        special.id_field().unwrap_or("(no id field)")
    ));
    lines.push(format!(
        "- Timestamps: createdAt={}, updatedAt={}",
        special.created_at_field().unwrap_or("none"),
        special.updated_at_field().unwrap_or("none"),
    ));
    lines.push(format!(
        "- Soft delete: {}",
        if special.has_soft_delete() { "yes" } else { "no" }
    ));
    lines.push(format!(
        "- Search: {}",
        if capabilities.has_search {
            capabilities.search_fields.join(", ")
        } else {
            "none".to_string()
        }
    ));
    lines.push(format!(
        "- Composite primary key: {}",
        if capabilities.has_composite_primary_key { "yes" } else { "no" }
    ));
    if capabilities.has_secret_fields {
        lines.push("- WARNING: secret-shaped fields present; review before exposing in DTOs".to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Assemble the full `checklist.md` body for a schema, one section per
/// model, sorted by name.
#[must_use]
pub fn render_checklist_document(entries: &[(String, String)]) -> String {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let mut out = String::from("# Generation checklist\n\n");
    for (_, body) in sorted {
        out.push_str(&body);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::{ModelCapabilities, SpecialFields};
    use dmmf_core::testing;

    #[test]
    fn checklist_flags_secret_fields() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let analysis = UnifiedModelAnalysis::new(
            "User",
            vec![],
            SpecialFields::default(),
            ModelCapabilities {
                has_secret_fields: true,
                ..ModelCapabilities::default()
            },
        );
        let entry = render_checklist_entry(user, &analysis);
        assert!(entry.contains("WARNING: secret-shaped fields"));
    }

    #[test]
    fn document_sorts_entries_by_model_name() {
        let body = render_checklist_document(&[
            ("Zebra".to_string(), "## Zebra\n".to_string()),
            ("Apple".to_string(), "## Apple\n".to_string()),
        ]);
        assert!(body.find("Apple").unwrap() < body.find("Zebra").unwrap());
    }
}
