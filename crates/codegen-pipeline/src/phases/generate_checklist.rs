//! Phase 11: assemble the human-facing `checklist.md` summarizing what was
//! generated and flagged for each model. Purely advisory — a missing
//! analysis entry here is surfaced as a diagnostic, not a hard failure,
//! since the checklist is the last thing written and nothing downstream
//! depends on it.

use codegen_engine::{ArtifactFamily, Diagnostic, GenerationContext, Severity};
use codegen_producers::{render_checklist_document, render_checklist_entry};

use crate::error::PhaseError;
use crate::phase::Phase;

pub struct GenerateChecklistPhase;

impl Phase for GenerateChecklistPhase {
    fn name(&self) -> &'static str {
        "generate-checklist"
    }

    fn order(&self) -> f64 {
        11.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        let mut entries = Vec::with_capacity(models.len());
        let mut should_abort = false;

        for model in &models {
            match context.analysis().get_analysis(model.name()) {
                Ok(analysis) => entries.push((model.name().to_string(), render_checklist_entry(model, analysis))),
                Err(_) => {
                    if context.report(Diagnostic::new(
                        Severity::Warn,
                        self.name(),
                        format!("no analysis recorded for {}; omitted from checklist", model.name()),
                    )) {
                        should_abort = true;
                    }
                }
            }
        }

        if should_abort {
            return Err(PhaseError::Message("checklist generation escalated to abort".to_string()));
        }

        let document = render_checklist_document(&entries);
        context.add_file(ArtifactFamily::Checklist, "checklist.md", document, self.name(), None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::analyze_schema;
    use codegen_engine::ErrorEscalationPolicy;
    use dmmf_core::testing;
    use std::sync::Arc;

    #[test]
    fn emits_one_section_per_model_sorted_by_name() {
        let schema = testing::blog_schema();
        let analysis = Arc::new(analyze_schema(&schema));
        let mut context = GenerationContext::new(Arc::new(schema), analysis, ErrorEscalationPolicy::default_policy());
        GenerateChecklistPhase.execute(&mut context).unwrap();
        let body = context.files().get(ArtifactFamily::Checklist, "checklist.md").unwrap();
        assert!(body.find("Post").unwrap() < body.find("User").unwrap());
    }

    #[test]
    fn missing_analysis_warns_instead_of_aborting() {
        let schema = Arc::new(testing::blog_schema());
        let analysis = Arc::new(codegen_analyzer::AnalysisCache::new());
        let mut context = GenerationContext::new(schema, analysis, ErrorEscalationPolicy::default_policy());
        GenerateChecklistPhase.execute(&mut context).unwrap();
        assert!(context.files().get(ArtifactFamily::Checklist, "checklist.md").is_some());
    }
}
