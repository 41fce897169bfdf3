//! Phase 1: populate the analysis cache and assert every model got
//! analyzed.
//!
//! The cache lives on [`GenerationContext`] as a shared, already-built
//! `Arc<AnalysisCache>` constructed once up front (see
//! [`crate::executor::run_pipeline`]'s caller), so this phase's only job is
//! to assert completeness — a gap here means a bug in `analyze_schema`
//! itself, which is why it reports at `Fatal`.

use codegen_engine::{Diagnostic, GenerationContext, Severity};

use crate::error::PhaseError;
use crate::phase::Phase;

pub struct AnalyzeModelsPhase;

impl Phase for AnalyzeModelsPhase {
    fn name(&self) -> &'static str {
        "analyze-models"
    }

    fn order(&self) -> f64 {
        1.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let model_names: Vec<&str> = context.schema().models().iter().map(dmmf_core::types::ParsedModel::name).collect();
        let missing = context.analysis().get_missing_analysis(model_names);
        if missing.is_empty() {
            return Ok(());
        }

        let should_abort = context.report(Diagnostic::new(
            Severity::Fatal,
            self.name(),
            format!("missing analysis for models: {}", missing.join(", ")),
        ));
        if should_abort {
            return Err(PhaseError::Message(format!("missing analysis for: {}", missing.join(", "))));
        }
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
    fn fully_analyzed_schema_passes() {
        let schema = testing::blog_schema();
        let analysis = Arc::new(analyze_schema(&schema));
        let mut context = GenerationContext::new(Arc::new(schema), analysis, ErrorEscalationPolicy::default_policy());
        AnalyzeModelsPhase.execute(&mut context).unwrap();
    }

    #[test]
    fn empty_cache_against_non_empty_schema_fails() {
        let schema = testing::blog_schema();
        let analysis = Arc::new(codegen_analyzer::AnalysisCache::new());
        let mut context = GenerationContext::new(Arc::new(schema), analysis, ErrorEscalationPolicy::default_policy());
        assert!(AnalyzeModelsPhase.execute(&mut context).is_err());
    }
}
