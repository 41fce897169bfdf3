//! Phase 4: emit the `zod` request-validation schema for every model.
//! Consumes the same field buckets [`codegen_producers::dto`] does, so a
//! field is never required in one and optional in the other.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::render_validator_file;

use crate::config::NormalizedConfig;
use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateValidatorsPhase;

impl Phase for GenerateValidatorsPhase {
    fn name(&self) -> &'static str {
        "generate-validators"
    }

    fn order(&self) -> f64 {
        4.0
    }

    fn should_run(&self, config: &NormalizedConfig) -> bool {
        !config.use_registry()
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let body = render_validator_file(model);
            let path = model_output_path("validators", model.name_lower(), "validator");
            context.add_file(ArtifactFamily::Validators, &path, body, self.name(), Some(model.name()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::AnalysisCache;
    use codegen_engine::ErrorEscalationPolicy;
    use dmmf_core::testing;
    use std::sync::Arc;

    #[test]
    fn emits_one_validator_file_per_model() {
        let schema = Arc::new(testing::blog_schema());
        let analysis = Arc::new(AnalysisCache::new());
        let mut context = GenerationContext::new(Arc::clone(&schema), analysis, ErrorEscalationPolicy::default_policy());
        GenerateValidatorsPhase.execute(&mut context).unwrap();
        assert_eq!(context.files().len(), schema.models().len());
        assert!(context.files().get(ArtifactFamily::Validators, "validators/user/user.validator.ts").is_some());
    }
}
