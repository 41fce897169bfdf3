//! Phase 5: emit the standard or enhanced CRUD service for every model,
//! folding in any plugin-declared external-service integration the
//! analysis cache recorded for it.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::render_service_file;

use crate::config::NormalizedConfig;
use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateServicesPhase;

impl Phase for GenerateServicesPhase {
    fn name(&self) -> &'static str {
        "generate-services"
    }

    fn order(&self) -> f64 {
        5.0
    }

    fn should_run(&self, config: &NormalizedConfig) -> bool {
        !config.use_registry()
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let body = {
                let analysis = context.analysis().get_analysis(model.name())?;
                let annotations = context.analysis().service_annotations(model.name()).to_vec();
                render_service_file(model, analysis, &annotations)
            };
            let path = model_output_path("services", model.name_lower(), "service");
            context.add_file(ArtifactFamily::Services, &path, body, self.name(), Some(model.name()))?;
        }
        Ok(())
    }
}
