//! Phase 3: emit `Create`/`Update`/`Read`/`Query<Model>Dto` for every
//! model.

use codegen_engine::ArtifactFamily;
use codegen_producers::render_dto_file;

use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateDtosPhase;

impl Phase for GenerateDtosPhase {
    fn name(&self) -> &'static str {
        "generate-dtos"
    }

    fn order(&self) -> f64 {
        3.0
    }

    fn should_run(&self, config: &crate::config::NormalizedConfig) -> bool {
        !config.use_registry()
    }

    fn execute(&self, context: &mut codegen_engine::GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let search_fields = context
                .analysis()
                .try_get_analysis(model.name())
                .map(|analysis| analysis.capabilities().search_fields.clone())
                .unwrap_or_default();
            let body = render_dto_file(model, &search_fields);
            let path = model_output_path("contracts", model.name_lower(), "dto");
            context.add_file(ArtifactFamily::Contracts, &path, body, self.name(), Some(model.name()))?;
        }
        Ok(())
    }
}
