//! Phase 6: emit the CRUD controller for every model, framework-aware
//! (Express/Fastify). The target framework is baked into the phase at
//! construction time from the already-validated [`NormalizedConfig`] —
//! `execute` never re-reads config, it just renders.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::render_controller_file;
use dmmf_core::constants::HttpFramework;

use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateControllersPhase {
    framework: HttpFramework,
}

impl GenerateControllersPhase {
    #[must_use]
    pub const fn new(framework: HttpFramework) -> Self {
        Self { framework }
    }
}

impl Phase for GenerateControllersPhase {
    fn name(&self) -> &'static str {
        "generate-controllers"
    }

    fn order(&self) -> f64 {
        6.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let body = render_controller_file(model, self.framework);
            let path = model_output_path("controllers", model.name_lower(), "controller");
            context.add_file(ArtifactFamily::Controllers, &path, body, self.name(), Some(model.name()))?;
        }
        Ok(())
    }
}
