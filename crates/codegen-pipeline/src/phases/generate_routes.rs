//! Phase 7: wire up the route file for a model's controller — omitted
//! entirely when `generate-controllers` emitted nothing for that model
//! (checked by looking the controller's canonical path up in the context's
//! file builder, rather than threading a separate flag through).

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::render_route_file;
use dmmf_core::constants::HttpFramework;

use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateRoutesPhase {
    framework: HttpFramework,
}

impl GenerateRoutesPhase {
    #[must_use]
    pub const fn new(framework: HttpFramework) -> Self {
        Self { framework }
    }
}

impl Phase for GenerateRoutesPhase {
    fn name(&self) -> &'static str {
        "generate-routes"
    }

    fn order(&self) -> f64 {
        7.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let controller_path = model_output_path("controllers", model.name_lower(), "controller");
            let controller_emitted = context.files().get(ArtifactFamily::Controllers, &controller_path).is_some();

            if let Some(body) = render_route_file(model, self.framework, controller_emitted) {
                let path = model_output_path("routes", model.name_lower(), "routes");
                context.add_file(ArtifactFamily::Routes, &path, body, self.name(), Some(model.name()))?;
            }
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

    fn context() -> GenerationContext {
        let schema = Arc::new(testing::blog_schema());
        let analysis = Arc::new(AnalysisCache::new());
        GenerationContext::new(schema, analysis, ErrorEscalationPolicy::default_policy())
    }

    #[test]
    fn no_controller_means_no_route_file() {
        let mut context = context();
        GenerateRoutesPhase::new(HttpFramework::Express).execute(&mut context).unwrap();
        assert!(context.files().is_empty());
    }

    #[test]
    fn route_is_emitted_once_a_controller_exists_for_the_model() {
        let mut context = context();
        context
            .add_file(ArtifactFamily::Controllers, "controllers/user/user.controller.ts", "x", "generate-controllers", Some("User"))
            .unwrap();
        GenerateRoutesPhase::new(HttpFramework::Express).execute(&mut context).unwrap();
        assert!(context.files().get(ArtifactFamily::Routes, "routes/user/user.routes.ts").is_some());
    }
}
