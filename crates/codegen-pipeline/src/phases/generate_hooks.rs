//! Phase 9: emit framework-specific data-fetching hooks for every model,
//! one file per (model, framework) pair in `hooksFrameworks`. Non-blocking
//! by design: an empty framework set means this phase simply emits
//! nothing, never an error — hooks are an enrichment over the SDK, not a
//! required artifact.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::render_model_hook;
use dmmf_core::constants::HookFramework;

use crate::config::NormalizedConfig;
use crate::error::PhaseError;
use crate::phase::Phase;

pub struct GenerateHooksPhase {
    frameworks: Vec<HookFramework>,
}

impl GenerateHooksPhase {
    #[must_use]
    pub fn new(frameworks: impl IntoIterator<Item = HookFramework>) -> Self {
        Self {
            frameworks: frameworks.into_iter().collect(),
        }
    }
}

const fn framework_lower(framework: HookFramework) -> &'static str {
    match framework {
        HookFramework::React => "react",
        HookFramework::Vue => "vue",
        HookFramework::Svelte => "svelte",
        HookFramework::Solid => "solid",
    }
}

impl Phase for GenerateHooksPhase {
    fn name(&self) -> &'static str {
        "generate-hooks"
    }

    fn order(&self) -> f64 {
        9.0
    }

    fn should_run(&self, _config: &NormalizedConfig) -> bool {
        !self.frameworks.is_empty()
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            for &framework in &self.frameworks {
                let body = render_model_hook(model, framework);
                let path = format!("hooks/{}/{}.{}.hooks.ts", model.name_lower(), model.name_lower(), framework_lower(framework));
                context.add_file(ArtifactFamily::Hooks, &path, body, self.name(), Some(model.name()))?;
            }
        }
        Ok(())
    }
}
