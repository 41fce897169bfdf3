//! Registry mode: when `config.use_registry()` is set, this single phase
//! replaces the `generate-dtos`/`generate-validators`/`generate-services`
//! trio (orders 3-5) with one consolidated registry module plus a
//! registration entry per model. The non-registry phases stay in the
//! default phase list but skip themselves via `should_run` so the two
//! paths are mutually exclusive on every run, never partially mixed.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::{render_model_registration, render_registry_module};

use crate::config::NormalizedConfig;
use crate::error::PhaseError;
use crate::phase::Phase;

/// Build the canonical per-model output path under `family_dir`, e.g.
/// `contracts/user/user.dto.ts`. Shared by every per-model producer phase
/// so the path shape can't drift between artifact families.
#[must_use]
pub fn model_output_path(family_dir: &str, model_lower: &str, suffix: &str) -> String {
    format!("{family_dir}/{model_lower}/{model_lower}.{suffix}.ts")
}

pub struct RegistryModePhase;

impl Phase for RegistryModePhase {
    fn name(&self) -> &'static str {
        "generate-registry"
    }

    fn order(&self) -> f64 {
        3.0
    }

    fn should_run(&self, config: &NormalizedConfig) -> bool {
        config.use_registry()
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        context.add_file(ArtifactFamily::Registry, "registry/registry.ts", render_registry_module(), self.name(), None)?;

        let models: Vec<_> = context.schema().models().to_vec();
        for model in &models {
            let body = render_model_registration(model);
            let path = format!("registry/{}.registration.ts", model.name_lower());
            context.add_file(ArtifactFamily::Registry, &path, body, self.name(), Some(model.name()))?;
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
    fn model_output_path_shapes_a_nested_ts_path() {
        assert_eq!(model_output_path("contracts", "user", "dto"), "contracts/user/user.dto.ts");
    }

    #[test]
    fn emits_shared_module_plus_one_registration_per_model() {
        let mut ctx = context();
        RegistryModePhase.execute(&mut ctx).unwrap();
        assert!(ctx.files().get(ArtifactFamily::Registry, "registry/registry.ts").is_some());
        assert!(ctx.files().get(ArtifactFamily::Registry, "registry/user.registration.ts").is_some());
    }

    #[test]
    fn should_run_only_when_registry_mode_is_enabled() {
        let raw_off = crate::config::RawConfig {
            framework: "express".to_string(),
            use_enhanced_generators: None,
            use_registry: Some(false),
            continue_on_error: None,
            fail_fast: None,
            strict_plugin_validation: None,
            hooks_frameworks: None,
            sdk_version: Some("1.0.0".to_string()),
            output_paths: None,
            plugins: vec![],
        };
        let off = crate::config::validate_and_normalize(&raw_off).unwrap();
        assert!(!RegistryModePhase.should_run(&off));

        let mut raw_on = raw_off;
        raw_on.use_registry = Some(true);
        let on = crate::config::validate_and_normalize(&raw_on).unwrap();
        assert!(RegistryModePhase.should_run(&on));
    }
}
