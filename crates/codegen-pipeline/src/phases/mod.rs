//! The concrete phases that make up the canonical pipeline order (table in
//! `SPEC_FULL.md` §4.5), plus the registry-mode consolidation that replaces
//! phases 3-5 when enabled.
//!
//! `validate-config`/`normalize-config` (orders 0/0.5) are not phase
//! structs here — [`crate::config::validate_and_normalize`] collapses them
//! into one pre-pipeline call (see that module's doc comment), since a
//! rejected config must never take even the first snapshot. Everything
//! from `validate-schema` onward runs inside [`crate::executor::run_pipeline`].

pub mod analyze_models;
pub mod generate_checklist;
pub mod generate_controllers;
pub mod generate_dtos;
pub mod generate_hooks;
pub mod generate_plugins;
pub mod generate_routes;
pub mod generate_sdk;
pub mod generate_services;
pub mod generate_validators;
pub mod naming_conflicts;
pub mod registry_mode;
pub mod validate_schema;

use crate::config::NormalizedConfig;
use crate::phase::Phase;

/// Build the canonical phase list for `config`. Every phase is always
/// included; `should_run` (backed by `config`) decides at executor time
/// whether a given run actually executes it — e.g. `generate-dtos` and
/// `generate-registry` are mutually exclusive on `config.use_registry()`,
/// and `generate-hooks` is a no-op when no hook framework was selected.
#[must_use]
pub fn default_phases(config: &NormalizedConfig) -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(validate_schema::ValidateSchemaPhase),
        Box::new(analyze_models::AnalyzeModelsPhase),
        Box::new(naming_conflicts::NamingConflictsPhase),
        Box::new(generate_dtos::GenerateDtosPhase),
        Box::new(generate_validators::GenerateValidatorsPhase),
        Box::new(generate_services::GenerateServicesPhase),
        Box::new(registry_mode::RegistryModePhase),
        Box::new(generate_controllers::GenerateControllersPhase::new(config.framework())),
        Box::new(generate_routes::GenerateRoutesPhase::new(config.framework())),
        Box::new(generate_sdk::GenerateSdkPhase::new(config.sdk_version().to_string())),
        Box::new(generate_hooks::GenerateHooksPhase::new(config.hooks_frameworks().iter().copied())),
        Box::new(generate_plugins::GeneratePluginsPhase::new(config.plugins().to_vec(), config.strict_plugin_validation())),
        Box::new(generate_checklist::GenerateChecklistPhase),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(use_registry: bool) -> NormalizedConfig {
        let raw = crate::config::RawConfig {
            framework: "express".to_string(),
            use_enhanced_generators: None,
            use_registry: Some(use_registry),
            continue_on_error: None,
            fail_fast: None,
            strict_plugin_validation: None,
            hooks_frameworks: None,
            sdk_version: Some("1.0.0".to_string()),
            output_paths: None,
            plugins: vec![],
        };
        crate::config::validate_and_normalize(&raw).unwrap()
    }

    #[test]
    fn default_phases_includes_both_registry_and_non_registry_dto_phases() {
        let phases = default_phases(&config(false));
        let names: Vec<&str> = phases.iter().map(|p| p.name()).collect();
        assert!(names.contains(&"generate-dtos"));
        assert!(names.contains(&"generate-registry"));
    }

    #[test]
    fn phase_count_matches_the_canonical_table() {
        let phases = default_phases(&config(false));
        assert_eq!(phases.len(), 13);
    }
}
