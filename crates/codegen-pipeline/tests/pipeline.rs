//! Full-pipeline fixture tests: real schemas through `default_phases` and
//! `run_pipeline`, asserting on the resulting file tree and diagnostics
//! rather than any single phase in isolation.

use std::sync::Arc;

use codegen_analyzer::analyze_schema;
use codegen_engine::{ArtifactFamily, ErrorEscalationPolicy, GenerationContext};
use codegen_pipeline::{default_phases, run_pipeline, validate_and_normalize, PhaseHookRegistry, RawConfig};
use dmmf_core::testing;
use pretty_assertions::assert_eq;

fn express_config(sdk_version: &str) -> codegen_pipeline::NormalizedConfig {
    let raw = RawConfig {
        framework: "express".to_string(),
        use_enhanced_generators: None,
        use_registry: None,
        continue_on_error: None,
        fail_fast: None,
        strict_plugin_validation: None,
        hooks_frameworks: None,
        sdk_version: Some(sdk_version.to_string()),
        output_paths: None,
        plugins: vec![],
    };
    validate_and_normalize(&raw).expect("config should normalize")
}

fn run(schema: dmmf_core::ParsedSchema, config: &codegen_pipeline::NormalizedConfig) -> GenerationContext {
    let schema = Arc::new(schema);
    let analysis = Arc::new(analyze_schema(&schema));
    let mut context = GenerationContext::new(schema, analysis, ErrorEscalationPolicy::default_policy());
    let phases = default_phases(config);
    let hooks = PhaseHookRegistry::new();
    run_pipeline(&mut context, config, &phases, &hooks).expect("pipeline should succeed");
    context
}

#[test]
fn blog_schema_emits_crud_artifacts_for_every_model() {
    let config = express_config("1.0.0");
    let context = run(testing::blog_schema(), &config);

    assert!(!context.files().is_empty());
    for family in [
        ArtifactFamily::Contracts,
        ArtifactFamily::Validators,
        ArtifactFamily::Services,
        ArtifactFamily::Controllers,
        ArtifactFamily::Routes,
        ArtifactFamily::Sdk,
    ] {
        assert!(context.files().files_in(family).next().is_some(), "expected at least one file in {family:?}");
    }

    assert!(context.files().get(ArtifactFamily::Contracts, "contracts/user/user.dto.ts").is_some());
    assert!(context.files().get(ArtifactFamily::Contracts, "contracts/post/post.dto.ts").is_some());
    assert!(!context.diagnostics().has_severity_at_least(codegen_engine::Severity::Error));
}

#[test]
fn registry_mode_replaces_dto_validator_service_with_single_module() {
    let raw = RawConfig {
        framework: "fastify".to_string(),
        use_enhanced_generators: None,
        use_registry: Some(true),
        continue_on_error: None,
        fail_fast: None,
        strict_plugin_validation: None,
        hooks_frameworks: None,
        sdk_version: Some("1.0.0".to_string()),
        output_paths: None,
        plugins: vec![],
    };
    let config = validate_and_normalize(&raw).unwrap();
    let context = run(testing::blog_schema(), &config);

    assert!(context.files().get(ArtifactFamily::Registry, "registry/registry.ts").is_some());
    assert!(context.files().files_in(ArtifactFamily::Contracts).next().is_none());
    assert!(context.files().files_in(ArtifactFamily::Services).next().is_none());
}

#[test]
fn placeholder_sdk_version_is_rejected_before_any_phase_runs() {
    let raw = RawConfig {
        framework: "express".to_string(),
        use_enhanced_generators: None,
        use_registry: None,
        continue_on_error: None,
        fail_fast: None,
        strict_plugin_validation: None,
        hooks_frameworks: None,
        sdk_version: Some("0.0.0-dev".to_string()),
        output_paths: None,
        plugins: vec![],
    };
    let err = validate_and_normalize(&raw).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("sdk"));
}

#[test]
fn hooks_phase_is_a_noop_when_no_frameworks_are_selected() {
    let config = express_config("2.3.0");
    let context = run(testing::blog_schema(), &config);
    assert!(context.files().files_in(ArtifactFamily::Hooks).next().is_none());
}

#[test]
fn repeated_runs_over_identical_input_produce_identical_file_sets() {
    let config = express_config("1.4.0");

    let first = run(testing::blog_schema(), &config);
    let second = run(testing::blog_schema(), &config);

    let mut first_paths: Vec<_> = first.files().files().map(|f| f.path().to_string()).collect();
    let mut second_paths: Vec<_> = second.files().files().map(|f| f.path().to_string()).collect();
    first_paths.sort();
    second_paths.sort();
    assert_eq!(first_paths, second_paths);

    for path in &first_paths {
        let family_first = first.files().files().find(|f| f.path() == path).unwrap();
        let family_second = second.files().files().find(|f| f.path() == path).unwrap();
        assert_eq!(family_first.contents(), family_second.contents());
    }
}

#[test]
fn analysis_cache_is_populated_for_every_model_before_generation() {
    let schema = Arc::new(testing::blog_schema());
    let analysis = Arc::new(analyze_schema(&schema));
    let names: Vec<&str> = schema.models().iter().map(|m| m.name()).collect();
    assert!(analysis.get_missing_analysis(names).is_empty());
}
