//! Raw (deserialized) and normalized (validated, defaulted, frozen) run
//! configuration.
//!
//! `RawConfig` is what `serde` builds straight from the CLI's JSON/YAML
//! input; `NormalizedConfig` is what every phase after `normalize-config`
//! actually reads. The split exists so defaulting and validation happen
//! exactly once, in the `validate-config`/`normalize-config` phases, rather
//! than scattered across every phase that cares about a flag.

use std::collections::BTreeSet;
use std::sync::Arc;

use dmmf_core::constants::{HookFramework, HttpFramework};
use serde::Deserialize;

/// One plugin declaration in the raw config document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPluginConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub config: serde_json::Value,
    /// Name of the environment variable this plugin reads its credentials
    /// from, e.g. `"STRIPE_SECRET_KEY"`. Required when `enabled` and
    /// `strict_plugin_validation` is on.
    #[serde(default)]
    pub env_name: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// The run configuration exactly as deserialized from the user's JSON or
/// YAML document. Unknown fields are rejected so a typo'd flag surfaces
/// immediately instead of silently no-op-ing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub framework: String,
    #[serde(default)]
    pub use_enhanced_generators: Option<bool>,
    #[serde(default)]
    pub use_registry: Option<bool>,
    #[serde(default)]
    pub continue_on_error: Option<bool>,
    #[serde(default)]
    pub fail_fast: Option<bool>,
    #[serde(default)]
    pub strict_plugin_validation: Option<bool>,
    #[serde(default)]
    pub hooks_frameworks: Option<Vec<String>>,
    #[serde(default)]
    pub sdk_version: Option<String>,
    #[serde(default)]
    pub output_paths: Option<OutputPathsOverride>,
    #[serde(default)]
    pub plugins: Vec<RawPluginConfig>,
}

/// Per-family output directory overrides. Any family left `None` falls
/// back to [`NormalizedConfig`]'s built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputPathsOverride {
    #[serde(default)]
    pub contracts: Option<String>,
    #[serde(default)]
    pub sdk: Option<String>,
    #[serde(default)]
    pub openapi: Option<String>,
}

/// Placeholder version strings that indicate the caller never set a real
/// SDK version. Rejected at phase 0 rather than baked into generated code.
const PLACEHOLDER_SDK_VERSIONS: &[&str] = &["0.0.0-dev", "0.0.0", "TODO", "unset"];

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("unknown framework '{0}'; expected 'express' or 'fastify'")]
    UnknownFramework(String),
    #[error("fail_fast and continue_on_error cannot both be set; fail_fast implies stopping at the first critical warning")]
    FailFastConflictsWithContinueOnError,
    #[error("sdk_version '{0}' looks like a placeholder; set a real semantic version")]
    PlaceholderSdkVersion(String),
    #[error("unknown hooks framework '{0}'; expected one of react, vue, svelte, solid")]
    UnknownHooksFramework(String),
    #[error("plugin '{0}' is enabled but declares no env_name under strict_plugin_validation")]
    PluginMissingEnvName(String),
}

/// One plugin entry, validated and defaulted.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    name: String,
    enabled: bool,
    config: serde_json::Value,
    env_name: Option<String>,
}

impl PluginConfig {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn config(&self) -> &serde_json::Value {
        &self.config
    }

    #[must_use]
    pub fn env_name(&self) -> Option<&str> {
        self.env_name.as_deref()
    }
}

/// The frozen, defaulted configuration every phase after `normalize-config`
/// reads. Wrapped in `Arc` by the pipeline so it can be cheaply shared
/// across the parallel SDK-generation tasks.
#[derive(Debug, Clone)]
pub struct NormalizedConfig {
    framework: HttpFramework,
    use_enhanced_generators: bool,
    use_registry: bool,
    continue_on_error: bool,
    fail_fast: bool,
    strict_plugin_validation: bool,
    hooks_frameworks: BTreeSet<HookFramework>,
    sdk_version: String,
    contracts_output_path: String,
    sdk_output_path: String,
    openapi_output_path: String,
    plugins: Arc<[PluginConfig]>,
}

impl NormalizedConfig {
    #[must_use]
    pub const fn framework(&self) -> HttpFramework {
        self.framework
    }

    #[must_use]
    pub const fn use_enhanced_generators(&self) -> bool {
        self.use_enhanced_generators
    }

    #[must_use]
    pub const fn use_registry(&self) -> bool {
        self.use_registry
    }

    #[must_use]
    pub const fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    #[must_use]
    pub const fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    #[must_use]
    pub const fn strict_plugin_validation(&self) -> bool {
        self.strict_plugin_validation
    }

    #[must_use]
    pub fn hooks_frameworks(&self) -> &BTreeSet<HookFramework> {
        &self.hooks_frameworks
    }

    #[must_use]
    pub fn sdk_version(&self) -> &str {
        &self.sdk_version
    }

    #[must_use]
    pub fn contracts_output_path(&self) -> &str {
        &self.contracts_output_path
    }

    #[must_use]
    pub fn sdk_output_path(&self) -> &str {
        &self.sdk_output_path
    }

    #[must_use]
    pub fn openapi_output_path(&self) -> &str {
        &self.openapi_output_path
    }

    #[must_use]
    pub fn plugins(&self) -> &[PluginConfig] {
        &self.plugins
    }

    #[must_use]
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &PluginConfig> {
        self.plugins.iter().filter(|plugin| plugin.enabled())
    }
}

/// Validate `raw`, then apply defaults to produce a [`NormalizedConfig`].
/// This is `validate-config` (order 0) and `normalize-config` (order 0.5)
/// collapsed into one function; the pipeline still reports them as two
/// phases so a config error always names phase 0 specifically.
///
/// # Errors
///
/// Returns every violated rule, not just the first, so a caller sees every
/// config problem in one pass.
pub fn validate_and_normalize(raw: &RawConfig) -> Result<NormalizedConfig, Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    let framework = HttpFramework::parse(&raw.framework);
    if framework.is_none() {
        errors.push(ConfigValidationError::UnknownFramework(raw.framework.clone()));
    }

    let fail_fast = raw.fail_fast.unwrap_or(false);
    let continue_on_error = raw.continue_on_error.unwrap_or(false);
    if fail_fast && continue_on_error {
        errors.push(ConfigValidationError::FailFastConflictsWithContinueOnError);
    }

    let sdk_version = raw.sdk_version.clone().unwrap_or_else(|| "1.0.0".to_string());
    if PLACEHOLDER_SDK_VERSIONS.contains(&sdk_version.as_str()) {
        errors.push(ConfigValidationError::PlaceholderSdkVersion(sdk_version.clone()));
    }

    let mut hooks_frameworks = BTreeSet::new();
    for raw_framework in raw.hooks_frameworks.iter().flatten() {
        match HookFramework::parse(raw_framework) {
            Some(framework) => {
                hooks_frameworks.insert(framework);
            }
            None => errors.push(ConfigValidationError::UnknownHooksFramework(raw_framework.clone())),
        }
    }

    let strict_plugin_validation = raw.strict_plugin_validation.unwrap_or(false);
    let mut plugins = Vec::with_capacity(raw.plugins.len());
    for raw_plugin in &raw.plugins {
        if strict_plugin_validation && raw_plugin.enabled && raw_plugin.env_name.is_none() {
            errors.push(ConfigValidationError::PluginMissingEnvName(raw_plugin.name.clone()));
        }
        plugins.push(PluginConfig {
            name: raw_plugin.name.clone(),
            enabled: raw_plugin.enabled,
            config: raw_plugin.config.clone(),
            env_name: raw_plugin.env_name.clone(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let overrides = raw.output_paths.clone().unwrap_or_default();
    Ok(NormalizedConfig {
        framework: framework.expect("validated above"),
        use_enhanced_generators: raw.use_enhanced_generators.unwrap_or(true),
        use_registry: raw.use_registry.unwrap_or(false),
        continue_on_error,
        fail_fast,
        strict_plugin_validation,
        hooks_frameworks,
        sdk_version,
        contracts_output_path: overrides.contracts.unwrap_or_else(|| "contracts".to_string()),
        sdk_output_path: overrides.sdk.unwrap_or_else(|| "sdk".to_string()),
        openapi_output_path: overrides.openapi.unwrap_or_else(|| "openapi".to_string()),
        plugins: plugins.into(),
    })
}
