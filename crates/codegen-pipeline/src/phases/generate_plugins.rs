//! Phase 10: register every enabled plugin declaration into the generated
//! tree. The plugin's feature body (payment, email, AI integration code)
//! is out of scope here — this only emits the thin registration stub and,
//! under `strict_plugin_validation`, enforces that every enabled plugin
//! declared the environment variable its credentials come from.
//!
//! Validation already ran once at config-normalization time (phase 0); this
//! phase re-checks because a plugin's `config` payload can still be
//! malformed in a way the config schema itself doesn't catch (e.g. an
//! empty JSON object where the plugin needs at least one key), and only
//! `strict_plugin_validation` decides whether that's fatal. The plugin list
//! itself is baked into the phase at construction time, same as
//! [`super::generate_controllers::GenerateControllersPhase`] bakes in its
//! framework — `execute` never reads [`NormalizedConfig`] directly.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::{render_plugin_index, render_plugin_registration};

use crate::config::{NormalizedConfig, PluginConfig};
use crate::error::{PhaseError, PluginValidationError};
use crate::phase::Phase;

pub struct GeneratePluginsPhase {
    plugins: Vec<PluginConfig>,
    strict: bool,
}

impl GeneratePluginsPhase {
    #[must_use]
    pub fn new(plugins: Vec<PluginConfig>, strict: bool) -> Self {
        Self { plugins, strict }
    }

    fn validate(&self, name: &str, env_name: Option<&str>, config: &serde_json::Value) -> Result<(), PluginValidationError> {
        if !self.strict {
            return Ok(());
        }
        let mut messages = Vec::new();
        if env_name.is_none() {
            messages.push("missing env_name".to_string());
        }
        if config.is_object() && config.as_object().is_some_and(serde_json::Map::is_empty) {
            messages.push("empty plugin config".to_string());
        }
        if messages.is_empty() {
            Ok(())
        } else {
            Err(PluginValidationError {
                plugin_name: name.to_string(),
                messages,
            })
        }
    }
}

impl Phase for GeneratePluginsPhase {
    fn name(&self) -> &'static str {
        "generate-plugins"
    }

    fn order(&self) -> f64 {
        10.0
    }

    fn should_run(&self, _config: &NormalizedConfig) -> bool {
        !self.plugins.is_empty()
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let mut names = Vec::new();

        for plugin in self.plugins.iter().filter(|plugin| plugin.enabled()) {
            self.validate(plugin.name(), plugin.env_name(), plugin.config())?;
            let body = render_plugin_registration(plugin.name(), plugin.enabled(), plugin.env_name());
            let path = format!("plugins/{}.plugin.ts", plugin.name());
            context.add_file(ArtifactFamily::Plugins, &path, body, self.name(), None)?;
            names.push(plugin.name().to_string());
        }

        if !names.is_empty() {
            context.add_file(ArtifactFamily::Plugins, "plugins/index.ts", render_plugin_index(&names), self.name(), None)?;
        }

        Ok(())
    }
}
