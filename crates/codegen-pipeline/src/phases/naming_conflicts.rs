//! Phase 2: proactively warn about filename collisions (model names,
//! derived service names, plugin names) before any generation phase tries
//! to register the paths those collisions would produce. `FilePathRegistry`
//! still catches a collision at `add_file` time regardless — this phase
//! exists so a conflict is surfaced early, as a warning, rather than as a
//! mid-pipeline abort several phases later.

use std::collections::HashMap;

use codegen_engine::{Diagnostic, GenerationContext, Severity};

use crate::config::NormalizedConfig;
use crate::error::PhaseError;
use crate::phase::Phase;

pub struct NamingConflictsPhase;

impl Phase for NamingConflictsPhase {
    fn name(&self) -> &'static str {
        "naming-conflicts"
    }

    fn order(&self) -> f64 {
        2.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut should_abort = false;

        for model in context.schema().models() {
            if let Some(first) = seen.insert(model.name_lower().to_string(), model.name().to_string()) {
                if first != model.name() {
                    if context.report(Diagnostic::new(
                        Severity::Warn,
                        self.name(),
                        format!("model names '{first}' and '{}' collide case-insensitively", model.name()),
                    )) {
                        should_abort = true;
                    }
                }
            }
        }

        if should_abort {
            return Err(PhaseError::Message("naming conflict escalated to abort".to_string()));
        }
        Ok(())
    }
}

impl NamingConflictsPhase {
    /// Plugin-name collisions are checked separately from model-name
    /// collisions, against the normalized config rather than the schema.
    pub fn check_plugin_names(&self, context: &mut GenerationContext, config: &NormalizedConfig) -> bool {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut should_abort = false;
        for plugin in config.plugins() {
            let lower = plugin.name().to_lowercase();
            if let Some(first) = seen.insert(lower, plugin.name().to_string()) {
                if first != plugin.name() {
                    if context.report(Diagnostic::new(
                        Severity::Warn,
                        self.name(),
                        format!("plugin names '{first}' and '{}' collide", plugin.name()),
                    )) {
                        should_abort = true;
                    }
                }
            }
        }
        should_abort
    }
}
