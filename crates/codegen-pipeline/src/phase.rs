//! The `Phase` contract every pipeline step implements.
//!
//! Composition over inheritance: rather than a deep class hierarchy of
//! phase base classes, every phase is just a type implementing this one
//! trait, held as a `Box<dyn Phase>` in the executor's ordered list.

use codegen_engine::GenerationContext;

use crate::config::NormalizedConfig;

/// One step of the generation pipeline.
///
/// Phases must be free of external side effects besides mutating the
/// context and reporting diagnostics through it — no direct filesystem or
/// network access; that stays in the CLI driver.
pub trait Phase: Send + Sync {
    /// Stable identifier used in diagnostics, snapshots, and hook
    /// registration.
    fn name(&self) -> &'static str;

    /// Position in the canonical pipeline order. Phases are sorted by this
    /// value before execution; ties are broken by declaration order.
    fn order(&self) -> f64;

    /// Whether this phase should run at all for the current config. A
    /// phase that returns `false` here is skipped entirely — no snapshot
    /// is taken and no hooks fire for it.
    fn should_run(&self, config: &NormalizedConfig) -> bool {
        let _ = config;
        true
    }

    /// Execute the phase against the shared context.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::PhaseError`] when the phase hit a
    /// condition it cannot recover from on its own; the executor decides,
    /// via the escalation policy, whether that aborts the run.
    fn execute(&self, context: &mut GenerationContext) -> Result<(), crate::error::PhaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoOpPhase;

    impl Phase for NoOpPhase {
        fn name(&self) -> &'static str {
            "no-op"
        }

        fn order(&self) -> f64 {
            0.0
        }

        fn execute(&self, _context: &mut GenerationContext) -> Result<(), crate::error::PhaseError> {
            Ok(())
        }
    }

    #[test]
    fn default_should_run_is_true() {
        let phase = NoOpPhase;
        let raw = crate::config::RawConfig {
            framework: "express".to_string(),
            use_enhanced_generators: None,
            use_registry: None,
            continue_on_error: None,
            fail_fast: None,
            strict_plugin_validation: None,
            hooks_frameworks: None,
            sdk_version: Some("1.0.0".to_string()),
            output_paths: None,
            plugins: vec![],
        };
        let config = crate::config::validate_and_normalize(&raw).unwrap();
        assert!(phase.should_run(&config));
    }
}
