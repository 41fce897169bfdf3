//! Optional extension points around phase execution.
//!
//! Hooks run *inside* the phase's rollback window: if the phase itself
//! then aborts, anything a hook mutated through the context is rolled back
//! right alongside the phase's own changes.

use std::collections::HashMap;

use codegen_engine::GenerationContext;

type HookFn = Box<dyn Fn(&mut GenerationContext) + Send + Sync>;

/// A registry of `before`/`after` callbacks keyed by phase name.
#[derive(Default)]
pub struct PhaseHookRegistry {
    before: HashMap<&'static str, Vec<HookFn>>,
    after: HashMap<&'static str, Vec<HookFn>>,
}

impl PhaseHookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_phase(&mut self, phase_name: &'static str, hook: impl Fn(&mut GenerationContext) + Send + Sync + 'static) {
        self.before.entry(phase_name).or_default().push(Box::new(hook));
    }

    pub fn after_phase(&mut self, phase_name: &'static str, hook: impl Fn(&mut GenerationContext) + Send + Sync + 'static) {
        self.after.entry(phase_name).or_default().push(Box::new(hook));
    }

    pub(crate) fn run_before(&self, phase_name: &str, context: &mut GenerationContext) {
        if let Some(hooks) = self.before.get(phase_name) {
            for hook in hooks {
                hook(context);
            }
        }
    }

    pub(crate) fn run_after(&self, phase_name: &str, context: &mut GenerationContext) {
        if let Some(hooks) = self.after.get(phase_name) {
            for hook in hooks {
                hook(context);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::AnalysisCache;
    use codegen_engine::{ErrorEscalationPolicy, Severity};
    use dmmf_core::testing;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn before_and_after_hooks_fire_around_a_phase() {
        let mut registry = PhaseHookRegistry::new();
        let before_count = Arc::new(AtomicUsize::new(0));
        let after_count = Arc::new(AtomicUsize::new(0));

        let before_clone = Arc::clone(&before_count);
        registry.before_phase("generate-dtos", move |_ctx| {
            before_clone.fetch_add(1, Ordering::SeqCst);
        });
        let after_clone = Arc::clone(&after_count);
        registry.after_phase("generate-dtos", move |_ctx| {
            after_clone.fetch_add(1, Ordering::SeqCst);
        });

        let schema = Arc::new(testing::blog_schema());
        let analysis = Arc::new(AnalysisCache::new());
        let mut context = GenerationContext::new(schema, analysis, ErrorEscalationPolicy::default_policy());

        registry.run_before("generate-dtos", &mut context);
        context.report(codegen_engine::Diagnostic::new(Severity::Info, "generate-dtos", "ran"));
        registry.run_after("generate-dtos", &mut context);

        assert_eq!(before_count.load(Ordering::SeqCst), 1);
        assert_eq!(after_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hooks_for_an_unregistered_phase_are_a_no_op() {
        let registry = PhaseHookRegistry::new();
        let schema = Arc::new(testing::blog_schema());
        let analysis = Arc::new(AnalysisCache::new());
        let mut context = GenerationContext::new(schema, analysis, ErrorEscalationPolicy::default_policy());
        registry.run_before("generate-services", &mut context);
        registry.run_after("generate-services", &mut context);
    }
}
