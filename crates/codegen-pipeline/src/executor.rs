//! Runs an ordered list of phases against a [`GenerationContext`], with
//! per-phase snapshot/rollback and hook support.

use codegen_engine::{Diagnostic, GenerationContext, Severity};
use tracing::{event, Level};

use crate::config::NormalizedConfig;
use crate::error::GenerationFailedError;
use crate::hooks::PhaseHookRegistry;
use crate::phase::Phase;

/// Run `phases`, already in any order — they are sorted by
/// [`Phase::order`] here, with ties broken by original position so two
/// phases declared with the same order still execute deterministically.
///
/// For each phase that [`Phase::should_run`] approves: hooks run, a
/// snapshot is taken, the phase executes, and the escalation policy is
/// consulted. If the policy says abort, the snapshot is restored (except
/// diagnostics, which persist) and a [`GenerationFailedError`] propagates
/// immediately, skipping every later phase.
///
/// # Errors
///
/// Returns [`GenerationFailedError`] naming the first phase whose outcome
/// escalated to an abort.
pub fn run_pipeline(
    context: &mut GenerationContext,
    config: &NormalizedConfig,
    phases: &[Box<dyn Phase>],
    hooks: &PhaseHookRegistry,
) -> Result<(), GenerationFailedError> {
    let mut ordered: Vec<&Box<dyn Phase>> = phases.iter().collect();
    ordered.sort_by(|a, b| a.order().partial_cmp(&b.order()).unwrap_or(std::cmp::Ordering::Equal));

    for phase in ordered {
        if !phase.should_run(config) {
            event!(Level::DEBUG, phase = phase.name(), "skipped");
            continue;
        }

        event!(Level::INFO, phase = phase.name(), "phase start");
        hooks.run_before(phase.name(), context);

        let snapshot = context.snapshot();
        let outcome = phase.execute(context);

        let aborted = match outcome {
            Ok(()) => false,
            Err(phase_error) => {
                let diagnostic = Diagnostic::new(Severity::Error, phase.name(), phase_error.to_string());
                context.report(diagnostic)
            }
        };

        if aborted {
            let cause = context
                .diagnostics()
                .for_phase(phase.name())
                .last()
                .map(|d| d.message().to_string())
                .unwrap_or_else(|| "phase aborted".to_string());
            context.restore(snapshot);
            event!(Level::ERROR, phase = phase.name(), "phase aborted, rolled back");
            return Err(GenerationFailedError {
                phase: phase.name().to_string(),
                cause,
            });
        }

        hooks.run_after(phase.name(), context);
        event!(Level::INFO, phase = phase.name(), "phase end");
    }

    Ok(())
}
