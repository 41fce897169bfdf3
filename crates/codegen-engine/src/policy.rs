//! The error escalation policy: the single decision point for whether a
//! diagnostic aborts the pipeline.
//!
//! Only [`crate::context::GenerationContext`] consults this — phases never
//! check severities themselves, they just report diagnostics and let the
//! context decide whether to keep going.

use std::collections::HashSet;

use crate::error::{Diagnostic, Severity};

/// A named escalation policy. `Validation` and `Fatal` severities always
/// abort regardless of which policy is in effect; the policies differ only
/// in how they treat `Warn` and `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEscalationPolicy {
    abort_on_error: bool,
    abort_on_warn: bool,
    /// `Warn`-severity phase names that abort even under a policy that
    /// otherwise lets warnings through. Only meaningful when `abort_on_warn`
    /// is `false` — a policy that already aborts on every warn has nothing
    /// left for a critical subset to add.
    critical_warn_phases: Option<HashSet<String>>,
}

impl ErrorEscalationPolicy {
    /// `Error` aborts, `Warn` does not. The policy most projects want
    /// during day-to-day development.
    #[must_use]
    pub fn default_policy() -> Self {
        Self {
            abort_on_error: true,
            abort_on_warn: false,
            critical_warn_phases: None,
        }
    }

    /// `Warn` also aborts — for production runs that want zero tolerance.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            abort_on_error: true,
            abort_on_warn: true,
            critical_warn_phases: None,
        }
    }

    /// Aborts on the first `Warn` reported by one of `critical_phases`, the
    /// same as [`Self::strict`] would for *any* warn; every other `Warn`
    /// is collected rather than aborting, the same as [`Self::default_policy`].
    /// `Error` always aborts. Intended for CI, where a known-risky phase
    /// (say, `naming-conflicts`) should fail the build on its first warning
    /// while less critical phases keep collecting diagnostics for the run's
    /// summary.
    #[must_use]
    pub fn fail_fast(critical_phases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            abort_on_error: true,
            abort_on_warn: false,
            critical_warn_phases: Some(critical_phases.into_iter().map(Into::into).collect()),
        }
    }

    /// Nothing below `Validation` aborts — a dry-run policy for a `check`
    /// subcommand that wants to surface every diagnostic the schema
    /// produces in one pass rather than stopping at the first one.
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            abort_on_error: false,
            abort_on_warn: false,
            critical_warn_phases: None,
        }
    }

    /// Whether a diagnostic of `severity` should abort the pipeline under
    /// this policy, ignoring phase-level `FailFast` carve-outs. Prefer
    /// [`Self::should_abort_diagnostic`] when a [`Diagnostic`] is at hand —
    /// this exists for callers that only have a bare severity.
    #[must_use]
    pub const fn should_abort(&self, severity: Severity) -> bool {
        match severity {
            Severity::Fatal | Severity::Validation => true,
            Severity::Error => self.abort_on_error,
            Severity::Warn => self.abort_on_warn,
            Severity::Info => false,
        }
    }

    /// Whether `diagnostic` should abort the pipeline under this policy.
    /// For a `Warn`, a [`Self::fail_fast`] policy aborts immediately if the
    /// diagnostic's phase is in the critical set, even though its general
    /// `abort_on_warn` flag would otherwise let it through.
    #[must_use]
    pub fn should_abort_diagnostic(&self, diagnostic: &Diagnostic) -> bool {
        if diagnostic.severity() == Severity::Warn {
            if let Some(critical) = &self.critical_warn_phases {
                return critical.contains(diagnostic.phase()) || self.abort_on_warn;
            }
        }
        self.should_abort(diagnostic.severity())
    }
}

impl Default for ErrorEscalationPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_fatal_always_abort() {
        let policy = ErrorEscalationPolicy::dry_run();
        assert!(policy.should_abort(Severity::Validation));
        assert!(policy.should_abort(Severity::Fatal));
    }

    #[test]
    fn default_policy_aborts_on_error_not_warn() {
        let policy = ErrorEscalationPolicy::default_policy();
        assert!(policy.should_abort(Severity::Error));
        assert!(!policy.should_abort(Severity::Warn));
    }

    #[test]
    fn strict_policy_aborts_on_warn_too() {
        let policy = ErrorEscalationPolicy::strict();
        assert!(policy.should_abort(Severity::Warn));
    }

    #[test]
    fn info_never_aborts_under_any_policy() {
        for policy in [
            ErrorEscalationPolicy::default_policy(),
            ErrorEscalationPolicy::strict(),
            ErrorEscalationPolicy::dry_run(),
        ] {
            assert!(!policy.should_abort(Severity::Info));
        }
    }

    #[test]
    fn fail_fast_aborts_on_critical_phase_warn() {
        let policy = ErrorEscalationPolicy::fail_fast(["naming-conflicts"]);
        let diagnostic = Diagnostic::new(Severity::Warn, "naming-conflicts", "duplicate service name");
        assert!(policy.should_abort_diagnostic(&diagnostic));
    }

    #[test]
    fn fail_fast_lets_non_critical_warn_through() {
        let policy = ErrorEscalationPolicy::fail_fast(["naming-conflicts"]);
        let diagnostic = Diagnostic::new(Severity::Warn, "generate-hooks", "unused import");
        assert!(!policy.should_abort_diagnostic(&diagnostic));
    }

    #[test]
    fn fail_fast_aborts_on_error_regardless_of_phase() {
        let policy = ErrorEscalationPolicy::fail_fast(["naming-conflicts"]);
        let diagnostic = Diagnostic::new(Severity::Error, "generate-services", "bad template");
        assert!(policy.should_abort_diagnostic(&diagnostic));
    }
}
