//! Diagnostics and the collector every phase reports into.
//!
//! A [`Diagnostic`] is not itself a hard failure — whether it aborts the
//! pipeline is [`crate::policy::ErrorEscalationPolicy`]'s decision, made
//! only by [`crate::context::GenerationContext`]. Phases just report what
//! they found.

use std::fmt;

/// How serious a diagnostic is. Ordered so that `severity >= threshold`
/// comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Validation,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// One diagnostic reported by a phase: a severity, the phase that reported
/// it, an optional model/artifact context, a human-readable message, and an
/// optional upstream cause.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    phase: String,
    context: Option<String>,
    message: String,
    cause: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            context: None,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the model/artifact this diagnostic concerns, e.g. a model
    /// name or a file path, for readers that want to group diagnostics by
    /// origin rather than just by phase.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach an upstream error's rendered message as this diagnostic's
    /// cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn phase(&self) -> &str {
        &self.phase
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.phase, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, " caused by: {cause}")?;
        }
        Ok(())
    }
}

/// Accumulates diagnostics reported across the whole pipeline run.
///
/// Nothing in here decides to abort — that's the policy's job, consulted by
/// the context each time a diagnostic is pushed.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_severity_at_least(&self, threshold: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity() >= threshold)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics reported by a specific phase, in report order.
    #[must_use]
    pub fn for_phase<'a>(&'a self, phase: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.phase() == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_ordering_places_fatal_highest() {
        assert!(Severity::Fatal > Severity::Validation);
        assert!(Severity::Validation > Severity::Error);
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Warn > Severity::Info);
    }

    #[test]
    fn has_severity_at_least_checks_threshold() {
        let mut collector = ErrorCollector::new();
        collector.push(Diagnostic::new(Severity::Warn, "normalize-config", "unused key"));
        assert!(collector.has_severity_at_least(Severity::Info));
        assert!(!collector.has_severity_at_least(Severity::Error));
    }

    #[test]
    fn for_phase_filters_correctly() {
        let mut collector = ErrorCollector::new();
        collector.push(Diagnostic::new(Severity::Info, "a", "one"));
        collector.push(Diagnostic::new(Severity::Info, "b", "two"));
        let from_a: Vec<_> = collector.for_phase("a").collect();
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].message(), "one");
    }

    #[test]
    fn context_and_cause_are_optional_and_render_in_display() {
        let bare = Diagnostic::new(Severity::Warn, "generate-sdk", "placeholder version");
        assert_eq!(bare.context(), None);
        assert_eq!(bare.cause(), None);

        let full = Diagnostic::new(Severity::Error, "generate-sdk", "placeholder version")
            .with_context("Model=User")
            .with_cause("sdkVersion was '0.0.0-dev'");
        assert_eq!(full.context(), Some("Model=User"));
        assert_eq!(full.cause(), Some("sdkVersion was '0.0.0-dev'"));
        let rendered = full.to_string();
        assert!(rendered.contains("(Model=User)"));
        assert!(rendered.contains("caused by: sdkVersion was '0.0.0-dev'"));
    }
}
