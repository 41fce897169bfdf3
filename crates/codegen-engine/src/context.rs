//! The single mutable context threaded through every pipeline phase.
//!
//! `GenerationContext` is the only thing that consults
//! [`ErrorEscalationPolicy`] — a phase reports a diagnostic through
//! [`GenerationContext::report`] and gets back whether the pipeline should
//! abort; it never inspects severities or the policy itself.

use std::sync::Arc;

use codegen_analyzer::AnalysisCache;
use dmmf_core::types::ParsedSchema;
use tracing::{event, Level};

use crate::error::{Diagnostic, ErrorCollector, Severity};
use crate::file_builder::{ArtifactFamily, GeneratedFilesBuilder, GeneratedFilesSnapshot};
use crate::path_registry::{FilePathRegistry, FilePathRegistrySnapshot, PathCollision};
use crate::policy::ErrorEscalationPolicy;

/// A snapshot of everything in [`GenerationContext`] that a phase can
/// mutate, taken before the phase runs and restored if it reports a
/// diagnostic severe enough to abort.
pub struct ContextSnapshot {
    path_registry: FilePathRegistrySnapshot,
    files: GeneratedFilesSnapshot,
    diagnostics_len: usize,
}

/// The shared state every pipeline phase reads from and writes into.
pub struct GenerationContext {
    schema: Arc<ParsedSchema>,
    analysis: Arc<AnalysisCache>,
    policy: ErrorEscalationPolicy,
    diagnostics: ErrorCollector,
    path_registry: FilePathRegistry,
    files: GeneratedFilesBuilder,
}

impl GenerationContext {
    #[must_use]
    pub fn new(schema: Arc<ParsedSchema>, analysis: Arc<AnalysisCache>, policy: ErrorEscalationPolicy) -> Self {
        Self {
            schema,
            analysis,
            policy,
            diagnostics: ErrorCollector::new(),
            path_registry: FilePathRegistry::new(),
            files: GeneratedFilesBuilder::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &ParsedSchema {
        &self.schema
    }

    #[must_use]
    pub fn schema_arc(&self) -> Arc<ParsedSchema> {
        Arc::clone(&self.schema)
    }

    #[must_use]
    pub fn analysis(&self) -> &AnalysisCache {
        &self.analysis
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &ErrorCollector {
        &self.diagnostics
    }

    #[must_use]
    pub fn path_registry(&self) -> &FilePathRegistry {
        &self.path_registry
    }

    #[must_use]
    pub fn path_registry_mut(&mut self) -> &mut FilePathRegistry {
        &mut self.path_registry
    }

    #[must_use]
    pub fn files(&self) -> &GeneratedFilesBuilder {
        &self.files
    }

    #[must_use]
    pub fn files_mut(&mut self) -> &mut GeneratedFilesBuilder {
        &mut self.files
    }

    /// Register and store a generated file in one step, validating `path`
    /// through this context's shared [`FilePathRegistry`] before it lands in
    /// `family`'s bucket.
    ///
    /// # Errors
    ///
    /// Returns [`PathCollision`] when `path` collides case-insensitively
    /// with an already-registered path under a different canonical casing.
    pub fn add_file(
        &mut self,
        family: ArtifactFamily,
        path: &str,
        contents: impl Into<String>,
        source: &str,
        model: Option<&str>,
    ) -> Result<(), PathCollision> {
        self.files.add_file(&mut self.path_registry, family, path, contents, source, model)
    }

    /// Report a diagnostic and return whether the pipeline should abort as
    /// a result, per the active escalation policy.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        let severity = diagnostic.severity();
        let should_abort = self.policy.should_abort_diagnostic(&diagnostic);

        match severity {
            Severity::Fatal | Severity::Validation | Severity::Error => {
                event!(Level::ERROR, phase = diagnostic.phase(), message = diagnostic.message());
            }
            Severity::Warn => {
                event!(Level::WARN, phase = diagnostic.phase(), message = diagnostic.message());
            }
            Severity::Info => {
                event!(Level::INFO, phase = diagnostic.phase(), message = diagnostic.message());
            }
        }

        self.diagnostics.push(diagnostic);
        should_abort
    }

    /// Snapshot mutable state before running a phase.
    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            path_registry: self.path_registry.snapshot(),
            files: self.files.snapshot(),
            diagnostics_len: self.diagnostics.diagnostics().len(),
        }
    }

    /// Restore to a prior snapshot after an aborting phase. Diagnostics
    /// reported during the rolled-back phase are kept, not discarded — the
    /// record of *why* the phase failed should survive the rollback even
    /// though its file output does not.
    pub fn restore(&mut self, snapshot: ContextSnapshot) {
        self.path_registry.restore(snapshot.path_registry);
        self.files.restore(snapshot.files);
        debug_assert!(self.diagnostics.diagnostics().len() >= snapshot.diagnostics_len);
    }
}
