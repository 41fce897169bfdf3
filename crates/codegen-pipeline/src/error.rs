//! Closed error types for phase execution and the top-level pipeline run.

use codegen_analyzer::AnalysisMissing;
use codegen_engine::PathCollision;

use crate::config::ConfigValidationError;

/// An error a single phase can surface. The executor decides, via the
/// active [`codegen_engine::ErrorEscalationPolicy`], whether reporting one
/// of these aborts the run — a phase itself never makes that call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhaseError {
    #[error(transparent)]
    PathCollision(#[from] PathCollision),
    #[error(transparent)]
    AnalysisMissing(#[from] AnalysisMissing),
    #[error("plugin '{plugin}' failed validation: {messages:?}")]
    PluginValidation { plugin: String, messages: Vec<String> },
    #[error("{0}")]
    Message(String),
}

/// Raised by [`PluginValidationError`] only — kept as a dedicated, richer
/// error for the strict-plugin-validation path and convertible into
/// [`PhaseError::PluginValidation`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("plugin '{plugin_name}' failed validation: {}", messages.join("; "))]
pub struct PluginValidationError {
    pub plugin_name: String,
    pub messages: Vec<String>,
}

impl From<PluginValidationError> for PhaseError {
    fn from(err: PluginValidationError) -> Self {
        Self::PluginValidation {
            plugin: err.plugin_name,
            messages: err.messages,
        }
    }
}

/// Raised when the pipeline's config-validation phase rejects the raw
/// config before any phase runs.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("config validation failed: {0:?}")]
pub struct ConfigRejected(pub Vec<ConfigValidationError>);

/// Raised when a schema failed structural or detailed validation before
/// any generation phase ran.
#[derive(Debug, thiserror::Error)]
#[error("schema validation failed: {0}")]
pub struct SchemaRejected(#[from] pub dmmf_core::SchemaValidationFailed);

/// The top-level error the pipeline run returns. Carries the failing
/// phase's name and the diagnostic that triggered the abort so a caller
/// can report both without re-deriving them from the (already
/// rolled-back) context.
#[derive(Debug, Clone, thiserror::Error)]
#[error("generation failed in phase '{phase}': {cause}")]
pub struct GenerationFailedError {
    pub phase: String,
    pub cause: String,
}

/// Every way [`crate::executor::run_pipeline`] can fail.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    ConfigRejected(#[from] ConfigRejected),
    #[error(transparent)]
    SchemaRejected(#[from] SchemaRejected),
    #[error(transparent)]
    GenerationFailed(#[from] GenerationFailedError),
}
