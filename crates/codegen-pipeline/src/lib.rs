//! Ordered phase pipeline, config normalization, and registry mode for the
//! DMMF-to-TypeScript generator.
//!
//! `config` validates and freezes the run configuration; `phase` defines
//! the contract every pipeline step implements; `executor` runs an ordered
//! list of them against a shared [`codegen_engine::GenerationContext`],
//! snapshotting and rolling back around each one; `phases` holds the
//! concrete phases 0.75-11 plus the registry-mode consolidation; `hooks`
//! exposes before/after extension points.

pub mod config;
pub mod error;
pub mod executor;
pub mod hooks;
pub mod phase;
pub mod phases;

pub use config::{validate_and_normalize, ConfigValidationError, NormalizedConfig, RawConfig};
pub use error::{ConfigRejected, GenerationFailedError, PhaseError, PipelineError, SchemaRejected};
pub use executor::run_pipeline;
pub use hooks::PhaseHookRegistry;
pub use phase::Phase;
pub use phases::default_phases;
