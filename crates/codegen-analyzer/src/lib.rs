//! Single-pass per-model analysis, cached for reuse by every generation
//! phase that runs after `analyze-models`.

pub mod analyze;
pub mod cache;

pub use analyze::{analyze_model, analyze_schema};
pub use cache::{
    AnalysisCache, AnalysisMissing, ModelCapabilities, RelationCardinality, RelationshipInfo,
    SpecialFields, UnifiedModelAnalysis,
};
