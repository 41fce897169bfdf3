//! The cache holding every model's [`UnifiedModelAnalysis`], keyed by model
//! name.
//!
//! Built once by [`crate::analyze::analyze_schema`] and handed to every
//! downstream generation phase through the pipeline context. Phases that
//! only read analysis (every phase past `analyze-models`) borrow from this
//! cache rather than re-walking `ParsedModel` fields themselves.

use std::collections::HashMap;
use std::sync::Arc;

use dmmf_core::ParsedField;

/// How a relation field relates its owning model to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationCardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// One relationship derived from a relation field.
#[derive(Debug, Clone)]
pub struct RelationshipInfo {
    field_name: String,
    target_model: String,
    cardinality: RelationCardinality,
    is_self_relation: bool,
}

impl RelationshipInfo {
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        target_model: impl Into<String>,
        cardinality: RelationCardinality,
        is_self_relation: bool,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            target_model: target_model.into(),
            cardinality,
            is_self_relation,
        }
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn target_model(&self) -> &str {
        &self.target_model
    }

    #[must_use]
    pub const fn cardinality(&self) -> RelationCardinality {
        self.cardinality
    }

    #[must_use]
    pub const fn is_self_relation(&self) -> bool {
        self.is_self_relation
    }
}

/// Fields on a model that play a recognized structural role, rather than
/// being plain data columns.
#[derive(Debug, Clone, Default)]
pub struct SpecialFields {
    id_field: Option<String>,
    created_at_field: Option<String>,
    updated_at_field: Option<String>,
    deleted_at_field: Option<String>,
    slug_field: Option<String>,
    secret_fields: Arc<[String]>,
}

impl SpecialFields {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id_field: Option<String>,
        created_at_field: Option<String>,
        updated_at_field: Option<String>,
        deleted_at_field: Option<String>,
        slug_field: Option<String>,
        secret_fields: Vec<String>,
    ) -> Self {
        Self {
            id_field,
            created_at_field,
            updated_at_field,
            deleted_at_field,
            slug_field,
            secret_fields: secret_fields.into(),
        }
    }

    #[must_use]
    pub fn id_field(&self) -> Option<&str> {
        self.id_field.as_deref()
    }

    #[must_use]
    pub fn created_at_field(&self) -> Option<&str> {
        self.created_at_field.as_deref()
    }

    #[must_use]
    pub fn updated_at_field(&self) -> Option<&str> {
        self.updated_at_field.as_deref()
    }

    /// A `deletedAt`-shaped nullable timestamp, the marker this generator
    /// treats as "this model supports soft delete".
    #[must_use]
    pub fn deleted_at_field(&self) -> Option<&str> {
        self.deleted_at_field.as_deref()
    }

    /// A unique string field named or shaped like a slug (`slug`, `handle`),
    /// used by producers that want a human-readable lookup key alongside
    /// the id.
    #[must_use]
    pub fn slug_field(&self) -> Option<&str> {
        self.slug_field.as_deref()
    }

    #[must_use]
    pub fn secret_fields(&self) -> &[String] {
        &self.secret_fields
    }

    #[must_use]
    pub fn has_soft_delete(&self) -> bool {
        self.deleted_at_field.is_some()
    }
}

/// Capability flags downstream phases branch on, derived once rather than
/// re-checked per phase.
#[derive(Debug, Clone, Default)]
pub struct ModelCapabilities {
    pub has_composite_primary_key: bool,
    pub has_self_relation: bool,
    pub is_junction_table: bool,
    pub has_secret_fields: bool,
    pub has_updated_at: bool,
    /// The model has at least one string field plain-text-searchable by a
    /// generated `?search=` query parameter.
    pub has_search: bool,
    /// The model has a boolean field named/shaped like `featured`, used by
    /// the query DTO to expose a `featured`-only filter.
    pub has_featured: bool,
    /// Names of scalar fields that own a foreign key (own `relationFromFields`).
    pub foreign_keys: Vec<String>,
    /// Names of scalar string fields the search capability scans.
    pub search_fields: Vec<String>,
}

/// Everything derived about one model in a single analysis pass.
#[derive(Debug, Clone)]
pub struct UnifiedModelAnalysis {
    model_name: String,
    relationships: Arc<[RelationshipInfo]>,
    special_fields: SpecialFields,
    capabilities: ModelCapabilities,
}

impl UnifiedModelAnalysis {
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        relationships: Vec<RelationshipInfo>,
        special_fields: SpecialFields,
        capabilities: ModelCapabilities,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            relationships: relationships.into(),
            special_fields,
            capabilities,
        }
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    #[must_use]
    pub fn relationships(&self) -> &[RelationshipInfo] {
        &self.relationships
    }

    #[must_use]
    pub const fn special_fields(&self) -> &SpecialFields {
        &self.special_fields
    }

    #[must_use]
    pub fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }
}

/// Raised by [`AnalysisCache::get_analysis`] when a phase invariant assumed
/// a model's analysis had already been computed and it hadn't — always a
/// fatal, programmer-facing bug rather than a schema problem, since
/// `analyze-models` is required to run (and populate every model) before
/// any later phase executes.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("no analysis cached for model {0}; analyze-models phase did not run or was incomplete")]
pub struct AnalysisMissing(pub String);

/// Schema-wide analysis results, keyed by model name.
///
/// Also holds per-model service annotations: plugin-declared external
/// service integrations (e.g. "this model's service talks to Stripe"),
/// recorded here rather than threaded separately through the pipeline so
/// both the `analyze-models` consumers and the `generate-plugins` phase
/// share one lookup.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    by_model: HashMap<String, UnifiedModelAnalysis>,
    service_annotations: HashMap<String, Vec<String>>,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, analysis: UnifiedModelAnalysis) {
        self.by_model.insert(analysis.model_name().to_string(), analysis);
    }

    #[must_use]
    pub fn get(&self, model_name: &str) -> Option<&UnifiedModelAnalysis> {
        self.by_model.get(model_name)
    }

    /// Look up a model's analysis, for call sites whose invariants guarantee
    /// `analyze-models` already populated every model.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisMissing`] if no entry exists for `model_name`.
    pub fn get_analysis(&self, model_name: &str) -> Result<&UnifiedModelAnalysis, AnalysisMissing> {
        self.by_model
            .get(model_name)
            .ok_or_else(|| AnalysisMissing(model_name.to_string()))
    }

    /// Look up a model's analysis for an optional enrichment that should
    /// silently skip rather than fail when the model isn't analyzed.
    #[must_use]
    pub fn try_get_analysis(&self, model_name: &str) -> Option<&UnifiedModelAnalysis> {
        self.by_model.get(model_name)
    }

    /// Names of `models` with no cached analysis, in schema order. Used by
    /// the `analyze-models` phase to assert completeness before any
    /// generation phase runs.
    #[must_use]
    pub fn get_missing_analysis<'a>(&self, models: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        models
            .into_iter()
            .filter(|name| !self.by_model.contains_key(*name))
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    pub fn get_expected_count(&self) -> usize {
        self.by_model.len()
    }

    /// Record a plugin-declared external-service integration for `model_name`
    /// (e.g. `"stripe"`), appended in declaration order.
    pub fn annotate_service(&mut self, model_name: impl Into<String>, integration: impl Into<String>) {
        self.service_annotations
            .entry(model_name.into())
            .or_default()
            .push(integration.into());
    }

    #[must_use]
    pub fn service_annotations(&self, model_name: &str) -> &[String] {
        self.service_annotations
            .get(model_name)
            .map_or(&[], |v| &v[..])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_model.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &UnifiedModelAnalysis> {
        self.by_model.values()
    }
}

/// Lower-level helper used while building [`SpecialFields`]: whether a
/// scalar field's name matches the secret heuristic.
#[must_use]
pub(crate) fn is_secret_field(field: &ParsedField) -> bool {
    dmmf_core::constants::looks_like_secret_field_name(field.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_round_trips_by_model_name() {
        let mut cache = AnalysisCache::new();
        cache.insert(UnifiedModelAnalysis::new(
            "User",
            vec![],
            SpecialFields::default(),
            ModelCapabilities::default(),
        ));
        assert!(cache.get("User").is_some());
        assert!(cache.get("Missing").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_analysis_errors_on_miss() {
        let cache = AnalysisCache::new();
        let err = cache.get_analysis("User").unwrap_err();
        assert_eq!(err, AnalysisMissing("User".to_string()));
    }

    #[test]
    fn try_get_analysis_is_none_on_miss() {
        let cache = AnalysisCache::new();
        assert!(cache.try_get_analysis("User").is_none());
    }

    #[test]
    fn get_missing_analysis_lists_unanalyzed_models() {
        let mut cache = AnalysisCache::new();
        cache.insert(UnifiedModelAnalysis::new(
            "User",
            vec![],
            SpecialFields::default(),
            ModelCapabilities::default(),
        ));
        let missing = cache.get_missing_analysis(["User", "Post"]);
        assert_eq!(missing, vec!["Post".to_string()]);
    }

    #[test]
    fn service_annotations_accumulate_per_model() {
        let mut cache = AnalysisCache::new();
        cache.annotate_service("Payment", "stripe");
        cache.annotate_service("Payment", "sendgrid");
        assert_eq!(cache.service_annotations("Payment"), &["stripe".to_string(), "sendgrid".to_string()]);
        assert!(cache.service_annotations("Other").is_empty());
    }
}
