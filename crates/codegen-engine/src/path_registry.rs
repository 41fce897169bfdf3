//! The registry of output file paths, responsible for canonicalizing paths
//! and rejecting collisions before two phases ever try to write the same
//! file under different casing.
//!
//! Always case-insensitive — there is no config toggle, since the generated
//! output is meant to be checked out on case-insensitive filesystems
//! (macOS, Windows) as often as case-sensitive ones, and a collision that
//! only shows up on one of them is worse than rejecting it unconditionally.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::{Diagnostic, ErrorCollector, Severity};

/// Raised when a path collides case-insensitively with an already-registered
/// one under a different canonical casing. Carries both entries' source tags
/// so the diagnostic can point at both phases/artifacts involved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "path {new} ({new_source}) collides case-insensitively with already-registered {existing} ({existing_source})"
)]
pub struct PathCollision {
    pub existing: String,
    pub existing_source: String,
    pub new: String,
    pub new_source: String,
}

/// Kept as a type alias so call sites written against the old name keep
/// compiling; `PathCollision` is the richer, spec-named error.
pub type PathRegistryError = PathCollision;

/// Normalize a path for registration and lookup: backslashes become forward
/// slashes, then `.` and `..` segments are resolved relative to the path's
/// own root (no filesystem access — this is a pure string operation over a
/// virtual output tree).
#[must_use]
pub fn canonicalize_path(raw: &str) -> String {
    let forward = raw.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in forward.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// One registered path entry: its canonical form plus the source phase and
/// originating model/artifact that registered it, kept for collision
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegisteredPath {
    canonical: String,
    source: String,
    model: Option<String>,
}

impl RegisteredPath {
    fn source_tag(&self) -> String {
        match &self.model {
            Some(model) => format!("{} ({model})", self.source),
            None => self.source.clone(),
        }
    }
}

/// Tracks every output path registered so far, keyed by its lowercase
/// canonical form for collision detection while preserving the original
/// casing, source phase, and model for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct FilePathRegistry {
    by_canonical_lower: HashMap<String, RegisteredPath>,
}

impl FilePathRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path, returning its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`PathCollision`] if a different-cased path already maps to
    /// the same canonical lowercase key. Registering the exact same
    /// canonical path from the same source twice is not an error —
    /// idempotent re-registration happens when a phase reruns after a
    /// rollback.
    pub fn register(
        &mut self,
        raw_path: &str,
        source: &str,
        model: Option<&str>,
    ) -> Result<String, PathCollision> {
        let canonical = canonicalize_path(raw_path);
        let lower = canonical.to_lowercase();

        if let Some(existing) = self.by_canonical_lower.get(&lower) {
            if existing.canonical != canonical {
                return Err(PathCollision {
                    existing: existing.canonical.clone(),
                    existing_source: existing.source_tag(),
                    new: canonical,
                    new_source: Self::source_tag(source, model),
                });
            }
            return Ok(canonical);
        }

        self.by_canonical_lower.insert(
            lower,
            RegisteredPath {
                canonical: canonical.clone(),
                source: source.to_string(),
                model: model.map(str::to_string),
            },
        );
        Ok(canonical)
    }

    /// Register a path, converting a collision into a pushed diagnostic
    /// rather than a propagated error. Returns `true` when registration
    /// succeeded.
    pub fn try_register(
        &mut self,
        raw_path: &str,
        source: &str,
        model: Option<&str>,
        diagnostics: &mut ErrorCollector,
    ) -> bool {
        match self.register(raw_path, source, model) {
            Ok(_) => true,
            Err(collision) => {
                diagnostics.push(Diagnostic::new(Severity::Error, source, collision.to_string()));
                false
            }
        }
    }

    fn source_tag(source: &str, model: Option<&str>) -> String {
        match model {
            Some(model) => format!("{source} ({model})"),
            None => source.to_string(),
        }
    }

    #[must_use]
    pub fn is_registered(&self, raw_path: &str) -> bool {
        let canonical = canonicalize_path(raw_path);
        self.by_canonical_lower.contains_key(&canonical.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_canonical_lower.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_canonical_lower.is_empty()
    }

    /// Snapshot the registry's current state so it can be restored if a
    /// phase fails and the pipeline needs to roll back.
    #[must_use]
    pub fn snapshot(&self) -> FilePathRegistrySnapshot {
        FilePathRegistrySnapshot {
            by_canonical_lower: self.by_canonical_lower.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: FilePathRegistrySnapshot) {
        self.by_canonical_lower = snapshot.by_canonical_lower;
    }
}

/// An opaque snapshot of [`FilePathRegistry`] state, taken before a phase
/// runs and restored if that phase's error escalates to an abort.
#[derive(Debug, Clone)]
pub struct FilePathRegistrySnapshot {
    by_canonical_lower: HashMap<String, RegisteredPath>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonicalizes_backslashes_and_dot_segments() {
        assert_eq!(
            canonicalize_path(r"src\dto\.\user.ts"),
            "src/dto/user.ts"
        );
    }

    #[test]
    fn resolves_parent_segments() {
        assert_eq!(
            canonicalize_path("src/dto/../services/user.service.ts"),
            "src/services/user.service.ts"
        );
    }

    #[test]
    fn rejects_case_insensitive_collision() {
        let mut registry = FilePathRegistry::new();
        registry.register("src/dto/User.ts", "generate-dtos", Some("User")).unwrap();
        let err = registry
            .register("src/dto/user.ts", "generate-validators", Some("User"))
            .unwrap_err();
        assert_eq!(err.existing, "src/dto/User.ts");
        assert!(err.existing_source.contains("generate-dtos"));
        assert!(err.new_source.contains("generate-validators"));
    }

    #[test]
    fn re_registering_identical_path_is_not_an_error() {
        let mut registry = FilePathRegistry::new();
        registry.register("src/dto/User.ts", "generate-dtos", Some("User")).unwrap();
        assert!(registry.register("src/dto/User.ts", "generate-dtos", Some("User")).is_ok());
    }

    #[test]
    fn try_register_pushes_diagnostic_instead_of_propagating() {
        let mut registry = FilePathRegistry::new();
        let mut diagnostics = ErrorCollector::new();
        registry.register("src/dto/User.ts", "generate-dtos", Some("User")).unwrap();
        let ok = registry.try_register("src/dto/user.ts", "generate-validators", Some("User"), &mut diagnostics);
        assert!(!ok);
        assert_eq!(diagnostics.diagnostics().len(), 1);
    }

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut registry = FilePathRegistry::new();
        registry.register("src/dto/User.ts", "generate-dtos", Some("User")).unwrap();
        let snapshot = registry.snapshot();
        registry.register("src/dto/Post.ts", "generate-dtos", Some("Post")).unwrap();
        assert_eq!(registry.len(), 2);
        registry.restore(snapshot);
        assert_eq!(registry.len(), 1);
    }
}
