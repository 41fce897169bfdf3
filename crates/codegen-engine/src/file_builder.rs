//! In-memory accumulation of generated file contents.
//!
//! Phases append or replace file bodies here rather than writing to disk
//! directly — keeping the output in memory until the whole pipeline
//! completes is what makes rollback possible: nothing is written out until
//! every phase has succeeded.

use std::collections::BTreeMap;

use crate::path_registry::{FilePathRegistry, PathCollision};

/// The artifact families a generation run can produce files into. Kept
/// closed and exhaustive so a phase can't invent a thirteenth output bucket
/// by typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFamily {
    Contracts,
    Validators,
    Services,
    Controllers,
    Routes,
    Sdk,
    Hooks,
    Plugins,
    Registry,
    Checklist,
    Openapi,
    Manifest,
}

impl ArtifactFamily {
    const ALL: [Self; 12] = [
        Self::Contracts,
        Self::Validators,
        Self::Services,
        Self::Controllers,
        Self::Routes,
        Self::Sdk,
        Self::Hooks,
        Self::Plugins,
        Self::Registry,
        Self::Checklist,
        Self::Openapi,
        Self::Manifest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Validators => "validators",
            Self::Services => "services",
            Self::Controllers => "controllers",
            Self::Routes => "routes",
            Self::Sdk => "sdk",
            Self::Hooks => "hooks",
            Self::Plugins => "plugins",
            Self::Registry => "registry",
            Self::Checklist => "checklist",
            Self::Openapi => "openapi",
            Self::Manifest => "manifest",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Contracts => 0,
            Self::Validators => 1,
            Self::Services => 2,
            Self::Controllers => 3,
            Self::Routes => 4,
            Self::Sdk => 5,
            Self::Hooks => 6,
            Self::Plugins => 7,
            Self::Registry => 8,
            Self::Checklist => 9,
            Self::Openapi => 10,
            Self::Manifest => 11,
        }
    }
}

/// One generated file: its registered output path and its contents.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    path: String,
    contents: String,
}

impl GeneratedFile {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Accumulates the files for a single artifact family. `BTreeMap` keeps
/// iteration in path order, which keeps output (and test assertions over
/// it) deterministic.
#[derive(Debug, Clone, Default)]
pub struct FileBuilder {
    files: BTreeMap<String, String>,
}

impl FileBuilder {
    fn add(
        &mut self,
        registry: &mut FilePathRegistry,
        path: &str,
        contents: impl Into<String>,
        source: &str,
        model: Option<&str>,
    ) -> Result<(), PathCollision> {
        let canonical = registry.register(path, source, model)?;
        self.files.insert(canonical, contents.into());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, canonical_path: &str) -> Option<&str> {
        self.files.get(canonical_path).map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = GeneratedFile> + '_ {
        self.files.iter().map(|(path, contents)| GeneratedFile {
            path: path.clone(),
            contents: contents.clone(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.files.clone()
    }

    fn restore(&mut self, snapshot: BTreeMap<String, String>) {
        self.files = snapshot;
    }
}

/// Composition of one [`FileBuilder`] per [`ArtifactFamily`], all validated
/// through a single shared [`FilePathRegistry`] so two families can't
/// collide on the same output path either.
#[derive(Debug, Clone)]
pub struct GeneratedFilesBuilder {
    families: [FileBuilder; 12],
}

impl Default for GeneratedFilesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratedFilesBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            families: Default::default(),
        }
    }

    fn builder(&self, family: ArtifactFamily) -> &FileBuilder {
        &self.families[family.index()]
    }

    fn builder_mut(&mut self, family: ArtifactFamily) -> &mut FileBuilder {
        &mut self.families[family.index()]
    }

    /// Register `path` in `registry` and store `contents` under its
    /// canonical form, within `family`'s bucket.
    ///
    /// # Errors
    ///
    /// Propagates [`PathCollision`] from the registry.
    pub fn add_file(
        &mut self,
        registry: &mut FilePathRegistry,
        family: ArtifactFamily,
        path: &str,
        contents: impl Into<String>,
        source: &str,
        model: Option<&str>,
    ) -> Result<(), PathCollision> {
        self.builder_mut(family).add(registry, path, contents, source, model)
    }

    #[must_use]
    pub fn get(&self, family: ArtifactFamily, canonical_path: &str) -> Option<&str> {
        self.builder(family).get(canonical_path)
    }

    pub fn files_in(&self, family: ArtifactFamily) -> impl Iterator<Item = GeneratedFile> + '_ {
        self.builder(family).files()
    }

    /// All generated files across every family, in family declaration order
    /// and path order within each family.
    pub fn files(&self) -> impl Iterator<Item = GeneratedFile> + '_ {
        ArtifactFamily::ALL.iter().flat_map(|family| self.builder(*family).files())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.families.iter().map(FileBuilder::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.iter().all(FileBuilder::is_empty)
    }

    #[must_use]
    pub fn snapshot(&self) -> GeneratedFilesSnapshot {
        GeneratedFilesSnapshot {
            families: std::array::from_fn(|i| self.families[i].snapshot()),
        }
    }

    pub fn restore(&mut self, snapshot: GeneratedFilesSnapshot) {
        for (family, files) in self.families.iter_mut().zip(snapshot.families) {
            family.restore(files);
        }
    }
}

/// An opaque snapshot of [`GeneratedFilesBuilder`] state, taken alongside a
/// [`crate::path_registry::FilePathRegistrySnapshot`] before each phase.
#[derive(Debug, Clone)]
pub struct GeneratedFilesSnapshot {
    families: [BTreeMap<String, String>; 12],
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_file_registers_and_stores_contents() {
        let mut registry = FilePathRegistry::new();
        let mut builder = GeneratedFilesBuilder::new();
        builder
            .add_file(
                &mut registry,
                ArtifactFamily::Contracts,
                "src/dto/User.ts",
                "export class UserDto {}",
                "generate-dtos",
                Some("User"),
            )
            .unwrap();
        assert_eq!(
            builder.get(ArtifactFamily::Contracts, "src/dto/User.ts"),
            Some("export class UserDto {}")
        );
    }

    #[test]
    fn add_file_propagates_collision_error_across_families() {
        let mut registry = FilePathRegistry::new();
        let mut builder = GeneratedFilesBuilder::new();
        builder
            .add_file(&mut registry, ArtifactFamily::Contracts, "src/dto/User.ts", "a", "generate-dtos", Some("User"))
            .unwrap();
        let err = builder
            .add_file(&mut registry, ArtifactFamily::Validators, "src/dto/user.ts", "b", "generate-validators", Some("User"))
            .unwrap_err();
        assert_eq!(err.existing, "src/dto/User.ts");
    }

    #[test]
    fn files_iterate_in_path_order_within_a_family() {
        let mut registry = FilePathRegistry::new();
        let mut builder = GeneratedFilesBuilder::new();
        builder
            .add_file(&mut registry, ArtifactFamily::Services, "src/b.ts", "b", "generate-services", None)
            .unwrap();
        builder
            .add_file(&mut registry, ArtifactFamily::Services, "src/a.ts", "a", "generate-services", None)
            .unwrap();
        let paths: Vec<_> = builder.files_in(ArtifactFamily::Services).map(|f| f.path().to_string()).collect();
        assert_eq!(paths, vec!["src/a.ts".to_string(), "src/b.ts".to_string()]);
    }

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut registry = FilePathRegistry::new();
        let mut builder = GeneratedFilesBuilder::new();
        builder
            .add_file(&mut registry, ArtifactFamily::Contracts, "src/a.ts", "a", "generate-dtos", None)
            .unwrap();
        let snapshot = builder.snapshot();
        builder
            .add_file(&mut registry, ArtifactFamily::Contracts, "src/b.ts", "b", "generate-dtos", None)
            .unwrap();
        assert_eq!(builder.len(), 2);
        builder.restore(snapshot);
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn total_len_sums_across_families() {
        let mut registry = FilePathRegistry::new();
        let mut builder = GeneratedFilesBuilder::new();
        builder
            .add_file(&mut registry, ArtifactFamily::Contracts, "src/dto/User.ts", "a", "generate-dtos", None)
            .unwrap();
        builder
            .add_file(&mut registry, ArtifactFamily::Services, "src/services/user.ts", "b", "generate-services", None)
            .unwrap();
        assert_eq!(builder.len(), 2);
    }
}
