//! The page-metadata registry: every loaded section, by name.

use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::entry::EffectivePageEntry;
use super::error::{self, RegistryError};
use super::key::RouteKey;
use super::section::SectionConfig;
use super::source::{self, Declaration};
use crate::debug;

/// Immutable collection of sections.
///
/// Built at startup (see [`Registry::load`] and [`Registry::load_dir`]) and
/// then only read. It holds no interior mutability, so a shared reference
/// can be used from any number of threads.
#[derive(Debug, Default)]
pub struct Registry {
    sections: FxHashMap<String, SectionConfig>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register one section.
    pub fn load(
        &mut self,
        name: impl Into<String>,
        declaration: Declaration,
    ) -> Result<&SectionConfig, RegistryError> {
        let name = name.into();
        if self.sections.contains_key(&name) {
            return Err(RegistryError::DuplicateSection(name));
        }
        let section = SectionConfig::load(name.clone(), declaration)?;
        Ok(self.sections.entry(name).or_insert(section))
    }

    /// Register an already loaded section.
    pub fn insert(&mut self, section: SectionConfig) -> Result<(), RegistryError> {
        if self.sections.contains_key(section.name()) {
            return Err(RegistryError::DuplicateSection(section.name().to_owned()));
        }
        self.sections.insert(section.name().to_owned(), section);
        Ok(())
    }

    /// Load every `<stem>.json` / `<stem>.toml` below `root`.
    ///
    /// Files are read and validated in parallel, then registered in sorted
    /// section order. All failing sections are reported together and
    /// nothing is returned unless every section loads.
    pub fn load_dir(root: &Path, stem: &str) -> Result<Self, RegistryError> {
        let files = source::discover(root, stem)?;
        debug!("load"; "found {} declaration files under {}", files.len(), root.display());

        let loaded: Vec<_> = files
            .par_iter()
            .map(|file| file.read().and_then(|decl| SectionConfig::load(&file.section, decl)))
            .collect();

        let mut registry = Self::new();
        let mut errors = Vec::new();
        for result in loaded {
            match result.and_then(|section| registry.insert(section)) {
                Ok(()) => {}
                Err(e) => errors.push(e),
            }
        }

        error::collect(errors)?;
        Ok(registry)
    }

    pub fn section(&self, name: &str) -> Result<&SectionConfig, RegistryError> {
        self.sections
            .get(name)
            .ok_or_else(|| RegistryError::UnknownSection(name.to_owned()))
    }

    /// Effective entry for `key` in `section`.
    ///
    /// Never fails for an undeclared key, only for an unknown section.
    pub fn resolve(&self, section: &str, key: &str) -> Result<EffectivePageEntry, RegistryError> {
        Ok(self.section(section)?.resolve(key))
    }

    /// Resolved navigation entries of `section` in declared order.
    ///
    /// Each call returns a fresh iterator.
    pub fn list(
        &self,
        section: &str,
    ) -> Result<impl Iterator<Item = (&RouteKey, EffectivePageEntry)>, RegistryError> {
        Ok(self.section(section)?.list())
    }

    /// Like [`list`](Self::list), without hidden entries.
    pub fn navigation(
        &self,
        section: &str,
    ) -> Result<impl Iterator<Item = (&RouteKey, EffectivePageEntry)>, RegistryError> {
        Ok(self.section(section)?.navigation())
    }

    /// Registered section names, sorted.
    pub fn sections(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.sections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of non-wildcard entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(SectionConfig::len).sum()
    }
}
