//! A validated section: route keys mapped to page entries in declared order.

use rustc_hash::FxHashMap;

use super::entry::{EffectivePageEntry, PageEntry};
use super::error::{Diagnostics, FieldPath, RegistryError};
use super::key::RouteKey;
use super::source::Declaration;
use super::validate;

/// One section's page metadata.
///
/// Built once by [`SectionConfig::load`] and immutable afterwards.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    name: String,
    wildcard: Option<PageEntry>,
    /// Non-wildcard entries in declared order.
    entries: Vec<(RouteKey, PageEntry)>,
    index: FxHashMap<RouteKey, usize>,
}

impl SectionConfig {
    /// Validate `declaration` as section `name`.
    ///
    /// Every problem in the declaration is collected before failing; on
    /// failure no part of the section is returned.
    pub fn load(name: impl Into<String>, declaration: Declaration) -> Result<Self, RegistryError> {
        let name = name.into();
        let mut diag = Diagnostics::new();
        let mut wildcard = None;
        let mut wildcard_seen = false;
        let mut entries = Vec::with_capacity(declaration.len());
        let mut index = FxHashMap::default();

        for (key, value) in declaration.iter() {
            if key.is_empty() {
                diag.error(FieldPath::key(key), "route key must not be empty");
                continue;
            }

            let route = RouteKey::new(key);
            let duplicate = if route.is_wildcard() {
                std::mem::replace(&mut wildcard_seen, true)
            } else {
                index.contains_key(key)
            };
            if duplicate {
                duplicate_key(key, &mut diag);
                continue;
            }

            let Some(entry) = validate::page_entry(key, value, &mut diag) else {
                // Mark the key as seen so a later duplicate is still reported
                if !route.is_wildcard() {
                    index.insert(route, usize::MAX);
                }
                continue;
            };

            if route.is_wildcard() {
                wildcard = Some(entry);
            } else {
                index.insert(route.clone(), entries.len());
                entries.push((route, entry));
            }
        }

        for path in declaration.duplicates() {
            if path.contains('.') {
                diag.error_with_hint(
                    FieldPath::key(path),
                    "field is declared more than once",
                    "keep a single declaration of this field",
                );
            } else {
                duplicate_key(path, &mut diag);
            }
        }

        diag.into_result(&name)?;

        Ok(Self {
            name,
            wildcard,
            entries,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `"*"` entry, if declared.
    pub fn wildcard(&self) -> Option<&PageEntry> {
        self.wildcard.as_ref()
    }

    /// Declared entry for `key`, without inheritance.
    pub fn get(&self, key: &str) -> Option<&PageEntry> {
        if key == super::key::WILDCARD {
            return self.wildcard();
        }
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of non-wildcard entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared non-wildcard entries, in order, without inheritance.
    pub fn entries(&self) -> impl Iterator<Item = (&RouteKey, &PageEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    /// Effective entry for `key`.
    ///
    /// An undeclared key resolves to the wildcard's fields, so unknown
    /// routes inherit every default.
    pub fn resolve(&self, key: &str) -> EffectivePageEntry {
        let wildcard = self.wildcard();
        match self.index.get(key) {
            Some(&i) => EffectivePageEntry::resolve(&self.entries[i].1, wildcard),
            None => EffectivePageEntry::fallback(wildcard),
        }
    }

    /// Navigation entries (everything but `"*"` and `"README"`), resolved,
    /// in declared order.
    pub fn list(&self) -> impl Iterator<Item = (&RouteKey, EffectivePageEntry)> {
        let wildcard = self.wildcard();
        self.entries
            .iter()
            .filter(|(key, _)| !key.is_reserved())
            .map(move |(key, entry)| (key, EffectivePageEntry::resolve(entry, wildcard)))
    }

    /// [`list`](Self::list) without entries whose effective display is hidden.
    pub fn navigation(&self) -> impl Iterator<Item = (&RouteKey, EffectivePageEntry)> {
        self.list().filter(|(_, entry)| !entry.is_hidden())
    }
}

fn duplicate_key(key: &str, diag: &mut Diagnostics) {
    let hint = if key == super::key::WILDCARD {
        "a section has at most one wildcard entry"
    } else {
        "merge the two entries into one"
    };
    diag.error_with_hint(FieldPath::key(key), "key is declared more than once", hint);
}
