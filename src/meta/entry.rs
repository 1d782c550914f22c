//! Page entries and theme overrides.

use std::ops::Deref;

use serde::Serialize;

use super::JsonMap;
use super::tag::{Display, Layout, PageType, Typesetting};

/// Per-page theme switches.
///
/// Every field is optional. `None` means "inherit from the wildcard entry
/// or the generator default", never "off".
///
/// # Fields
///
/// | Field         | Type          | Description                      |
/// |---------------|---------------|----------------------------------|
/// | `breadcrumb`  | `bool`        | Breadcrumb trail                 |
/// | `footer`      | `bool`        | Page footer                      |
/// | `search`      | `bool`        | In-page search                   |
/// | `typesetting` | `Typesetting` | Typography preset                |
/// | `layout`      | `Layout`      | Content width preset             |
/// | `sidebar`     | `bool`        | Sidebar navigation               |
/// | `toc`         | `bool`        | Table of contents                |
/// | `pagination`  | `bool`        | Previous / next links            |
/// | `navbar`      | `bool`        | Top navigation bar               |
/// | `timestamp`   | `bool`        | Last-updated timestamp           |
/// | `collapsed`   | `bool`        | Sidebar folder starts collapsed  |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typesetting: Option<Typesetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl ThemeOverride {
    /// Recognized field names, in declaration order.
    pub const FIELDS: &'static [&'static str] = &[
        "breadcrumb",
        "footer",
        "search",
        "typesetting",
        "layout",
        "sidebar",
        "toc",
        "pagination",
        "navbar",
        "timestamp",
        "collapsed",
    ];

    /// Shallow merge: fields set on `self` win, unset fields fall back to
    /// `defaults`.
    pub fn merged_over(&self, defaults: &Self) -> Self {
        Self {
            breadcrumb: self.breadcrumb.or(defaults.breadcrumb),
            footer: self.footer.or(defaults.footer),
            search: self.search.or(defaults.search),
            typesetting: self.typesetting.or(defaults.typesetting),
            layout: self.layout.or(defaults.layout),
            sidebar: self.sidebar.or(defaults.sidebar),
            toc: self.toc.or(defaults.toc),
            pagination: self.pagination.or(defaults.pagination),
            navbar: self.navbar.or(defaults.navbar),
            timestamp: self.timestamp.or(defaults.timestamp),
            collapsed: self.collapsed.or(defaults.collapsed),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Metadata declared for one route key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageEntry {
    /// Label shown in navigation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "ThemeOverride::is_empty")]
    pub theme: ThemeOverride,
    /// Fields this crate does not interpret (e.g. `href`), kept verbatim
    /// in declared order.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PageEntry {
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.display.as_ref().is_some_and(Display::is_hidden)
    }
}

/// A [`PageEntry`] with wildcard inheritance applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectivePageEntry(PageEntry);

impl EffectivePageEntry {
    /// Resolve `entry` against the section's wildcard entry.
    ///
    /// Only `theme` inherits; the other fields belong to the page itself.
    pub fn resolve(entry: &PageEntry, wildcard: Option<&PageEntry>) -> Self {
        let theme = match wildcard {
            Some(defaults) => entry.theme.merged_over(&defaults.theme),
            None => entry.theme.clone(),
        };
        Self(PageEntry {
            theme,
            ..entry.clone()
        })
    }

    /// Effective entry of a route the section never declared.
    pub fn fallback(wildcard: Option<&PageEntry>) -> Self {
        Self(wildcard.cloned().unwrap_or_default())
    }

    pub fn into_inner(self) -> PageEntry {
        self.0
    }
}

impl Deref for EffectivePageEntry {
    type Target = PageEntry;

    fn deref(&self) -> &PageEntry {
        &self.0
    }
}

impl From<EffectivePageEntry> for PageEntry {
    fn from(entry: EffectivePageEntry) -> Self {
        entry.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_defaults() -> ThemeOverride {
        ThemeOverride {
            breadcrumb: Some(false),
            footer: Some(false),
            search: Some(false),
            typesetting: Some(Typesetting::Article),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_keeps_own_fields() {
        let own = ThemeOverride {
            footer: Some(true),
            ..Default::default()
        };
        let merged = own.merged_over(&article_defaults());
        assert_eq!(merged.footer, Some(true));
        assert_eq!(merged.breadcrumb, Some(false));
        assert_eq!(merged.typesetting, Some(Typesetting::Article));
        // Unset on both sides stays unset
        assert_eq!(merged.toc, None);
    }

    #[test]
    fn test_merge_is_field_by_field() {
        let own = ThemeOverride {
            typesetting: Some(Typesetting::Default),
            ..Default::default()
        };
        let merged = own.merged_over(&article_defaults());
        assert_eq!(merged.typesetting, Some(Typesetting::Default));
        assert_eq!(merged.search, Some(false));
    }

    #[test]
    fn test_resolve_without_wildcard() {
        let entry = PageEntry {
            title: Some("Intro".into()),
            ..Default::default()
        };
        let effective = EffectivePageEntry::resolve(&entry, None);
        assert_eq!(effective.title.as_deref(), Some("Intro"));
        assert!(effective.theme.is_empty());
    }

    #[test]
    fn test_fallback_copies_wildcard() {
        let wildcard = PageEntry {
            theme: article_defaults(),
            ..Default::default()
        };
        let effective = EffectivePageEntry::fallback(Some(&wildcard));
        assert_eq!(effective.theme, article_defaults());
        assert!(effective.title.is_none());
        assert_eq!(EffectivePageEntry::fallback(None), EffectivePageEntry::default());
    }

    #[test]
    fn test_serialize_skips_unset() {
        let entry = PageEntry {
            title: Some("JavaScript Review".into()),
            kind: Some(PageType::Page),
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"title":"JavaScript Review","type":"page"}"#);
    }
}
