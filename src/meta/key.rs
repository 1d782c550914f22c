//! Route keys: the identifiers a section indexes its entries under.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Literal key of the wildcard entry.
pub const WILDCARD: &str = "*";

/// Literal key of the section index page.
pub const README: &str = "README";

/// Key of one entry within a section.
///
/// | Key        | Variant    | Meaning                                   |
/// |------------|------------|-------------------------------------------|
/// | `"*"`      | `Wildcard` | Defaults inherited by sibling entries     |
/// | `"README"` | `Readme`   | Section index page, not a navigation item |
/// | `"302"`    | `Page`     | Any other route, usually a page id        |
///
/// Hashing and equality go through [`RouteKey::as_str`], so a
/// `FxHashMap<RouteKey, _>` can be queried with a plain `&str`.
#[derive(Debug, Clone)]
pub enum RouteKey {
    Wildcard,
    Readme,
    Page(String),
}

impl RouteKey {
    pub fn new(key: &str) -> Self {
        match key {
            WILDCARD => Self::Wildcard,
            README => Self::Readme,
            other => Self::Page(other.to_owned()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wildcard => WILDCARD,
            Self::Readme => README,
            Self::Page(key) => key,
        }
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Reserved keys never show up as navigation items.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Self::Page(_))
    }

    /// Numeric page identifier, if the key is one.
    pub fn page_id(&self) -> Option<u64> {
        match self {
            Self::Page(key) => key.parse().ok(),
            _ => None,
        }
    }
}

impl PartialEq for RouteKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RouteKey {}

impl Hash for RouteKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for RouteKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for RouteKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RouteKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_reserved_keys() {
        assert!(RouteKey::new("*").is_wildcard());
        assert!(RouteKey::new("README").is_reserved());
        assert!(!RouteKey::new("302").is_reserved());
        // Case matters: only the exact literal is reserved
        assert!(!RouteKey::new("readme").is_reserved());
    }

    #[test]
    fn test_page_id() {
        assert_eq!(RouteKey::new("302").page_id(), Some(302));
        assert_eq!(RouteKey::new("intro").page_id(), None);
        assert_eq!(RouteKey::Wildcard.page_id(), None);
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = FxHashMap::default();
        map.insert(RouteKey::new("302"), 1);
        map.insert(RouteKey::new("README"), 2);
        assert_eq!(map.get("302"), Some(&1));
        assert_eq!(map.get("README"), Some(&2));
        assert_eq!(map.get("999"), None);
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&RouteKey::new("*")).unwrap();
        assert_eq!(json, r#""*""#);
    }
}
