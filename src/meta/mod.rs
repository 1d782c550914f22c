//! Page metadata: per-section navigation titles, visibility and theme
//! overrides, with wildcard inheritance.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `key`      | `RouteKey` and the reserved `"*"` / `"README"`   |
//! | `tag`      | Open `type` / `display` tags, theme presets      |
//! | `entry`    | `PageEntry`, `ThemeOverride`, effective entries  |
//! | `source`   | Declaration parsing (JSON, TOML) and discovery   |
//! | `validate` | Field shape checks                               |
//! | `section`  | `SectionConfig`: one validated section           |
//! | `registry` | `Registry`: all sections by name                 |
//! | `error`    | `RegistryError` and diagnostics                  |
//!
//! # Example
//!
//! ```
//! use tola_meta::meta::{Registry, parse_json};
//!
//! let decl = parse_json(r#"{
//!     "*": {"theme": {"footer": false, "typesetting": "article"}},
//!     "302": {"title": "Verison Control Primer", "type": "page"},
//!     "README": {"display": "hidden"}
//! }"#)?;
//!
//! let mut registry = Registry::new();
//! registry.load("web", decl)?;
//!
//! let entry = registry.resolve("web", "302")?;
//! assert_eq!(entry.theme.footer, Some(false));
//! # Ok::<(), tola_meta::meta::RegistryError>(())
//! ```

mod entry;
mod error;
mod key;
mod registry;
mod section;
mod source;
mod tag;
mod validate;

#[cfg(test)]
mod tests;

pub use entry::{EffectivePageEntry, PageEntry, ThemeOverride};
pub use error::{Diagnostic, Diagnostics, FieldPath, RegistryError};
pub use key::{README, RouteKey, WILDCARD};
pub use registry::Registry;
pub use section::SectionConfig;
pub use source::{
    Declaration, DeclarationFile, Format, ROOT_SECTION, discover, parse_json, parse_toml,
};
pub use tag::{Display, Layout, PageType, Typesetting};

/// A JSON object map for fields kept verbatim.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
