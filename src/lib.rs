//! tola-meta - page metadata registry for static sites.
//!
//! Sections declare navigation titles, visibility and theme overrides per
//! route in `_meta.json` / `_meta.toml` files. The registry validates them
//! and resolves each page's effective settings against its section's
//! wildcard (`"*"`) entry.

pub mod cli;
pub mod config;
pub mod logger;
pub mod meta;

pub use meta::{EffectivePageEntry, PageEntry, Registry, RegistryError, SectionConfig};
