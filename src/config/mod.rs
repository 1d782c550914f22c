//! Tool configuration from `tola-meta.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[source]` | Where declarations live and what they're named |
//! | `[output]` | JSON formatting and hidden-entry listing       |
//!
//! # Example
//!
//! ```toml
//! [source]
//! dir = "pages"
//! stem = "_meta"
//!
//! [output]
//! pretty = true
//! hidden = false
//! ```

mod error;
mod util;

pub use error::ConfigError;
pub use util::find_config_file;

use crate::{debug, log};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tola-meta.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Declaration source settings
    pub source: SourceConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// `[source]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Content root searched for declarations (relative to config dir).
    pub dir: PathBuf,

    /// Declaration file stem, e.g. `_meta` for `_meta.json` / `_meta.toml`.
    pub stem: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("pages"),
            stem: "_meta".to_owned(),
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Include hidden entries when listing a section.
    pub hidden: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            hidden: false,
        }
    }
}

impl MetaConfig {
    /// Locate and load the config file.
    ///
    /// Searches upward from cwd. A missing file yields defaults rooted at cwd.
    pub fn discover(config_name: &Path) -> Result<Self, ConfigError> {
        match find_config_file(config_name) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("config"; "{} not found, using defaults", config_name.display());
                let root = std::env::current_dir()
                    .map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;
                Ok(Self {
                    root,
                    ..Self::default()
                })
            }
        }
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Override the content root (e.g. from `--dir`).
    pub fn with_source_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(dir) = dir {
            self.source.dir = dir.to_path_buf();
        }
        self
    }

    /// Absolute content root.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.source.dir)
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }
}

// ============================================================================
// tests
// ============================================================================
