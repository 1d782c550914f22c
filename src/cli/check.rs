//! Check command implementation.

use anyhow::{Result, bail};

use crate::config::MetaConfig;
use crate::log;
use crate::meta::{Registry, RegistryError};

/// Load every declaration and report the outcome.
pub fn run_check(config: &MetaConfig) -> Result<()> {
    let root = config.source_dir();
    match Registry::load_dir(&root, &config.source.stem) {
        Ok(registry) => {
            log!(
                "check";
                "{} ok ({})",
                plural_count(registry.len(), "section"),
                plural_count(registry.entry_count(), "entry")
            );
            Ok(())
        }
        Err(err) => {
            let failed = match &err {
                RegistryError::Multiple(errors) => errors.len(),
                _ => 1,
            };
            log!("error"; "{} failed under {}", plural_count(failed, "section"), root.display());
            eprintln!("{err}");
            bail!("page metadata check failed")
        }
    }
}

/// `3 sections`, `1 entry`, `2 entries`.
pub(crate) fn plural_count(count: usize, noun: &str) -> String {
    match (count, noun.strip_suffix('y')) {
        (1, _) => format!("1 {noun}"),
        (_, Some(stem)) => format!("{count} {stem}ies"),
        (_, None) => format!("{count} {noun}s"),
    }
}
