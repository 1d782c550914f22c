//! List and resolve command implementations.
//!
//! Both print JSON to stdout: `list` an array of `{route, ...entry}`
//! objects in navigation order, `resolve` a single entry object.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::MetaConfig;
use crate::meta::{EffectivePageEntry, Registry, RouteKey};

/// One resolved route in `list` output
#[derive(Debug, Serialize)]
pub struct RouteResult<'a> {
    pub route: &'a RouteKey,
    #[serde(flatten)]
    pub entry: EffectivePageEntry,
}

/// Load the registry described by `config`.
pub fn load_registry(config: &MetaConfig) -> Result<Registry> {
    let root = config.source_dir();
    Registry::load_dir(&root, &config.source.stem)
        .with_context(|| format!("failed to load page metadata under {}", root.display()))
}

/// Execute list command
pub fn run_list(config: &MetaConfig, section: &str, all: bool) -> Result<()> {
    let registry = load_registry(config)?;
    let json = list_json(&registry, section, all || config.output.hidden, config.output.pretty)?;
    write_stdout(&json)
}

/// Execute resolve command
pub fn run_resolve(config: &MetaConfig, section: &str, route: &str) -> Result<()> {
    let registry = load_registry(config)?;
    let entry = registry.resolve(section, route)?;
    write_stdout(&to_json(&entry, config.output.pretty)?)
}

fn list_json(registry: &Registry, section: &str, hidden: bool, pretty: bool) -> Result<String> {
    let results: Vec<_> = if hidden {
        registry
            .list(section)?
            .map(|(route, entry)| RouteResult { route, entry })
            .collect()
    } else {
        registry
            .navigation(section)?
            .map(|(route, entry)| RouteResult { route, entry })
            .collect()
    };
    to_json(&results, pretty)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn write_stdout(json: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write output")?;
    Ok(())
}
