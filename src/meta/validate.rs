//! Shape checks that turn raw declaration values into typed entries.
//!
//! Each field is deserialized on its own so that a failure can be reported
//! with the exact key and field path, and validation keeps going to collect
//! every problem in the section.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::JsonMap;
use super::entry::{PageEntry, ThemeOverride};
use super::error::{Diagnostics, FieldPath};

/// Validate one entry. Returns `None` if any diagnostic was recorded.
pub fn page_entry(key: &str, value: &JsonValue, diag: &mut Diagnostics) -> Option<PageEntry> {
    let path = FieldPath::key(key);
    let Some(fields) = value.as_object() else {
        diag.error(
            path,
            format!("entry must be a table, found {}", kind_of(value)),
        );
        return None;
    };

    let before = diag.len();
    let mut entry = PageEntry::default();
    let mut extra = JsonMap::new();

    for (name, value) in fields {
        let field = path.field(name);
        match name.as_str() {
            "title" => entry.title = typed(field, value, diag),
            "type" => entry.kind = typed(field, value, diag),
            "display" => entry.display = typed(field, value, diag),
            "theme" => {
                if let Some(theme) = theme(&field, value, diag) {
                    entry.theme = theme;
                }
            }
            _ => {
                extra.insert(name.clone(), value.clone());
            }
        }
    }
    entry.extra = extra;

    (diag.len() == before).then_some(entry)
}

fn theme(path: &FieldPath, value: &JsonValue, diag: &mut Diagnostics) -> Option<ThemeOverride> {
    let Some(fields) = value.as_object() else {
        diag.error(
            path.clone(),
            format!("theme must be a table, found {}", kind_of(value)),
        );
        return None;
    };

    let before = diag.len();
    let mut theme = ThemeOverride::default();

    for (name, value) in fields {
        let field = path.field(name);
        match name.as_str() {
            "breadcrumb" => theme.breadcrumb = typed(field, value, diag),
            "footer" => theme.footer = typed(field, value, diag),
            "search" => theme.search = typed(field, value, diag),
            "typesetting" => theme.typesetting = typed(field, value, diag),
            "layout" => theme.layout = typed(field, value, diag),
            "sidebar" => theme.sidebar = typed(field, value, diag),
            "toc" => theme.toc = typed(field, value, diag),
            "pagination" => theme.pagination = typed(field, value, diag),
            "navbar" => theme.navbar = typed(field, value, diag),
            "timestamp" => theme.timestamp = typed(field, value, diag),
            "collapsed" => theme.collapsed = typed(field, value, diag),
            _ => diag.error_with_hint(
                field,
                "unrecognized theme field",
                format!("known fields: {}", ThemeOverride::FIELDS.join(", ")),
            ),
        }
    }

    (diag.len() == before).then_some(theme)
}

/// Deserialize a single field, recording serde's message on failure.
fn typed<T: DeserializeOwned>(
    path: FieldPath,
    value: &JsonValue,
    diag: &mut Diagnostics,
) -> Option<T> {
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            diag.error(path, e.to_string());
            None
        }
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "a table",
    }
}
