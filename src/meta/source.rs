//! Section declarations: parsing and discovery.
//!
//! A declaration is read into an ordered list of `(key, value)` pairs
//! instead of a map, so declared order survives and duplicate keys reach
//! validation rather than being merged away by the parser. Repeated fields
//! inside an entry are recorded by path for the same reason.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use serde::de::{Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Number, Value as JsonValue};

use super::JsonMap;
use super::error::{self, RegistryError};

/// Section name used for a declaration at the content root.
pub const ROOT_SECTION: &str = ".";

// ============================================================================
// Format
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    pub const ALL: [Self; 2] = [Self::Json, Self::Toml];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Parse declaration text. `origin` names the source in errors.
    pub fn parse(self, text: &str, origin: &str) -> Result<Declaration, RegistryError> {
        let result: Result<Declaration, String> = match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => match toml::from_str(text) {
                Ok(decl) => Ok(decl),
                // The TOML parser refuses repeated keys outright; hand them
                // to validation like any other duplicate.
                Err(e) => match toml_duplicate_key(e.message()) {
                    Some(path) => Ok(Declaration {
                        duplicates: vec![path],
                        ..Declaration::default()
                    }),
                    None => Err(e.message().to_owned()),
                },
            },
        };
        result.map_err(|message| RegistryError::Parse {
            origin: origin.to_owned(),
            format: self,
            message,
        })
    }
}

/// Parse a JSON declaration.
pub fn parse_json(text: &str) -> Result<Declaration, RegistryError> {
    Format::Json.parse(text, "input")
}

/// Parse a TOML declaration.
pub fn parse_toml(text: &str) -> Result<Declaration, RegistryError> {
    Format::Toml.parse(text, "input")
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Declaration
// ============================================================================

/// Raw, unvalidated section declaration in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declaration {
    entries: Vec<(String, JsonValue)>,
    /// Dotted paths of fields declared more than once inside an entry
    /// (e.g. `302.title`), or of a key the TOML parser refused.
    duplicates: Vec<String>,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are kept for validation to reject.
    pub fn push(&mut self, key: impl Into<String>, value: JsonValue) {
        self.entries.push((key.into(), value));
    }

    pub fn with(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.push(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths of repeated fields the parser had to collapse.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

impl FromIterator<(String, JsonValue)> for Declaration {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            duplicates: Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationVisitor;

        impl<'de> Visitor<'de> for DeclarationVisitor {
            type Value = Declaration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of route keys to page entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Declaration, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut duplicates = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value_seed(TrackedValue {
                        path: key.clone(),
                        duplicates: &mut duplicates,
                    })?;
                    entries.push((key, value));
                }
                Ok(Declaration {
                    entries,
                    duplicates,
                })
            }
        }

        deserializer.deserialize_map(DeclarationVisitor)
    }
}

/// Deserializes any value into a [`JsonValue`], recording the path of every
/// repeated map key before the later value replaces the earlier one.
struct TrackedValue<'a> {
    path: String,
    duplicates: &'a mut Vec<String>,
}

impl TrackedValue<'_> {
    fn child(&mut self, name: &str) -> TrackedValue<'_> {
        TrackedValue {
            path: format!("{}.{name}", self.path),
            duplicates: &mut *self.duplicates,
        }
    }
}

impl<'de> DeserializeSeed<'de> for TrackedValue<'_> {
    type Value = JsonValue;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TrackedValue<'_> {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<JsonValue, E> {
        Ok(JsonValue::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<JsonValue, E> {
        Ok(Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(mut self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.child(&items.len().to_string()))? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut map: A) -> Result<JsonValue, A::Error> {
        let mut fields = JsonMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(self.child(&key))?;
            if fields.insert(key.clone(), value).is_some() {
                self.duplicates.push(format!("{}.{key}", self.path));
            }
        }
        Ok(JsonValue::Object(fields))
    }
}

/// Dotted path of the key named in a TOML duplicate-key error.
///
/// The parser reports ``duplicate key `title` in table `302` `` or
/// ``duplicate key `"*"` in document root``; the key keeps its quotes, the
/// table path does not.
fn toml_duplicate_key(message: &str) -> Option<String> {
    const MARKER: &str = "duplicate key `";
    let rest = &message[message.find(MARKER)? + MARKER.len()..];
    let end = rest.find('`')?;
    let key = rest[..end].trim_matches(|c| c == '"' || c == '\'');

    let table = rest[end + 1..]
        .strip_prefix(" in table `")
        .and_then(|t| t.split('`').next());
    Some(match table {
        Some(table) => format!("{table}.{key}"),
        None => key.to_owned(),
    })
}

// ============================================================================
// Discovery
// ============================================================================

/// A declaration file found under a content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFile {
    /// Directory relative to the root, `/`-separated.
    pub section: String,
    pub path: PathBuf,
    pub format: Format,
}

impl DeclarationFile {
    pub fn read(&self) -> Result<Declaration, RegistryError> {
        let text =
            fs::read_to_string(&self.path).map_err(|e| RegistryError::Io(self.path.clone(), e))?;
        self.format.parse(&text, &format!("`{}`", self.path.display()))
    }
}

/// Find every `<stem>.json` / `<stem>.toml` below `root`, sorted by section.
///
/// A directory holding both formats is a [`RegistryError::Conflict`]. A
/// directory that cannot be read is a [`RegistryError::Io`].
pub fn discover(root: &Path, stem: &str) -> Result<Vec<DeclarationFile>, RegistryError> {
    fs::metadata(root).map_err(|e| RegistryError::Io(root.to_path_buf(), e))?;

    let mut walk_errors = Vec::new();
    let mut candidates = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => candidates.push(entry.path()),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                walk_errors.push(RegistryError::Io(path, e.into()));
            }
        }
    }
    error::collect(walk_errors)?;

    let mut found: BTreeMap<String, DeclarationFile> = BTreeMap::new();
    for path in candidates {
        let Some(format) = Format::from_path(&path) else {
            continue;
        };
        if path.file_stem().and_then(|s| s.to_str()) != Some(stem) {
            continue;
        }
        let section = section_name(root, &path);
        let file = DeclarationFile {
            section: section.clone(),
            path,
            format,
        };
        if let Some(first) = found.get(&section) {
            return Err(RegistryError::Conflict {
                section,
                first: first.path.clone(),
                second: file.path,
            });
        }
        found.insert(section, file);
    }

    Ok(found.into_values().collect())
}

/// Parent directory of `path` relative to `root`.
fn section_name(root: &Path, path: &Path) -> String {
    let dir = path
        .parent()
        .and_then(|p| p.strip_prefix(root).ok())
        .unwrap_or(Path::new(""));
    let parts: Vec<_> = dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        ROOT_SECTION.to_owned()
    } else {
        parts.join("/")
    }
}
