//! Registry error types.

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::source::Format;

// ============================================================================
// RegistryError
// ============================================================================

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("section `{section}` failed validation\n{diagnostics}")]
    SchemaViolation {
        section: String,
        diagnostics: Diagnostics,
    },

    #[error("unknown section `{0}`")]
    UnknownSection(String),

    #[error("section `{0}` is already registered")]
    DuplicateSection(String),

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {format} declaration in {origin}: {message}")]
    Parse {
        origin: String,
        format: Format,
        message: String,
    },

    #[error("section `{section}` is declared twice: `{}` and `{}`", .first.display(), .second.display())]
    Conflict {
        section: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{}", join_errors(.0))]
    Multiple(Vec<RegistryError>),
}

impl RegistryError {
    /// Diagnostics carried by a schema violation.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::SchemaViolation { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }
}

/// Fold accumulated errors: none is `Ok`, one is itself, more are `Multiple`.
pub(crate) fn collect(mut errors: Vec<RegistryError>) -> Result<(), RegistryError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(RegistryError::Multiple(errors)),
    }
}

fn join_errors(errors: &[RegistryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// FieldPath
// ============================================================================

/// Dot-separated location of a value inside a section declaration,
/// starting at the route key (e.g. `302.theme.search`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn key(key: &str) -> Self {
        Self(key.to_owned())
    }

    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Diagnostic
// ============================================================================

#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Offending key or field.
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Violations collected while validating one section.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(Diagnostic::new(field, message).with_hint(hint));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Whether any diagnostic points at `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.errors.iter().any(|d| d.field.as_str() == path)
    }

    /// Turn collected errors into a schema violation for `section`.
    pub fn into_result(self, section: &str) -> Result<(), RegistryError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::SchemaViolation {
                section: section.to_owned(),
                diagnostics: self,
            })
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}
