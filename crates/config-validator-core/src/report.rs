//! Diagnostics and the validation report

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::schema::SchemaType;
use crate::value::Value;

/// One step from a parent node to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node, from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocPath(Vec<PathSegment>);

impl DocPath {
    /// The document root (`$`)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Child path for an object key
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Child path for an array index
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// True when `self` lies strictly below `ancestor`
    pub fn is_descendant_of(&self, ancestor: &DocPath) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

impl<S: Into<String>> FromIterator<S> for DocPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| PathSegment::Key(s.into())).collect())
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => write!(f, ".{}", key)?,
                PathSegment::Key(key) => write!(f, "[{:?}]", key)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

/// Paths serialize as their rendered form so machine output stays readable
impl Serialize for DocPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the gate
    Error,
    /// Reported, never fails the gate
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of problem a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    TypeMismatch,
    MissingRequiredProperty,
    UnknownProperty,
    DisallowedProperty,
    EnumMismatch,
}

impl DiagnosticKind {
    /// Stable short code shown next to each finding
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::TypeMismatch => "E001",
            DiagnosticKind::MissingRequiredProperty => "E002",
            DiagnosticKind::EnumMismatch => "E003",
            DiagnosticKind::DisallowedProperty => "E004",
            DiagnosticKind::UnknownProperty => "W001",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::TypeMismatch => "type mismatch",
            DiagnosticKind::MissingRequiredProperty => "missing required property",
            DiagnosticKind::UnknownProperty => "unknown property",
            DiagnosticKind::DisallowedProperty => "disallowed property",
            DiagnosticKind::EnumMismatch => "value not allowed",
        };
        f.write_str(name)
    }
}

/// A single reported issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub path: DocPath,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn type_mismatch(path: DocPath, expected: SchemaType, actual: &Value) -> Self {
        let message = format!(
            "{}: expected type '{}' but found {} {}",
            path,
            expected,
            actual.kind(),
            actual
        );
        Self {
            path,
            severity: Severity::Error,
            kind: DiagnosticKind::TypeMismatch,
            message,
        }
    }

    pub fn missing_required(path: DocPath, name: &str) -> Self {
        let message = format!("{}: missing required property '{}'", path, name);
        Self {
            path,
            severity: Severity::Error,
            kind: DiagnosticKind::MissingRequiredProperty,
            message,
        }
    }

    pub fn unknown_property(path: DocPath, name: &str, severity: Severity) -> Self {
        let message = format!("{}: property '{}' is not declared in the schema", path, name);
        Self {
            path,
            severity,
            kind: DiagnosticKind::UnknownProperty,
            message,
        }
    }

    pub fn disallowed_property(path: DocPath, name: &str) -> Self {
        let message = format!(
            "{}: property '{}' is not allowed (additionalProperties is false)",
            path, name
        );
        Self {
            path,
            severity: Severity::Error,
            kind: DiagnosticKind::DisallowedProperty,
            message,
        }
    }

    pub fn enum_mismatch(path: DocPath, actual: &Value, allowed: &[Value]) -> Self {
        let allowed: Vec<String> = allowed.iter().map(Value::to_string).collect();
        let message = format!(
            "{}: value {} is not one of [{}]",
            path,
            actual,
            allowed.join(", ")
        );
        Self {
            path,
            severity: Severity::Error,
            kind: DiagnosticKind::EnumMismatch,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A string leaf that was accepted as another type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coercion {
    pub path: DocPath,
    pub text: String,
    pub target: SchemaType,
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?} accepted as {}", self.path, self.text, self.target)
    }
}

/// Ordered result of one validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
    coercions: Vec<Coercion>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report from diagnostics collected elsewhere
    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            coercions: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn record_coercion(&mut self, coercion: Coercion) {
        self.coercions.push(coercion);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    /// True iff no error-severity diagnostic exists
    pub fn passed(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// One-line summary, e.g. `Validation FAIL | Errors: 2 | Warnings: 1`
    pub fn summary(&self) -> String {
        format_summary(self.passed(), self.error_count(), self.warning_count())
    }
}

/// `Validation PASS | Errors: n | Warnings: m`, omitting zero counts
pub fn format_summary(passed: bool, errors: usize, warnings: usize) -> String {
    let status = if passed { "PASS" } else { "FAIL" };
    let mut parts = vec![format!("Validation {}", status)];
    if errors > 0 {
        parts.push(format!("Errors: {}", errors));
    }
    if warnings > 0 {
        parts.push(format!("Warnings: {}", warnings));
    }
    parts.join(" | ")
}
