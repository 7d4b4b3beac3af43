//! Error types for the config validator
//!
//! Only failures that make an input unusable live here. Problems found while
//! matching a document against a schema are reported as
//! [`Diagnostic`](crate::report::Diagnostic)s and never surface as errors.

use std::fmt;

use thiserror::Error;

use crate::format::Format;

/// A configuration document could not be turned into a value tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Format the document was parsed as
    pub format: Format,
    /// Parser message
    pub message: String,
    /// 1-based line of the failure, when the parser knows it
    pub line: Option<usize>,
}

impl ParseError {
    /// Create a parse error without location information
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a 1-based line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "invalid {} (line {}): {}", self.format, line, self.message),
            None => write!(f, "invalid {}: {}", self.format, self.message),
        }
    }
}

/// The schema document is not a usable schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// What is wrong
    pub message: String,
    /// Dotted location inside the schema document (e.g. `properties.port.type`)
    pub path: Option<String>,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Create a schema error located at `path`; an empty path means the root
    pub fn at(path: &[String], message: impl Into<String>) -> Self {
        let path = if path.is_empty() {
            None
        } else {
            Some(path.join("."))
        };
        Self {
            message: message.into(),
            path,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "invalid schema at '{}': {}", path, self.message),
            None => write!(f, "invalid schema: {}", self.message),
        }
    }
}

/// Main error type for fallible validator operations
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// File extension does not map to a supported format
    #[error("Unsupported config format '{0}'. Supported formats: .ini, .json, .toml")]
    UnsupportedFormat(String),

    /// Configuration parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Schema-related error
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ValidatorError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ValidatorError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        ValidatorError::FileError(msg.into())
    }

    /// Check if this error was caused by the caller's inputs (vs the environment)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ValidatorError::FileError(_))
    }
}

impl From<std::io::Error> for ValidatorError {
    fn from(err: std::io::Error) -> Self {
        ValidatorError::FileError(err.to_string())
    }
}

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(Format::Ini, "missing section header").at_line(3);
        assert_eq!(err.to_string(), "invalid INI (line 3): missing section header");

        let err = ParseError::new(Format::Json, "unexpected end of input");
        assert_eq!(err.to_string(), "invalid JSON: unexpected end of input");
    }

    #[test]
    fn test_schema_error_path() {
        let path = vec!["properties".to_string(), "port".to_string(), "type".to_string()];
        let err = SchemaError::at(&path, "unknown type 'int'");
        assert_eq!(err.path.as_deref(), Some("properties.port.type"));
        assert_eq!(
            err.to_string(),
            "invalid schema at 'properties.port.type': unknown type 'int'"
        );

        let err = SchemaError::at(&[], "schema must be an object");
        assert_eq!(err.path, None);
    }

    #[test]
    fn test_is_user_error() {
        assert!(ValidatorError::invalid_input("bad glob").is_user_error());
        assert!(ValidatorError::from(SchemaError::new("x")).is_user_error());
        assert!(!ValidatorError::file_error("permission denied").is_user_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ValidatorError = io.into();
        assert!(matches!(err, ValidatorError::FileError(_)));
    }
}
