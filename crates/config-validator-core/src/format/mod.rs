//! Format parsers
//!
//! Each parser turns raw bytes into the canonical [`Value`] tree or fails
//! with a [`ParseError`]. JSON and TOML keep the types their grammar carries;
//! INI has no typed values, so every INI leaf is a string.

mod ini;
mod json;
mod toml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidatorError};
use crate::value::Value;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
    Ini,
}

impl Format {
    /// All supported formats, in the order they are listed to users
    pub const ALL: [Format; 3] = [Format::Ini, Format::Json, Format::Toml];

    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "ini" => Some(Format::Ini),
            _ => None,
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Ini => "ini",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Toml => write!(f, "TOML"),
            Format::Ini => write!(f, "INI"),
        }
    }
}

impl FromStr for Format {
    type Err = ValidatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            "ini" => Ok(Format::Ini),
            _ => Err(ValidatorError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Parse `bytes` as `format` into a value tree
pub fn parse(bytes: &[u8], format: Format) -> Result<Value, ParseError> {
    match format {
        Format::Json => json::parse(bytes),
        Format::Toml => toml::parse(utf8(bytes, format)?),
        Format::Ini => ini::parse(utf8(bytes, format)?),
    }
}

fn utf8(bytes: &[u8], format: Format) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes)
        .map_err(|e| ParseError::new(format, format!("input is not valid UTF-8: {}", e)))
}

/// 1-based line containing byte `offset` of `source`
pub(crate) fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
