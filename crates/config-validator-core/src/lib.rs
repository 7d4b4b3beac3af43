//! Config Validator Core
//!
//! Checks a configuration document (JSON, TOML or INI) against a schema
//! written in a small, predictable subset of JSON Schema and reports every
//! structural problem with its location.
//!
//! ## Architecture
//!
//! 1. **Value** (`value`): the format-independent tree every parser produces.
//! 2. **Formats** (`format`): JSON, TOML and INI parsers.
//! 3. **Schema** (`schema`): `type`, `required`, `properties`, `items`,
//!    `enum` and `additionalProperties`.
//! 4. **Reconciler** (`reconcile`): lets INI strings satisfy `integer`,
//!    `number` and `boolean` when their text parses as such.
//! 5. **Engine** (`engine`): the recursive matcher.
//! 6. **Report** (`report`): diagnostics, severities and the pass/fail summary.
//! 7. **Suite** (`suite`): file loading and parallel batches.
//!
//! ## Example
//!
//! ```rust
//! use config_validator_core::{format, load_schema, validate, Format};
//!
//! let schema = load_schema(br#"{
//!     "type": "object",
//!     "properties": {
//!         "service": {
//!             "type": "object",
//!             "required": ["port"],
//!             "properties": {"port": {"type": "integer"}}
//!         }
//!     }
//! }"#).unwrap();
//!
//! let config = format::parse(b"[service]\nport=8080\n", Format::Ini).unwrap();
//! let report = validate(&config, &schema);
//! assert!(report.passed());
//! assert!(report.diagnostics().is_empty());
//! ```

pub mod engine;
pub mod error;
pub mod format;
pub mod options;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod suite;
pub mod value;

use std::path::Path;

pub use engine::{validate, Validator};
pub use error::{ParseError, Result, SchemaError, ValidatorError};
pub use format::Format;
pub use options::ValidatorOptions;
pub use reconcile::{reconcile, Reconciliation};
pub use report::{
    format_summary, Coercion, Diagnostic, DiagnosticKind, DocPath, PathSegment, Severity,
    ValidationReport,
};
pub use schema::{load_schema, SchemaNode, SchemaType};
pub use suite::{FileOutcome, FileReport, Suite};
pub use value::{Map, Value};

/// Library version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read and parse a schema file
pub fn load_schema_file(path: &Path) -> Result<SchemaNode> {
    let bytes = std::fs::read(path).map_err(|e| {
        ValidatorError::file_error(format!(
            "Failed to read schema file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(load_schema(&bytes)?)
}

/// Parse `bytes` as `format` and validate the result in one step
pub fn validate_bytes(
    bytes: &[u8],
    format: Format,
    schema: &SchemaNode,
    options: &ValidatorOptions,
) -> Result<ValidationReport> {
    let value = format::parse(bytes, format)?;
    Ok(Validator::new(options.clone()).validate(&value, schema))
}
