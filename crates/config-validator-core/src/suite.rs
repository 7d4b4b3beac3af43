//! File-level validation
//!
//! Loads configuration files from disk, detects their format from the
//! extension and runs the engine on each. Missing files are tolerated unless
//! `strict_missing` is set. Batches run in parallel on the rayon pool, one
//! independent run per file.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::Validator;
use crate::format::{self, Format};
use crate::options::ValidatorOptions;
use crate::report::ValidationReport;
use crate::schema::SchemaNode;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file does not exist
    Missing { strict: bool },
    /// The extension does not map to a supported format
    Unsupported { extension: String },
    /// The file exists but could not be read
    Unreadable { message: String },
    /// The file could not be parsed
    ParseFailed { error: String, line: Option<usize> },
    /// The file was parsed, and validated when a schema was given
    Checked { format: Format, report: ValidationReport },
}

/// Outcome for a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Whether this file passes the gate
    pub fn passed(&self) -> bool {
        match &self.outcome {
            FileOutcome::Missing { strict } => !strict,
            FileOutcome::Unsupported { .. }
            | FileOutcome::Unreadable { .. }
            | FileOutcome::ParseFailed { .. } => false,
            FileOutcome::Checked { report, .. } => report.passed(),
        }
    }

    /// The validation report, when the file got that far
    pub fn report(&self) -> Option<&ValidationReport> {
        match &self.outcome {
            FileOutcome::Checked { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Human-readable description of a file-level problem, if any
    pub fn problem(&self) -> Option<String> {
        let path = self.path.display();
        match &self.outcome {
            FileOutcome::Missing { .. } => Some(format!("Config file '{}' does not exist.", path)),
            FileOutcome::Unsupported { extension } => Some(format!(
                "Unsupported config format '{}'. Supported formats: {}.",
                extension,
                supported_extensions()
            )),
            FileOutcome::Unreadable { message } => Some(format!("Failed to read '{}': {}", path, message)),
            FileOutcome::ParseFailed { error, .. } => Some(format!("Failed to load config: {}", error)),
            FileOutcome::Checked { .. } => None,
        }
    }
}

fn supported_extensions() -> String {
    Format::ALL
        .iter()
        .map(|f| format!(".{}", f.extension()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates configuration files on disk
#[derive(Debug, Clone, Default)]
pub struct Suite {
    validator: Validator,
    strict_missing: bool,
}

impl Suite {
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            validator: Validator::new(options),
            strict_missing: false,
        }
    }

    /// Treat missing files as errors rather than warnings
    pub fn with_strict_missing(mut self, strict: bool) -> Self {
        self.strict_missing = strict;
        self
    }

    /// Validate one file; without a schema the file is only parsed
    pub fn validate_file(&self, path: &Path, schema: Option<&SchemaNode>) -> FileReport {
        let outcome = self.check(path, schema);
        tracing::debug!(path = %path.display(), ?outcome, "checked config file");
        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    /// Validate many files in parallel; reports come back in input order
    pub fn validate_files(&self, paths: &[PathBuf], schema: Option<&SchemaNode>) -> Vec<FileReport> {
        tracing::info!(files = paths.len(), "validating config files");
        paths
            .par_iter()
            .map(|path| self.validate_file(path, schema))
            .collect()
    }

    fn check(&self, path: &Path, schema: Option<&SchemaNode>) -> FileOutcome {
        if !path.exists() {
            return FileOutcome::Missing {
                strict: self.strict_missing,
            };
        }

        let Some(format) = Format::from_path(path) else {
            let extension = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            return FileOutcome::Unsupported { extension };
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return FileOutcome::Unreadable {
                    message: e.to_string(),
                }
            }
        };

        let value = match format::parse(&bytes, format) {
            Ok(value) => value,
            Err(e) => {
                return FileOutcome::ParseFailed {
                    line: e.line,
                    error: e.to_string(),
                }
            }
        };

        let report = match schema {
            Some(schema) => self.validator.validate(&value, schema),
            None => ValidationReport::new(),
        };
        FileOutcome::Checked { format, report }
    }
}
