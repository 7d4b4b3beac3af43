//! CLI module for the config validator
//!
//! Argument parsing, the validate command, result rendering and the
//! exit-code contract CI pipelines rely on.

pub mod commands;
pub mod output;

pub use commands::ValidateCli;
pub use output::{OutputFormat, RunOutput};

use std::io;

use config_validator_core::ValidatorError;
use thiserror::Error;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every file passed (warnings allowed)
    Success = 0,
    /// At least one file failed
    ValidationFailed = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// The schema could not be loaded
    SchemaError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from the overall gate result
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            ExitCode::Success
        } else {
            ExitCode::ValidationFailed
        }
    }
}

/// Errors that stop the CLI before a report can be rendered
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments (bad glob, empty match)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error raised by the validator library
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// Results could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Results could not be written
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }

    /// Exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidInput(_) => ExitCode::InvalidInput,
            CliError::Validator(ValidatorError::Schema(_)) => ExitCode::SchemaError,
            CliError::Validator(ValidatorError::FileError(_)) => ExitCode::FileError,
            CliError::Validator(_) => ExitCode::InvalidInput,
            CliError::Serialization(_) | CliError::Output(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments, writing results to stdout
pub fn run(cli: ValidateCli) -> Result<ExitCode, CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute_validate(&cli, &mut out)
}
