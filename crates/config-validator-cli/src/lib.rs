//! Config Validator CLI
//!
//! Command-line front end for `config-validator-core`. Validates one or more
//! JSON, TOML or INI files against a schema and exits with a code CI
//! pipelines can gate on.
//!
//! ## Usage
//!
//! ```bash
//! # Validate an INI file against a schema
//! config-validator app.ini --schema schema.json
//!
//! # Validate every TOML file in a directory, machine-readable output
//! config-validator 'config/*.toml' --schema schema.json --format json
//!
//! # Fail on missing files and undeclared keys
//! config-validator app.json --schema schema.json --strict --strict-unknown
//! ```

pub mod cli;

pub use cli::{ExitCode, CliError, OutputFormat, RunOutput, ValidateCli};

/// Binary version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI with the given arguments
///
/// Errors that stop the run before results are rendered are printed to
/// stderr and mapped to their exit code.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use config_validator_cli::{run_cli, ValidateCli};
///
/// fn main() {
///     let cli = ValidateCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: ValidateCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
