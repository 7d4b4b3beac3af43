//! Config Validator binary
//!
//! # Exit Codes
//!
//! - 0: every file passed (warnings allowed)
//! - 1: at least one file failed
//! - 3: invalid input or arguments
//! - 4: schema file not found or unreadable
//! - 5: invalid schema
//! - 10: internal error

use clap::Parser;
use config_validator_cli::{run_cli, ValidateCli};
use tracing::Level;

fn main() {
    let cli = ValidateCli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    // Logs go to stderr so stdout stays parseable in json/yaml mode
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
