//! CLI command definition for the config validator
//!
//! Provides the Clap-based argument model and the validate command that
//! loads the schema, checks every requested file and renders the results.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use config_validator_core::{load_schema_file, Severity, Suite, ValidatorOptions};

use super::output::{OutputFormat, RunOutput};
use super::{CliError, ExitCode};

/// Config Validator
///
/// Validate configuration files across JSON, TOML, and INI formats against a
/// JSON schema subset.
#[derive(Parser, Debug, Clone)]
#[command(name = "config-validator")]
#[command(about = "Validate configuration files across JSON, TOML, and INI formats.", long_about = None)]
#[command(version)]
pub struct ValidateCli {
    /// Configuration files to validate (paths or quoted glob patterns)
    #[arg(required = true, num_args = 1..)]
    pub configs: Vec<String>,

    /// Path to a JSON schema subset describing the expected structure
    ///
    /// Without a schema the files are only checked for being parseable.
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Treat missing files as errors rather than warnings
    #[arg(long, env = "CONFIG_VALIDATOR_STRICT")]
    pub strict: bool,

    /// Report properties not declared in the schema as errors
    #[arg(long, env = "CONFIG_VALIDATOR_STRICT_UNKNOWN")]
    pub strict_unknown: bool,

    /// Output format for validation results
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output verbosity level (-v shows coercions, -vv adds debug logs)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print files that fail the gate
    #[arg(short, long)]
    pub quiet: bool,
}

impl ValidateCli {
    /// Engine options selected by the flags
    pub fn validator_options(&self) -> ValidatorOptions {
        if self.strict_unknown {
            ValidatorOptions::new().with_unknown_property_severity(Severity::Error)
        } else {
            ValidatorOptions::new()
        }
    }
}

/// Execute the validate command, writing the rendered results to `out`
pub fn execute_validate(cli: &ValidateCli, out: &mut dyn Write) -> Result<ExitCode, CliError> {
    let paths = resolve_file_path_patterns(&cli.configs)?;

    let schema = match &cli.schema {
        Some(path) => {
            let schema = load_schema_file(path)?;
            tracing::debug!(schema = %path.display(), "loaded schema");
            Some(schema)
        }
        None => {
            tracing::info!("no schema given, checking files parse");
            None
        }
    };

    let suite = Suite::new(cli.validator_options()).with_strict_missing(cli.strict);
    let reports = suite.validate_files(&paths, schema.as_ref());

    let output = RunOutput::from_reports(&reports, cli.verbose > 0);
    output.render(cli.format, cli.quiet, out)?;
    tracing::info!(
        files = output.file_count,
        failed = output.failed_count,
        "validation finished"
    );

    Ok(ExitCode::from_passed(output.passed))
}

/// Expand glob patterns; literal paths are kept even when they do not exist
///
/// An existing file is taken literally even if its name contains glob
/// metacharacters such as `[`.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, CliError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) && !Path::new(pattern).exists() {
            let entries = glob::glob(pattern).map_err(|e| {
                CliError::invalid_input(format!("invalid glob pattern '{}': {}", pattern, e))
            })?;
            let before = out.len();
            for entry in entries {
                let path = entry.map_err(|e| CliError::invalid_input(e.to_string()))?;
                out.push(path);
            }
            if out.len() == before {
                return Err(CliError::invalid_input(format!(
                    "glob pattern matched no files: {}",
                    pattern
                )));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_arguments() {
        let cli = ValidateCli::try_parse_from([
            "config-validator",
            "app.ini",
            "other.json",
            "--schema",
            "schema.json",
            "--strict",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.configs, vec!["app.ini".to_string(), "other.json".to_string()]);
        assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
        assert!(cli.strict);
        assert!(!cli.strict_unknown);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_is_required() {
        assert!(ValidateCli::try_parse_from(["config-validator"]).is_err());
    }

    #[test]
    fn test_strict_unknown_options() {
        let cli = ValidateCli::try_parse_from(["config-validator", "a.json", "--strict-unknown"]).unwrap();
        assert_eq!(cli.validator_options(), ValidatorOptions::strict());
    }

    #[test]
    fn test_resolve_literal_and_glob() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("c.ini"), "").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let missing = dir.path().join("missing.toml");
        let paths = resolve_file_path_patterns([pattern.as_str(), missing.to_str().unwrap()]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.json"), dir.path().join("b.json"), missing]
        );
    }

    #[test]
    fn test_existing_path_with_brackets_is_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf[prod].ini");
        fs::write(&path, "[s]\nx = 1\n").unwrap();

        let paths = resolve_file_path_patterns([path.to_str().unwrap()]).unwrap();
        assert_eq!(paths, vec![path]);
    }

    #[test]
    fn test_glob_matching_nothing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.toml", dir.path().display());
        let err = resolve_file_path_patterns([pattern]).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }
}
