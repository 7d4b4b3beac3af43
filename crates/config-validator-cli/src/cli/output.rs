//! Output formatting for the config validator CLI
//!
//! Provides structured output in JSON, YAML, and a human-readable table
//! with severity-based coloring.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

use config_validator_core::{format_summary, Diagnostic, FileOutcome, FileReport, Severity};

use super::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Results of one CLI invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// True when every file passed
    pub passed: bool,
    /// Number of files checked
    pub file_count: usize,
    /// Number of files that failed
    pub failed_count: usize,
    /// Errors across all files
    pub error_count: usize,
    /// Warnings across all files
    pub warning_count: usize,
    /// Per-file results, in the order the files were given
    pub files: Vec<FileOutput>,
}

/// Result for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutput {
    pub path: String,
    pub passed: bool,
    /// `checked`, `missing`, `unsupported`, `unreadable` or `parse_failed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// One-line summary, e.g. `Validation FAIL | Errors: 1`
    pub summary: String,
    pub error_count: usize,
    pub warning_count: usize,
    /// File-level problem (missing, unsupported, unparseable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<FindingOutput>,
    pub findings: Vec<FindingOutput>,
    /// Strings accepted as other types (verbose only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coercions: Vec<String>,
}

/// Individual finding output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingOutput {
    /// Severity level
    pub severity: String,
    /// Finding code/identifier
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Path in the configuration where the finding occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Line of a parse failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl RunOutput {
    /// Create output from file reports
    pub fn from_reports(reports: &[FileReport], verbose: bool) -> Self {
        let files: Vec<FileOutput> = reports
            .iter()
            .map(|report| FileOutput::from_report(report, verbose))
            .collect();

        Self {
            passed: files.iter().all(|f| f.passed),
            file_count: files.len(),
            failed_count: files.iter().filter(|f| !f.passed).count(),
            error_count: files.iter().map(|f| f.error_count).sum(),
            warning_count: files.iter().map(|f| f.warning_count).sum(),
            files,
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat, quiet: bool, out: &mut dyn Write) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)
                    .map_err(|e| CliError::Serialization(e.to_string()))?;
                writeln!(out, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)
                    .map_err(|e| CliError::Serialization(e.to_string()))?;
                write!(out, "{}", yaml)?;
            }
            OutputFormat::Table => self.render_table(quiet, out)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Render as human-readable table
    fn render_table(&self, quiet: bool, out: &mut dyn Write) -> Result<(), CliError> {
        if !quiet {
            writeln!(out)?;
            writeln!(out, "{}", "Validation Results".cyan().bold())?;
            writeln!(out, "{}", "=".repeat(60))?;
        }

        for file in &self.files {
            if quiet && file.passed {
                continue;
            }
            file.render_table(out)?;
        }

        if !quiet {
            writeln!(out)?;
            writeln!(out, "{}", "-".repeat(60))?;
            let totals = format!(
                "{} file(s) checked: {} passed, {} failed",
                self.file_count,
                self.file_count - self.failed_count,
                self.failed_count
            );
            if self.passed {
                writeln!(out, "{} {}", "+".green(), totals)?;
            } else {
                writeln!(out, "{} {}", "x".red(), totals.bold())?;
            }
        }
        Ok(())
    }
}

impl FileOutput {
    /// Create from a file report
    pub fn from_report(report: &FileReport, verbose: bool) -> Self {
        let path = report.path.display().to_string();
        let passed = report.passed();

        let (status, format, problem) = match &report.outcome {
            FileOutcome::Missing { strict } => {
                let severity = if *strict { Severity::Error } else { Severity::Warning };
                ("missing", None, Some(FindingOutput::file_problem(report, severity, "F001", None)))
            }
            FileOutcome::Unsupported { .. } => (
                "unsupported",
                None,
                Some(FindingOutput::file_problem(report, Severity::Error, "F002", None)),
            ),
            FileOutcome::Unreadable { .. } => (
                "unreadable",
                None,
                Some(FindingOutput::file_problem(report, Severity::Error, "F003", None)),
            ),
            FileOutcome::ParseFailed { line, .. } => (
                "parse_failed",
                None,
                Some(FindingOutput::file_problem(report, Severity::Error, "F004", *line)),
            ),
            FileOutcome::Checked { format, .. } => ("checked", Some(format.to_string()), None),
        };

        let (findings, coercions, mut error_count, mut warning_count) = match report.report() {
            Some(validation) => (
                validation
                    .diagnostics()
                    .iter()
                    .map(FindingOutput::from_diagnostic)
                    .collect(),
                if verbose {
                    validation.coercions().iter().map(ToString::to_string).collect()
                } else {
                    Vec::new()
                },
                validation.error_count(),
                validation.warning_count(),
            ),
            None => (Vec::new(), Vec::new(), 0, 0),
        };

        if let Some(problem) = &problem {
            if problem.severity == Severity::Error.to_string() {
                error_count += 1;
            } else {
                warning_count += 1;
            }
        }

        let summary = format_summary(passed, error_count, warning_count);

        Self {
            path,
            passed,
            status: status.to_string(),
            format,
            summary,
            error_count,
            warning_count,
            problem,
            findings,
            coercions,
        }
    }

    fn render_table(&self, out: &mut dyn Write) -> Result<(), CliError> {
        let status_icon = if self.passed { "+".green() } else { "x".red() };
        writeln!(out)?;
        writeln!(out, "{} {}", status_icon, self.path.bold())?;
        writeln!(out, "  {}", self.summary)?;

        if let Some(problem) = &self.problem {
            problem.render_table_row(out)?;
        }
        for finding in &self.findings {
            finding.render_table_row(out)?;
        }
        for coercion in &self.coercions {
            writeln!(out, "  {} {}", "~".blue(), coercion.dimmed())?;
        }
        Ok(())
    }
}

impl FindingOutput {
    /// Create from a validation diagnostic
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity.to_string(),
            code: diagnostic.kind.code().to_string(),
            message: diagnostic.message.clone(),
            path: Some(diagnostic.path.to_string()),
            line: None,
        }
    }

    fn file_problem(report: &FileReport, severity: Severity, code: &str, line: Option<usize>) -> Self {
        Self {
            severity: severity.to_string(),
            code: code.to_string(),
            message: report.problem().unwrap_or_default(),
            path: None,
            line,
        }
    }

    /// Render a single finding as a table row
    fn render_table_row(&self, out: &mut dyn Write) -> Result<(), CliError> {
        let label = match self.severity.as_str() {
            "error" => "ERROR".red().bold(),
            "warning" => "WARNING".yellow().bold(),
            _ => self.severity.as_str().normal(),
        };
        writeln!(out, "  {} [{}] {}", label, self.code.dimmed(), self.message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_validator_core::{DocPath, Format, ValidationReport};
    use std::path::PathBuf;

    fn checked(diagnostics: Vec<Diagnostic>) -> FileReport {
        FileReport {
            path: PathBuf::from("app.json"),
            outcome: FileOutcome::Checked {
                format: Format::Json,
                report: ValidationReport::with_diagnostics(diagnostics),
            },
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_file_output_from_checked_report() {
        let report = checked(vec![
            Diagnostic::missing_required(DocPath::root().key("host"), "host"),
            Diagnostic::unknown_property(DocPath::root().key("x"), "x", Severity::Warning),
        ]);
        let output = FileOutput::from_report(&report, false);
        assert!(!output.passed);
        assert_eq!(output.status, "checked");
        assert_eq!(output.format.as_deref(), Some("JSON"));
        assert_eq!(output.error_count, 1);
        assert_eq!(output.warning_count, 1);
        assert_eq!(output.findings[0].code, "E002");
        assert_eq!(output.findings[0].path.as_deref(), Some("$.host"));
        assert_eq!(output.summary, "Validation FAIL | Errors: 1 | Warnings: 1");
    }

    #[test]
    fn test_missing_file_counts_as_warning() {
        let report = FileReport {
            path: PathBuf::from("absent.ini"),
            outcome: FileOutcome::Missing { strict: false },
        };
        let output = FileOutput::from_report(&report, false);
        assert!(output.passed);
        assert_eq!(output.warning_count, 1);
        assert_eq!(output.summary, "Validation PASS | Warnings: 1");
        assert_eq!(
            output.problem.unwrap().message,
            "Config file 'absent.ini' does not exist."
        );
    }

    #[test]
    fn test_run_output_totals() {
        let reports = vec![
            checked(vec![]),
            FileReport {
                path: PathBuf::from("bad.toml"),
                outcome: FileOutcome::ParseFailed {
                    error: "invalid TOML (line 2): expected value".to_string(),
                    line: Some(2),
                },
            },
        ];
        let output = RunOutput::from_reports(&reports, false);
        assert!(!output.passed);
        assert_eq!(output.file_count, 2);
        assert_eq!(output.failed_count, 1);
        assert_eq!(output.error_count, 1);
        assert_eq!(output.files[1].problem.as_ref().and_then(|p| p.line), Some(2));
    }

    #[test]
    fn test_render_json() {
        let output = RunOutput::from_reports(&[checked(vec![])], false);
        let mut buf = Vec::new();
        output.render(OutputFormat::Json, false, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["passed"], true);
        assert_eq!(json["files"][0]["path"], "app.json");
        assert_eq!(json["files"][0]["status"], "checked");
    }

    #[test]
    fn test_render_table_quiet_hides_passing_files() {
        let reports = vec![
            checked(vec![]),
            FileReport {
                path: PathBuf::from("broken.json"),
                outcome: FileOutcome::Unsupported {
                    extension: ".cfg".to_string(),
                },
            },
        ];
        let output = RunOutput::from_reports(&reports, false);
        let mut buf = Vec::new();
        output.render(OutputFormat::Table, true, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("broken.json"));
        assert!(!text.contains("app.json"));
    }
}
