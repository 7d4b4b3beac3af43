//! Validator configuration

use serde::{Deserialize, Serialize};

use crate::report::Severity;

/// Options that change how the engine classifies findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ValidatorOptions {
    /// Severity of properties present in a document but not declared in the schema
    pub unknown_property_severity: Severity,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            unknown_property_severity: Severity::Warning,
        }
    }
}

impl ValidatorOptions {
    /// Create options with the default (tolerant) settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Report undeclared properties as errors
    pub fn strict() -> Self {
        Self::default().with_unknown_property_severity(Severity::Error)
    }

    /// Set the severity of undeclared properties
    pub fn with_unknown_property_severity(mut self, severity: Severity) -> Self {
        self.unknown_property_severity = severity;
        self
    }
}
