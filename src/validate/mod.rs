//! Document validation seam.
//!
//! Generation only depends on the [`DocumentValidator`] trait; concrete
//! validators (rule-based, external review services) plug in behind it.

use crate::models::{GeneratedDocument, PatientProfile};
use serde::Serialize;

/// Severity of a single validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
    /// A document with any critical issue is rejected outright
    Critical,
}

/// One finding from a validation pass
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    /// Which check produced the finding
    pub category: String,
    pub message: String,
    /// Dotted path to the offending field, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Outcome of validating one document against its patient
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// True when no error- or critical-severity issues were found
    pub is_valid: bool,
    /// Overall quality score, 0 to 100
    pub overall_score: f64,
    /// Medical plausibility score, 0 to 100
    pub medical_accuracy_score: f64,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// A passing report with no findings
    #[must_use]
    pub const fn passing() -> Self {
        Self {
            is_valid: true,
            overall_score: 100.0,
            medical_accuracy_score: 100.0,
            issues: Vec::new(),
        }
    }

    /// Whether any finding is critical
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Critical)
    }
}

/// Validates a generated document against the patient it was written for.
///
/// Implementations may call out to external services, so failures are
/// reported through `anyhow` rather than the generation error type; the
/// batch driver logs them and keeps the document.
pub trait DocumentValidator {
    fn validate(
        &self,
        document: &GeneratedDocument,
        patient: &PatientProfile,
    ) -> anyhow::Result<ValidationReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_issue_is_detected() {
        let mut report = ValidationReport::passing();
        assert!(!report.has_critical());

        report.issues.push(ValidationIssue {
            severity: IssueSeverity::Critical,
            category: "value_ranges".into(),
            message: "heart rate of 400 bpm is not survivable".into(),
            field: Some("vital_signs.heart_rate".into()),
        });
        assert!(report.has_critical());
    }

    #[test]
    fn severities_order_by_weight() {
        assert!(IssueSeverity::Critical > IssueSeverity::Error);
        assert!(IssueSeverity::Error > IssueSeverity::Warning);
        assert!(IssueSeverity::Warning > IssueSeverity::Info);
    }
}
