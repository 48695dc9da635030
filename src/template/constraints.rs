//! Patient eligibility checks against a template's constraints.

use crate::models::PatientProfile;
use crate::template::TemplateConstraints;

/// Outcome of a constraint check
#[derive(Debug, Clone, Default)]
pub struct ConstraintReport {
    /// Fatal violations; any entry makes the pairing invalid
    pub errors: Vec<String>,
    /// Non-fatal observations
    pub warnings: Vec<String>,
}

impl ConstraintReport {
    /// True iff no errors were recorded
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks patients against template eligibility constraints
#[derive(Debug)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    /// Validate a patient against a constraint set
    #[must_use]
    pub fn validate(constraints: &TemplateConstraints, patient: &PatientProfile) -> ConstraintReport {
        let mut report = ConstraintReport::default();

        if let Some((min_age, max_age)) = constraints.age_range
            && !(min_age..=max_age).contains(&patient.age)
        {
            report.errors.push(format!(
                "patient age {} outside template range [{min_age}, {max_age}]",
                patient.age
            ));
        }

        for condition in &constraints.required_conditions {
            if !patient.has_condition(condition) {
                report.errors.push(format!(
                    "required condition '{condition}' not found in patient"
                ));
            }
        }

        if !constraints.conditions_relevant.is_empty() {
            let has_relevant = constraints
                .conditions_relevant
                .iter()
                .any(|c| patient.has_condition(c));
            if !has_relevant {
                report.warnings.push(format!(
                    "patient has none of the relevant conditions: {}",
                    constraints.conditions_relevant.join(", ")
                ));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    fn patient(age: u32, conditions: &[&str]) -> PatientProfile {
        PatientProfile::new(
            "P00000001".into(),
            Sex::Female,
            age,
            conditions.iter().map(|c| (*c).to_string()).collect(),
        )
    }

    #[test]
    fn age_outside_range_is_an_error() {
        let constraints = TemplateConstraints {
            age_range: Some((18, 99)),
            ..TemplateConstraints::default()
        };
        let report = ConstraintValidator::validate(&constraints, &patient(10, &[]));
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn missing_required_condition_is_an_error_per_condition() {
        let constraints = TemplateConstraints {
            required_conditions: vec!["diabetes".into(), "hypertension".into()],
            ..TemplateConstraints::default()
        };
        let report = ConstraintValidator::validate(&constraints, &patient(50, &["diabetes"]));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("hypertension"));
    }

    #[test]
    fn no_relevant_condition_is_only_a_warning() {
        let constraints = TemplateConstraints {
            conditions_relevant: vec!["asthma".into(), "copd".into()],
            ..TemplateConstraints::default()
        };
        let report = ConstraintValidator::validate(&constraints, &patient(50, &["diabetes"]));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
