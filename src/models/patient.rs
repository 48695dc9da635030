//! Synthetic patient profile model.
//!
//! A `PatientProfile` is created once by the population synthesizer and
//! consumed read-only by every downstream component. Condition order is
//! significant: the first condition with matching narrative content becomes
//! the primary condition, and field randomization overrides resolve to the
//! first condition in this list that declares one.

use serde::{Deserialize, Serialize};

/// Biological sex category used for demographic weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Lowercase name as used in template modifier tables
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographics and medical history of one synthetic patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Opaque identifier, e.g. `P3F9A01BC`
    pub id: String,
    /// Biological sex
    #[serde(rename = "gender")]
    pub sex: Sex,
    /// Age in whole years
    pub age: u32,
    /// Condition tags in selection order. Tags outside the known condition
    /// vocabulary are tolerated and treated as opaque labels.
    pub conditions: Vec<String>,
    /// Medication names, deduplicated, first-occurrence order
    pub medications: Vec<String>,
}

impl PatientProfile {
    /// Create a patient with no medication history
    #[must_use]
    pub const fn new(id: String, sex: Sex, age: u32, conditions: Vec<String>) -> Self {
        Self {
            id,
            sex,
            age,
            conditions,
            medications: Vec::new(),
        }
    }

    /// Whether the patient carries the given condition tag
    #[must_use]
    pub fn has_condition(&self, tag: &str) -> bool {
        self.conditions.iter().any(|c| c == tag)
    }
}
