//! Built-in condition profiles.
//!
//! Prevalences and weight tables approximate US adult outpatient
//! epidemiology. Declared order is load-bearing: the population synthesizer
//! walks profiles in this order when rolling conditions.

use super::{ConditionProfile, MedicationCombination};

pub(super) fn builtin_profiles() -> Vec<ConditionProfile> {
    vec![
        ConditionProfile {
            tag: "diabetes",
            prevalence: 0.11,
            age_weights: &[(18, 30, 0.3), (31, 50, 1.0), (51, 70, 2.5), (71, 100, 3.0)],
            sex_weights: (1.1, 0.9),
            related_conditions: &["hypertension", "heart_disease", "kidney_disease"],
            medications: &["metformin", "insulin", "glipizide", "empagliflozin"],
        },
        ConditionProfile {
            tag: "hypertension",
            prevalence: 0.45,
            age_weights: &[(18, 30, 0.1), (31, 50, 0.8), (51, 70, 2.0), (71, 100, 3.5)],
            sex_weights: (1.2, 0.8),
            related_conditions: &["diabetes", "heart_disease", "stroke"],
            medications: &[
                "lisinopril",
                "amlodipine",
                "hydrochlorothiazide",
                "metoprolol",
            ],
        },
        ConditionProfile {
            tag: "asthma",
            prevalence: 0.08,
            age_weights: &[(18, 30, 1.5), (31, 50, 1.0), (51, 70, 0.8), (71, 100, 0.6)],
            sex_weights: (0.8, 1.2),
            related_conditions: &["copd", "allergies"],
            medications: &["albuterol", "fluticasone", "montelukast", "budesonide"],
        },
        ConditionProfile {
            tag: "copd",
            prevalence: 0.06,
            age_weights: &[(18, 30, 0.1), (31, 50, 0.3), (51, 70, 1.5), (71, 100, 3.0)],
            sex_weights: (1.1, 0.9),
            related_conditions: &["asthma", "heart_disease"],
            medications: &["tiotropium", "salmeterol", "prednisone", "oxygen"],
        },
        ConditionProfile {
            tag: "heart_disease",
            prevalence: 0.065,
            age_weights: &[(18, 30, 0.1), (31, 50, 0.5), (51, 70, 2.0), (71, 100, 4.0)],
            sex_weights: (1.4, 0.6),
            related_conditions: &["diabetes", "hypertension", "stroke"],
            medications: &["atorvastatin", "clopidogrel", "metoprolol", "aspirin"],
        },
        ConditionProfile {
            tag: "obesity",
            prevalence: 0.36,
            age_weights: &[(18, 30, 0.8), (31, 50, 1.2), (51, 70, 1.3), (71, 100, 1.0)],
            sex_weights: (0.9, 1.1),
            related_conditions: &["diabetes", "hypertension", "heart_disease"],
            medications: &["orlistat", "phentermine", "liraglutide"],
        },
        ConditionProfile {
            tag: "colon_cancer",
            prevalence: 0.05,
            age_weights: &[(18, 30, 0.1), (31, 50, 0.5), (51, 70, 2.0), (71, 100, 3.5)],
            sex_weights: (1.1, 0.9),
            related_conditions: &["obesity", "diabetes"],
            medications: &[
                "5-fluorouracil",
                "oxaliplatin",
                "irinotecan",
                "bevacizumab",
                "cetuximab",
            ],
        },
    ]
}

pub(super) fn builtin_combinations() -> Vec<MedicationCombination> {
    vec![
        MedicationCombination {
            conditions: &["diabetes", "hypertension"],
            medications: &["metformin", "lisinopril"],
        },
        MedicationCombination {
            conditions: &["diabetes", "heart_disease"],
            medications: &["metformin", "atorvastatin", "aspirin"],
        },
        MedicationCombination {
            conditions: &["hypertension", "heart_disease"],
            medications: &["lisinopril", "metoprolol", "atorvastatin"],
        },
        MedicationCombination {
            conditions: &["asthma", "copd"],
            medications: &["albuterol", "tiotropium", "fluticasone"],
        },
    ]
}
