//! Summary statistics over a generated population.

use crate::models::{PatientProfile, Sex};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Aggregate demographics of a patient list
#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    /// Number of patients summarized
    pub total_patients: usize,
    /// Fraction of male patients, 0-1
    pub male_fraction: f64,
    /// Fraction of female patients, 0-1
    pub female_fraction: f64,
    /// Mean age, one decimal
    pub mean_age: f64,
    /// Youngest and oldest patient ages
    pub age_range: (u32, u32),
    /// Five most frequent conditions with counts
    pub top_conditions: Vec<(String, usize)>,
    /// Number of distinct condition tags observed
    pub distinct_conditions: usize,
    /// Mean conditions per patient, one decimal
    pub mean_conditions_per_patient: f64,
    /// Ten most frequent medications with counts
    pub top_medications: Vec<(String, usize)>,
    /// Number of distinct medications observed
    pub distinct_medications: usize,
    /// Mean medications per patient, one decimal
    pub mean_medications_per_patient: f64,
}

impl CohortSummary {
    /// Summarize a patient list; `None` when the list is empty
    #[must_use]
    pub fn from_patients(patients: &[PatientProfile]) -> Option<Self> {
        if patients.is_empty() {
            return None;
        }
        let total = patients.len();
        let male_count = patients.iter().filter(|p| p.sex == Sex::Male).count();

        let age_sum: u64 = patients.iter().map(|p| u64::from(p.age)).sum();
        let age_min = patients.iter().map(|p| p.age).min().unwrap_or(0);
        let age_max = patients.iter().map(|p| p.age).max().unwrap_or(0);

        let condition_counts = count_tags(patients.iter().flat_map(|p| p.conditions.iter()));
        let medication_counts = count_tags(patients.iter().flat_map(|p| p.medications.iter()));

        let condition_total: usize = patients.iter().map(|p| p.conditions.len()).sum();
        let medication_total: usize = patients.iter().map(|p| p.medications.len()).sum();

        Some(Self {
            total_patients: total,
            male_fraction: male_count as f64 / total as f64,
            female_fraction: (total - male_count) as f64 / total as f64,
            mean_age: round1(age_sum as f64 / total as f64),
            age_range: (age_min, age_max),
            distinct_conditions: condition_counts.len(),
            top_conditions: top_n(&condition_counts, 5),
            mean_conditions_per_patient: round1(condition_total as f64 / total as f64),
            distinct_medications: medication_counts.len(),
            top_medications: top_n(&medication_counts, 10),
            mean_medications_per_patient: round1(medication_total as f64 / total as f64),
        })
    }
}

fn count_tags<'a>(tags: impl Iterator<Item = &'a String>) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    for tag in tags {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// Most frequent entries, count descending, name ascending for stable ties
fn top_n(counts: &FxHashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    counts
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .take(n)
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
