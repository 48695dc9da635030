//! Synthetic population generation.
//!
//! Produces patient profiles with demographically weighted condition and
//! medication co-occurrence. All draws go through the session's choice
//! pipeline so a fixed seed reproduces the full patient list.

mod summary;

pub use summary::CohortSummary;

use crate::models::{PatientProfile, Sex};
use crate::registry::ConditionRegistry;
use crate::sampler::SessionRng;
use log::info;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Probability that an explicitly requested target condition is included
const TARGET_CONDITION_PROBABILITY: f64 = 0.8;
/// Hard cap on any single condition's selection probability
const CONDITION_PROBABILITY_CAP: f64 = 0.9;
/// Multiplier applied per already-present related condition
const COMORBIDITY_BOOST: f64 = 2.0;

/// Age buckets as (min, max, weight); medical populations skew older
const AGE_BUCKETS: [(u32, u32, f64); 4] = [
    (18, 30, 0.15),
    (31, 50, 0.25),
    (51, 70, 0.40),
    (71, 90, 0.20),
];

/// Generates synthetic patients against a condition registry
#[derive(Debug)]
pub struct PopulationSynthesizer<'a> {
    registry: &'a ConditionRegistry,
}

impl<'a> PopulationSynthesizer<'a> {
    /// Create a synthesizer over the given registry
    #[must_use]
    pub const fn new(registry: &'a ConditionRegistry) -> Self {
        Self { registry }
    }

    /// Generate `count` patients, optionally biased toward target conditions
    pub fn generate(
        &self,
        rng: &mut SessionRng,
        count: usize,
        target_conditions: Option<&[String]>,
    ) -> Vec<PatientProfile> {
        (0..count)
            .map(|_| self.generate_one(rng, target_conditions))
            .collect()
    }

    /// Generate a single patient
    pub fn generate_one(
        &self,
        rng: &mut SessionRng,
        target_conditions: Option<&[String]>,
    ) -> PatientProfile {
        let id = format!("P{:08X}", rng.choice.random::<u32>());
        let sex = *[Sex::Male, Sex::Female].choose(&mut rng.choice).unwrap();
        let age = self.sample_age(rng);
        let conditions = self.sample_conditions(rng, age, sex, target_conditions);
        let medications = self.sample_medications(rng, &conditions);

        let mut patient = PatientProfile::new(id, sex, age, conditions);
        patient.medications = medications;
        patient
    }

    /// Generate a disease-distributed cohort: `patients_per_disease` patients
    /// biased to each disease, plus a quarter-sized batch biased to all
    /// diseases jointly, shuffled together.
    pub fn generate_cohort(
        &self,
        rng: &mut SessionRng,
        diseases: &[String],
        patients_per_disease: usize,
    ) -> Vec<PatientProfile> {
        let mut patients = Vec::with_capacity(diseases.len() * patients_per_disease);

        for disease in diseases {
            let targets = std::slice::from_ref(disease);
            patients.extend(self.generate(rng, patients_per_disease, Some(targets)));
        }

        let multi_count = diseases.len() * patients_per_disease / 4;
        patients.extend(self.generate(rng, multi_count, Some(diseases)));

        patients.shuffle(&mut rng.choice);
        info!(
            "Generated cohort of {} patients across {} diseases",
            patients.len(),
            diseases.len()
        );
        patients
    }

    fn sample_age(&self, rng: &mut SessionRng) -> u32 {
        let draw = rng.choice.random::<f64>();
        let mut cumulative = 0.0;
        for (min_age, max_age, weight) in AGE_BUCKETS {
            cumulative += weight;
            if draw <= cumulative {
                return rng.choice.random_range(min_age..=max_age);
            }
        }
        // Unreachable while the bucket weights sum to 1, kept for safety
        rng.choice.random_range(18..=85)
    }

    fn sample_conditions(
        &self,
        rng: &mut SessionRng,
        age: u32,
        sex: Sex,
        target_conditions: Option<&[String]>,
    ) -> Vec<String> {
        let mut conditions: Vec<String> = Vec::new();

        if let Some(targets) = target_conditions {
            for target in targets {
                if self.registry.get(target).is_some()
                    && rng.choice.random::<f64>() < TARGET_CONDITION_PROBABILITY
                {
                    conditions.push(target.clone());
                }
            }
        }

        for profile in self.registry.iter() {
            if conditions.iter().any(|c| c == profile.tag) {
                continue;
            }

            // Each already-present related condition compounds the boost
            let mut interaction = 1.0;
            for existing in &conditions {
                if profile.related_conditions.contains(&existing.as_str()) {
                    interaction *= COMORBIDITY_BOOST;
                }
            }

            let probability = (profile.prevalence
                * profile.age_weight(age)
                * profile.sex_weight(sex)
                * interaction)
                .min(CONDITION_PROBABILITY_CAP);

            if rng.choice.random::<f64>() < probability {
                conditions.push(profile.tag.to_string());
            }
        }

        // A targeted request must yield at least one target
        if let Some(targets) = target_conditions
            && !targets.is_empty()
            && conditions.is_empty()
        {
            conditions.push(targets.choose(&mut rng.choice).unwrap().clone());
        }

        // Age-gated fallback so hardly any patient is condition-free
        if conditions.is_empty() {
            if age > 50 && rng.choice.random::<f64>() < 0.6 {
                conditions.push("hypertension".to_string());
            } else if age > 65 && rng.choice.random::<f64>() < 0.4 {
                conditions.push("diabetes".to_string());
            }
        }

        conditions
    }

    fn sample_medications(&self, rng: &mut SessionRng, conditions: &[String]) -> Vec<String> {
        let mut medications: Vec<String> = Vec::new();

        for condition in conditions {
            let Some(profile) = self.registry.get(condition) else {
                continue;
            };
            if profile.medications.is_empty() {
                continue;
            }
            let count = rng
                .choice
                .random_range(1..=profile.medications.len().min(2));
            let picks: SmallVec<[&str; 2]> =
                rand::seq::index::sample(&mut rng.choice, profile.medications.len(), count)
                    .iter()
                    .map(|i| profile.medications[i])
                    .collect();
            medications.extend(picks.iter().map(|m| (*m).to_string()));
        }

        // Combination regimens replace overlapping individual picks
        for combo in self.registry.combinations() {
            let applies = combo
                .conditions
                .iter()
                .all(|c| conditions.iter().any(|have| have == c));
            if applies {
                medications.retain(|m| !combo.medications.contains(&m.as_str()));
                medications.extend(combo.medications.iter().map(|m| (*m).to_string()));
            }
        }

        let mut seen = FxHashSet::default();
        medications.retain(|m| seen.insert(m.clone()));
        medications
    }
}
