//! Static clinical reference data.
//!
//! The condition registry holds one `ConditionProfile` per known disease
//! tag: prevalence, demographic weight tables, related conditions, and
//! associated medications. Loaded once at startup and read-only afterwards.
//! Iteration order over profiles is the declared order, which keeps RNG
//! consumption deterministic across runs.

mod conditions;

use crate::models::Sex;
use rustc_hash::FxHashMap;

/// Epidemiological profile of one known condition
#[derive(Debug, Clone)]
pub struct ConditionProfile {
    /// Condition tag, e.g. `hypertension`
    pub tag: &'static str,
    /// Base population prevalence, 0-1
    pub prevalence: f64,
    /// Non-overlapping inclusive age brackets with probability multipliers
    pub age_weights: &'static [(u32, u32, f64)],
    /// Probability multiplier per sex: (male, female)
    pub sex_weights: (f64, f64),
    /// Tags whose presence boosts this condition's selection probability
    pub related_conditions: &'static [&'static str],
    /// Medications commonly prescribed for this condition
    pub medications: &'static [&'static str],
}

impl ConditionProfile {
    /// Multiplier for the age bracket containing `age`, 1.0 if none matches
    #[must_use]
    pub fn age_weight(&self, age: u32) -> f64 {
        self.age_weights
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&age))
            .map_or(1.0, |(_, _, w)| *w)
    }

    /// Multiplier for the given sex
    #[must_use]
    pub const fn sex_weight(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.sex_weights.0,
            Sex::Female => self.sex_weights.1,
        }
    }
}

/// A canonical medication regimen covering a set of co-occurring conditions
#[derive(Debug, Clone)]
pub struct MedicationCombination {
    /// Conditions that must all be present for the combination to apply
    pub conditions: &'static [&'static str],
    /// Regimen that replaces individually selected overlapping medications
    pub medications: &'static [&'static str],
}

/// Registry of known conditions and combination regimens
#[derive(Debug, Clone)]
pub struct ConditionRegistry {
    profiles: Vec<ConditionProfile>,
    index: FxHashMap<&'static str, usize>,
    combinations: Vec<MedicationCombination>,
}

impl ConditionRegistry {
    /// Build a registry from explicit profiles and combinations
    #[must_use]
    pub fn new(profiles: Vec<ConditionProfile>, combinations: Vec<MedicationCombination>) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.tag, i))
            .collect();
        Self {
            profiles,
            index,
            combinations,
        }
    }

    /// The built-in seven-condition registry
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            conditions::builtin_profiles(),
            conditions::builtin_combinations(),
        )
    }

    /// Look up a profile by tag. Unknown tags yield `None` and are treated
    /// as opaque labels by callers.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&ConditionProfile> {
        self.index.get(tag).map(|&i| &self.profiles[i])
    }

    /// Profiles in declared order
    pub fn iter(&self) -> impl Iterator<Item = &ConditionProfile> {
        self.profiles.iter()
    }

    /// Combination regimens in declared order
    #[must_use]
    pub fn combinations(&self) -> &[MedicationCombination] {
        &self.combinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_resolves_known_tags() {
        let registry = ConditionRegistry::builtin();
        let diabetes = registry.get("diabetes").unwrap();
        assert!((diabetes.prevalence - 0.11).abs() < f64::EPSILON);
        assert!(registry.get("not_a_condition").is_none());
    }

    #[test]
    fn age_weight_picks_matching_bracket() {
        let registry = ConditionRegistry::builtin();
        let hypertension = registry.get("hypertension").unwrap();
        assert!((hypertension.age_weight(25) - 0.1).abs() < f64::EPSILON);
        assert!((hypertension.age_weight(80) - 3.5).abs() < f64::EPSILON);
        // Outside every bracket falls back to neutral
        assert!((hypertension.age_weight(110) - 1.0).abs() < f64::EPSILON);
    }
}
