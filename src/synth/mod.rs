//! Statistical field-value synthesis.
//!
//! Each synthesizable field declares a distribution with base parameters and
//! optional sex, age, and condition overrides. The resolved parameters are
//! sampled on the session's sampling pipeline, clipped to the declared
//! critical bounds, and rounded according to the spec's numeric type hint.

use crate::config::RandomizationLevel;
use crate::models::PatientProfile;
use crate::sampler::SessionRng;
use crate::template::{Distribution, FieldNode, FieldRandomization, TemplateNode};
use rand::Rng;
use rand_distr::{Distribution as _, LogNormal, Normal};
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Age at and above which the `elderly` override applies
const ELDERLY_AGE: u32 = 65;
/// Age at and below which the `young` override applies
const YOUNG_AGE: u32 = 30;

/// Generates field values from randomization specs
#[derive(Debug, Clone, Copy)]
pub struct ValueSynthesizer {
    multiplier: f64,
}

impl ValueSynthesizer {
    /// Create a synthesizer for the given randomization level
    #[must_use]
    pub const fn new(level: RandomizationLevel) -> Self {
        Self {
            multiplier: level.std_multiplier(),
        }
    }

    /// The std multiplier in effect
    #[must_use]
    pub const fn std_multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Resolve mean and std for a patient: base, then sex override, then one
    /// of elderly/young, then the first patient condition with an override.
    /// Every std term is scaled by the level multiplier.
    #[must_use]
    pub fn resolve_parameters(
        &self,
        spec: &FieldRandomization,
        patient: &PatientProfile,
    ) -> (f64, f64) {
        let mut mean = spec.mean;
        let mut std = spec.std * self.multiplier;

        if let Some(modifier) = spec.sex_modifier(patient.sex) {
            if let Some(m) = modifier.mean {
                mean = m;
            }
            if let Some(s) = modifier.std {
                std = s * self.multiplier;
            }
        }

        let age_modifier = if patient.age >= ELDERLY_AGE {
            spec.elderly
        } else if patient.age <= YOUNG_AGE {
            spec.young
        } else {
            None
        };
        if let Some(modifier) = age_modifier {
            if let Some(m) = modifier.mean {
                mean = m;
            }
            if let Some(s) = modifier.std {
                std = s * self.multiplier;
            }
        }

        // First matching patient condition wins, then the scan stops
        for condition in &patient.conditions {
            if let Some((_, modifier)) = spec
                .condition_modifiers
                .iter()
                .find(|(tag, _)| tag == condition)
            {
                if let Some(m) = modifier.mean {
                    mean = m;
                }
                if let Some(s) = modifier.std {
                    std = s * self.multiplier;
                }
                break;
            }
        }

        (mean, std)
    }

    /// Synthesize one field value for a patient
    pub fn synthesize(
        &self,
        rng: &mut SessionRng,
        spec: &FieldRandomization,
        patient: &PatientProfile,
    ) -> Value {
        let (mean, std) = self.resolve_parameters(spec, patient);

        let raw = match spec.distribution {
            Distribution::LogNormal if mean > 0.0 => sample_log_normal(rng, mean, std),
            // log_normal with a non-positive mean degrades to normal
            Distribution::LogNormal | Distribution::Normal => sample_normal(rng, mean, std),
        };

        let mut value = raw;
        if let Some(low) = spec.critical_low {
            value = value.max(low);
        }
        if let Some(high) = spec.critical_high {
            value = value.min(high);
        }

        if spec.integer {
            Value::from(value.round() as i64)
        } else {
            let rounded = (value * 100.0).round() / 100.0;
            serde_json::Number::from_f64(rounded).map_or(Value::Null, Value::Number)
        }
    }

    /// Recursive pass over a template's field tree: every `Field` leaf is
    /// synthesized and stored under its key, its placeholder name, and the
    /// `_unit` / `_reference_range` companions when declared.
    pub fn collect_values(
        &self,
        rng: &mut SessionRng,
        node: &TemplateNode,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        match node {
            TemplateNode::Map(children) => {
                for (key, child) in children {
                    if let TemplateNode::Field(field) = child {
                        self.collect_field(rng, key, field, patient, values);
                    } else {
                        self.collect_values(rng, child, patient, values);
                    }
                }
            }
            TemplateNode::Seq(children) => {
                for child in children {
                    self.collect_values(rng, child, patient, values);
                }
            }
            // A field leaf at the tree root has no key to store under; its
            // placeholder entry still makes the value reachable
            TemplateNode::Field(field) => {
                self.collect_field(rng, "", field, patient, values);
            }
            TemplateNode::Scalar(_) => {}
        }
    }

    fn collect_field(
        &self,
        rng: &mut SessionRng,
        key: &str,
        field: &FieldNode,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        let value = self.synthesize(rng, &field.spec, patient);
        if !key.is_empty() {
            values.insert(key.to_string(), value.clone());
        }
        if let Some(placeholder) = &field.placeholder {
            values.insert(placeholder.clone(), value);
            if let Some(unit) = &field.unit {
                values.insert(format!("{placeholder}_unit"), Value::String(unit.clone()));
            }
            if let Some(range) = &field.reference_range {
                values.insert(
                    format!("{placeholder}_reference_range"),
                    Value::String(range.clone()),
                );
            }
        }
    }
}

fn sample_normal(rng: &mut SessionRng, mean: f64, std: f64) -> f64 {
    match Normal::new(mean, std) {
        Ok(normal) => normal.sample(&mut rng.sampling),
        // Degenerate spread yields the mean; a draw is still consumed so the
        // RNG stream stays aligned across fields
        Err(_) => {
            let _ = rng.sampling.random::<f64>();
            mean
        }
    }
}

fn sample_log_normal(rng: &mut SessionRng, mean: f64, std: f64) -> f64 {
    match LogNormal::new(mean.ln(), std / mean) {
        Ok(log_normal) => log_normal.sample(&mut rng.sampling),
        Err(_) => {
            let _ = rng.sampling.random::<f64>();
            mean
        }
    }
}
