//! Patient-conditioned narrative content.
//!
//! Fills the values map with everything a letter-style template can
//! reference that is not a synthesized numeric field: identity and contact
//! placeholders, encounter dates, condition narrative (chief complaint,
//! diagnosis, HPI), physical exam findings, vital signs, histories, and the
//! assessment/plan substructure. All draws use the choice pipeline in a
//! fixed key order so seeded runs reproduce exactly.

mod phrases;

use crate::models::{PatientProfile, Sex};
use crate::sampler::SessionRng;
use crate::template::{CategoricalRule, TemplateDefinition};
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Maps known condition tags to past-medical-history phrasing
fn pmh_phrase(tag: &str) -> String {
    match tag {
        "diabetes" => "Type 2 diabetes mellitus".to_string(),
        "hypertension" => "Essential hypertension".to_string(),
        "asthma" => "Asthma".to_string(),
        "copd" => "Chronic obstructive pulmonary disease".to_string(),
        "heart_disease" => "Coronary artery disease".to_string(),
        "obesity" => "Obesity".to_string(),
        "colon_cancer" => "Colon cancer".to_string(),
        // Unknown tags pass through as opaque labels
        other => other.replace('_', " "),
    }
}

/// Maps known condition tags to diagnosis lines with ICD-10 codes
fn diagnosis_label(tag: &str) -> String {
    match tag {
        "diabetes" => "Type 2 Diabetes Mellitus (E11.9)".to_string(),
        "hypertension" => "Essential Hypertension (I10)".to_string(),
        "asthma" => "Asthma, unspecified (J45.9)".to_string(),
        "copd" => "COPD, unspecified (J44.9)".to_string(),
        "heart_disease" => "Coronary artery disease (I25.10)".to_string(),
        "obesity" => "Obesity, unspecified (E66.9)".to_string(),
        "colon_cancer" => "Malignant neoplasm of colon (C18.9)".to_string(),
        other => other.replace('_', " "),
    }
}

fn control_status_options(tag: &str) -> &'static [&'static str] {
    match tag {
        "diabetes" => phrases::CONTROL_STATUS_DIABETES,
        "hypertension" => phrases::CONTROL_STATUS_HYPERTENSION,
        "asthma" => phrases::CONTROL_STATUS_ASTHMA,
        _ => phrases::CONTROL_STATUS_GENERIC,
    }
}

fn symptom_options(tag: &str) -> &'static [&'static str] {
    match tag {
        "diabetes" => phrases::SYMPTOMS_DIABETES,
        "hypertension" => phrases::SYMPTOMS_HYPERTENSION,
        "asthma" => phrases::SYMPTOMS_ASTHMA,
        _ => phrases::SYMPTOMS_GENERIC,
    }
}

/// Composes narrative values for one (patient, template) pairing
#[derive(Debug, Default)]
pub struct NarrativeComposer;

impl NarrativeComposer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fill `values` with narrative content for the patient
    pub fn compose(
        &self,
        rng: &mut SessionRng,
        template: &TemplateDefinition,
        patient: &PatientProfile,
        now: DateTime<Utc>,
        values: &mut FxHashMap<String, Value>,
    ) {
        self.identity_placeholders(&mut rng.choice, patient, now, values);
        self.encounter_placeholders(&mut rng.choice, now, values);
        self.condition_narrative(&mut rng.choice, template, patient, values);
        self.exam_findings(&mut rng.choice, values);
        self.vital_signs(&mut rng.choice, patient, values);
        self.histories(&mut rng.choice, patient, values);
        self.assessment_plan(&mut rng.choice, patient, values);
        self.categorical_rules(&mut rng.choice, &template.randomization_rules, values);
    }

    fn identity_placeholders(
        &self,
        rng: &mut StdRng,
        patient: &PatientProfile,
        now: DateTime<Utc>,
        values: &mut FxHashMap<String, Value>,
    ) {
        let first_name = match patient.sex {
            Sex::Male => choose(rng, phrases::FIRST_NAMES_MALE),
            Sex::Female => choose(rng, phrases::FIRST_NAMES_FEMALE),
        };
        let last_name = choose(rng, phrases::LAST_NAMES);

        let birth_year = now.year() - patient.age as i32;
        let birth_month = rng.random_range(1..=12u32);
        // Day capped at 28 so every month is valid
        let birth_day = rng.random_range(1..=28u32);

        put(values, "patient_id", patient.id.clone());
        put(values, "patient_name", format!("{first_name} {last_name}"));
        put(
            values,
            "patient_dob",
            format!("{birth_month:02}/{birth_day:02}/{birth_year}"),
        );
        put(
            values,
            "patient_mrn",
            format!("MRN{}", rng.random_range(100_000..=999_999)),
        );
        put(values, "patient_phone", phone_number(rng));
        values.insert("patient_age".to_string(), Value::from(patient.age));
        put(values, "patient_gender", patient.sex.to_string());
    }

    fn encounter_placeholders(
        &self,
        rng: &mut StdRng,
        now: DateTime<Utc>,
        values: &mut FxHashMap<String, Value>,
    ) {
        let collection = now - Duration::days(rng.random_range(0..=30));
        let measurement = now - Duration::days(rng.random_range(0..=7));
        let visit = now - Duration::days(rng.random_range(0..=14));

        put(
            values,
            "collection_date",
            collection.format("%Y-%m-%d").to_string(),
        );
        put(
            values,
            "measurement_date",
            measurement.format("%Y-%m-%d").to_string(),
        );
        put(
            values,
            "measurement_time",
            format!(
                "{:02}:{:02}",
                rng.random_range(8..=17),
                rng.random_range(0..=59)
            ),
        );
        put(values, "letter_date", now.format("%B %d, %Y").to_string());
        put(values, "visit_date", visit.format("%B %d, %Y").to_string());
        put(
            values,
            "signature_date",
            now.format("%B %d, %Y").to_string(),
        );

        put(values, "physician_name", choose(rng, phrases::PHYSICIANS));
        put(
            values,
            "attending_physician",
            choose(rng, phrases::ATTENDING_PHYSICIANS),
        );
        put(
            values,
            "physician_title",
            choose(rng, phrases::PHYSICIAN_TITLES),
        );
        put(
            values,
            "physician_specialty",
            choose(rng, phrases::PHYSICIAN_SPECIALTIES),
        );
        put(
            values,
            "provider_npi",
            format!("{}", rng.random_range(1_000_000_000u64..=9_999_999_999)),
        );
        put(
            values,
            "referring_provider",
            choose(rng, phrases::REFERRING_PROVIDERS),
        );
        put(
            values,
            "provider_title",
            choose(rng, phrases::PROVIDER_TITLES),
        );
        put(
            values,
            "referring_practice",
            choose(rng, phrases::REFERRING_PRACTICES),
        );
        put(
            values,
            "referring_address",
            choose(rng, phrases::REFERRING_ADDRESSES),
        );
        put(values, "staff_name", choose(rng, phrases::STAFF_NAMES));
        put(values, "clinic_name", choose(rng, phrases::CLINIC_NAMES));
        put(
            values,
            "clinic_address",
            choose(rng, phrases::CLINIC_ADDRESSES),
        );
        put(values, "clinic_phone", phone_number(rng));
        put(values, "clinic_fax", phone_number(rng));
        put(
            values,
            "measurement_location",
            choose(rng, phrases::MEASUREMENT_LOCATIONS),
        );
        put(values, "insurance_info", choose(rng, phrases::INSURERS));
    }

    /// Primary condition is the first patient condition with narrative
    /// content in the template; otherwise a generic fallback is used.
    fn condition_narrative(
        &self,
        rng: &mut StdRng,
        template: &TemplateDefinition,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        let primary = patient
            .conditions
            .iter()
            .find(|tag| template.condition_narrative(tag).is_some());

        let Some(tag) = primary else {
            self.generic_narrative(patient, values);
            return;
        };
        let narrative = template
            .condition_narrative(tag)
            .cloned()
            .unwrap_or_default();

        put(values, "primary_condition", tag.clone());

        let control_status = choose(rng, control_status_options(tag));
        let symptom = choose(rng, symptom_options(tag));
        put(values, "control_status", control_status);
        put(values, "symptom_description", symptom);
        match tag.as_str() {
            "diabetes" => put(values, "glucose_control_status", control_status),
            "hypertension" => put(values, "bp_control_status", control_status),
            "asthma" => {
                put(values, "asthma_control_status", control_status);
                put(
                    values,
                    "rescue_frequency",
                    choose(rng, phrases::RESCUE_FREQUENCIES),
                );
            }
            _ => {}
        }

        put(
            values,
            "chief_complaint",
            narrative
                .chief_complaint
                .unwrap_or_else(|| format!("Follow-up for {}", tag.replace('_', " "))),
        );
        put(
            values,
            "primary_diagnosis",
            narrative
                .primary_diagnosis
                .unwrap_or_else(|| diagnosis_label(tag)),
        );

        let hpi = narrative.hpi_template.map_or_else(
            || {
                format!(
                    "Patient with {} presents for routine follow-up. Reports {control_status} control with current regimen. {symptom}. Adherent to prescribed medications.",
                    tag.replace('_', " ")
                )
            },
            |body| self.substitute_tokens(&body, values),
        );
        put(values, "hpi_text", hpi);
    }

    fn generic_narrative(&self, patient: &PatientProfile, values: &mut FxHashMap<String, Value>) {
        put(values, "chief_complaint", "Follow-up visit");
        put(
            values,
            "primary_diagnosis",
            "Encounter for general adult medical examination (Z00.00)",
        );
        put(
            values,
            "hpi_text",
            format!(
                "{}-year-old {} presents for routine follow-up. No acute complaints today. Reports adherence to prescribed medications.",
                patient.age, patient.sex
            ),
        );
    }

    /// Replace `{{token}}` occurrences with already-composed values
    fn substitute_tokens(&self, body: &str, values: &FxHashMap<String, Value>) -> String {
        let mut out = body.to_string();
        for token in [
            "control_status",
            "symptom_description",
            "rescue_frequency",
            "patient_name",
            "patient_age",
            "patient_gender",
        ] {
            if let Some(value) = values.get(token) {
                out = out.replace(&format!("{{{{{token}}}}}"), &stringify(value));
            }
        }
        out
    }

    fn exam_findings(&self, rng: &mut StdRng, values: &mut FxHashMap<String, Value>) {
        put(values, "heent_exam", choose(rng, phrases::HEENT_EXAM));
        put(values, "cv_exam", choose(rng, phrases::CV_EXAM));
        put(values, "pulm_exam", choose(rng, phrases::PULM_EXAM));
        put(values, "abd_exam", choose(rng, phrases::ABD_EXAM));
        put(values, "neuro_exam", choose(rng, phrases::NEURO_EXAM));
        put(values, "ext_exam", choose(rng, phrases::EXT_EXAM));
        put(values, "skin_exam", choose(rng, phrases::SKIN_EXAM));
    }

    fn vital_signs(
        &self,
        rng: &mut StdRng,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        let hypertensive = patient.has_condition("hypertension");
        let (systolic, diastolic) = if hypertensive {
            (
                rng.random_range(130..=165i64),
                rng.random_range(85..=100i64),
            )
        } else {
            (rng.random_range(110..=135i64), rng.random_range(70..=88i64))
        };

        values.insert("bp_systolic".to_string(), Value::from(systolic));
        values.insert("bp_diastolic".to_string(), Value::from(diastolic));
        values.insert(
            "heart_rate".to_string(),
            Value::from(rng.random_range(60..=100i64)),
        );

        let temperature = (rng.random_range(970..=995i64)) as f64 / 10.0;
        values.insert("temperature".to_string(), json_f64(temperature));
        values.insert(
            "respiratory_rate".to_string(),
            Value::from(rng.random_range(12..=20i64)),
        );

        let weight = rng.random_range(115..=260i64);
        let height = rng.random_range(60..=76i64);
        let bmi = ((703.0 * weight as f64 / (height * height) as f64) * 10.0).round() / 10.0;
        values.insert("weight".to_string(), Value::from(weight));
        values.insert("height".to_string(), Value::from(height));
        values.insert("bmi".to_string(), json_f64(bmi));
    }

    fn histories(
        &self,
        rng: &mut StdRng,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        let mut pmh: Vec<Value> = patient
            .conditions
            .iter()
            .map(|tag| Value::String(pmh_phrase(tag)))
            .collect();
        let extra_count = rng.random_range(1..=2);
        let extras = phrases::PMH_EXTRAS.choose_multiple(rng, extra_count);
        pmh.extend(extras.map(|e| Value::String((*e).to_string())));
        values.insert("past_medical_history".to_string(), Value::Array(pmh));

        put(values, "occupation", choose(rng, phrases::OCCUPATIONS));
        put(
            values,
            "exercise_habits",
            choose(rng, phrases::EXERCISE_HABITS),
        );
        put(
            values,
            "family_history",
            choose(rng, phrases::FAMILY_HISTORIES),
        );
        put(
            values,
            "smoking_status",
            choose(rng, phrases::SMOKING_STATUSES),
        );
        put(values, "alcohol_use", choose(rng, phrases::ALCOHOL_USE));
    }

    fn assessment_plan(
        &self,
        rng: &mut StdRng,
        patient: &PatientProfile,
        values: &mut FxHashMap<String, Value>,
    ) {
        let primary = values
            .get("primary_condition")
            .and_then(Value::as_str)
            .map(str::to_string);

        let secondary: Vec<Value> = patient
            .conditions
            .iter()
            .filter(|tag| Some(tag.as_str()) != primary.as_deref())
            .take(2)
            .map(|tag| Value::String(diagnosis_label(tag)))
            .collect();
        values.insert("secondary_diagnoses".to_string(), Value::Array(secondary));

        let medication_plan: Vec<Value> = patient
            .medications
            .iter()
            .map(|med| {
                let action = choose(rng, phrases::MEDICATION_ACTIONS);
                Value::String(format!("{action} {med}"))
            })
            .collect();
        values.insert("medication_plan".to_string(), Value::Array(medication_plan));

        put(values, "follow_up", choose(rng, phrases::FOLLOW_UP_PLANS));
        put(
            values,
            "lifestyle_guidance",
            choose(rng, phrases::LIFESTYLE_GUIDANCE),
        );

        let oncology = primary.as_deref().is_some_and(|tag| tag.contains("cancer"));
        let testing = if oncology {
            phrases::TESTING_ONCOLOGY
        } else {
            phrases::TESTING_GENERIC
        };
        put(values, "additional_testing", choose(rng, testing));
    }

    /// Resolve template-level categorical rules: weighted draw when declared
    /// as `weighted_categorical` with weights, uniform otherwise
    fn categorical_rules(
        &self,
        rng: &mut StdRng,
        rules: &[(String, CategoricalRule)],
        values: &mut FxHashMap<String, Value>,
    ) {
        for (name, rule) in rules {
            if rule.values.is_empty() {
                continue;
            }
            let weighted = rule.distribution.as_deref() == Some("weighted_categorical");
            let pick = match (&rule.weights, weighted) {
                (Some(weights), true) if weights.len() == rule.values.len() => {
                    weighted_pick(rng, &rule.values, weights)
                }
                _ => rule.values.choose(rng).cloned().unwrap_or(Value::Null),
            };
            values.insert(name.clone(), pick);
        }
    }
}

fn weighted_pick(rng: &mut StdRng, options: &[Value], weights: &[f64]) -> Value {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return options.first().cloned().unwrap_or(Value::Null);
    }
    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (option, weight) in options.iter().zip(weights) {
        cumulative += weight;
        if draw < cumulative {
            return option.clone();
        }
    }
    options.last().cloned().unwrap_or(Value::Null)
}

fn choose(rng: &mut StdRng, options: &'static [&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or("")
}

fn phone_number(rng: &mut StdRng) -> String {
    format!(
        "({}) {}-{}",
        rng.random_range(200..=999),
        rng.random_range(200..=999),
        rng.random_range(1000..=9999)
    )
}

fn put(values: &mut FxHashMap<String, Value>, key: &str, value: impl Into<String>) {
    values.insert(key.to_string(), Value::String(value.into()));
}

fn json_f64(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose_for(conditions: &[&str]) -> FxHashMap<String, Value> {
        let patient = PatientProfile::new(
            "P1".into(),
            Sex::Female,
            58,
            conditions.iter().map(|c| (*c).to_string()).collect(),
        );
        let template = TemplateDefinition::default();
        let mut values = FxHashMap::default();
        let mut rng = SessionRng::from_seed(11);
        NarrativeComposer::new().compose(&mut rng, &template, &patient, Utc::now(), &mut values);
        values
    }

    #[test]
    fn always_emits_exam_vitals_and_plan() {
        let values = compose_for(&["diabetes"]);
        for key in [
            "heent_exam",
            "cv_exam",
            "bp_systolic",
            "past_medical_history",
            "follow_up",
            "chief_complaint",
            "hpi_text",
        ] {
            assert!(values.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn hypertensive_patients_get_elevated_pressures() {
        let values = compose_for(&["hypertension"]);
        let systolic = values["bp_systolic"].as_i64().unwrap();
        assert!((130..=165).contains(&systolic));
    }

    #[test]
    fn no_matching_condition_uses_generic_fallback() {
        // Default template declares no condition content at all
        let values = compose_for(&["diabetes"]);
        assert_eq!(
            values["chief_complaint"],
            Value::String("Follow-up visit".into())
        );
    }
}
