//! End-to-end document generation tests: determinism, constraint
//! enforcement, value bounds, and report rendering.

use chrono::{TimeZone, Utc};
use med_synth::{
    GenerationSession, GeneratorConfig, GeneratorError, InMemoryTemplateStore, PatientProfile,
    RandomizationLevel, Sex,
};
use serde_json::{Value, json};

const GLUCOSE_PANEL: &str = "labs/glucose_panel";

fn glucose_panel() -> Value {
    json!({
        "constraints": {
            "age_range": [18, 99],
            "required_conditions": ["diabetes"],
            "conditions_relevant": ["diabetes", "obesity"]
        },
        "template": {
            "patient": {
                "name": "{{patient_name}}",
                "id": "{{patient_id}}"
            },
            "results": {
                "glucose": {
                    "value": "{{glucose}}",
                    "unit": "mg/dL",
                    "reference_range": "70-100",
                    "randomization": {
                        "mean": 105.0,
                        "std": 15.0,
                        "disease_modifiers": {
                            "diabetes": {"mean": 160.0, "std": 40.0}
                        }
                    },
                    "critical_values": {"low": 40, "high": 500}
                }
            },
            "vitals": {
                "weight": "{{weight}}",
                "height": "{{height}}"
            }
        },
        "calculated_fields": {
            "bmi_calc": "703 * weight / (height * height)"
        },
        "condition_templates": {
            "diabetes": {
                "chief_complaint": "Routine diabetes follow-up",
                "primary_diagnosis": "Type 2 diabetes mellitus (E11.9)",
                "hpi_template": "Patient reports {{control_status}} glucose control. {{symptom_description}}"
            }
        },
        "report_template": "PATIENT: {{patient_name}}\nDOB: {{patient_dob}}\n\nCHIEF COMPLAINT: {{chief_complaint}}\n\n{{#if hpi_text}}HPI: {{hpi_text}}{{/if}}\n\nMEDICATIONS:\n{{#each medication_plan}}- {{this}}\n{{/each}}\nGlucose: {{glucose}} {{glucose_unit}} (ref {{glucose_reference_range}})"
    })
}

fn store() -> InMemoryTemplateStore {
    let mut store = InMemoryTemplateStore::new();
    store
        .insert_value(GLUCOSE_PANEL, &glucose_panel())
        .expect("panel template should parse");
    store
}

fn session(seed: u64, level: RandomizationLevel) -> GenerationSession<InMemoryTemplateStore> {
    let config = GeneratorConfig {
        seed: Some(seed),
        randomization_level: level,
        docs_per_patient: (1, 3),
        generation_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
    };
    GenerationSession::new(store(), config)
}

fn diabetic_patient() -> PatientProfile {
    let mut patient = PatientProfile::new(
        "P00000001".to_string(),
        Sex::Female,
        54,
        vec!["diabetes".to_string(), "hypertension".to_string()],
    );
    patient.medications = vec!["metformin".to_string(), "lisinopril".to_string()];
    patient
}

fn glucose_of(doc: &serde_json::Map<String, Value>) -> f64 {
    doc["results"]["glucose"]["value"]
        .as_str()
        .expect("glucose renders as a substituted string")
        .parse()
        .expect("glucose should parse as a number")
}

#[test]
fn test_seeded_runs_are_byte_identical() {
    let patient = diabetic_patient();
    let doc_a = session(42, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &patient)
        .unwrap();
    let doc_b = session(42, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &patient)
        .unwrap();

    let json_a = serde_json::to_string(&doc_a.to_json()).unwrap();
    let json_b = serde_json::to_string(&doc_b.to_json()).unwrap();
    assert_eq!(json_a, json_b, "Same seed and clock should reproduce bytes");
    assert_eq!(doc_a.document_text, doc_b.document_text);
}

#[test]
fn test_unknown_template_path_is_an_error() {
    let err = session(1, RandomizationLevel::Moderate)
        .generate_document("labs/missing", &diabetic_patient())
        .unwrap_err();
    assert!(matches!(err, GeneratorError::TemplateNotFound { path } if path == "labs/missing"));
}

#[test]
fn test_ineligible_patient_is_rejected_with_reasons() {
    let healthy = PatientProfile::new("P00000002".to_string(), Sex::Male, 40, vec![]);
    let err = session(1, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &healthy)
        .unwrap_err();

    match err {
        GeneratorError::ConstraintViolation {
            patient_id, errors, ..
        } => {
            assert_eq!(patient_id, "P00000002");
            assert!(!errors.is_empty(), "Missing condition should be reported");
        }
        other => panic!("Expected a constraint violation, got {other:?}"),
    }
}

#[test]
fn test_glucose_respects_critical_bounds() {
    let mut session = session(3, RandomizationLevel::High);
    let patient = diabetic_patient();

    for _ in 0..200 {
        let doc = session.generate_document(GLUCOSE_PANEL, &patient).unwrap();
        let glucose = glucose_of(&doc.body);
        assert!(
            (40.0..=500.0).contains(&glucose),
            "Glucose {glucose} escaped its critical bounds"
        );
    }
}

#[test]
fn test_disease_modifier_shifts_the_mean() {
    let mut session = session(8, RandomizationLevel::Conservative);
    let patient = diabetic_patient();

    let mean: f64 = (0..100)
        .map(|_| glucose_of(&session.generate_document(GLUCOSE_PANEL, &patient).unwrap().body))
        .sum::<f64>()
        / 100.0;

    // Diabetic override centers at 160, far above the 105 baseline
    assert!(
        (135.0..=185.0).contains(&mean),
        "Mean glucose {mean} not centered on the diabetic override"
    );
}

#[test]
fn test_higher_randomization_widens_spread() {
    let patient = diabetic_patient();
    let spread = |level: RandomizationLevel| {
        let mut session = session(21, level);
        let samples: Vec<f64> = (0..150)
            .map(|_| glucose_of(&session.generate_document(GLUCOSE_PANEL, &patient).unwrap().body))
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        var.sqrt()
    };

    let conservative = spread(RandomizationLevel::Conservative);
    let high = spread(RandomizationLevel::High);
    assert!(
        high > conservative * 2.5,
        "High spread {high:.2} should dwarf conservative spread {conservative:.2}"
    );
}

#[test]
fn test_report_text_resolves_every_placeholder() {
    let doc = session(5, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &diabetic_patient())
        .unwrap();
    let text = doc.document_text.expect("template declares a report");

    assert!(!text.contains("{{"), "Unexpanded directive in:\n{text}");
    assert!(text.contains("CHIEF COMPLAINT: Routine diabetes follow-up"));
    assert!(text.contains("HPI: Patient reports"), "Conditional HPI block missing");
    assert_eq!(
        text.matches("\n- ").count(),
        2,
        "One medication plan line per medication"
    );
    assert!(text.contains("mg/dL (ref 70-100)"));
    assert!(!text.contains("\n\n\n"), "Blank runs should collapse");
}

#[test]
fn test_metadata_stamp_carries_provenance() {
    let doc = session(2, RandomizationLevel::Conservative)
        .generate_document(GLUCOSE_PANEL, &diabetic_patient())
        .unwrap();

    assert_eq!(doc.metadata.template_path, GLUCOSE_PANEL);
    assert_eq!(doc.metadata.patient_id, "P00000001");
    assert_eq!(doc.metadata.randomization_level, "conservative");
    assert_eq!(
        doc.metadata.generation_timestamp,
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    );
    assert!(doc.validation.is_none(), "No validator was attached");
}

#[test]
fn test_calculated_field_matches_its_inputs() {
    let doc = session(17, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &diabetic_patient())
        .unwrap();

    let weight: f64 = doc.body["vitals"]["weight"].as_str().unwrap().parse().unwrap();
    let height: f64 = doc.body["vitals"]["height"].as_str().unwrap().parse().unwrap();
    let bmi = doc.body["bmi_calc"].as_f64().expect("calculated field present");
    let expected = 703.0 * weight / (height * height);
    assert!(
        (bmi - expected).abs() < 0.01,
        "bmi_calc {bmi} does not match {expected}"
    );
}

#[test]
fn test_spec_keys_never_reach_the_output() {
    let doc = session(4, RandomizationLevel::Moderate)
        .generate_document(GLUCOSE_PANEL, &diabetic_patient())
        .unwrap();
    let glucose = &doc.body["results"]["glucose"];

    assert!(glucose.get("randomization").is_none());
    assert!(glucose.get("critical_values").is_none());
    assert!(glucose.get("reference_range").is_none());
    assert_eq!(glucose["unit"], json!("mg/dL"));
}
