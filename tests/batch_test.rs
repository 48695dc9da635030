//! Batch generation tests: per-patient document counts, template rotation,
//! skip-and-continue, and validator integration.

use chrono::{TimeZone, Utc};
use med_synth::{
    DocumentValidator, GeneratedDocument, GenerationSession, GeneratorConfig, GeneratorError,
    InMemoryTemplateStore, IssueSeverity, PatientProfile, RandomizationLevel, Sex,
    ValidationIssue, ValidationReport,
};
use rustc_hash::FxHashMap;
use serde_json::json;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store() -> InMemoryTemplateStore {
    let mut store = InMemoryTemplateStore::new();
    store
        .insert_value(
            "labs/basic_panel",
            &json!({
                "constraints": {"age_range": [18, 99]},
                "template": {
                    "panel": "basic",
                    "glucose": {
                        "value": "{{glucose}}",
                        "unit": "mg/dL",
                        "randomization": {"mean": 100.0, "std": 10.0}
                    }
                }
            }),
        )
        .unwrap();
    store
        .insert_value(
            "notes/progress_note",
            &json!({
                "constraints": {"age_range": [18, 99]},
                "report_template": "PROGRESS NOTE\nPatient: {{patient_name}}\nCC: {{chief_complaint}}"
            }),
        )
        .unwrap();
    store
}

fn session(docs_per_patient: (u32, u32)) -> GenerationSession<InMemoryTemplateStore> {
    let config = GeneratorConfig {
        seed: Some(7),
        randomization_level: RandomizationLevel::Moderate,
        docs_per_patient,
        generation_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
    };
    GenerationSession::new(store(), config)
}

fn patients(count: usize) -> Vec<PatientProfile> {
    (0..count)
        .map(|i| {
            let mut patient = PatientProfile::new(
                format!("P{i:08X}"),
                if i % 2 == 0 { Sex::Female } else { Sex::Male },
                30 + (i as u32 % 40),
                vec!["hypertension".to_string()],
            );
            patient.medications = vec!["lisinopril".to_string()];
            patient
        })
        .collect()
}

fn template_paths() -> Vec<String> {
    vec![
        "labs/basic_panel".to_string(),
        "notes/progress_note".to_string(),
    ]
}

#[test]
fn test_batch_respects_docs_per_patient_range() {
    init_logs();
    let cohort = patients(20);
    let outcome = session((1, 3))
        .generate_batch(&cohort, &template_paths(), None)
        .unwrap();

    let mut per_patient: FxHashMap<&str, usize> = FxHashMap::default();
    for doc in &outcome.documents {
        *per_patient.entry(doc.metadata.patient_id.as_str()).or_default() += 1;
    }
    for patient in &cohort {
        let count = per_patient.get(patient.id.as_str()).copied().unwrap_or(0);
        assert!(
            (1..=3).contains(&count),
            "Patient {} received {count} documents",
            patient.id
        );
    }
    assert!(outcome.validation_summary.is_none());
}

#[test]
fn test_batch_rotates_through_templates() {
    let cohort = patients(5);
    let outcome = session((2, 2))
        .generate_batch(&cohort, &template_paths(), None)
        .unwrap();

    assert_eq!(outcome.documents.len(), 10);
    for patient in &cohort {
        let paths: Vec<&str> = outcome
            .documents
            .iter()
            .filter(|d| d.metadata.patient_id == patient.id)
            .map(|d| d.metadata.template_path.as_str())
            .collect();
        assert_eq!(
            paths,
            ["labs/basic_panel", "notes/progress_note"],
            "Each patient should see templates in rotation order"
        );
    }
}

#[test]
fn test_ineligible_patients_are_skipped_not_fatal() {
    init_logs();
    let mut cohort = patients(4);
    cohort[0].age = 5;

    let outcome = session((1, 1))
        .generate_batch(&cohort, &template_paths(), None)
        .unwrap();

    assert!(
        !outcome
            .documents
            .iter()
            .any(|d| d.metadata.patient_id == cohort[0].id),
        "Out-of-range patient should produce no documents"
    );
    assert!(
        !outcome.documents.is_empty(),
        "Remaining patients should still be served"
    );
}

#[test]
fn test_empty_template_list_is_rejected() {
    let err = session((1, 1))
        .generate_batch(&patients(1), &[], None)
        .unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidSpec(_)));
}

/// Flags every lab document with a critical issue and waves notes through.
struct LabRejector;

impl DocumentValidator for LabRejector {
    fn validate(
        &self,
        document: &GeneratedDocument,
        _patient: &PatientProfile,
    ) -> anyhow::Result<ValidationReport> {
        if document.metadata.template_path.starts_with("labs/") {
            Ok(ValidationReport {
                is_valid: false,
                overall_score: 20.0,
                medical_accuracy_score: 10.0,
                issues: vec![ValidationIssue {
                    severity: IssueSeverity::Critical,
                    category: "value_ranges".into(),
                    message: "implausible panel".into(),
                    field: None,
                }],
            })
        } else {
            Ok(ValidationReport::passing())
        }
    }
}

#[test]
fn test_validator_drops_critical_documents_and_annotates_the_rest() {
    let cohort = patients(6);
    let outcome = session((2, 2))
        .generate_batch(&cohort, &template_paths(), Some(&LabRejector))
        .unwrap();

    assert_eq!(outcome.documents.len(), 6, "Lab documents should be dropped");
    for doc in &outcome.documents {
        assert_eq!(doc.metadata.template_path, "notes/progress_note");
        let validation = doc.validation.as_ref().expect("surviving docs are annotated");
        assert!(validation.is_valid);
        assert_eq!(validation.issues_count, 0);
    }

    let summary = outcome.validation_summary.expect("validator ran");
    assert_eq!(summary.total_validated, 12);
    assert_eq!(summary.valid_documents, 6);
    assert!((summary.validation_rate - 50.0).abs() < f64::EPSILON);
    assert!((summary.average_overall_score - 60.0).abs() < f64::EPSILON);
}
