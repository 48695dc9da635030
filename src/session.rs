//! Generation session: the orchestrating driver that turns templates and
//! patients into finished documents.

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::models::{DocumentMetadata, GeneratedDocument, PatientProfile, ValidationSummary};
use crate::narrative::NarrativeComposer;
use crate::render::DocumentRenderer;
use crate::sampler::SessionRng;
use crate::synth::ValueSynthesizer;
use crate::template::{ConstraintValidator, TemplateSource};
use crate::validate::DocumentValidator;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Aggregate over every validator report produced during a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchValidationSummary {
    /// Documents the validator looked at, including rejected ones
    pub total_validated: usize,
    /// Documents the validator accepted
    pub valid_documents: usize,
    /// Acceptance rate as a percentage, one decimal
    pub validation_rate: f64,
    pub average_overall_score: f64,
    pub average_medical_accuracy_score: f64,
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    /// Documents that survived generation and validation
    pub documents: Vec<GeneratedDocument>,
    /// Present when a validator was supplied and saw at least one document
    pub validation_summary: Option<BatchValidationSummary>,
}

/// A seeded document generation session.
///
/// Owns the two RNG pipelines, the session clock, and the synthesizer
/// components. All documents produced by one session share the same clock,
/// so a pinned `generation_time` plus a fixed seed makes repeated runs
/// byte-identical.
pub struct GenerationSession<S: TemplateSource> {
    store: S,
    config: GeneratorConfig,
    rng: SessionRng,
    synthesizer: ValueSynthesizer,
    composer: NarrativeComposer,
    renderer: DocumentRenderer,
    clock: DateTime<Utc>,
}

impl<S: TemplateSource> GenerationSession<S> {
    /// Create a session over a template source
    pub fn new(store: S, config: GeneratorConfig) -> Self {
        let rng = SessionRng::new(config.seed);
        let clock = config.generation_time.unwrap_or_else(Utc::now);
        let synthesizer = ValueSynthesizer::new(config.randomization_level);
        Self {
            store,
            config,
            rng,
            synthesizer,
            composer: NarrativeComposer::new(),
            renderer: DocumentRenderer,
            clock,
        }
    }

    /// The template source backing this session
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate one document for a patient from the named template.
    ///
    /// Fails with [`GeneratorError::TemplateNotFound`] for unknown paths and
    /// [`GeneratorError::ConstraintViolation`] when the patient is not
    /// eligible for the template.
    pub fn generate_document(
        &mut self,
        template_path: &str,
        patient: &PatientProfile,
    ) -> Result<GeneratedDocument> {
        let template = self
            .store
            .get(template_path)
            .ok_or_else(|| GeneratorError::TemplateNotFound {
                path: template_path.to_string(),
            })?;

        let report = ConstraintValidator::validate(&template.constraints, patient);
        for warning in &report.warnings {
            debug!("{template_path} / {}: {warning}", patient.id);
        }
        if !report.is_valid() {
            return Err(GeneratorError::ConstraintViolation {
                patient_id: patient.id.clone(),
                template_path: template_path.to_string(),
                errors: report.errors,
            });
        }

        let mut values = FxHashMap::default();
        if let Some(tree) = &template.template {
            self.synthesizer
                .collect_values(&mut self.rng, tree, patient, &mut values);
        }
        self.composer
            .compose(&mut self.rng, template, patient, self.clock, &mut values);

        let (body, document_text) = self.renderer.render(template, &mut values);

        Ok(GeneratedDocument {
            body,
            document_text,
            metadata: DocumentMetadata {
                template_path: template_path.to_string(),
                patient_id: patient.id.clone(),
                generation_timestamp: self.clock,
                randomization_level: self.config.randomization_level.as_str().to_string(),
            },
            validation: None,
        })
    }

    /// Generate a batch of documents across a cohort, rotating through
    /// `template_paths` per patient.
    ///
    /// Each patient receives between `docs_per_patient.0` and
    /// `docs_per_patient.1` documents. Ineligible patient/template pairings
    /// are logged and skipped rather than failing the batch. When a
    /// validator is supplied, documents with critical findings are dropped
    /// and the rest carry a validation annotation.
    pub fn generate_batch(
        &mut self,
        patients: &[PatientProfile],
        template_paths: &[String],
        validator: Option<&dyn DocumentValidator>,
    ) -> Result<BatchOutcome> {
        if template_paths.is_empty() {
            return Err(GeneratorError::InvalidSpec(
                "no templates selected for batch generation".into(),
            ));
        }

        let (min_docs, max_docs) = self.config.docs_per_patient;
        let max_docs = max_docs.max(min_docs);
        info!(
            "Generating documents for {} patients across {} templates",
            patients.len(),
            template_paths.len()
        );

        let pb = ProgressBar::new(patients.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} patients ({per_sec}) {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut documents = Vec::new();
        let mut reports: Vec<ValidationSummary> = Vec::new();

        for patient in patients {
            let num_docs = self.rng.choice.random_range(min_docs..=max_docs);
            for doc_num in 0..num_docs as usize {
                let path = &template_paths[doc_num % template_paths.len()];
                let mut document = match self.generate_document(path, patient) {
                    Ok(document) => document,
                    Err(err) => {
                        warn!("skipping {path} for {}: {err}", patient.id);
                        continue;
                    }
                };

                if let Some(validator) = validator {
                    match validator.validate(&document, patient) {
                        Ok(report) => {
                            let summary = ValidationSummary {
                                is_valid: report.is_valid,
                                overall_score: report.overall_score,
                                medical_accuracy_score: report.medical_accuracy_score,
                                issues_count: report.issues.len(),
                            };
                            if report.has_critical() {
                                warn!(
                                    "rejecting {path} for {}: critical validation findings",
                                    patient.id
                                );
                                reports.push(summary);
                                continue;
                            }
                            reports.push(summary.clone());
                            document.validation = Some(summary);
                        }
                        // Validator failures keep the document unannotated
                        Err(err) => warn!("validation failed for {}: {err}", patient.id),
                    }
                }

                documents.push(document);
            }
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} documents", documents.len()));

        let validation_summary = summarize_reports(&reports);
        Ok(BatchOutcome {
            documents,
            validation_summary,
        })
    }
}

fn summarize_reports(reports: &[ValidationSummary]) -> Option<BatchValidationSummary> {
    if reports.is_empty() {
        return None;
    }
    let total = reports.len();
    let valid = reports.iter().filter(|r| r.is_valid).count();
    let avg_overall = reports.iter().map(|r| r.overall_score).sum::<f64>() / total as f64;
    let avg_medical =
        reports.iter().map(|r| r.medical_accuracy_score).sum::<f64>() / total as f64;

    Some(BatchValidationSummary {
        total_validated: total,
        valid_documents: valid,
        validation_rate: round1(valid as f64 / total as f64 * 100.0),
        average_overall_score: round1(avg_overall),
        average_medical_accuracy_score: round1(avg_medical),
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
