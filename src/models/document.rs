//! Generated document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance stamp attached to every generated document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Template path the document was generated from
    pub template_path: String,
    /// Identifier of the patient the document belongs to
    pub patient_id: String,
    /// Session clock at generation time
    pub generation_timestamp: DateTime<Utc>,
    /// Randomization level requested for this document
    pub randomization_level: String,
}

/// Post-hoc annotation attached by an external validator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Whether the validator accepted the document
    pub is_valid: bool,
    /// Aggregate plausibility score, 0-100
    pub overall_score: f64,
    /// Medical accuracy sub-score, 0-100
    pub medical_accuracy_score: f64,
    /// Number of issues the validator raised
    pub issues_count: usize,
}

/// A populated clinical document
///
/// The body mirrors the template's field tree with placeholders resolved.
/// Never mutated after construction, except for the validator annotation
/// attached by the batch driver.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Rendered field tree
    pub body: Map<String, Value>,
    /// Rendered free-text report, when the template declares one
    pub document_text: Option<String>,
    /// Provenance stamp
    pub metadata: DocumentMetadata,
    /// Validator annotation, absent when validation is disabled or failed
    pub validation: Option<ValidationSummary>,
}

impl GeneratedDocument {
    /// Flatten into a single JSON object with `document_text`, `_metadata`,
    /// and `_validation` keys alongside the body fields.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = self.body.clone();
        if let Some(text) = &self.document_text {
            out.insert("document_text".to_string(), Value::String(text.clone()));
        }
        if let Ok(meta) = serde_json::to_value(&self.metadata) {
            out.insert("_metadata".to_string(), meta);
        }
        if let Some(validation) = &self.validation
            && let Ok(v) = serde_json::to_value(validation)
        {
            out.insert("_validation".to_string(), v);
        }
        Value::Object(out)
    }
}
