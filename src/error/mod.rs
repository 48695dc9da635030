//! Error handling for the document generation engine.

/// Specialized error type for document generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Requested template path is not present in the template source
    #[error("template not found: {path}")]
    TemplateNotFound {
        /// Template path as requested by the caller
        path: String,
    },

    /// Patient failed the template's eligibility constraints
    #[error("patient {patient_id} failed constraints for template {template_path}: {}", errors.join("; "))]
    ConstraintViolation {
        /// Identifier of the rejected patient
        patient_id: String,
        /// Template the patient was checked against
        template_path: String,
        /// One message per violated constraint
        errors: Vec<String>,
    },

    /// Template definition could not be parsed into a typed structure
    #[error("invalid template: {0}")]
    TemplateParse(String),

    /// Field randomization spec is malformed
    #[error("invalid field spec: {0}")]
    InvalidSpec(String),
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
