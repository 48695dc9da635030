//! A Rust library for generating synthetic clinical documents from
//! declarative templates, with cohort synthesis, seeded determinism, and
//! pluggable validation.

pub mod config;
pub mod error;
pub mod models;
pub mod narrative;
pub mod population;
pub mod registry;
pub mod render;
pub mod sampler;
pub mod session;
pub mod synth;
pub mod template;
pub mod validate;

// Re-export the most common types for easier use
// Core types
pub use config::{GeneratorConfig, RandomizationLevel};
pub use error::{GeneratorError, Result};
pub use session::{BatchOutcome, BatchValidationSummary, GenerationSession};

// Patient and document models
pub use models::{GeneratedDocument, PatientProfile, Sex};
pub use population::{CohortSummary, PopulationSynthesizer};
pub use registry::ConditionRegistry;

// Templates and rendering
pub use render::DocumentRenderer;
pub use sampler::SessionRng;
pub use template::{InMemoryTemplateStore, TemplateDefinition, TemplateSource};

// Validation seam
pub use validate::{DocumentValidator, IssueSeverity, ValidationIssue, ValidationReport};
