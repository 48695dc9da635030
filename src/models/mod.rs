//! Data models for patients and generated documents.

pub mod document;
pub mod patient;

pub use document::{DocumentMetadata, GeneratedDocument, ValidationSummary};
pub use patient::{PatientProfile, Sex};
