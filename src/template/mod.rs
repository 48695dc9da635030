//! Declarative document templates.
//!
//! A template definition arrives as parsed JSON/YAML (`serde_json::Value`)
//! and is converted once into typed structures: eligibility constraints, a
//! tagged field tree, per-condition narrative content, calculated-field
//! formulas, and an optional free-text report body. Definitions are
//! read-only after parsing; one template may serve many patients.

mod constraints;
mod definition;
mod store;

pub use constraints::{ConstraintReport, ConstraintValidator};
pub use definition::{
    CategoricalRule, ConditionNarrative, Distribution, FieldNode, FieldRandomization, Modifier,
    TemplateConstraints, TemplateDefinition, TemplateNode,
};
pub use store::{InMemoryTemplateStore, TemplateSource};
