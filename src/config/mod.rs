//! Configuration for the generation session.

use chrono::{DateTime, Utc};

/// Coarse knob scaling the spread of generated numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizationLevel {
    /// Tight spread, values cluster near the declared mean
    Conservative,
    /// The declared spread, unchanged
    #[default]
    Moderate,
    /// Widened spread for stress-testing downstream consumers
    High,
}

impl RandomizationLevel {
    /// Multiplier applied to every standard-deviation term
    #[must_use]
    pub const fn std_multiplier(self) -> f64 {
        match self {
            Self::Conservative => 0.5,
            Self::Moderate => 1.0,
            Self::High => 1.8,
        }
    }

    /// Name as it appears in document metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Configuration for a `GenerationSession`
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for both RNG pipelines; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Spread level applied to all synthesized values
    pub randomization_level: RandomizationLevel,
    /// Inclusive range of documents generated per patient in batch mode
    pub docs_per_patient: (u32, u32),
    /// Pinned session clock; `None` uses the wall clock at session start.
    /// Pinning it makes repeated seeded runs byte-identical.
    pub generation_time: Option<DateTime<Utc>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            randomization_level: RandomizationLevel::Moderate,
            docs_per_patient: (1, 3),
            generation_time: None,
        }
    }
}
