//! Seedable randomness for a generation session.
//!
//! All randomness flows through one `SessionRng` owned by the session and
//! passed explicitly into every component that samples. Two pipelines are
//! kept: `choice` for categorical draws, shuffles, and integer ranges, and
//! `sampling` for continuous distribution draws. Keeping them separate means
//! adding a field to a template never perturbs the patient sequence, and
//! vice versa.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic random source for one generation session
#[derive(Debug)]
pub struct SessionRng {
    /// Pipeline for categorical choices, shuffles, and integer draws
    pub choice: StdRng,
    /// Pipeline for continuous distribution sampling
    pub sampling: StdRng,
}

impl SessionRng {
    /// Create both pipelines from one top-level seed.
    ///
    /// The sampling pipeline derives its seed with `wrapping_add(1)` so the
    /// two streams are distinct but still fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            choice: StdRng::seed_from_u64(seed),
            sampling: StdRng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    /// Create both pipelines from OS entropy (non-reproducible)
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            choice: StdRng::from_os_rng(),
            sampling: StdRng::from_os_rng(),
        }
    }

    /// Create from an optional seed, falling back to OS entropy
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}
