//! Mapping from a visibility score to a quality tier: an ordered step
//! function with per-tier hysteresis.

use vitrine_assets::QualityTier;

/// One step of the selection function: scores below `size` (plus
/// hysteresis, when applicable) map to `tier`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierStep {
    /// Upper score bound for this step, as a viewport fraction.
    pub size: f64,
    /// Tier selected when the score falls under this step.
    pub tier: QualityTier,
}

/// Selects quality tiers from visibility scores.
///
/// Steps are tested in ascending order; the first whose bound exceeds the
/// score wins, and scores above every bound select the tier one above the
/// last step. The hysteresis term is added to a step's bound only when the
/// model's current tier is at or below that step's tier, so an object
/// already holding a tier is harder to push back down across that boundary
/// than it was to pull up into it.
#[derive(Clone, Debug)]
pub struct TierSelector {
    steps: Vec<TierStep>,
    hysteresis: f64,
}

impl Default for TierSelector {
    fn default() -> Self {
        Self::new(
            vec![
                TierStep {
                    size: 0.04,
                    tier: QualityTier::Thumb,
                },
                TierStep {
                    size: 0.10,
                    tier: QualityTier::Low,
                },
                TierStep {
                    size: 0.40,
                    tier: QualityTier::Medium,
                },
            ],
            0.02,
        )
    }
}

impl TierSelector {
    /// Create a selector from explicit steps.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is empty, if bounds are not positive and strictly
    /// increasing, if tiers are not strictly increasing, or if
    /// `hysteresis` is negative.
    pub fn new(steps: Vec<TierStep>, hysteresis: f64) -> Self {
        assert!(!steps.is_empty(), "must have at least one step");
        assert!(hysteresis >= 0.0, "hysteresis must be non-negative");
        for (i, step) in steps.iter().enumerate() {
            assert!(step.size > 0.0, "step bounds must be positive");
            if i > 0 {
                assert!(
                    step.size > steps[i - 1].size,
                    "step bounds must be strictly increasing"
                );
                assert!(
                    step.tier > steps[i - 1].tier,
                    "step tiers must be strictly increasing"
                );
            }
        }
        Self { steps, hysteresis }
    }

    /// The tier selected above the last step.
    fn top_tier(&self) -> QualityTier {
        // Steps are validated non-empty.
        QualityTier::from_index(self.steps[self.steps.len() - 1].tier.index() + 1)
    }

    /// Select a tier for `score`, free to go below `current`.
    ///
    /// `current` only seeds the hysteresis bias; a score of zero always
    /// selects the coarsest step's tier.
    pub fn select(&self, score: f64, current: QualityTier) -> QualityTier {
        for step in &self.steps {
            let mut bound = step.size;
            if current <= step.tier {
                bound += self.hysteresis;
            }
            if bound > score {
                return step.tier;
            }
        }
        self.top_tier()
    }

    /// Select the per-tick desired tier: like [`select`](Self::select) but
    /// never below `current`. Downgrades are the reconciler's business.
    pub fn desired(&self, score: f64, current: QualityTier) -> QualityTier {
        self.select(score, current).max(current)
    }

    /// Hysteresis constant in score units.
    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    /// The configured steps, ascending.
    pub fn steps(&self) -> &[TierStep] {
        &self.steps
    }
}
