//! Tunables for the quality controller.

use crate::reconciler::ReconcilePolicy;
use crate::selector::{TierSelector, TierStep};

/// Configuration of the quality controller. [`Default`] carries the
/// shipped values; hosts usually only touch these from a settings file.
#[derive(Clone, Debug)]
pub struct QualityOptions {
    /// Tier-selection steps, ascending. See [`TierSelector`].
    pub steps: Vec<TierStep>,
    /// Hysteresis added to a step bound when the current tier is at or
    /// below that step's tier.
    pub hysteresis: f64,
    /// Frames between gated evaluations when nothing changed.
    pub debounce_frames: u32,
    /// Maximum committed upgrades per tick.
    pub max_upgrades_per_tick: usize,
    /// Maximum concurrent asset fetches.
    pub max_concurrent_loads: usize,
    /// Hard bound on reconciliation passes.
    pub max_passes: usize,
}

impl Default for QualityOptions {
    fn default() -> Self {
        let selector = TierSelector::default();
        Self {
            steps: selector.steps().to_vec(),
            hysteresis: selector.hysteresis(),
            debounce_frames: 20,
            max_upgrades_per_tick: 2,
            max_concurrent_loads: 5,
            max_passes: 64,
        }
    }
}

impl QualityOptions {
    /// Build the selector these options describe.
    ///
    /// # Panics
    ///
    /// Panics if the steps or hysteresis are invalid, see
    /// [`TierSelector::new`].
    pub fn selector(&self) -> TierSelector {
        TierSelector::new(self.steps.clone(), self.hysteresis)
    }

    /// Build the reconciliation policy these options describe.
    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            max_upgrades: self.max_upgrades_per_tick,
            max_concurrent_loads: self.max_concurrent_loads,
            max_passes: self.max_passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_assets::QualityTier;

    #[test]
    fn test_default_options_match_shipped_constants() {
        let options = QualityOptions::default();
        assert_eq!(options.debounce_frames, 20);
        assert_eq!(options.max_upgrades_per_tick, 2);
        assert_eq!(options.max_concurrent_loads, 5);
        assert_eq!(options.hysteresis, 0.02);
        assert_eq!(options.steps.len(), 3);
        assert_eq!(options.steps[2].size, 0.40);
        assert_eq!(options.steps[2].tier, QualityTier::Medium);
    }

    #[test]
    fn test_options_build_selector_and_policy() {
        let options = QualityOptions::default();
        let selector = options.selector();
        assert_eq!(selector.select(0.5, QualityTier::Thumb), QualityTier::High);
        let policy = options.policy();
        assert_eq!(policy.max_upgrades, 2);
        assert_eq!(policy.max_concurrent_loads, 5);
    }
}
