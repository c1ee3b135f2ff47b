//! Per-model registry of which quality tiers actually have an asset.

use crate::QualityTier;

/// The set of quality tiers a model's derivative registry actually offers.
///
/// The quality controller never requests a tier with no backing asset; it
/// snaps every decision through [`DerivativeSet::nearest`] before
/// committing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivativeSet {
    /// Offered tiers, sorted ascending, deduplicated. Never empty.
    available: Vec<QualityTier>,
}

impl DerivativeSet {
    /// Create a derivative set from the tiers a model offers.
    ///
    /// # Panics
    ///
    /// Panics if `available` is empty: a model with no derivatives at all
    /// cannot be displayed and must not reach the controller.
    pub fn new(mut available: Vec<QualityTier>) -> Self {
        assert!(
            !available.is_empty(),
            "a derivative set must offer at least one tier"
        );
        available.sort();
        available.dedup();
        Self { available }
    }

    /// A set offering every tier.
    pub fn full() -> Self {
        Self {
            available: QualityTier::ALL.to_vec(),
        }
    }

    /// Whether an asset exists for `tier` exactly.
    pub fn offers(&self, tier: QualityTier) -> bool {
        self.available.contains(&tier)
    }

    /// The offered tier nearest to `tier`.
    ///
    /// Exact matches win; otherwise the smallest tier-index distance wins,
    /// with ties resolved toward the lower (cheaper) tier.
    pub fn nearest(&self, tier: QualityTier) -> QualityTier {
        let want = tier.index() as i32;
        let mut best = self.available[0];
        let mut best_distance = (best.index() as i32 - want).abs();
        for &candidate in &self.available[1..] {
            let distance = (candidate.index() as i32 - want).abs();
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    /// The offered tiers, sorted ascending.
    pub fn available(&self) -> &[QualityTier] {
        &self.available
    }
}
