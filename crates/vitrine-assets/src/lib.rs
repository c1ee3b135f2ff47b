//! Derivative asset model for the vitrine viewer: quality tiers with fixed
//! texture-memory costs, and the per-model set of tiers that actually exist.

mod derivative;
mod tier;

pub use derivative::DerivativeSet;
pub use tier::{QualityTier, total_cost};
