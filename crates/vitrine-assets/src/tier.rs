//! Texture quality tiers and their memory cost model.

/// Texture resolution tier of a streamed model derivative, ordered
/// coarsest to finest.
///
/// The derive order matters: `Thumb < Low < Medium < High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    /// 512×512 preview texture.
    Thumb,
    /// 1024×1024.
    Low,
    /// 2048×2048.
    Medium,
    /// 4096×4096 full-resolution texture.
    High,
}

impl QualityTier {
    /// All tiers, coarsest first.
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Thumb,
        QualityTier::Low,
        QualityTier::Medium,
        QualityTier::High,
    ];

    /// Texture edge length in pixels for this tier.
    pub fn texture_size(self) -> u32 {
        match self {
            QualityTier::Thumb => 512,
            QualityTier::Low => 1024,
            QualityTier::Medium => 2048,
            QualityTier::High => 4096,
        }
    }

    /// Memory cost of this tier in squared pixels (the abstract unit the
    /// texture budget is expressed in).
    pub fn cost(self) -> f64 {
        let size = self.texture_size() as f64;
        size * size
    }

    /// Zero-based ordinal, coarsest = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tier for a zero-based ordinal, clamped to the finest tier.
    pub fn from_index(index: usize) -> QualityTier {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

/// Sum of tier costs over an iterator, in squared pixels.
pub fn total_cost<I: IntoIterator<Item = QualityTier>>(tiers: I) -> f64 {
    tiers.into_iter().map(QualityTier::cost).sum()
}
