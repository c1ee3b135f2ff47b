//! Texture-memory budget estimation from device capability signals.

use vitrine_assets::QualityTier;

/// Best-effort device capability signals used to seed the texture budget.
///
/// Absent signals mean "no penalty", never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceCaps {
    /// Largest texture edge the renderer supports, in pixels.
    pub max_texture_size: u32,
    /// Logical CPU count, when the platform reports one.
    pub hardware_concurrency: Option<u32>,
    /// Approximate device memory in gigabytes, when reported.
    pub device_memory_gb: Option<f64>,
    /// Whether a mobile-device signal is present.
    pub is_mobile: bool,
}

impl Default for DeviceCaps {
    fn default() -> Self {
        Self {
            max_texture_size: 4096,
            hardware_concurrency: None,
            device_memory_gb: None,
            is_mobile: false,
        }
    }
}

/// The lowest budget ever handed out: twice the cost of one
/// maximum-quality tier, so at least one model can always show at High.
pub fn budget_floor() -> f64 {
    2.0 * QualityTier::High.cost()
}

/// Compute the texture-memory budget in squared pixels.
///
/// Starts from `(max_texture_size / 2)²` — half the largest supported
/// texture, reserving the rest for non-model textures such as environment
/// maps — then applies independent penalties: halved below 4 cores,
/// divided by 1.5 on mobile, and capped at `4 × cost(High)` when device
/// memory is known to be under 8 GB. The result never drops below
/// [`budget_floor`].
pub fn compute_budget(caps: &DeviceCaps) -> f64 {
    let side = caps.max_texture_size as f64 / 2.0;
    let mut budget = side * side;

    if let Some(cores) = caps.hardware_concurrency {
        if cores < 4 {
            budget /= 2.0;
        }
    }
    if caps.is_mobile {
        budget /= 1.5;
    }
    if let Some(memory_gb) = caps.device_memory_gb {
        if memory_gb < 8.0 {
            budget = budget.min(4.0 * QualityTier::High.cost());
        }
    }

    budget.max(budget_floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_signals_apply_no_penalty() {
        let caps = DeviceCaps {
            max_texture_size: 16384,
            ..DeviceCaps::default()
        };
        assert_eq!(compute_budget(&caps), 8192.0 * 8192.0);
    }

    #[test]
    fn test_low_core_count_halves_budget() {
        let caps = DeviceCaps {
            max_texture_size: 16384,
            hardware_concurrency: Some(2),
            ..DeviceCaps::default()
        };
        assert_eq!(compute_budget(&caps), 8192.0 * 8192.0 / 2.0);
    }

    #[test]
    fn test_four_cores_is_not_penalized() {
        let caps = DeviceCaps {
            max_texture_size: 16384,
            hardware_concurrency: Some(4),
            ..DeviceCaps::default()
        };
        assert_eq!(compute_budget(&caps), 8192.0 * 8192.0);
    }

    #[test]
    fn test_mobile_penalty() {
        let caps = DeviceCaps {
            max_texture_size: 16384,
            is_mobile: true,
            ..DeviceCaps::default()
        };
        let expected = 8192.0 * 8192.0 / 1.5;
        assert!((compute_budget(&caps) - expected).abs() < 1e-6);
    }

    /// Low device memory is a hard ceiling on the result, not a divisor.
    #[test]
    fn test_low_memory_caps_result() {
        let caps = DeviceCaps {
            max_texture_size: 32768,
            device_memory_gb: Some(4.0),
            ..DeviceCaps::default()
        };
        assert_eq!(compute_budget(&caps), 4.0 * QualityTier::High.cost());
    }

    #[test]
    fn test_budget_never_drops_below_floor() {
        let caps = DeviceCaps {
            max_texture_size: 1024,
            hardware_concurrency: Some(1),
            device_memory_gb: Some(1.0),
            is_mobile: true,
        };
        assert_eq!(compute_budget(&caps), budget_floor());
    }

    /// Constrained device: 2 cores, mobile, 4 GB memory, 8192 max texture.
    /// All penalties push the raw result to (8192/2)²/2/1.5 ≈ 5.59M, below
    /// the floor of 2 × cost(High) = 33554432, which therefore wins.
    #[test]
    fn test_constrained_device_budget() {
        let caps = DeviceCaps {
            max_texture_size: 8192,
            hardware_concurrency: Some(2),
            device_memory_gb: Some(4.0),
            is_mobile: true,
        };
        let raw = (8192.0f64 / 2.0).powi(2) / 2.0 / 1.5;
        let capped = raw.min(4.0 * QualityTier::High.cost());
        let expected = capped.max(2.0 * QualityTier::High.cost());
        assert_eq!(expected, 33_554_432.0);
        assert_eq!(compute_budget(&caps), expected);
    }
}
