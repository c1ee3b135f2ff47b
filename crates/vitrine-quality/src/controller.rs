//! The per-tick entry point tying budget, visibility, selection, and
//! reconciliation together behind a debounced `evaluate()` call.

use tracing::{debug, info};
use vitrine_assets::QualityTier;
use vitrine_scene::{QualityTarget, Scene};

use crate::budget::{DeviceCaps, compute_budget};
use crate::options::QualityOptions;
use crate::reconciler::{ReconcilePolicy, reconcile};
use crate::selector::TierSelector;
use crate::visibility::{Visibility, assess};

/// Read-only counters from the most recent gated evaluation.
///
/// Diagnostic only; nothing in the functional contract depends on these.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QualityDiagnostics {
    /// Committed-tier histogram, indexed by [`QualityTier::index`].
    pub tier_counts: [usize; QualityTier::ALL.len()],
    /// Models with no corner visible in the frustum.
    pub clipped: usize,
    /// Models with a zero visibility score.
    pub hidden: usize,
    /// Whether the last reconciliation ended over budget.
    pub over_budget: bool,
    /// Estimated total cost after the last reconciliation.
    pub total_cost: f64,
    /// Budget in effect, in squared pixels.
    pub budget: f64,
}

impl QualityDiagnostics {
    /// How many models currently hold `tier`.
    pub fn count(&self, tier: QualityTier) -> usize {
        self.tier_counts[tier.index()]
    }
}

/// Decides, on a gated per-frame cadence, which quality tier every visible
/// model should stream.
///
/// Holds no references into the scene: models are discovered fresh each
/// gated tick through the [`Scene`] trait, and the only cross-tick state
/// is the debounce counter, the cached budget, and diagnostics.
pub struct QualityController {
    selector: TierSelector,
    policy: ReconcilePolicy,
    debounce_frames: u32,
    device_caps: DeviceCaps,
    budget: f64,
    enabled: bool,
    frames_until_eval: u32,
    diagnostics: QualityDiagnostics,
}

impl Default for QualityController {
    fn default() -> Self {
        Self::new(QualityOptions::default())
    }
}

impl QualityController {
    /// Create a controller with a budget seeded from default device caps.
    ///
    /// # Panics
    ///
    /// Panics if `options` describe an invalid selector, see
    /// [`TierSelector::new`].
    pub fn new(options: QualityOptions) -> Self {
        Self::with_device_caps(options, DeviceCaps::default())
    }

    /// Create a controller with an explicit capability probe result.
    pub fn with_device_caps(options: QualityOptions, caps: DeviceCaps) -> Self {
        let budget = compute_budget(&caps);
        Self {
            selector: options.selector(),
            policy: options.policy(),
            debounce_frames: options.debounce_frames.max(1),
            device_caps: caps,
            budget,
            enabled: true,
            frames_until_eval: 1,
            diagnostics: QualityDiagnostics::default(),
        }
    }

    /// Re-derive the budget after the renderer's capability output
    /// changed. Re-arms evaluation for the next frame.
    pub fn device_caps_changed(&mut self, caps: DeviceCaps) {
        self.budget = compute_budget(&caps);
        info!(budget = self.budget, "texture budget recomputed");
        self.device_caps = caps;
        self.frames_until_eval = 1;
    }

    /// Turn evaluation on or off; disabled ticks are no-ops.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether evaluation is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The active budget in squared pixels.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// The capability signals the budget was derived from.
    pub fn device_caps(&self) -> &DeviceCaps {
        &self.device_caps
    }

    /// Counters from the most recent gated evaluation.
    pub fn diagnostics(&self) -> &QualityDiagnostics {
        &self.diagnostics
    }

    /// Per-frame tick. Returns whether any committed tier changed.
    ///
    /// Runs the full scoring/selection/reconciliation pipeline only every
    /// `debounce_frames` calls; a tick that changed something re-arms the
    /// next evaluation immediately so bursts of change settle quickly.
    /// A missing camera is a silent no-op, never an error.
    pub fn evaluate<S: Scene>(&mut self, scene: &mut S) -> bool {
        if !self.enabled {
            return false;
        }
        if self.frames_until_eval > 1 {
            self.frames_until_eval -= 1;
            return false;
        }
        let Some(camera) = scene.active_camera() else {
            return false;
        };

        let targets = scene.visible_targets_mut();
        let visibility: Vec<Visibility> =
            targets.iter().map(|t| assess(t, &camera)).collect();
        let outcome = reconcile(
            targets,
            &visibility,
            &self.selector,
            self.budget,
            &self.policy,
        );

        let mut diagnostics = QualityDiagnostics {
            over_budget: outcome.over_budget,
            total_cost: outcome.total_cost,
            budget: self.budget,
            ..QualityDiagnostics::default()
        };
        for target in targets.iter() {
            diagnostics.tier_counts[target.current_tier().index()] += 1;
        }
        for vis in &visibility {
            if vis.clipped {
                diagnostics.clipped += 1;
            }
            if vis.score == 0.0 {
                diagnostics.hidden += 1;
            }
        }
        self.diagnostics = diagnostics;

        debug!(
            changed = outcome.changed,
            upgrades = outcome.upgrades,
            downgrades = outcome.downgrades,
            over_budget = outcome.over_budget,
            "quality evaluation"
        );

        self.frames_until_eval = if outcome.changed {
            1
        } else {
            self.debounce_frames
        };
        outcome.changed
    }
}
