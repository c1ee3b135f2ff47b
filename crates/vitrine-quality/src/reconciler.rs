//! Budget reconciliation: bring the total cost of proposed quality tiers
//! under the texture budget by downgrading the lowest-priority models
//! first, then commit the surviving tiers under per-tick rate caps.

use std::cmp::Ordering;

use tracing::{debug, trace};
use vitrine_assets::QualityTier;
use vitrine_scene::QualityTarget;

use crate::selector::TierSelector;
use crate::visibility::Visibility;

/// Rate limits applied when committing reconciled tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Maximum tier commits that raise quality per tick.
    pub max_upgrades: usize,
    /// Maximum concurrent asset fetches; loads already pending at tick
    /// start count toward this.
    pub max_concurrent_loads: usize,
    /// Hard bound on downgrade passes within one reconciliation.
    pub max_passes: usize,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            max_upgrades: 2,
            max_concurrent_loads: 5,
            max_passes: 64,
        }
    }
}

/// What one reconciliation did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReconcileOutcome {
    /// Whether any committed tier differs from the model's previous tier.
    pub changed: bool,
    /// Committed tier raises this tick.
    pub upgrades: usize,
    /// Proposal downgrades of models the user could currently see
    /// (clipped models downgrade without bookkeeping).
    pub downgrades: usize,
    /// True when the final proposal set still exceeds the budget.
    pub over_budget: bool,
    /// Estimated total cost of the final proposals, in squared pixels.
    pub total_cost: f64,
}

/// Working state for one model during reconciliation.
struct Proposal {
    /// Index into the caller's target slice (discovery order).
    index: usize,
    /// Current working tier, starts at the upgrade-only desired tier.
    tier: QualityTier,
    /// Tier committed at tick start; seeds hysteresis so in-pass
    /// recomputation cannot oscillate.
    committed: QualityTier,
    /// Effective score; decays by `weight` each pass so low-priority
    /// models look progressively smaller to the selector.
    size: f64,
    weight: f64,
    clipped: bool,
}

/// Reconcile desired quality tiers against `budget` and commit the result.
///
/// Deterministic and single-threaded. Targets are proposed their
/// upgrade-only desired tier, then downgraded lowest-weight-first over
/// repeated passes until the estimated total fits the budget: the first
/// pass touches only clipped models, later passes touch everything, and
/// each new pass shrinks every model's effective score by its own weight.
/// When the budget is infeasible even with every model at the coarsest
/// tier the remaining overage is accepted, never an error.
///
/// Committed tiers are snapped to what each model's derivative set
/// actually offers. `visibility` must be index-aligned with `targets`.
pub fn reconcile<T: QualityTarget>(
    targets: &mut [T],
    visibility: &[Visibility],
    selector: &TierSelector,
    budget: f64,
    policy: &ReconcilePolicy,
) -> ReconcileOutcome {
    debug_assert_eq!(targets.len(), visibility.len());

    let mut proposals: Vec<Proposal> = targets
        .iter()
        .zip(visibility)
        .enumerate()
        .map(|(index, (target, vis))| {
            let committed = target.current_tier();
            Proposal {
                index,
                tier: selector.desired(vis.score, committed),
                committed,
                size: vis.score,
                weight: vis.weight,
                clipped: vis.clipped,
            }
        })
        .collect();

    // Lowest keep-priority first. The sort is stable, so equal weights
    // keep discovery order and results stay reproducible.
    proposals.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));

    let mut total: f64 = proposals.iter().map(|p| p.tier.cost()).sum();
    let mut downgrades = 0usize;
    let mut clipped_only = true;

    'passes: for pass in 0..policy.max_passes {
        if total <= budget {
            break;
        }
        let mut any_reducible = false;
        for proposal in proposals.iter_mut() {
            if total <= budget {
                break 'passes;
            }
            if clipped_only && !proposal.clipped {
                continue;
            }
            if proposal.tier == QualityTier::Thumb {
                // Already at the floor; nothing left to shed here.
                continue;
            }
            any_reducible = true;
            let recomputed = selector.select(proposal.size, proposal.committed);
            if recomputed < proposal.tier {
                total -= proposal.tier.cost() - recomputed.cost();
                if !proposal.clipped {
                    downgrades += 1;
                }
                trace!(
                    model = proposal.index,
                    from = ?proposal.tier,
                    to = ?recomputed,
                    "downgrading proposal"
                );
                proposal.tier = recomputed;
            }
        }
        if !clipped_only && !any_reducible {
            // Everything eligible sits at the floor tier already.
            debug!(pass, total, budget, "budget infeasible at floor tier");
            break;
        }
        // New pass: widen eligibility beyond clipped models and decay
        // every effective score by its own weight.
        clipped_only = false;
        for proposal in proposals.iter_mut() {
            proposal.size *= proposal.weight;
        }
    }

    // Commit highest-priority first so the most-looked-at models win the
    // limited upgrade slots. Stable again: ties keep discovery order.
    proposals.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    let mut in_flight = targets.iter().filter(|t| t.is_loading()).count();
    let mut upgrades = 0usize;
    let mut changed = false;
    for proposal in &proposals {
        let target = &mut targets[proposal.index];
        // Never request a tier with no backing asset.
        let actual = target.derivatives().nearest(proposal.tier);
        if actual == proposal.committed {
            continue;
        }
        if in_flight >= policy.max_concurrent_loads {
            continue;
        }
        if actual > proposal.committed {
            if upgrades >= policy.max_upgrades {
                continue;
            }
            upgrades += 1;
        }
        if !target.is_loading() {
            in_flight += 1;
        }
        trace!(model = proposal.index, tier = ?actual, "committing tier");
        target.set_tier(actual);
        changed = true;
    }

    let over_budget = total > budget;
    if over_budget {
        debug!(total, budget, "accepting over-budget steady state");
    }
    ReconcileOutcome {
        changed,
        upgrades,
        downgrades,
        over_budget,
        total_cost: total,
    }
}
