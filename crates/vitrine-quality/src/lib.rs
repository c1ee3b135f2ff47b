//! Dynamic derivative quality control: decides, once per gated rendering
//! tick, which texture-resolution tier of each visible model to stream,
//! under a global texture-memory budget.
//!
//! Four cooperating pieces:
//!
//! - [`compute_budget`] derives the budget from device capability signals.
//! - [`assess`] scores each model's on-screen visibility.
//! - [`TierSelector`] maps a visibility score to a quality tier through a
//!   monotone step function with hysteresis.
//! - [`reconcile`] downgrades the lowest-priority models until the total
//!   estimated cost fits the budget, then commits tiers under per-tick
//!   upgrade and loading-concurrency caps.
//!
//! [`QualityController`] ties them together behind a per-frame
//! [`QualityController::evaluate`] call.

mod budget;
mod controller;
mod options;
mod reconciler;
mod selector;
mod visibility;

pub use budget::{DeviceCaps, budget_floor, compute_budget};
pub use controller::{QualityController, QualityDiagnostics};
pub use options::QualityOptions;
pub use reconciler::{ReconcileOutcome, ReconcilePolicy, reconcile};
pub use selector::{TierSelector, TierStep};
pub use visibility::{Visibility, assess};
