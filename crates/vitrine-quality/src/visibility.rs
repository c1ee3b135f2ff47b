//! Per-model visibility scoring: on-screen area, clipping, and the
//! distance/angle weight used to order downgrades.

use vitrine_math::{NdcRect, compose_chain, project_point};
use vitrine_scene::{Camera, QualityTarget};

/// Smallest distance weight, so very distant objects keep a nonzero
/// priority instead of being starved outright.
const MIN_DEPTH_MOD: f64 = 0.1;

/// Visibility assessment of one model for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    /// Fraction of the viewport the model's bounds could cover, `[0, 1]`.
    /// Drives tier selection.
    pub score: f64,
    /// True when no corner of the bounds is visible inside the frustum.
    pub clipped: bool,
    /// Distance from camera to bounds center, normalized by the far clip
    /// distance (not clamped upward).
    pub distance: f64,
    /// De-prioritization weight in `(0, 1]`: distance falloff times
    /// off-axis falloff. Orders who gets downgraded first under pressure,
    /// independent of size.
    pub weight: f64,
}

/// Assess a model's visibility through `camera`.
///
/// The world-space bounds are recomputed from the full transform chain on
/// every call; cached world matrices may not be authoritative yet while
/// the model is still loading. A corner counts toward the screen-space
/// rectangle only when its projected depth lies in `(near, 1)`; the model
/// is unclipped when at least one such corner also lands inside the unit
/// square. Degenerate bounds simply score zero.
pub fn assess<T: QualityTarget>(target: &T, camera: &Camera) -> Visibility {
    let world_transform = compose_chain(target.transform_path());
    let world_bounds = target.local_bounds().transformed(&world_transform);
    let view_projection = camera.view_projection_matrix();

    let mut rect = NdcRect::new();
    let mut clipped = true;
    for corner in world_bounds.corners() {
        let Some(ndc) = project_point(&view_projection, corner) else {
            continue;
        };
        if ndc.z > camera.near && ndc.z < 1.0 {
            rect.include(ndc.x, ndc.y);
            if ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 {
                clipped = false;
            }
        }
    }
    let score = rect.viewport_fraction() as f64;

    let to_center = world_bounds.center() - camera.position;
    let distance = (to_center.length() / camera.far) as f64;
    let depth_mod = (1.0 - distance).max(MIN_DEPTH_MOD);

    let angle = if to_center.length_squared() > 0.0 {
        to_center.angle_between(camera.forward()) as f64
    } else {
        0.0
    };
    let angle_mod = 1.0 - angle / std::f64::consts::PI;

    Visibility {
        score,
        clipped,
        distance,
        weight: depth_mod * angle_mod,
    }
}
