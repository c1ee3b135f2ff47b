//! Projection of world-space points into normalized device coordinates and
//! accumulation of screen-space bounding rectangles.

use glam::{Mat4, Vec3};

/// Project a world-space point through a view-projection matrix into NDC.
///
/// Returns `None` when the point sits on the camera plane (w ≈ 0), where
/// the perspective divide is undefined.
pub fn project_point(view_projection: &Mat4, point: Vec3) -> Option<Vec3> {
    let clip = *view_projection * point.extend(1.0);
    if clip.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(clip.truncate() / clip.w)
}

/// Accumulates an axis-aligned rectangle in NDC x/y space.
///
/// Starts empty; points outside the unit square still grow the rectangle,
/// which is clamped to `[-1, 1]` only when the covered viewport fraction is
/// computed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NdcRect {
    bounds: Option<[f32; 4]>, // min_x, min_y, max_x, max_y
}

impl NdcRect {
    /// An empty rectangle covering nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the rectangle to include an NDC x/y point.
    pub fn include(&mut self, x: f32, y: f32) {
        self.bounds = Some(match self.bounds {
            None => [x, y, x, y],
            Some([min_x, min_y, max_x, max_y]) => {
                [min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)]
            }
        });
    }

    /// Whether any point has been included.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Fraction of the viewport covered by the rectangle, in `[0, 1]`.
    ///
    /// The rectangle is clamped to the `[-1, 1]` unit square first; NDC
    /// spans 2 units per axis, so the full square maps to 1.0.
    pub fn viewport_fraction(&self) -> f32 {
        let Some([min_x, min_y, max_x, max_y]) = self.bounds else {
            return 0.0;
        };
        let width = max_x.clamp(-1.0, 1.0) - min_x.clamp(-1.0, 1.0);
        let height = max_y.clamp(-1.0, 1.0) - min_y.clamp(-1.0, 1.0);
        (width * height) / 4.0
    }
}
