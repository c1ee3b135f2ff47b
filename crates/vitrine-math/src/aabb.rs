use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box in f32 model or world space.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the 8 corner points of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// Returns true if the AABB has zero extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y || self.min.z == self.max.z
    }

    /// Returns the AABB enclosing this box after applying `transform`.
    ///
    /// Transforms all 8 corners and re-boxes the result, so the output
    /// stays axis-aligned under rotation (it may grow, never shrink).
    pub fn transformed(&self, transform: &Mat4) -> Aabb {
        let corners = self.corners();
        let first = transform.transform_point3(corners[0]);
        let mut result = Aabb {
            min: first,
            max: first,
        };
        for corner in &corners[1..] {
            let p = transform.transform_point3(*corner);
            result.min = result.min.min(p);
            result.max = result.max.max(p);
        }
        result
    }
}

/// Compose a transform chain (root ancestor first, leaf last) into a single
/// local-to-world matrix.
///
/// Callers pass the full ancestry every time rather than a cached world
/// matrix; world matrices may not be authoritative yet while a model is
/// still loading asynchronously.
pub fn compose_chain(chain: &[Mat4]) -> Mat4 {
    chain
        .iter()
        .fold(Mat4::IDENTITY, |world, local| world * *local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_auto_sorts() {
        let aabb = Aabb::new(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO);
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_center_and_size() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 6.0, 8.0));
        assert_eq!(aabb.center(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn test_corners_cover_extremes() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let corners = aabb.corners();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&Vec3::ZERO));
        assert!(corners.contains(&Vec3::ONE));
    }

    #[test]
    fn test_is_degenerate() {
        let flat = Aabb::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(10.0, 10.0, 5.0));
        assert!(flat.is_degenerate());
        let solid = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(!solid.is_degenerate());
    }

    #[test]
    fn test_point_box_is_degenerate() {
        let point = Aabb::new(Vec3::splat(3.0), Vec3::splat(3.0));
        assert!(point.is_degenerate());
        assert_eq!(point.size(), Vec3::ZERO);
    }

    #[test]
    fn test_transformed_translation() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let moved = aabb.transformed(&Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.max, Vec3::new(6.0, 1.0, 1.0));
    }

    /// A rotated box stays axis-aligned by growing to enclose the rotation.
    #[test]
    fn test_transformed_rotation_grows() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let rotated = aabb.transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        // A unit cube rotated 45 degrees around Y spans sqrt(2) on X and Z.
        let expected = std::f32::consts::SQRT_2;
        assert!((rotated.max.x - expected).abs() < 1e-5);
        assert!((rotated.max.z - expected).abs() < 1e-5);
        assert!((rotated.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_compose_chain_order() {
        // Parent scales by 2, child translates by (1, 0, 0).
        // World = parent * child, so the translation is scaled.
        let chain = [
            Mat4::from_scale(Vec3::splat(2.0)),
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
        ];
        let world = compose_chain(&chain);
        let p = world.transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_compose_empty_chain_is_identity() {
        assert_eq!(compose_chain(&[]), Mat4::IDENTITY);
    }
}
