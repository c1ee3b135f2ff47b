//! Perspective camera producing view and projection matrices.

use glam::{Mat4, Quat, Vec3};

/// A perspective camera in world space.
///
/// Uses a standard 0..1 depth projection: the visibility scorer's depth
/// window is defined on projected z in `(near, 1)`, which requires the
/// conventional depth direction rather than reverse-Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Camera {
    /// Create a camera at `position` with the given projection parameters,
    /// looking down -Z.
    pub fn new(position: Vec3, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation);
        let translation_matrix = Mat4::from_translation(self.position);
        // View = inverse(Translation * Rotation)
        (translation_matrix * rotation_matrix).inverse()
    }

    /// Compute the perspective projection matrix (0..1 depth).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotate the camera in place to look at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() > 0.0 {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, direction.normalize());
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0)
    }

    #[test]
    fn test_default_forward_is_neg_z() {
        let camera = test_camera();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = test_camera();
        let vp = camera.view_projection_matrix();
        let clip = vp * Vec3::new(0.0, 0.0, -10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_look_at_turns_toward_target() {
        let mut camera = test_camera();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);
        let forward = camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);

        camera.look_at(Vec3::new(10.0, 0.0, 5.0));
        assert!((camera.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = test_camera();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
