use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking down -Z at the origin.
///
/// Only the distance along Z changes at runtime (the camera retreats as the
/// scene grows), so the view is a pure translation.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height of the output buffer.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, near: f32, far: f32, distance: f32) -> Self {
        let mut camera = Self {
            fov_deg,
            aspect: 1.0,
            near,
            far,
            position: Vec3::new(0.0, 0.0, distance),
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Set the aspect ratio from output dimensions. Zero heights are treated as 1.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width.max(1.0) / height.max(1.0);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.position.z = distance;
    }

    pub fn distance(&self) -> f32 {
        self.position.z
    }

    /// Recompute the projection after fov/aspect/near/far changes.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// World-space width and height visible on a plane `depth` units in front of the camera.
    pub fn visible_extent(&self, depth: f32) -> Vec2 {
        let height = 2.0 * (self.fov_deg.to_radians() / 2.0).tan() * depth;
        Vec2::new(height * self.aspect, height)
    }

    /// Map a viewport-normalised point ([-1, 1], Y up) onto the z = 0 plane.
    pub fn ndc_to_world_plane(&self, ndc: Vec2) -> Vec2 {
        ndc * self.visible_extent(self.position.z) / 2.0
    }
}
