use glam::{Mat4, Vec3};
use laneway_common::CameraConfig;
use laneway_kernel::CameraPose;

/// Perspective projection for the chase camera.
///
/// The camera pose itself comes from the frame driver each tick; this only
/// holds the lens and the viewport aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjection {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), 16, 9)
    }
}

impl CameraProjection {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self {
            fov: config.fov_degrees.to_radians(),
            aspect: aspect(width, height),
            near: config.near,
            far: config.far,
        }
    }

    /// Recompute the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }

    pub fn view_matrix(pose: &CameraPose) -> Mat4 {
        Mat4::look_at_rh(pose.eye, pose.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.projection_matrix() * Self::view_matrix(pose)
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use laneway_common::DriveConfig;
    use laneway_kernel::{ChaseCamera, VehiclePose};

    #[test]
    fn default_projection() {
        let proj = CameraProjection::default();
        assert!((proj.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert!((proj.aspect - 16.0 / 9.0).abs() < 1e-6);
        let vp = proj.view_projection(&CameraPose::initial(&DriveConfig::default()));
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut proj = CameraProjection::default();
        proj.resize(800, 800);
        assert_eq!(proj.aspect, 1.0);
        proj.resize(1024, 0);
        assert_eq!(proj.aspect, 1024.0);
    }

    #[test]
    fn followed_vehicle_is_centred() {
        let config = DriveConfig::default();
        let pose = VehiclePose {
            position: Vec3::new(2.0, 0.05, -40.0),
            heading: 0.6,
            speed: 0.05,
        };
        let cam = ChaseCamera::new(&config.camera).follow(&pose);
        let proj = CameraProjection::new(&config.camera, 1280, 720);
        let clip = proj.view_projection(&cam) * pose.position.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
