use glam::Vec3;
use laneway_common::{CameraConfig, DriveConfig};
use serde::{Deserialize, Serialize};

use crate::pose::VehiclePose;

/// Camera eye and the point it looks at.
///
/// Up-vector handling is left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Camera at `eye` looking down -Z.
    pub fn looking_down_road(eye: Vec3) -> Self {
        Self {
            eye,
            target: eye - Vec3::Z,
        }
    }

    /// Camera used before the vehicle is ready.
    pub fn initial(config: &DriveConfig) -> Self {
        Self::looking_down_road(config.initial_camera_eye())
    }

    /// Normalized view direction.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

/// Chase camera: a camera pose derived entirely from the vehicle pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    pub follow_distance: f32,
    pub height: f32,
}

impl ChaseCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            follow_distance: config.follow_distance,
            height: config.height,
        }
    }

    /// Place the camera `follow_distance` behind the vehicle at a fixed
    /// height, looking at the vehicle.
    pub fn follow(&self, pose: &VehiclePose) -> CameraPose {
        let mut eye = pose.position - pose.forward() * self.follow_distance;
        eye.y = self.height;
        CameraPose {
            eye,
            target: pose.position,
        }
    }
}
