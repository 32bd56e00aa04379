use glam::Vec3;
use laneway_common::Transform;
use serde::{Deserialize, Serialize};

/// Position, heading and signed speed of the vehicle.
///
/// Speed is in world units per tick. Heading is in radians, with 0 facing +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehiclePose {
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
}

impl VehiclePose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Unit vector the vehicle faces.
    pub fn forward(&self) -> Vec3 {
        forward(self.heading)
    }

    /// World transform of the vehicle body, scaled uniformly by `scale`.
    pub fn transform(&self, scale: f32) -> Transform {
        Transform::from_position_scale(self.position, Vec3::splat(scale)).with_heading(self.heading)
    }
}

/// Forward direction in the ground plane for `heading`: `(sin h, 0, cos h)`.
pub fn forward(heading: f32) -> Vec3 {
    let (sin, cos) = heading.sin_cos();
    Vec3::new(sin, 0.0, cos)
}
