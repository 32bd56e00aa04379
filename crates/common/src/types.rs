use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Axis-aligned transform at `position` with the given extents.
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Self::default()
        }
    }

    /// Rotation about +Y by `heading` radians, matching the vehicle heading convention.
    pub fn with_heading(mut self, heading: f32) -> Self {
        self.rotation = Quat::from_rotation_y(heading);
        self
    }
}

/// Linear RGBA colour.
pub type Rgba = [f32; 4];

/// Convert a packed `0xRRGGBB` hex colour into an opaque [`Rgba`].
pub fn rgb_hex(hex: u32) -> Rgba {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}
