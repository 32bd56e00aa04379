//! Driving configuration.
//!
//! Every tunable constant of the demo lives here so the motion integrator,
//! the chase camera and the scene builder never carry hidden literals.
//! Sections deserialize independently with `#[serde(default)]`, so a YAML
//! file only needs the values it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a [`DriveConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Per-tick motion constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Speed added (or removed when braking) per tick of held input.
    pub accel_step: f32,
    /// Heading change in radians per tick of held steering.
    pub turn_step: f32,
    /// Multiplicative speed decay applied every tick. Must lie in (0, 1).
    pub damping_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            accel_step: 0.002,
            turn_step: 0.03,
            damping_factor: 0.98,
        }
    }
}

impl MotionConfig {
    /// Speed reached under sustained acceleration.
    ///
    /// The step adds `accel_step` before damping, so the fixed point of
    /// `s = (s + a) * d` is `a * d / (1 - d)`.
    pub fn terminal_speed(&self) -> f32 {
        self.accel_step * self.damping_factor / (1.0 - self.damping_factor)
    }
}

/// Road geometry and the lateral clamp derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub half_width: f32,
    pub length: f32,
    /// Distance kept between the vehicle centre and the road edge.
    pub margin: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            half_width: 5.0,
            length: 200.0,
            margin: 0.5,
        }
    }
}

impl RoadConfig {
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Inclusive `(min, max)` range for the vehicle's x coordinate.
    ///
    /// Collapses to `(0, 0)` when the margin leaves no drivable width.
    pub fn lateral_limits(&self) -> (f32, f32) {
        let limit = (self.half_width - self.margin).max(0.0);
        (-limit, limit)
    }
}

/// Chase camera and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub follow_distance: f32,
    /// Fixed camera height while following; the vehicle's own y is ignored.
    pub height: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Height of the camera before the vehicle is ready.
    pub initial_height: f32,
    /// Distance of the initial camera from the road's near end.
    pub initial_offset: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 8.0,
            height: 4.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 500.0,
            initial_height: 5.0,
            initial_offset: 15.0,
        }
    }
}

/// Vehicle model and start placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub model_path: String,
    /// Uniform scale applied to the imported model.
    pub scale: f32,
    pub ride_height: f32,
    /// Distance of the start position from the road's near end.
    pub start_offset: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            model_path: "car.glb".into(),
            scale: 0.1,
            ride_height: 0.05,
            start_offset: 5.0,
        }
    }
}

/// Static scenery dimensions and colours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Background colour as `0xRRGGBB`.
    pub sky_color: u32,
    pub grass_size: f32,
    pub marking_width: f32,
    pub marking_length: f32,
    pub marking_spacing: f32,
    /// Offset of the first lane marking from the road's near end.
    pub marking_start_offset: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sky_color: 0x87ceeb,
            grass_size: 400.0,
            marking_width: 0.3,
            marking_length: 4.0,
            marking_spacing: 10.0,
            marking_start_offset: 2.0,
        }
    }
}

/// Complete configuration of the driving demo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub motion: MotionConfig,
    pub road: RoadConfig,
    pub camera: CameraConfig,
    pub vehicle: VehicleConfig,
    pub scene: SceneConfig,
}

impl DriveConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded drive config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Where the vehicle sits on its first frame.
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(
            0.0,
            self.vehicle.ride_height,
            -self.road.length / 2.0 + self.vehicle.start_offset,
        )
    }

    /// Camera eye used until the vehicle is ready.
    pub fn initial_camera_eye(&self) -> Vec3 {
        Vec3::new(
            0.0,
            self.camera.initial_height,
            -self.road.length / 2.0 + self.camera.initial_offset,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        if !(m.damping_factor > 0.0 && m.damping_factor < 1.0) {
            return Err(invalid(
                "motion.damping_factor",
                format!("{} is outside (0, 1)", m.damping_factor),
            ));
        }
        require_positive("motion.accel_step", m.accel_step)?;
        require_positive("motion.turn_step", m.turn_step)?;

        let r = &self.road;
        require_positive("road.half_width", r.half_width)?;
        require_positive("road.length", r.length)?;
        if !(r.margin >= 0.0 && r.margin < r.half_width) {
            return Err(invalid(
                "road.margin",
                format!("{} must be in [0, half_width={})", r.margin, r.half_width),
            ));
        }

        let c = &self.camera;
        require_positive("camera.follow_distance", c.follow_distance)?;
        require_positive("camera.near", c.near)?;
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_degrees",
                format!("{} is outside (0, 180)", c.fov_degrees),
            ));
        }
        require_finite("camera.height", c.height)?;
        require_finite("camera.initial_height", c.initial_height)?;
        require_finite("camera.initial_offset", c.initial_offset)?;
        if !(c.far > c.near) {
            return Err(invalid(
                "camera.far",
                format!("{} must exceed near={}", c.far, c.near),
            ));
        }

        require_positive("vehicle.scale", self.vehicle.scale)?;
        require_finite("vehicle.ride_height", self.vehicle.ride_height)?;
        require_finite("vehicle.start_offset", self.vehicle.start_offset)?;
        require_positive("scene.marking_spacing", self.scene.marking_spacing)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = DriveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.road.lateral_limits(), (-4.5, 4.5));
        assert_eq!(config.road.width(), 10.0);
    }

    #[test]
    fn start_and_initial_camera_follow_road_length() {
        let config = DriveConfig::default();
        assert_eq!(config.start_position(), Vec3::new(0.0, 0.05, -95.0));
        assert_eq!(config.initial_camera_eye(), Vec3::new(0.0, 5.0, -85.0));
    }

    #[test]
    fn terminal_speed_is_update_fixed_point() {
        let m = MotionConfig::default();
        let s = m.terminal_speed();
        assert!(((s + m.accel_step) * m.damping_factor - s).abs() < 1e-6);
        assert!((s - 0.098).abs() < 1e-5);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = DriveConfig::from_yaml_str(
            "motion:\n  accel_step: 0.004\nroad:\n  half_width: 8.0\n",
        )
        .unwrap();
        assert_eq!(config.motion.accel_step, 0.004);
        assert_eq!(config.motion.turn_step, 0.03);
        assert_eq!(config.road.half_width, 8.0);
        assert_eq!(config.road.margin, 0.5);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        let config = DriveConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, DriveConfig::default());
    }

    #[test]
    fn rejects_damping_out_of_range() {
        let err = DriveConfig::from_yaml_str("motion:\n  damping_factor: 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "motion.damping_factor",
                ..
            }
        ));
    }

    #[test]
    fn rejects_margin_wider_than_road() {
        let err =
            DriveConfig::from_yaml_str("road:\n  half_width: 1.0\n  margin: 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "road.margin", .. }));
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let err = DriveConfig::from_yaml_str("camera:\n  near: 10.0\n  far: 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.far", .. }));
    }

    #[test]
    fn rejects_nan_far_plane() {
        let err = DriveConfig::from_yaml_str("camera:\n  far: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.far", .. }));
    }

    #[test]
    fn rejects_non_finite_heights() {
        for (yaml, field) in [
            ("camera:\n  height: .nan\n", "camera.height"),
            ("camera:\n  initial_height: .inf\n", "camera.initial_height"),
            ("vehicle:\n  ride_height: .nan\n", "vehicle.ride_height"),
        ] {
            let err = DriveConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: f, .. } if f == field),
                "{yaml}: {err}"
            );
        }
    }

    #[test]
    fn lateral_limits_collapse_on_narrow_road() {
        let road = RoadConfig {
            half_width: 0.3,
            margin: 0.5,
            ..RoadConfig::default()
        };
        assert_eq!(road.lateral_limits(), (-0.0, 0.0));
        assert_eq!(RoadConfig::default().lateral_limits(), (-4.5, 4.5));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = DriveConfig::from_yaml_str("motion: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "camera:\n  follow_distance: 12.0").unwrap();
        let config = DriveConfig::load(file.path()).unwrap();
        assert_eq!(config.camera.follow_distance, 12.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DriveConfig::load("/nonexistent/laneway.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn yaml_round_trip_preserves_values() {
        let mut config = DriveConfig::default();
        config.vehicle.model_path = "models/van.glb".into();
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(DriveConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
