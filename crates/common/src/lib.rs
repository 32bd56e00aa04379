//! Shared types and configuration for the laneway driving demo.
//!
//! # Invariants
//! - Configuration is validated once at load; consumers trust it afterwards.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, DriveConfig, MotionConfig, RoadConfig, SceneConfig, VehicleConfig,
};
pub use types::{Rgba, Transform, rgb_hex};
