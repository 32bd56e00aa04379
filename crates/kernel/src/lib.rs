//! Driving kernel: vehicle motion integration, chase camera, per-frame driver.
//!
//! # Invariants
//! - A motion step is pure with respect to `(pose, input)` and fixed constants.
//! - After every step the vehicle's x lies within the road's lateral limits.
//! - The camera carries no state of its own; it is derived from the pose.
//! - Kernel ticks are counted per call, never from wall-clock time.

pub mod camera;
pub mod driver;
pub mod motion;
pub mod pose;
pub mod slot;

pub use camera::{CameraPose, ChaseCamera};
pub use driver::{FrameDriver, FrameSnapshot};
pub use motion::MotionIntegrator;
pub use pose::{VehiclePose, forward};
pub use slot::{AssetSlot, Never, PendingAsset};
