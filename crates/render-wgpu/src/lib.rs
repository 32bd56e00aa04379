//! wgpu render backend for the driving demo.
//!
//! Draws the scene layout and the vehicle as lit, instanced boxes. The
//! camera pose comes from the frame driver; this crate only owns the
//! projection.
//!
//! # Invariants
//! - Renderer never mutates vehicle state.
//! - Projection aspect tracks the surface size.

mod camera;
mod gpu;
mod shaders;

pub use camera::CameraProjection;
pub use gpu::{GpuFrame, WgpuRenderer};
