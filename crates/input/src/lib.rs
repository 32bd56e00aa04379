//! Driving input: keyboard state mapped to four logical controls.
//!
//! # Invariants
//! - Input state is an explicit value threaded into the integrator, never a global.
//! - Bindings are fixed; arrow keys and WASD drive the same controls.

pub mod control;
pub mod keyboard;

pub use control::{Control, ControlParseError, InputState};
pub use keyboard::{Key, Keyboard};
