//! Rendering Adapter: renderer-agnostic scene layout and frame interface.
//!
//! # Invariants
//! - Renderers cannot mutate vehicle state directly.
//! - Render output derives from the scene layout and one frame snapshot.
//! - Every tick ends in a render call, whether or not the vehicle is loaded.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, Renderer, run_frame};
pub use scene::{
    AmbientLight, DirectionalLight, HemisphereLight, ItemKind, Lighting, SceneItem, SceneLayout,
};
