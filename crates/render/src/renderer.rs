use laneway_kernel::{FrameDriver, FrameSnapshot};

use crate::scene::SceneLayout;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and one frame snapshot, then produces
/// output. It never mutates vehicle state; the frame driver owns it.
pub trait Renderer<V> {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, scene: &SceneLayout, frame: &FrameSnapshot<'_, V>) -> Self::Output;
}

/// Advance `driver` by one tick and hand the result to `renderer`.
///
/// The render call is unconditional: while the vehicle is pending the
/// renderer still receives the (unchanged) initial frame.
pub fn run_frame<V, R: Renderer<V>>(
    driver: &mut FrameDriver<V>,
    scene: &SceneLayout,
    renderer: &R,
) -> R::Output {
    let frame = driver.tick();
    renderer.render(scene, &frame)
}

/// Debug text renderer for the CLI and tests.
///
/// Produces a human-readable summary of one frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl<V> Renderer<V> for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneLayout, frame: &FrameSnapshot<'_, V>) -> String {
        let status = if frame.vehicle.is_some() {
            "ready"
        } else {
            "pending"
        };
        let p = frame.pose.position;
        let eye = frame.camera.eye;
        let target = frame.camera.target;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (vehicle: {status}) ===\n",
            frame.frame
        ));
        out.push_str(&format!(
            "Vehicle: pos=({:.3}, {:.3}, {:.3}) heading={:.3} speed={:.5}\n",
            p.x, p.y, p.z, frame.pose.heading, frame.pose.speed
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})\n",
            eye.x, eye.y, eye.z, target.x, target.y, target.z
        ));
        out.push_str(&format!(
            "Scene: {} items, sky=#{:06x}\n",
            scene.items.len(),
            scene.sky_hex
        ));
        out
    }
}
