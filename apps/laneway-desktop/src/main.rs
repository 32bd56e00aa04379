use anyhow::{Context, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use laneway_assets::{VehicleModel, spawn_load};
use laneway_common::DriveConfig;
use laneway_input::{Key, Keyboard};
use laneway_kernel::FrameDriver;
use laneway_render::{SceneLayout, run_frame};
use laneway_render_wgpu::{CameraProjection, GpuFrame, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const INITIAL_SIZE: (u32, u32) = (1280, 720);

#[derive(Parser)]
#[command(name = "laneway-desktop", about = "Drive a car down a road")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vehicle model (.glb or .gltf); overrides the configured path
    #[arg(short, long)]
    model: Option<String>,
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        KeyCode::ArrowLeft => Some(Key::ArrowLeft),
        KeyCode::ArrowRight => Some(Key::ArrowRight),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        _ => None,
    }
}

/// Application state.
struct AppState {
    driver: FrameDriver<VehicleModel>,
    scene: SceneLayout,
    projection: CameraProjection,
    keyboard: Keyboard,
    model_path: String,
    show_hud: bool,
}

impl AppState {
    fn new(config: &DriveConfig) -> Self {
        let model_path = config.vehicle.model_path.clone();
        tracing::info!(path = %model_path, "loading vehicle model");
        let vehicle = spawn_load(&model_path);

        Self {
            driver: FrameDriver::loading(config, vehicle),
            scene: SceneLayout::build(config),
            projection: CameraProjection::new(&config.camera, INITIAL_SIZE.0, INITIAL_SIZE.1),
            keyboard: Keyboard::new(),
            model_path,
            show_hud: true,
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = map_key(code) {
            self.keyboard.apply(key, pressed, self.driver.input_mut());
            return;
        }
        if pressed && code == KeyCode::F1 {
            self.show_hud = !self.show_hud;
        }
    }

    fn release_keys(&mut self) {
        self.keyboard.release_all(self.driver.input_mut());
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let pose = self.driver.pose();
        egui::Window::new("laneway")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frame: {}", self.driver.frame()));
                match self.driver.vehicle() {
                    Some(model) => ui.label(format!(
                        "Vehicle: {} ({} meshes)",
                        model.name, model.mesh_count
                    )),
                    None => ui.label(format!("Vehicle: loading {}", self.model_path)),
                };
                ui.separator();
                ui.label(format!("Speed: {:.4}", pose.speed));
                ui.label(format!("Heading: {:.1} deg", pose.heading.to_degrees()));
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    pose.position.x, pose.position.y, pose.position.z
                ));
                let held: Vec<&str> = self.driver.input().held().map(|c| c.name()).collect();
                ui.label(format!("Input: {}", held.join(", ")));
                ui.separator();
                ui.small("Arrows/WASD: drive | F1: toggle HUD");
            });
    }
}

/// Window, surface and GPU resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("laneway")
            .with_inner_size(PhysicalSize::new(INITIAL_SIZE.0, INITIAL_SIZE.1));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("laneway_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw_egui(&mut self, egui_ctx: &EguiContext, view: &wgpu::TextureView, state: &AppState) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &DriveConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let state = &mut self.state;
        run_frame(
            &mut state.driver,
            &state.scene,
            &GpuFrame {
                renderer: &gpu.renderer,
                device: &gpu.device,
                queue: &gpu.queue,
                target: &view,
                projection: &state.projection,
            },
        );

        gpu.draw_egui(&self.egui_ctx, &view, &self.state);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                self.state
                    .projection
                    .resize(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.state
                        .projection
                        .resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.release_keys();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => DriveConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DriveConfig::default(),
    };
    if let Some(model) = cli.model {
        config.vehicle.model_path = model;
    }

    tracing::info!("laneway-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use laneway_input::Control;

    #[test]
    fn driving_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::ArrowLeft));
        assert_eq!(map_key(KeyCode::F1), None);
        assert_eq!(map_key(KeyCode::Space), None);
    }

    #[test]
    fn key_events_reach_driver_input() {
        let mut config = DriveConfig::default();
        config.vehicle.model_path = "/nonexistent/car.glb".into();
        let mut state = AppState::new(&config);

        state.handle_key(KeyCode::ArrowUp, true);
        state.handle_key(KeyCode::KeyA, true);
        assert!(state.driver.input().is_pressed(Control::Accelerate));
        assert!(state.driver.input().is_pressed(Control::SteerLeft));

        state.release_keys();
        assert_eq!(state.driver.input().held().count(), 0);
    }

    #[test]
    fn f1_toggles_hud() {
        let mut config = DriveConfig::default();
        config.vehicle.model_path = "/nonexistent/car.glb".into();
        let mut state = AppState::new(&config);
        assert!(state.show_hud);
        state.handle_key(KeyCode::F1, true);
        assert!(!state.show_hud);
        state.handle_key(KeyCode::F1, false);
        assert!(!state.show_hud);
    }
}
