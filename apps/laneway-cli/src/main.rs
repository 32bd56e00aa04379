use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use laneway_assets::import_model;
use laneway_common::DriveConfig;
use laneway_input::{Control, InputState};
use laneway_kernel::{FrameDriver, PendingAsset};
use laneway_render::{DebugTextRenderer, SceneLayout, run_frame};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "laneway-cli", about = "Headless tooling for the laneway driving demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default tuning
    Info,
    /// Drive the vehicle for a number of ticks without a window
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Controls held for the whole run (accelerate, brake, steer-left, steer-right)
        #[arg(long = "hold", value_name = "CONTROL")]
        hold: Vec<Control>,
        /// Ticks during which the vehicle is still loading
        #[arg(long, default_value = "0")]
        pending_ticks: u64,
        /// Print a frame every N ticks
        #[arg(long, default_value = "10")]
        every: u64,
        /// Import this model and drive it instead of a placeholder
        #[arg(long)]
        model: Option<PathBuf>,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    Config {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Import a .glb or .gltf model and print its summary
    InspectModel {
        /// Model file
        path: PathBuf,
    },
}

/// Stand-in for the background loader: yields its value after a fixed
/// number of polls.
struct Delayed<T> {
    remaining: u64,
    value: Option<T>,
}

impl<T> Delayed<T> {
    fn new(polls: u64, value: T) -> Self {
        Self {
            remaining: polls,
            value: Some(value),
        }
    }
}

impl<T> PendingAsset<T> for Delayed<T> {
    fn poll_ready(&mut self) -> Option<T> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return None;
        }
        self.value.take()
    }
}

fn load_config(path: Option<&Path>) -> Result<DriveConfig> {
    match path {
        Some(path) => {
            DriveConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(DriveConfig::default()),
    }
}

struct SimulateOptions {
    ticks: u64,
    pending_ticks: u64,
    every: u64,
}

/// Run the frame driver headless and collect the printed frames.
fn simulate<V: 'static>(
    config: &DriveConfig,
    vehicle: V,
    input: InputState,
    opts: &SimulateOptions,
) -> Vec<String> {
    let scene = SceneLayout::build(config);
    let mut driver = FrameDriver::loading(config, Delayed::new(opts.pending_ticks, vehicle));
    *driver.input_mut() = input;

    let renderer = DebugTextRenderer::new();
    let every = opts.every.max(1);
    let mut frames = Vec::new();
    for _ in 0..opts.ticks {
        let text = run_frame(&mut driver, &scene, &renderer);
        if driver.frame() % every == 0 || driver.frame() == opts.ticks {
            frames.push(text);
        }
    }
    frames
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            let config = DriveConfig::default();
            let m = &config.motion;
            println!("laneway-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "motion: accel={} turn={} damping={} terminal_speed={:.4}",
                m.accel_step,
                m.turn_step,
                m.damping_factor,
                m.terminal_speed()
            );
            let (min_x, max_x) = config.road.lateral_limits();
            println!(
                "road: width={} length={} lateral=[{min_x}, {max_x}]",
                config.road.width(),
                config.road.length
            );
            println!(
                "camera: follow={} height={} fov={}",
                config.camera.follow_distance, config.camera.height, config.camera.fov_degrees
            );
            println!("scene: {} items", SceneLayout::build(&config).items.len());
        }
        Commands::Simulate {
            ticks,
            hold,
            pending_ticks,
            every,
            model,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let input = InputState::holding(&hold);
            let opts = SimulateOptions {
                ticks,
                pending_ticks,
                every,
            };
            let held: Vec<&str> = hold.iter().map(|c| c.name()).collect();
            tracing::debug!(ticks, pending_ticks, every, "starting headless simulation");
            println!(
                "Simulating {ticks} ticks, holding [{}], vehicle pending for {pending_ticks}",
                held.join(", ")
            );

            let frames = match model {
                Some(path) => {
                    let model = import_model(&path)
                        .with_context(|| format!("importing {}", path.display()))?;
                    simulate(&config, model, input, &opts)
                }
                None => simulate(&config, (), input, &opts),
            };
            for frame in frames {
                print!("{frame}");
            }
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_yaml_string()?);
        }
        Commands::InspectModel { path } => {
            let model =
                import_model(&path).with_context(|| format!("importing {}", path.display()))?;
            println!("Model: {}", model.name);
            println!("  id: {}", model.id);
            println!("  meshes: {}", model.mesh_count);
            println!("  materials: {}", model.material_count);
            let size = model.bounds.size();
            println!(
                "  bounds: min={:?} max={:?} size=({:.3}, {:.3}, {:.3})",
                model.bounds.min, model.bounds.max, size.x, size.y, size.z
            );
            match model.binary_len {
                Some(len) => println!("  binary chunk: {len} bytes"),
                None => println!("  binary chunk: none"),
            }
        }
    }

    Ok(())
}
