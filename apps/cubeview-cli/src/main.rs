use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cubeview_assets::{ShaderSource, TextureData, TextureOptions};
use cubeview_camera::{Camera, CameraConfig};
use cubeview_input::{Action, CameraController, parse_script};
use cubeview_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubeview-cli", about = "CLI tool for cubeview operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the versions of the headless crates this tool links
    Info,
    /// Replay an input script headless and print the resulting frame
    Simulate {
        /// Whitespace-separated actions, e.g. "press:forward tick:0.5"
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        script: Option<String>,
        /// Read the actions from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Viewport width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
        /// Movement speed in world units per second
        #[arg(long)]
        speed: Option<f32>,
    },
    /// Decode a texture and report its properties
    Texture {
        path: PathBuf,
        /// Keep the image's top row first
        #[arg(long)]
        no_flip: bool,
    },
    /// Check a shader file and list its entry points
    Shader { path: PathBuf },
}

/// Replay `script` against a fresh camera and render the final frame as text.
fn simulate(
    script: &str,
    config: &CameraConfig,
    width: u32,
    height: u32,
) -> anyhow::Result<String> {
    let actions = parse_script(script)?;
    let mut camera = Camera::with_config(config);
    let mut controller = CameraController::new();
    let mut elapsed = 0.0;

    for action in &actions {
        if let Action::Tick(dt) = action {
            elapsed += dt;
        }
        controller.handle(*action, &mut camera);
        tracing::debug!(
            "{action:?}: position={} front={} fov={:.2}",
            camera.position,
            camera.front(),
            camera.vertical_fov()
        );
    }
    tracing::info!("replayed {} actions over {elapsed:.3}s", actions.len());

    let view = RenderView::from_camera(&camera, width, height);
    let mut scene = Scene::default();
    scene.update(&view);
    Ok(DebugTextRenderer::new().render(&scene, &view))
}

fn info() -> String {
    [
        format!("cubeview-cli v{}", env!("CARGO_PKG_VERSION")),
        format!("camera: {}", cubeview_camera::crate_info()),
        format!("input: {}", cubeview_input::crate_info()),
        format!("render: {}", cubeview_render::crate_info()),
        format!("assets: {}", cubeview_assets::crate_info()),
    ]
    .join("\n")
}

fn describe_texture(texture: &TextureData) -> String {
    format!(
        "{}: {}x{}, {} source channel(s), {} mip level(s)",
        texture.label(),
        texture.width(),
        texture.height(),
        texture.source_channels(),
        texture.mip_level_count()
    )
}

fn describe_shader(shader: &ShaderSource) -> String {
    let mut out = format!("{}: {} bytes", shader.label(), shader.code().len());
    let entries = shader.entry_points();
    if entries.is_empty() {
        out.push_str("\n  no entry points");
    }
    for (stage, name) in entries {
        out.push_str(&format!("\n  {stage:?}: {name}"));
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => println!("{}", info()),
        Commands::Simulate {
            script,
            file,
            width,
            height,
            speed,
        } => {
            let text = match (script, file) {
                (Some(script), _) => script,
                (None, Some(file)) => std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read script {}", file.display()))?,
                (None, None) => anyhow::bail!("either --script or --file is required"),
            };
            let mut config = CameraConfig::default();
            if let Some(speed) = speed {
                config.movement_speed = speed;
            }
            print!("{}", simulate(&text, &config, width, height)?);
        }
        Commands::Texture { path, no_flip } => {
            let options = TextureOptions {
                flip_vertically: !no_flip,
            };
            let texture = TextureData::load(&path, &options)?;
            println!("{}", describe_texture(&texture));
        }
        Commands::Shader { path } => {
            let shader = ShaderSource::load(&path)?;
            println!("{}", describe_shader(&shader));
        }
    }

    Ok(())
}
