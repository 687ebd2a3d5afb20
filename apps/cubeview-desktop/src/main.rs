mod config;
mod frame;

use anyhow::{Context, Result};
use clap::Parser;
use cubeview_assets::{ShaderSource, TextureData, TextureOptions};
use cubeview_camera::{Camera, CameraConfig, Direction};
use cubeview_input::{Action, CameraController};
use cubeview_render::{RenderView, Scene};
use cubeview_render_wgpu::{WgpuRenderer, builtin_shader};
use glam::Vec2;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::config::{AppConfig, Overrides};
use crate::frame::{FrameClock, Throttle};

/// Pixel scroll deltas (touchpads) are converted to lines with this factor.
const PIXELS_PER_LINE: f32 = 40.0;
const TITLE_REFRESH: Duration = Duration::from_millis(500);
const DIFFUSE_FALLBACK: [u8; 4] = [200, 200, 200, 255];
const SPECULAR_FALLBACK: [u8; 4] = [0, 0, 0, 255];

#[derive(Parser)]
#[command(
    name = "cubeview-desktop",
    about = "Fly a camera around textured cubes lit by a flashlight"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Movement speed in world units per second
    #[arg(long)]
    speed: Option<f32>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Diffuse texture
    #[arg(long)]
    diffuse: Option<PathBuf>,

    /// Specular texture
    #[arg(long)]
    specular: Option<PathBuf>,

    /// WGSL shader replacing the built-in one
    #[arg(long)]
    shader: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            speed: self.speed,
            width: self.width,
            height: self.height,
            diffuse: self.diffuse.clone(),
            specular: self.specular.clone(),
            shader: self.shader.clone(),
        }
    }
}

/// Where look deltas come from, decided by whether the cursor is grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookSource {
    /// Cursor is free; deltas come from successive cursor positions.
    Cursor,
    /// Cursor is grabbed; deltas come from raw device motion, which keeps
    /// arriving after a confined cursor reaches the window edge.
    RawMotion,
}

impl LookSource {
    fn for_grab(granted: Option<CursorGrabMode>) -> Self {
        match granted {
            Some(CursorGrabMode::Confined | CursorGrabMode::Locked) => Self::RawMotion,
            Some(CursorGrabMode::None) | None => Self::Cursor,
        }
    }
}

fn direction_for(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::KeyW => Some(Direction::Forward),
        KeyCode::KeyS => Some(Direction::Backward),
        KeyCode::KeyA => Some(Direction::Left),
        KeyCode::KeyD => Some(Direction::Right),
        KeyCode::KeyQ => Some(Direction::Down),
        KeyCode::KeyE => Some(Direction::Up),
        _ => None,
    }
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}

/// Load a texture, falling back to a flat colour so the scene still renders.
fn load_texture_or_placeholder(path: &Path, fallback: [u8; 4]) -> TextureData {
    match TextureData::load(path, &TextureOptions::default()) {
        Ok(texture) => texture,
        Err(e) => {
            tracing::error!("failed to load texture: {e}");
            TextureData::placeholder(format!("placeholder:{}", path.display()), fallback)
        }
    }
}

fn load_shader(path: Option<&Path>) -> Result<ShaderSource> {
    match path {
        Some(path) => Ok(ShaderSource::load(path)?),
        None => Ok(builtin_shader()),
    }
}

/// Application state independent of the window and GPU.
struct AppState {
    camera: Camera,
    controller: CameraController,
    scene: Scene,
    clock: FrameClock,
    title_refresh: Throttle,
    look_source: LookSource,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        Self {
            camera: Camera::with_config(&CameraConfig::from(config.camera)),
            controller: CameraController::new(),
            scene: Scene::default(),
            clock: FrameClock::new(),
            title_refresh: Throttle::new(TITLE_REFRESH),
            look_source: LookSource::Cursor,
        }
    }

    /// Returns true when the key asks to quit.
    fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Escape {
            return pressed;
        }
        if let Some(direction) = direction_for(key) {
            let action = if pressed {
                Action::Press(direction)
            } else {
                Action::Release(direction)
            };
            self.controller.handle(action, &mut self.camera);
        }
        false
    }

    fn handle(&mut self, action: Action) {
        self.controller.handle(action, &mut self.camera);
    }

    fn cursor_moved(&mut self, position: Vec2) {
        if self.look_source == LookSource::Cursor {
            self.handle(Action::CursorMoved(position));
        }
    }

    fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.look_source == LookSource::RawMotion {
            // Device y grows downward; looking up is positive.
            self.handle(Action::Look(Vec2::new(dx as f32, -dy as f32)));
        }
    }

    fn set_look_source(&mut self, source: LookSource) {
        if source != self.look_source {
            tracing::debug!("mouse look source: {source:?}");
            self.controller.reset_cursor();
        }
        self.look_source = source;
    }

    /// Advance one frame and return the view to draw it with.
    fn update(&mut self, now: Instant, width: u32, height: u32) -> RenderView {
        let dt = self.clock.tick(now);
        self.controller.update(&mut self.camera, dt);
        let view = RenderView::from_camera(&self.camera, width, height);
        self.scene.update(&view);
        view
    }
}

struct GpuApp {
    config: AppConfig,
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(&config),
            config,
            window: None,
            surface: None,
            device: None,
            queue: None,
            surface_config: None,
            renderer: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter found")?;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let shader = load_shader(self.config.assets.shader.as_deref())?;
        let diffuse = load_texture_or_placeholder(&self.config.assets.diffuse, DIFFUSE_FALLBACK);
        let specular =
            load_texture_or_placeholder(&self.config.assets.specular, SPECULAR_FALLBACK);
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            surface_config.width,
            surface_config.height,
            &shader,
            &diffuse,
            &specular,
        )?;

        self.state
            .set_look_source(LookSource::for_grab(grab_cursor(&window)));

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.surface_config = Some(surface_config);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(surface), Some(device), Some(config)) =
            (&self.surface, &self.device, &mut self.surface_config)
        else {
            return;
        };
        config.width = size.width.max(1);
        config.height = size.height.max(1);
        surface.configure(device, config);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(device, config.width, config.height);
        }
        tracing::debug!("resized to {}x{}", config.width, config.height);
    }

    fn redraw(&mut self) {
        let (Some(surface), Some(device), Some(queue), Some(config), Some(renderer)) = (
            &self.surface,
            &self.device,
            &self.queue,
            &self.surface_config,
            &self.renderer,
        ) else {
            return;
        };

        let now = Instant::now();
        let view = self.state.update(now, config.width, config.height);

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(device, queue, &target, &self.state.scene, &view);
        output.present();

        if self.state.title_refresh.ready(now) {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "{} - fps: {:.0}",
                    self.config.window.title,
                    self.state.clock.fps()
                ));
            }
        }
    }
}

/// Hide the cursor and keep it in the window. Returns the grab granted.
fn grab_cursor(window: &Window) -> Option<CursorGrabMode> {
    window.set_cursor_visible(false);
    for mode in [CursorGrabMode::Locked, CursorGrabMode::Confined] {
        if window.set_cursor_grab(mode).is_ok() {
            return Some(mode);
        }
    }
    tracing::warn!("cursor grab unavailable, using cursor positions for mouse look");
    None
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("initialization failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => self.resize(new_size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if self
                    .state
                    .handle_key(key, key_state == ElementState::Pressed)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.handle(Action::Scroll(scroll_lines(delta)));
            }
            WindowEvent::Focused(false) => {
                self.state.handle(Action::FocusLost);
            }
            WindowEvent::Focused(true) => {
                if let Some(window) = &self.window {
                    self.state
                        .set_look_source(LookSource::for_grab(grab_cursor(window)));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cli.overrides().apply(&mut config);
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview-desktop starting");
    let config = load_config(&cli)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
