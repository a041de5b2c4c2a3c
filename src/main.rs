//! Ragingsea - A real-time procedural ocean surface
//!
//! A large sinusoidal swell with ridged noise chop on top, shaded with a
//! two-color depth gradient and tuned live from the keyboard.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ragingsea::animation::{AnimationDriver, FrameScheduler, MonotonicClock};
use ragingsea::camera::OrbitControls;
use ragingsea::cli::Args;
use ragingsea::ocean::SurfaceMesh;
use ragingsea::panel::ControlPanel;
use ragingsea::params::*;
use ragingsea::rendering::{bind_color_uniforms, RenderSystem};
use ragingsea::snapshot::save_snapshot;

const WINDOW_TITLE: &str = "Ragingsea";

/// Wheel pixels per scroll line (touchpads report pixel deltas)
const PIXELS_PER_LINE: f32 = 40.0;

/// Schedules the next tick at the next window redraw
struct WindowScheduler(Arc<Window>);

impl FrameScheduler for WindowScheduler {
    fn request_frame(&self) {
        self.0.request_redraw();
    }
}

type Driver = AnimationDriver<MonotonicClock, OrbitControls, RenderSystem, WindowScheduler>;

/// Main application state
struct App {
    // Window and animation loop (created on resume)
    window: Option<Arc<Window>>,
    driver: Option<Driver>,

    // Handed to the driver once the window exists
    pending: Option<(ParameterStore, SurfaceMesh)>,

    panel: ControlPanel,
    shift_held: bool,

    // Configuration
    render_config: RenderConfig,
    camera_config: OrbitCameraConfig,

    // First fatal error; ends the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args, params: OceanParams) -> Self {
        let surface_config = args.surface_config();
        let mesh = SurfaceMesh::new(&surface_config);
        log::info!(
            "Surface: {}x{} grid, {} vertices",
            surface_config.subdivisions,
            surface_config.subdivisions,
            mesh.vertices.len()
        );

        Self {
            window: None,
            driver: None,
            pending: Some((ParameterStore::new(params), mesh)),
            panel: ControlPanel::new(params),
            shift_held: false,
            render_config: args.render_config(),
            camera_config: OrbitCameraConfig::default(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some((mut store, mesh)) = self.pending.take() else {
            return Ok(());
        };

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let renderer = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &mesh,
            &store.snapshot(),
        ))
        .context("Failed to initialize renderer")?;
        bind_color_uniforms(&mut store, renderer.color_uniforms())?;

        let size = window.inner_size();
        let controls = OrbitControls::new(self.camera_config.clone(), size.width, size.height);

        let driver = AnimationDriver::new(
            MonotonicClock::start(),
            store,
            mesh,
            controls,
            renderer,
            WindowScheduler(Arc::clone(&window)),
        );

        log::info!("Drag to orbit, scroll to zoom");
        log::info!("Tab/Shift+Tab select, Up/Down adjust (PageUp/PageDown x10), R reset, Esc quit");

        window.request_redraw();
        self.window = Some(window);
        self.driver = Some(driver);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// Apply a panel key and show the selected control in the title
    fn handle_key(&mut self, code: KeyCode) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        let store = driver.store_mut();

        let result = match code {
            KeyCode::Tab if self.shift_held => {
                self.panel.select_previous();
                Ok(())
            }
            KeyCode::Tab => {
                self.panel.select_next();
                Ok(())
            }
            KeyCode::ArrowUp => self.panel.nudge(store, 1).map(drop),
            KeyCode::ArrowDown => self.panel.nudge(store, -1).map(drop),
            KeyCode::PageUp => self.panel.nudge(store, 10).map(drop),
            KeyCode::PageDown => self.panel.nudge(store, -10).map(drop),
            KeyCode::KeyR => self.panel.reset(store),
            _ => return,
        };

        match result {
            Ok(()) => {
                let status = self.panel.status(driver.store());
                log::info!("{}", status);
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} - {}", WINDOW_TITLE, status));
                }
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                code => self.handle_key(code),
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_held = modifiers.state().shift_key();
            }
            WindowEvent::Resized(size) => {
                if let Some(driver) = self.driver.as_mut() {
                    driver.renderer_mut().resize(size.width, size.height);
                    driver.controls_mut().set_viewport(size.width, size.height);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(driver) = self.driver.as_mut() {
                    match state {
                        ElementState::Pressed => driver.controls_mut().pointer_pressed(),
                        ElementState::Released => driver.controls_mut().pointer_released(),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(driver) = self.driver.as_mut() {
                    driver.controls_mut().pointer_moved(position.x, position.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                if let Some(driver) = self.driver.as_mut() {
                    driver.controls_mut().zoom(lines);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(driver) = self.driver.as_mut() {
                    if let Err(e) = driver.tick() {
                        self.fail(event_loop, anyhow::Error::new(e).context("Render failed"));
                    }
                }
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = OceanParams::default();

    if let Some((config, path)) = args.snapshot_config() {
        save_snapshot(&params, &config, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    let mut app = App::new(&args, params);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
