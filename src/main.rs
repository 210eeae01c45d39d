//! Orrery - decorative 3D solar-system viewer
//!
//! The Sun, nine textured bodies on their orbits, a star-field dome, orbit
//! camera controls, an Earth highlight with an info panel, and optional
//! background music.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orrery::config::AppConfig;
use orrery::input::{InputAction, InputMapper};
use orrery::systems::{AudioSystem, RenderError, RenderSystem, SimulationSystem, WindowSystem};
use orrery::ui::{UiLayout, UiState};
use orrery_core::{Highlight, InfoPanel, SolarSystem, SystemTemplate, SystemValidator};
use orrery_input::OrbitController;
use orrery_render::camera::PerspectiveCamera;
use orrery_math::Vec3;

/// Main application state
struct App {
    config: AppConfig,
    system: SolarSystem,
    highlight: Highlight,
    info_panel: InfoPanel,
    camera: PerspectiveCamera,
    controller: OrbitController,
    simulation: SimulationSystem,
    audio: AudioSystem,
    layout: UiLayout,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Last cursor position in window pixels
    cursor: Option<(f32, f32)>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let template = Self::load_template(&config);
        let system = SolarSystem::build(&template);
        log::info!(
            "Built '{}': {} bodies, {} scene nodes",
            template.name,
            system.planets().len(),
            system.graph().len()
        );

        let highlight = Highlight::new(system.highlight_target().map(|p| p.mesh));
        let info_panel = InfoPanel::new(&config.panel.overview_text, &config.panel.focus_text);

        let mut camera = PerspectiveCamera::new(
            Vec3::from_array(config.camera.position),
            Vec3::from_array(config.camera.target),
            config.camera.fov,
            config.camera.near,
            config.camera.far,
        );
        camera.set_viewport(config.window.width, config.window.height);

        let controls = &config.controls;
        let mut controller = OrbitController::new()
            .with_rotate_speed(controls.rotate_speed)
            .with_zoom_speed(controls.zoom_speed)
            .with_pan_speed(controls.pan_speed)
            .with_distance_limits(controls.min_distance, controls.max_distance);
        controller.enabled = controls.enabled;

        let simulation = SimulationSystem::new(&config.animation);
        let audio = AudioSystem::new(&config.audio);
        let layout = UiLayout::new(config.window.width, config.window.height);

        Self {
            config,
            system,
            highlight,
            info_panel,
            camera,
            controller,
            simulation,
            audio,
            layout,
            window: None,
            render: None,
            cursor: None,
        }
    }

    /// Read the system description, falling back to the built-in one
    fn load_template(config: &AppConfig) -> SystemTemplate {
        let template = SystemTemplate::load(&config.scene.path).unwrap_or_else(|e| {
            log::warn!("Failed to load scene '{}': {}. Using built-in system.", config.scene.path, e);
            SystemTemplate::default_system()
        });

        if !config.debug.validate_scene {
            return template;
        }
        match SystemValidator::validate_or_error(&template) {
            Ok(()) => template,
            Err(errors) => {
                for e in &errors {
                    log::warn!("Scene '{}': {}", config.scene.path, e);
                }
                log::warn!("Scene has {} problem(s). Using built-in system.", errors.len());
                SystemTemplate::default_system()
            }
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_viewport(width, height);
        self.layout.resize(width, height);
        if let Some(render) = &mut self.render {
            render.resize(width, height);
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::ToggleHighlight => {
                self.highlight.toggle(self.system.graph_mut());
            }
            InputAction::ToggleMusic => {
                self.audio.toggle_music();
            }
            InputAction::TogglePause => {
                let paused = self.simulation.toggle_pause();
                if let Some(window) = &self.window {
                    window.update_title(paused);
                }
            }
            InputAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation.update(&mut self.system);

        let (_, height) = self.layout.size();
        self.controller.update(&mut self.camera, height);

        let view_proj = self.camera.view_projection();
        let label_at = self
            .system
            .highlight_target()
            .map(|p| self.system.graph().world_position(p.mesh))
            .and_then(|pos| self.layout.earth_label(pos, view_proj));

        let state = UiState {
            panel_text: self.info_panel.text(self.highlight.mode()),
            highlighted: self.highlight.is_active(),
            music_playing: self.audio.is_playing(),
            paused: self.simulation.is_paused(),
            hovered: self.cursor.and_then(|(x, y)| self.layout.hit_test(x, y)),
            label_at,
        };
        let (rects, text) = self.layout.build(&self.config.panel, &state);

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.system, &self.camera, &rects, &text) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }
        self.system.graph_mut().clear_dirty();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(
            window.window().clone(),
            &self.config.scene,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };
        render.upload_system(&self.system);

        let (width, height) = render.size();
        if self.simulation.is_paused() {
            window.update_title(true);
        }
        window.request_redraw();

        self.window = Some(window);
        self.render = Some(render);
        self.handle_resize(width, height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.handle_resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.controller.process_cursor_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let hit = self.cursor.and_then(|(x, y)| self.layout.hit_test(x, y));
                if let Some(action) = InputMapper::map_mouse_button(button, state, hit) {
                    self.handle_action(action, event_loop);
                    return;
                }
                // Presses on the panel don't start a drag; releases always end one
                let on_overlay = self.cursor.is_some_and(|(x, y)| self.layout.covers(x, y));
                if state == ElementState::Released || !on_overlay {
                    self.controller.process_mouse_button(button, state);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("{}. Using defaults.", e);
    }
    log::info!("Starting orrery (time scale {})", config.animation.time_scale);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)
}
