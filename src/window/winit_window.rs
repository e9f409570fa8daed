//! Borderless winit window shell
//!
//! Owns the window, routes pointer input through the gesture controller to
//! move and resize the undecorated window, and forwards everything else to
//! the player controller as `ShellEvent`s.

use crate::player::{PlayerController, PlayerState, ShellDirective};
use crate::utils::config::WindowConfig;
use crate::utils::error::{IntoPlayerError, Result};
use crate::window::events::EventHandler;
use crate::window::{ChromeMetrics, GestureController, HitRegion, Point, ShellEvent, Size};
use log::{debug, error, info};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Fullscreen, Window, WindowId, WindowLevel};

/// How often the controller is pumped and the title refreshed while idle
const TICK_INTERVAL: Duration = Duration::from_millis(200);

const APP_NAME: &str = "BVPlayer";

/// The application shell: window, input routing, and title refresh
pub struct PlayerShell {
    config: WindowConfig,
    controller: PlayerController,
    state: Arc<RwLock<PlayerState>>,

    window: Option<Window>,
    events: EventHandler,
    gesture: GestureController,

    /// Files queued from the command line, added once the window exists
    initial_files: Vec<PathBuf>,

    last_title: String,
}

impl PlayerShell {
    pub fn new(
        config: WindowConfig,
        controller: PlayerController,
        initial_files: Vec<PathBuf>,
    ) -> Self {
        let state = controller.state_handle();
        let gesture = GestureController::new(
            config.resize_margin as f64,
            Size::new(config.min_width, config.min_height),
        );

        Self {
            config,
            controller,
            state,
            window: None,
            events: EventHandler::new(),
            gesture,
            initial_files,
            last_title: String::new(),
        }
    }

    /// Run the event loop until the shell quits
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new().window_err("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + TICK_INTERVAL));
        event_loop
            .run_app(&mut self)
            .window_err("event loop failed")?;
        Ok(())
    }

    /// Window rectangle in screen coordinates
    fn window_bounds(window: &Window) -> crate::window::WindowBounds {
        let origin = window.outer_position().unwrap_or_default();
        let size = window.inner_size();
        crate::window::WindowBounds::new(origin.x, origin.y, size.width, size.height)
    }

    /// Window-local cursor position lifted into screen coordinates
    fn screen_point(window: &Window, local: Point) -> Point {
        let origin = window.outer_position().unwrap_or_default();
        Point::new(origin.x as f64 + local.x, origin.y as f64 + local.y)
    }

    fn cursor_for(region: Option<HitRegion>) -> CursorIcon {
        match region {
            Some(HitRegion::Top) | Some(HitRegion::Bottom) => CursorIcon::NsResize,
            Some(HitRegion::Left) | Some(HitRegion::Right) => CursorIcon::EwResize,
            _ => CursorIcon::Default,
        }
    }

    fn chrome_metrics(&self, window: &Window) -> ChromeMetrics {
        let size = window.inner_size();
        ChromeMetrics {
            width: size.width,
            height: size.height,
            chrome_height: self.config.chrome_height,
            control_size: self.config.control_size,
        }
    }

    /// Route pointer input into the gesture controller.
    /// Returns true when the event was consumed by a gesture.
    fn handle_gesture(&mut self, event: &WindowEvent) -> bool {
        let Some(window) = self.window.as_ref() else {
            return false;
        };
        // Gestures only make sense on a windowed, undecorated surface
        if window.fullscreen().is_some() {
            return false;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let local = Point::new(position.x, position.y);

                if self.gesture.is_active() {
                    let screen = Self::screen_point(window, local);
                    if let Some(bounds) = self.gesture.on_move(screen, Self::window_bounds(window))
                    {
                        window.set_outer_position(PhysicalPosition::new(bounds.x, bounds.y));
                        let _ = window
                            .request_inner_size(PhysicalSize::new(bounds.width, bounds.height));
                    }
                    return true;
                }

                let size = window.inner_size();
                let region = self
                    .gesture
                    .hover(local, Size::new(size.width, size.height));
                window.set_cursor(Self::cursor_for(region));
                false
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: WinitMouseButton::Left,
                ..
            } => {
                let (x, y) = self.events.mouse_position();
                if self
                    .events
                    .control_at(x, y, &self.chrome_metrics(window))
                    .is_some()
                {
                    // Chrome button click, handled via ShellEvent dispatch
                    return false;
                }

                let local = Point::new(x, y);
                let screen = Self::screen_point(window, local);
                let size = window.inner_size();
                let region =
                    self.gesture
                        .on_press(local, screen, Size::new(size.width, size.height));
                region.is_some()
            }

            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: WinitMouseButton::Left,
                ..
            } => {
                let was_active = self.gesture.is_active();
                self.gesture.on_release();
                was_active
            }

            WindowEvent::Focused(false) => {
                // Release events are lost once focus goes away
                self.gesture.cancel();
                false
            }

            _ => false,
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, shell_event: ShellEvent) {
        debug!("shell event: {:?}", shell_event);
        match self.controller.handle_shell_event(&shell_event) {
            Ok(Some(directive)) => self.apply_directive(event_loop, directive),
            Ok(None) => {}
            Err(err) => error!("event handling failed: {}", err),
        }
    }

    fn apply_directive(&mut self, event_loop: &ActiveEventLoop, directive: ShellDirective) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        match directive {
            ShellDirective::Quit => {
                info!("shutting down");
                event_loop.exit();
            }
            ShellDirective::ToggleFullscreen => {
                if window.fullscreen().is_some() {
                    window.set_fullscreen(None);
                } else {
                    window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                }
            }
            ShellDirective::ExitFullscreen => window.set_fullscreen(None),
            ShellDirective::Minimize => window.set_minimized(true),
            ShellDirective::ToggleMaximize => window.set_maximized(!window.is_maximized()),
        }
    }

    /// Left click on a chrome button turns into a control ShellEvent
    fn chrome_click(&mut self) -> Option<ShellEvent> {
        let window = self.window.as_ref()?;
        let (x, y) = self.events.mouse_position();
        let control = self.events.control_at(x, y, &self.chrome_metrics(window))?;
        Some(ShellEvent::Control(control))
    }

    fn refresh_title(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let title = self.state.read().title_string(APP_NAME);
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }
}

impl ApplicationHandler for PlayerShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_min_inner_size(LogicalSize::new(
                self.config.min_width,
                self.config.min_height,
            ))
            .with_decorations(false);

        if self.config.always_on_top {
            attributes = attributes.with_window_level(WindowLevel::AlwaysOnTop);
        }

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                error!("window creation failed: {}", err);
                event_loop.exit();
                return;
            }
        };

        if self.config.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        info!(
            "window created: {}x{}",
            self.config.width, self.config.height
        );
        self.window = Some(window);

        let files = std::mem::take(&mut self.initial_files);
        if !files.is_empty() {
            if let Err(err) = self.controller.add_files(&files) {
                error!("failed to queue initial files: {}", err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = self.handle_gesture(&event);

        // Chrome buttons react on left-button press
        if !consumed {
            if matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: WinitMouseButton::Left,
                    ..
                }
            ) {
                if let Some(control) = self.chrome_click() {
                    self.dispatch(event_loop, control);
                    return;
                }
            }
        }

        let shell_event = self.events.handle_event(&event);
        if consumed {
            return;
        }
        if let Some(shell_event) = shell_event {
            self.dispatch(event_loop, shell_event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.controller.pump() {
            error!("player pump failed: {}", err);
        }
        self.refresh_title();
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + TICK_INTERVAL));
    }
}
