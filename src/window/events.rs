//! Event conversion for the winit window
//!
//! Converts winit events into `ShellEvent`s and hit-tests the custom chrome
//! buttons. Pointer press/move/release never show up as `ShellEvent`s; they
//! feed the gesture controller directly in the shell.

use crate::window::{ChromeMetrics, ControlEvent, Key, KeyModifiers, MouseButton, ShellEvent};
use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta,
    WindowEvent as WinitWindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Converts winit window events into player shell events
pub struct EventHandler {
    /// Current keyboard modifiers state
    modifiers: ModifiersState,

    /// Last known mouse position, window-local
    mouse_position: (f64, f64),
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            mouse_position: (0.0, 0.0),
        }
    }

    /// Handle a winit window event and convert to a shell event
    pub fn handle_event(&mut self, event: &WinitWindowEvent) -> Option<ShellEvent> {
        match event {
            WinitWindowEvent::CloseRequested => Some(ShellEvent::CloseRequested),

            WinitWindowEvent::Resized(size) => Some(ShellEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WinitWindowEvent::Focused(focused) => Some(if *focused {
                ShellEvent::Focused
            } else {
                ShellEvent::Unfocused
            }),

            WinitWindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x, position.y);
                None
            }

            WinitWindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };

                Some(ShellEvent::MouseWheel {
                    delta: scroll_delta,
                })
            }

            WinitWindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
                None
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = convert_key_code(keycode)?;
                    let modifiers = convert_modifiers(self.modifiers);
                    Some(ShellEvent::KeyPressed { key, modifiers })
                } else {
                    None
                }
            }

            WinitWindowEvent::DroppedFile(path) => Some(ShellEvent::FilesDropped {
                paths: vec![path.clone()],
            }),

            _ => None,
        }
    }

    /// Check whether a click at (x, y) lands on a chrome button
    ///
    /// Buttons sit in the titlebar strip, right-aligned in the order
    /// minimize, maximize, close.
    pub fn control_at(&self, x: f64, y: f64, metrics: &ChromeMetrics) -> Option<ControlEvent> {
        if y > metrics.chrome_height as f64 {
            return None;
        }

        let close_x = metrics.width as f64 - metrics.control_size as f64;
        if x >= close_x {
            return Some(ControlEvent::Close);
        }

        let max_x = close_x - metrics.control_size as f64;
        if x >= max_x {
            return Some(ControlEvent::Maximize);
        }

        let min_x = max_x - metrics.control_size as f64;
        if x >= min_x {
            return Some(ControlEvent::Minimize);
        }

        None
    }

    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Last cursor position reported by `CursorMoved`, window-local
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_position
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert winit mouse button to the shell's mouse button
pub fn convert_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Convert winit key code to a player key
fn convert_key_code(keycode: KeyCode) -> Option<Key> {
    match keycode {
        KeyCode::Space => Some(Key::Space),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Escape => Some(Key::Escape),

        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),

        KeyCode::AudioVolumeUp => Some(Key::VolumeUp),
        KeyCode::AudioVolumeDown => Some(Key::VolumeDown),
        KeyCode::AudioVolumeMute => Some(Key::VolumeMute),

        KeyCode::Minus => Some(Key::Minus),
        KeyCode::Equal => Some(Key::Plus), // Plus is typically on the equals key

        KeyCode::KeyF => Some(Key::F),
        KeyCode::KeyM => Some(Key::M),
        KeyCode::KeyN => Some(Key::N),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyS => Some(Key::S),

        _ => None,
    }
}

/// Convert winit modifiers to the shell's modifiers
fn convert_modifiers(modifiers: ModifiersState) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.shift_key(),
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(),
    }
}
