//! Window management module for BVPlayer
//!
//! This module provides a borderless window with custom chrome and the
//! interaction controller that gives it move/resize behavior: a pure
//! hit-region classifier, a drag gesture state machine, event conversion,
//! and the winit-backed shell that ties them together.

pub mod events;
pub mod gesture;
pub mod winit_window;

pub use gesture::{GestureController, GestureState};
pub use hit_test::{classify, HitRegion};
pub use winit_window::PlayerShell;

/// A point in pixels. Window-local or screen coordinates depending on context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// On-screen rectangle of the top-level window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowBounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Chrome layout metrics used for control-button hit testing
#[derive(Debug, Clone, Copy)]
pub struct ChromeMetrics {
    /// Total window width
    pub width: u32,

    /// Total window height
    pub height: u32,

    /// Titlebar strip height
    pub chrome_height: u32,

    /// Width of each chrome button
    pub control_size: u32,
}

/// Events produced by the shell's event conversion layer
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Window close requested
    CloseRequested,

    /// Window resized by the windowing system
    Resized { width: u32, height: u32 },

    /// Window gained focus
    Focused,

    /// Window lost focus
    Unfocused,

    /// Mouse wheel scrolled
    MouseWheel { delta: f32 },

    /// Key pressed
    KeyPressed { key: Key, modifiers: KeyModifiers },

    /// File(s) dropped onto window
    FilesDropped { paths: Vec<std::path::PathBuf> },

    /// Chrome button clicked (minimize, maximize, close)
    Control(ControlEvent),
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard key types the player reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    // Media controls
    Space,
    Enter,
    Escape,

    // Navigation / seeking
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,

    // Volume (media keys)
    VolumeUp,
    VolumeDown,
    VolumeMute,

    // Playback rate
    Minus,
    Plus,

    F, // Fullscreen
    M, // Mute
    N, // Next track
    P, // Previous track
    Q, // Quit
    R, // Cycle playback rate
    S, // Toggle random order
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Window control events (custom titlebar buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Minimize,
    Maximize,
    Close,
}
