//! Drag gesture state machine for window move/resize
//!
//! A gesture is one press -> move xN -> release sequence. The press
//! classifies the cursor into a hit region and captures a reference point;
//! each subsequent move turns the pointer delta into a bounds mutation and
//! advances the reference by the whole-pixel delta that was applied
//! (incremental deltas, so clamping at the size floor does not accumulate
//! drift, while fractional cursor movement carries over to the next move).
//! Release returns to `Idle` unconditionally.
//!
//! At most one gesture is active at a time, and the reference point only
//! exists while a gesture is active: it lives inside the active state
//! variant.

use crate::window::hit_test::{classify, HitRegion};
use crate::window::{Point, Size, WindowBounds};
use log::trace;

/// State of the window-manipulation gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress
    Idle,
    /// Dragging the window body; translates the whole window
    Moving { reference: Point },
    /// Dragging the top edge; adjusts y and height
    ResizingTop { reference: Point },
    /// Dragging the bottom edge; adjusts height
    ResizingBottom { reference: Point },
    /// Dragging the left edge; adjusts x and width
    ResizingLeft { reference: Point },
    /// Dragging the right edge; adjusts width
    ResizingRight { reference: Point },
}

/// Controller translating pointer events into window bounds mutations
///
/// Host-toolkit independent: the shell feeds it positions and applies the
/// bounds it returns through the window-geometry API.
#[derive(Debug)]
pub struct GestureController {
    /// Edge margin for hit testing, in pixels
    margin: f64,

    /// Resize floor; dimension changes are clamped, never rejected
    min_size: Size,

    state: GestureState,
}

impl GestureController {
    pub fn new(margin: f64, min_size: Size) -> Self {
        Self {
            margin,
            min_size,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Classify a position without starting a gesture, for cursor feedback
    pub fn hover(&self, local: Point, size: Size) -> Option<HitRegion> {
        classify(local, size, self.margin)
    }

    /// Handle pointer press
    ///
    /// `local` is the press position in window-local coordinates and is used
    /// for classification; `screen` is the same position in screen
    /// coordinates and becomes the gesture's reference point. Returns the
    /// region the gesture started in, or `None` if no gesture started.
    pub fn on_press(&mut self, local: Point, screen: Point, size: Size) -> Option<HitRegion> {
        let region = classify(local, size, self.margin)?;

        self.state = match region {
            HitRegion::Move => GestureState::Moving { reference: screen },
            HitRegion::Top => GestureState::ResizingTop { reference: screen },
            HitRegion::Bottom => GestureState::ResizingBottom { reference: screen },
            HitRegion::Left => GestureState::ResizingLeft { reference: screen },
            HitRegion::Right => GestureState::ResizingRight { reference: screen },
        };

        trace!("gesture started: {:?}", self.state);
        Some(region)
    }

    /// Handle pointer move while the button is held
    ///
    /// Returns the new window bounds to apply, or `None` when no gesture is
    /// active. Out-of-bounds cursor positions are accepted as-is; the window
    /// may move off-screen.
    pub fn on_move(&mut self, screen: Point, bounds: WindowBounds) -> Option<WindowBounds> {
        let reference = match self.state {
            GestureState::Idle => return None,
            GestureState::Moving { reference }
            | GestureState::ResizingTop { reference }
            | GestureState::ResizingBottom { reference }
            | GestureState::ResizingLeft { reference }
            | GestureState::ResizingRight { reference } => reference,
        };

        let dx = (screen.x - reference.x) as i64;
        let dy = (screen.y - reference.y) as i64;

        let x = bounds.x as i64;
        let y = bounds.y as i64;
        let w = bounds.width as i64;
        let h = bounds.height as i64;
        let min_w = self.min_size.width as i64;
        let min_h = self.min_size.height as i64;

        let new_bounds = match self.state {
            GestureState::Idle => unreachable!(),
            GestureState::Moving { .. } => WindowBounds::new(
                (x + dx) as i32,
                (y + dy) as i32,
                bounds.width,
                bounds.height,
            ),
            GestureState::ResizingRight { .. } => {
                let new_w = (w + dx).max(min_w);
                WindowBounds::new(bounds.x, bounds.y, new_w as u32, bounds.height)
            }
            GestureState::ResizingBottom { .. } => {
                let new_h = (h + dy).max(min_h);
                WindowBounds::new(bounds.x, bounds.y, bounds.width, new_h as u32)
            }
            GestureState::ResizingLeft { .. } => {
                // Clamp width first, then derive x so the right edge stays fixed
                let new_w = (w - dx).max(min_w);
                let new_x = x + (w - new_w);
                WindowBounds::new(new_x as i32, bounds.y, new_w as u32, bounds.height)
            }
            GestureState::ResizingTop { .. } => {
                let new_h = (h - dy).max(min_h);
                let new_y = y + (h - new_h);
                WindowBounds::new(bounds.x, new_y as i32, bounds.width, new_h as u32)
            }
        };

        // Advance the reference by the whole-pixel delta that was applied;
        // the fractional remainder stays in place so sub-pixel moves
        // accumulate instead of being discarded.
        self.advance_reference(dx as f64, dy as f64);
        Some(new_bounds)
    }

    /// Handle pointer release; always returns to `Idle`
    pub fn on_release(&mut self) {
        if self.is_active() {
            trace!("gesture finished");
        }
        self.state = GestureState::Idle;
    }

    /// Abort the gesture without a release, e.g. on focus loss.
    /// Bounds already applied stay applied.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    fn advance_reference(&mut self, dx: f64, dy: f64) {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Moving { reference }
            | GestureState::ResizingTop { reference }
            | GestureState::ResizingBottom { reference }
            | GestureState::ResizingLeft { reference }
            | GestureState::ResizingRight { reference } => {
                reference.x += dx;
                reference.y += dy;
            }
        }
    }
}
