//! Integration tests for borderless window gestures
//!
//! Drives the hit-region classifier and gesture controller through full
//! press/move/release sequences the way the shell does, and checks the
//! resulting window rectangles.

use bvplayer::window::{classify, GestureController, HitRegion, Point, Size, WindowBounds};

const MARGIN: f64 = 6.0;
const MIN_SIZE: Size = Size {
    width: 400,
    height: 300,
};

fn controller() -> GestureController {
    GestureController::new(MARGIN, MIN_SIZE)
}

fn window() -> WindowBounds {
    WindowBounds::new(100, 100, 800, 600)
}

/// Screen-space cursor for a window-local point
fn screen(bounds: WindowBounds, local: Point) -> Point {
    Point::new(bounds.x as f64 + local.x, bounds.y as f64 + local.y)
}

#[test]
fn test_classifier_full_surface() {
    let size = Size::new(800, 600);

    // Edges
    assert_eq!(classify(Point::new(400.0, 2.0), size, MARGIN), Some(HitRegion::Top));
    assert_eq!(classify(Point::new(400.0, 598.0), size, MARGIN), Some(HitRegion::Bottom));
    assert_eq!(classify(Point::new(2.0, 300.0), size, MARGIN), Some(HitRegion::Left));
    assert_eq!(classify(Point::new(798.0, 300.0), size, MARGIN), Some(HitRegion::Right));

    // Corners resolve to top/bottom, never a diagonal
    assert_eq!(classify(Point::new(2.0, 2.0), size, MARGIN), Some(HitRegion::Top));
    assert_eq!(classify(Point::new(798.0, 598.0), size, MARGIN), Some(HitRegion::Bottom));

    // Interior is a move grip
    assert_eq!(classify(Point::new(400.0, 300.0), size, MARGIN), Some(HitRegion::Move));

    // Outside the window
    assert_eq!(classify(Point::new(-1.0, 300.0), size, MARGIN), None);
    assert_eq!(classify(Point::new(400.0, 601.0), size, MARGIN), None);
}

#[test]
fn test_drag_moves_window() {
    let mut gesture = controller();
    let mut bounds = window();

    let press = Point::new(400.0, 300.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Move)
    );

    // Three incremental moves
    for step in [(10.0, 5.0), (20.0, -15.0), (-5.0, 30.0)] {
        let cursor = Point::new(
            screen(bounds, press).x + step.0,
            screen(bounds, press).y + step.1,
        );
        if let Some(updated) = gesture.on_move(cursor, bounds) {
            bounds = updated;
        }
    }
    gesture.on_release();

    assert_eq!((bounds.x, bounds.y), (125, 120));
    assert_eq!((bounds.width, bounds.height), (800, 600));
    assert!(!gesture.is_active());
}

#[test]
fn test_left_resize_keeps_right_edge() {
    let mut gesture = controller();
    let mut bounds = window();

    let press = Point::new(3.0, 300.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Left)
    );

    let cursor = Point::new(screen(bounds, press).x + 50.0, screen(bounds, press).y);
    bounds = gesture.on_move(cursor, bounds).unwrap();
    gesture.on_release();

    assert_eq!(bounds, WindowBounds::new(150, 100, 750, 600));
    // Right edge unchanged
    assert_eq!(bounds.x + bounds.width as i32, 900);
}

#[test]
fn test_bottom_resize_grows_height_only() {
    let mut gesture = controller();
    let mut bounds = window();

    let press = Point::new(400.0, 598.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Bottom)
    );

    let cursor = Point::new(screen(bounds, press).x, screen(bounds, press).y + 120.0);
    bounds = gesture.on_move(cursor, bounds).unwrap();

    assert_eq!(bounds, WindowBounds::new(100, 100, 800, 720));
}

#[test]
fn test_resize_clamps_to_minimum() {
    let mut gesture = controller();
    let mut bounds = WindowBounds::new(100, 100, 420, 320);

    let press = Point::new(419.0, 160.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Right)
    );

    // Pull far past the floor
    let cursor = Point::new(screen(bounds, press).x - 300.0, screen(bounds, press).y);
    bounds = gesture.on_move(cursor, bounds).unwrap();

    assert_eq!(bounds.width, MIN_SIZE.width);
    assert_eq!(bounds.x, 100);
}

#[test]
fn test_top_resize_clamp_keeps_bottom_edge() {
    let mut gesture = controller();
    let mut bounds = WindowBounds::new(100, 100, 800, 320);

    let press = Point::new(400.0, 2.0);
    gesture.on_press(press, screen(bounds, press), bounds.size());

    // Dragging down shrinks height to the floor, bottom edge stays put
    let cursor = Point::new(screen(bounds, press).x, screen(bounds, press).y + 200.0);
    bounds = gesture.on_move(cursor, bounds).unwrap();

    assert_eq!(bounds.height, MIN_SIZE.height);
    assert_eq!(bounds.y + bounds.height as i32, 420);
}

#[test]
fn test_sequential_gestures_are_independent() {
    let mut gesture = controller();
    let mut bounds = window();

    // First: drag
    let press = Point::new(200.0, 200.0);
    gesture.on_press(press, screen(bounds, press), bounds.size());
    let cursor = Point::new(screen(bounds, press).x + 40.0, screen(bounds, press).y);
    bounds = gesture.on_move(cursor, bounds).unwrap();
    gesture.on_release();
    assert_eq!(bounds.x, 140);

    // Second: right resize, starting fresh
    let press = Point::new(797.0, 300.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Right)
    );
    let cursor = Point::new(screen(bounds, press).x + 60.0, screen(bounds, press).y);
    bounds = gesture.on_move(cursor, bounds).unwrap();
    gesture.on_release();

    assert_eq!(bounds, WindowBounds::new(140, 100, 860, 600));
}

#[test]
fn test_press_outside_margin_regions() {
    let mut gesture = controller();
    let bounds = window();

    // Press just inside the margin on the left but within the top margin:
    // top wins over left
    let press = Point::new(3.0, 3.0);
    assert_eq!(
        gesture.on_press(press, screen(bounds, press), bounds.size()),
        Some(HitRegion::Top)
    );
    gesture.cancel();
    assert!(!gesture.is_active());
}

#[test]
fn test_move_without_press_is_ignored() {
    let mut gesture = controller();
    let bounds = window();

    assert_eq!(gesture.on_move(Point::new(500.0, 500.0), bounds), None);
    assert!(!gesture.is_active());
}
