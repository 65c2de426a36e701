use kurbo::{Affine, BezPath, Rect};

use super::*;
use crate::error::FlipbookError;
use crate::surface::{Paint, Rgba};

/// Counts repaints; every frame starts with a clear.
#[derive(Default)]
struct CountingSurface {
    frames: usize,
}

impl DrawingSurface for CountingSurface {
    type Image = u8;

    fn save(&mut self) {}

    fn restore(&mut self) {}

    fn clip(&mut self, _path: &BezPath) {}

    fn transform(&mut self, _affine: Affine) -> Result<(), FlipbookError> {
        Ok(())
    }

    fn set_alpha(&mut self, _alpha: f64) {}

    fn clear(&mut self, _rect: Rect) {
        self.frames += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _paint: &Paint) -> Result<(), FlipbookError> {
        Ok(())
    }

    fn stroke_path(&mut self, _path: &BezPath, _color: Rgba, _width: f64) {}

    fn draw_image(&mut self, _image: &u8, _dest: Rect) -> Result<(), FlipbookError> {
        Ok(())
    }
}

fn session(pages: usize) -> Session<u8> {
    let config = FlipbookConfig {
        sound: false,
        ..FlipbookConfig::default()
    };
    let mut session = Session::new(&config);
    session.resize(Size::new(400.0, 600.0));
    session.set_pages((0..pages).map(|i| i as u8).collect());
    session
}

fn run(session: &mut Session<u8>, surface: &mut CountingSurface) -> Vec<ViewerAction> {
    let mut actions = Vec::new();
    for _ in 0..200 {
        actions.extend(session.frame(16.0, surface));
    }
    actions
}

#[test]
fn arrow_key_flips_and_reports_page() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    assert_eq!(session.key("ArrowRight"), Some(Vec::new()));
    assert!(session.book().state().is_animating());
    let actions = run(&mut session, &mut surface);
    assert_eq!(actions, vec![ViewerAction::PageChanged { page: 1, total: 3 }]);
    assert_eq!(session.book().current_page(), 1);
}

#[test]
fn other_keys_are_not_handled() {
    let mut session = session(3);
    assert_eq!(session.key("Enter"), None);
    assert_eq!(session.key("a"), None);
}

#[test]
fn idle_frames_do_not_repaint() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    session.frame(16.0, &mut surface);
    session.frame(16.0, &mut surface);
    session.frame(16.0, &mut surface);
    assert_eq!(surface.frames, 1);
}

#[test]
fn resize_requests_repaint() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    session.frame(16.0, &mut surface);
    session.resize(Size::new(300.0, 450.0));
    session.frame(16.0, &mut surface);
    assert_eq!(surface.frames, 2);
}

#[test]
fn short_drag_snaps_back_without_page_change() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    assert!(session.pointer_down(Point::new(395.0, 590.0)));
    assert!(session.pointer_move(Point::new(380.0, 580.0), &mut surface));
    assert!(session.pointer_up().is_empty());
    assert!(run(&mut session, &mut surface).is_empty());
    assert_eq!(session.book().current_page(), 0);
    assert!(!session.book().state().is_busy());
}

#[test]
fn moves_without_drag_are_ignored() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    assert!(!session.pointer_move(Point::new(200.0, 200.0), &mut surface));
    assert!(session.pointer_up().is_empty());
    assert_eq!(surface.frames, 0);
}

#[test]
fn every_drag_move_repaints_immediately() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    session.frame(16.0, &mut surface);
    assert!(session.pointer_down(Point::new(395.0, 590.0)));
    for x in [370.0, 340.0, 310.0] {
        assert!(session.pointer_move(Point::new(x, 560.0), &mut surface));
    }
    assert_eq!(surface.frames, 4);
    // Nothing left over for the next frame once the moves are painted.
    session.frame(16.0, &mut surface);
    assert_eq!(surface.frames, 4);
}

#[test]
fn dropping_pages_clamps_current_page() {
    let mut session = session(3);
    let mut surface = CountingSurface::default();
    session.flip(FlipDirection::Forward);
    run(&mut session, &mut surface);
    session.flip(FlipDirection::Forward);
    run(&mut session, &mut surface);
    assert_eq!(session.book().current_page(), 2);
    session.set_pages(vec![0]);
    assert_eq!(session.book().current_page(), 0);
}
