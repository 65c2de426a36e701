use approx::assert_abs_diff_eq;
use kurbo::{Affine, BezPath, Point};

use super::*;
use crate::animation::{Animation, Motion};
use crate::reflect::reflection;
use crate::state::{FlipDirection, Phase};

const PAGE: Size = Size::new(400.0, 600.0);

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Save,
    Restore,
    Clip,
    Transform(Affine),
    Alpha(f64),
    Clear(Rect),
    Fill(Rect, Paint),
    Stroke(Rgba, f64),
    Image(u32, Rect),
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
    fail_images: bool,
}

impl DrawingSurface for RecordingSurface {
    type Image = u32;

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clip(&mut self, _path: &BezPath) {
        self.ops.push(Op::Clip);
    }

    fn transform(&mut self, affine: Affine) -> Result<(), FlipbookError> {
        self.ops.push(Op::Transform(affine));
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::Alpha(alpha));
    }

    fn clear(&mut self, rect: Rect) {
        self.ops.push(Op::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), FlipbookError> {
        self.ops.push(Op::Fill(rect, paint.clone()));
        Ok(())
    }

    fn stroke_path(&mut self, _path: &BezPath, color: Rgba, width: f64) {
        self.ops.push(Op::Stroke(color, width));
    }

    fn draw_image(&mut self, image: &u32, dest: Rect) -> Result<(), FlipbookError> {
        if self.fail_images {
            return Err(FlipbookError::Js("decode failed".into()));
        }
        self.ops.push(Op::Image(*image, dest));
        Ok(())
    }
}

impl RecordingSurface {
    fn images(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn gradients(&self) -> Vec<Vec<ColorStop>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(_, Paint::Linear { stops, .. }) => Some(stops.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    fn assert_balanced(&self) {
        let mut depth = 0i32;
        for op in &self.ops {
            match op {
                Op::Save => depth += 1,
                Op::Restore => {
                    depth -= 1;
                    assert!(depth >= 0, "restore without save");
                }
                _ => {}
            }
        }
        assert_eq!(depth, 0);
    }
}

fn dragging(current: usize, direction: FlipDirection, corner: Point, pointer: Point) -> InteractionState {
    InteractionState {
        phase: Phase::Dragging,
        flip_direction: Some(direction),
        corner_origin: corner,
        pointer_pos: pointer,
        press_pos: corner,
        current_page: current,
    }
}

fn draw(state: &InteractionState, pages: &[u32]) -> RecordingSurface {
    let mut surface = RecordingSurface::default();
    render(&mut surface, state, pages, PAGE, &CurlTuning::default()).unwrap();
    surface
}

#[test]
fn idle_draws_current_page_flat() {
    let state = InteractionState {
        current_page: 1,
        ..InteractionState::default()
    };
    let surface = draw(&state, &[10, 11, 12]);
    assert_eq!(surface.ops, vec![Op::Clear(PAGE.to_rect()), Op::Image(11, PAGE.to_rect())]);
}

#[test]
fn missing_page_draws_blank_paper() {
    let surface = draw(&InteractionState::default(), &[]);
    let paper = CurlTuning::default().paper;
    assert_eq!(
        surface.ops,
        vec![Op::Clear(PAGE.to_rect()), Op::Fill(PAGE.to_rect(), Paint::Solid(paper))]
    );
}

#[test]
fn coincident_corner_and_pointer_draws_flat() {
    let corner = Point::new(400.0, 600.0);
    let state = dragging(0, FlipDirection::Forward, corner, corner);
    let surface = draw(&state, &[10, 11]);
    assert_eq!(surface.images(), vec![10]);
    assert_eq!(surface.count(|op| matches!(op, Op::Clip)), 0);
}

#[test]
fn curl_composites_layers_in_order() {
    let corner = Point::new(400.0, 600.0);
    let pointer = Point::new(150.0, 450.0);
    let state = dragging(0, FlipDirection::Forward, corner, pointer);
    let surface = draw(&state, &[10, 11]);

    // Revealed page, then the current page, then its mirrored bleed-through.
    assert_eq!(surface.images(), vec![11, 10, 10]);
    surface.assert_balanced();
    // Page rect, one per flat layer, two around the reflection.
    assert_eq!(surface.count(|op| matches!(op, Op::Clip)), 5);
    assert_eq!(surface.count(|op| matches!(op, Op::Stroke(..))), 2);

    let tuning = CurlTuning::default();
    let alphas: Vec<f64> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Alpha(a) => Some(*a),
            _ => None,
        })
        .collect();
    assert_eq!(alphas, vec![tuning.bleed_alpha, 1.0]);
}

#[test]
fn curl_back_is_drawn_in_the_reflected_frame() {
    let corner = Point::new(400.0, 600.0);
    let pointer = Point::new(150.0, 450.0);
    let state = dragging(0, FlipDirection::Forward, corner, pointer);
    let surface = draw(&state, &[10, 11]);

    let transforms: Vec<Affine> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Transform(a) => Some(*a),
            _ => None,
        })
        .collect();
    assert_eq!(transforms.len(), 1);
    let expected = reflection(&compute_fold(corner, pointer).unwrap());
    for (a, b) in transforms[0].as_coeffs().iter().zip(expected.as_coeffs().iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
    }

    // Paper goes down after the transform, before the bleed image.
    let t = surface.ops.iter().position(|op| matches!(op, Op::Transform(_))).unwrap();
    let paper = CurlTuning::default().paper;
    assert!(matches!(&surface.ops[t + 2], Op::Fill(_, Paint::Solid(c)) if *c == paper));
}

#[test]
fn out_of_range_reveal_uses_paper() {
    let corner = Point::new(400.0, 600.0);
    let state = dragging(1, FlipDirection::Forward, corner, Point::new(200.0, 500.0));
    let surface = draw(&state, &[10, 11]);
    assert_eq!(surface.images(), vec![11, 11]);
    let first_fill = surface.ops.iter().find(|op| matches!(op, Op::Fill(..))).unwrap();
    assert_eq!(
        *first_fill,
        Op::Fill(PAGE.to_rect(), Paint::Solid(CurlTuning::default().paper))
    );
}

#[test]
fn backward_curl_reveals_previous_page() {
    let state = dragging(2, FlipDirection::Backward, Point::new(0.0, 0.0), Point::new(180.0, 90.0));
    let surface = draw(&state, &[10, 11, 12]);
    assert_eq!(surface.images(), vec![11, 12, 12]);
}

#[test]
fn shadow_alpha_is_capped() {
    // dist 640 on a 721 diagonal: progress ~0.89, uncapped alpha ~0.8.
    let state = dragging(0, FlipDirection::Forward, Point::new(400.0, 600.0), Point::new(0.0, 100.0));
    let surface = draw(&state, &[10, 11]);
    let shadow = &surface.gradients()[0];
    assert_abs_diff_eq!(shadow[0].color.a, CurlTuning::default().shadow_alpha_cap);
    assert_abs_diff_eq!(shadow[1].color.a, 0.0);
}

#[test]
fn highlight_needs_some_progress() {
    let corner = Point::new(400.0, 600.0);
    let barely = draw(&dragging(0, FlipDirection::Forward, corner, Point::new(395.0, 595.0)), &[10, 11]);
    // Shadow and back shading only.
    assert_eq!(barely.gradients().len(), 2);

    let lifted = draw(&dragging(0, FlipDirection::Forward, corner, Point::new(200.0, 450.0)), &[10, 11]);
    assert_eq!(lifted.gradients().len(), 3);
}

#[test]
fn animating_state_is_rendered_as_a_curl() {
    let corner = Point::new(400.0, 600.0);
    let from = Point::new(250.0, 500.0);
    let state = InteractionState {
        phase: Phase::Animating(Animation::new(Motion::SnapBack, from, corner, 320.0)),
        flip_direction: Some(FlipDirection::Forward),
        corner_origin: corner,
        pointer_pos: from,
        press_pos: from,
        current_page: 0,
    };
    let surface = draw(&state, &[10, 11]);
    assert_eq!(surface.images(), vec![11, 10, 10]);
}

#[test]
fn failed_draw_still_restores_every_save() {
    let state = dragging(0, FlipDirection::Forward, Point::new(400.0, 600.0), Point::new(150.0, 450.0));
    let mut surface = RecordingSurface {
        fail_images: true,
        ..RecordingSurface::default()
    };
    let result = render(&mut surface, &state, &[10, 11], PAGE, &CurlTuning::default());
    assert!(result.is_err());
    surface.assert_balanced();
}
