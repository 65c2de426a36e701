use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn easings_start_at_zero_and_end_at_one() {
    assert_abs_diff_eq!(ease_out_cubic(0.0), 0.0);
    assert_abs_diff_eq!(ease_out_cubic(1.0), 1.0);
    assert_abs_diff_eq!(settle(0.0), 0.0);
    assert_abs_diff_eq!(settle(1.0), 1.0);
    assert_abs_diff_eq!(out_and_back(0.0), 0.0);
    assert_abs_diff_eq!(out_and_back(1.0), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(out_and_back(0.5), 1.0);
}

#[test]
fn ease_out_cubic_is_front_loaded() {
    assert!(ease_out_cubic(0.25) > 0.25);
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn settle_overshoots_then_returns() {
    let peak = (1..100).map(|i| settle(f64::from(i) / 100.0)).fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!(peak < 1.2);
    assert_abs_diff_eq!(settle(0.99), 1.0, epsilon = 1e-3);
}

#[test]
fn advance_runs_until_duration() {
    let mut anim = Animation::new(Motion::Complete, Point::ZERO, Point::new(100.0, 0.0), 480.0);
    assert_eq!(anim.advance(16.0), Step::Running);
    assert!(anim.position().x > 0.0);
    assert_eq!(anim.advance(400.0), Step::Running);
    assert_eq!(anim.advance(64.0), Step::Done);
    assert_eq!(anim.position(), Point::new(100.0, 0.0));
}

#[test]
fn advance_ignores_bad_deltas() {
    let mut anim = Animation::new(Motion::SnapBack, Point::new(50.0, 50.0), Point::ZERO, 320.0);
    assert_eq!(anim.advance(-10.0), Step::Running);
    assert_eq!(anim.advance(f64::NAN), Step::Running);
    assert_eq!(anim.t(), 0.0);
    assert_eq!(anim.position(), Point::new(50.0, 50.0));
}

#[test]
fn zero_duration_finishes_immediately() {
    let mut anim = Animation::new(Motion::Complete, Point::ZERO, Point::new(1.0, 1.0), 0.0);
    assert_eq!(anim.advance(0.0), Step::Done);
}

#[test]
fn peek_returns_to_start() {
    let corner = Point::new(400.0, 600.0);
    let lifted = Point::new(336.0, 552.0);
    let mut anim = Animation::new(Motion::Peek, corner, lifted, 900.0);
    anim.advance(450.0);
    let mid = anim.position();
    assert_abs_diff_eq!(mid.x, lifted.x, epsilon = 1e-9);
    anim.advance(450.0);
    let end = anim.position();
    assert_abs_diff_eq!(end.x, corner.x, epsilon = 1e-9);
    assert_abs_diff_eq!(end.y, corner.y, epsilon = 1e-9);
}

#[test]
fn snap_back_never_passes_its_target() {
    let from = Point::new(310.0, 540.0);
    let corner = Point::new(400.0, 600.0);
    let mut anim = Animation::new(Motion::SnapBack, from, corner, 320.0);
    let mut bounced = false;
    while anim.advance(8.0) == Step::Running {
        let pos = anim.position();
        assert!((pos - corner).dot(from - corner) >= 0.0, "crossed the corner at {pos:?}");
        bounced |= pos.distance(corner) > 1e-6 && anim.t() > 0.4;
    }
    assert!(bounced);
    assert!(anim.position().distance(corner) < 1e-9);
}

#[test]
fn rescale_moves_both_endpoints() {
    let mut anim = Animation::new(Motion::Complete, Point::new(396.0, 596.0), Point::new(-140.0, 600.0), 480.0);
    anim.advance(100.0);
    let before = anim.position();
    anim.rescale(0.5, 0.5);
    assert_eq!(anim.origin(), Point::new(198.0, 298.0));
    assert_eq!(anim.target(), Point::new(-70.0, 300.0));
    let after = anim.position();
    assert_abs_diff_eq!(after.x, before.x * 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(after.y, before.y * 0.5, epsilon = 1e-9);
}
