use kurbo::{PathEl, Shape};

use super::*;
use crate::geometry::compute_fold;

const PAGE: Size = Size::new(400.0, 600.0);

fn clipper() -> Clipper {
    Clipper::new(PAGE, &CurlTuning::default())
}

fn page_samples() -> impl Iterator<Item = Point> {
    (0..20).flat_map(|i| (0..30).map(move |j| Point::new(f64::from(i) * 20.0 + 3.7, f64::from(j) * 20.0 + 5.3)))
}

fn cases() -> Vec<(Point, Point)> {
    vec![
        (Point::new(400.0, 0.0), Point::new(250.0, 90.0)),
        (Point::new(400.0, 600.0), Point::new(120.0, 420.0)),
        (Point::new(0.0, 0.0), Point::new(310.0, 40.0)),
        (Point::new(0.0, 600.0), Point::new(60.0, 590.0)),
        (Point::new(400.0, 0.0), Point::new(-100.0, 0.0)),
    ]
}

#[test]
fn sides_are_complementary_over_the_page() {
    let clipper = clipper();
    for (corner, pointer) in cases() {
        let fold = compute_fold(corner, pointer).unwrap();
        for curvature in [0.0, 0.4, 12.0, 24.0] {
            let corner_region = clipper.region(&fold, Side::Corner, curvature);
            let kept_region = clipper.region(&fold, Side::Kept, curvature);
            for pt in page_samples() {
                let in_corner = corner_region.contains(pt);
                let in_kept = kept_region.contains(pt);
                assert!(
                    in_corner != in_kept,
                    "{pt:?} corner={in_corner} kept={in_kept} (curvature {curvature})"
                );
            }
        }
    }
}

#[test]
fn corner_side_holds_the_corner() {
    let clipper = clipper();
    for (corner, pointer) in cases() {
        let fold = compute_fold(corner, pointer).unwrap();
        let inset = corner + (pointer - corner) * 0.01;
        assert!(clipper.region(&fold, Side::Corner, 10.0).contains(inset));
        assert!(!clipper.region(&fold, Side::Kept, 10.0).contains(inset));
    }
}

#[test]
fn bow_leans_toward_kept_side() {
    let clipper = clipper();
    let fold = compute_fold(Point::new(400.0, 600.0), Point::new(100.0, 300.0)).unwrap();
    let curvature = 20.0;
    // Between the straight chord and the curve's apex (curvature / 2 deep).
    let probe = fold.mid - fold.normal * (curvature * 0.25);
    assert!(clipper.region(&fold, Side::Corner, curvature).contains(probe));
    assert!(!clipper.region(&fold, Side::Corner, 0.0).contains(probe));
}

#[test]
fn small_curvature_draws_straight_crease() {
    let clipper = clipper();
    let fold = compute_fold(Point::new(400.0, 0.0), Point::new(200.0, 100.0)).unwrap();
    let straight = clipper.region(&fold, Side::Corner, 0.5);
    assert!(!straight.elements().iter().any(|el| matches!(el, PathEl::QuadTo(..))));
    let bowed = clipper.region(&fold, Side::Corner, 0.51);
    assert!(bowed.elements().iter().any(|el| matches!(el, PathEl::QuadTo(..))));
}

#[test]
fn region_reaches_past_the_page() {
    let clipper = clipper();
    assert!(clipper.extent() >= 2.0 * diagonal(PAGE));
    let fold = compute_fold(Point::new(400.0, 0.0), Point::new(380.0, 10.0)).unwrap();
    let bbox = clipper.region(&fold, Side::Kept, 0.0).bounding_box();
    assert!(bbox.x0 < 0.0 && bbox.y0 < 0.0);
    assert!(bbox.x1 > PAGE.width && bbox.y1 > PAGE.height);
}

#[test]
fn crease_offset_moves_along_normal() {
    let clipper = clipper();
    let fold = compute_fold(Point::new(400.0, 0.0), Point::new(200.0, 0.0)).unwrap();
    let crease = clipper.crease(&fold, 0.0, 2.0);
    let PathEl::MoveTo(start) = crease.elements()[0] else {
        panic!("crease must start with move_to");
    };
    // Vertical crease at x = 300, normal pointing right toward the corner.
    assert!((start.x - 302.0).abs() < 1e-9);
    assert_eq!(crease.elements().len(), 2);
}

#[test]
fn side_opposite_round_trips() {
    assert_eq!(Side::Corner.opposite(), Side::Kept);
    assert_eq!(Side::Kept.opposite().opposite(), Side::Kept);
}
