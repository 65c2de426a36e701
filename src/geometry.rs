//! Fold geometry: the crease of the simulated sheet.
//!
//! The fold line is the perpendicular bisector of the segment from the anchor
//! corner to the pointer. Folding the corner along it lands the corner exactly
//! on the pointer, which is what makes the curl track the finger.

use std::f64::consts::PI;

use kurbo::{Point, Size, Vec2};

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// Corner–pointer distances below this produce no fold (flat page).
pub const MIN_FOLD_DIST: f64 = 1.0;

/// A fold line, recomputed every frame.
///
/// `dir` and `normal` are unit vectors and perpendicular. `normal` points from
/// the crease toward the corner, i.e. into the folded-away side; every layer of
/// the renderer relies on that orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fold {
    /// Midpoint of corner → pointer; lies on the crease.
    pub mid: Point,
    pub dir: Vec2,
    pub normal: Vec2,
    /// Corner → pointer distance.
    pub dist: f64,
}

impl Fold {
    /// Signed distance from the crease; positive on the corner side.
    #[must_use]
    pub fn side_distance(&self, p: Point) -> f64 {
        (p - self.mid).dot(self.normal)
    }

    /// The anchor corner this fold was built from.
    #[must_use]
    pub fn corner(&self) -> Point {
        self.mid + self.normal * (self.dist * 0.5)
    }

    /// Where the corner lands once folded (the pointer).
    #[must_use]
    pub fn tip(&self) -> Point {
        self.mid - self.normal * (self.dist * 0.5)
    }
}

/// Build the fold for `corner` dragged to `pointer`, or `None` when the two
/// (nearly) coincide.
#[must_use]
pub fn compute_fold(corner: Point, pointer: Point) -> Option<Fold> {
    let d = pointer - corner;
    let dist = d.hypot();
    // Negated so NaN input also yields no fold.
    if !(dist >= MIN_FOLD_DIST) {
        return None;
    }
    Some(Fold {
        mid: corner.midpoint(pointer),
        dir: Vec2::new(-d.y / dist, d.x / dist),
        normal: Vec2::new(-d.x / dist, -d.y / dist),
        dist,
    })
}

#[must_use]
pub fn diagonal(page: Size) -> f64 {
    page.width.hypot(page.height)
}

/// Normalized curl progress: `dist / diagonal`, clamped to `[0, 1]`.
#[must_use]
pub fn progress(dist: f64, page: Size) -> f64 {
    let diag = diagonal(page);
    if diag <= 0.0 || dist.is_nan() {
        return 0.0;
    }
    (dist / diag).clamp(0.0, 1.0)
}

/// Bow depth of the crease. Zero when flat-closed or flat-open, peaking at
/// half progress.
#[must_use]
pub fn curvature(progress: f64, page_w: f64, k: f64) -> f64 {
    if !(progress > 0.0 && progress < 1.0) {
        return 0.0;
    }
    (progress * PI).sin() * page_w * k
}

/// Keep the fold midpoint within `margin` of the page by reflecting it back
/// across whichever boundary it crossed (or pinning it there when the
/// overshoot exceeds the page).
///
/// Pointers whose midpoint is already in range are returned untouched, so
/// the constraint is idempotent.
#[must_use]
pub fn constrain_pointer(corner: Point, pointer: Point, page: Size, margin: f64) -> Point {
    Point::new(
        constrain_axis(corner.x, pointer.x, -margin, page.width + margin),
        constrain_axis(corner.y, pointer.y, -margin, page.height + margin),
    )
}

fn constrain_axis(corner: f64, pointer: f64, lo: f64, hi: f64) -> f64 {
    let mid = (corner + pointer) * 0.5;
    if (lo..=hi).contains(&mid) || mid.is_nan() {
        return pointer;
    }
    let (bound, reflected) = if mid > hi { (hi, 2.0 * hi - mid) } else { (lo, 2.0 * lo - mid) };
    // Past a full page-width of overshoot the reflection would land beyond the
    // opposite bound; pin to the crossed bound instead.
    let settled = if (lo..=hi).contains(&reflected) { reflected } else { bound };
    2.0 * settled - corner
}
