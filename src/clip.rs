//! Region clipper: splits the page along the (possibly bowed) crease.
//!
//! Each region is a huge quad-ish shape: the crease extended well past the
//! page in both directions, closed by pushing it out along the fold normal.
//! The corner and kept regions share the crease exactly, so together they
//! tile the page with no gap or overlap.

use kurbo::{BezPath, Point, Size, Vec2};

use crate::config::CurlTuning;
use crate::geometry::{Fold, diagonal};
use crate::surface::DrawingSurface;

#[cfg(test)]
#[path = "clip_test.rs"]
mod clip_test;

/// Which side of the crease a region covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Contains the anchor corner; the part being lifted away.
    Corner,
    /// Stays flat on the page.
    Kept,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Self::Corner => 1.0,
            Self::Kept => -1.0,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Corner => Self::Kept,
            Self::Kept => Self::Corner,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Clipper {
    /// How far the crease and the closing offset reach, in px.
    extent: f64,
    /// Curvature at or below this draws the crease straight.
    straight_below: f64,
}

impl Clipper {
    #[must_use]
    pub fn new(page: Size, tuning: &CurlTuning) -> Self {
        Self {
            extent: diagonal(page) * tuning.extension_factor.max(2.0),
            straight_below: tuning.straight_below,
        }
    }

    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Closed path covering `side` of the crease.
    #[must_use]
    pub fn region(&self, fold: &Fold, side: Side, curvature: f64) -> BezPath {
        let (start, end) = self.crease_ends(fold, Vec2::ZERO);
        let push = fold.normal * (self.extent * side.sign());
        let mut path = BezPath::new();
        path.move_to(start);
        self.push_crease(&mut path, fold, curvature, Vec2::ZERO, end);
        path.line_to(end + push);
        path.line_to(start + push);
        path.close_path();
        path
    }

    /// The crease itself as an open path, shifted `offset` px along the
    /// normal (positive toward the corner).
    #[must_use]
    pub fn crease(&self, fold: &Fold, curvature: f64, offset: f64) -> BezPath {
        let shift = fold.normal * offset;
        let (start, end) = self.crease_ends(fold, shift);
        let mut path = BezPath::new();
        path.move_to(start);
        self.push_crease(&mut path, fold, curvature, shift, end);
        path
    }

    /// Narrow the surface clip to `side` of the crease.
    pub fn clip<S: DrawingSurface>(&self, surface: &mut S, fold: &Fold, side: Side, curvature: f64) {
        surface.clip(&self.region(fold, side, curvature));
    }

    fn crease_ends(&self, fold: &Fold, shift: Vec2) -> (Point, Point) {
        let reach = fold.dir * self.extent;
        (fold.mid - reach + shift, fold.mid + reach + shift)
    }

    fn push_crease(&self, path: &mut BezPath, fold: &Fold, curvature: f64, shift: Vec2, end: Point) {
        if curvature > self.straight_below {
            // Bows away from the corner, toward the flat side.
            path.quad_to(fold.mid - fold.normal * curvature + shift, end);
        } else {
            path.line_to(end);
        }
    }
}
