//! Minimal 2D drawing-surface abstraction the curl renderer paints through.
//!
//! Anything offering path clipping, affine transforms, gradients and image
//! blits can host the renderer. [`crate::canvas::CanvasSurface`] is the
//! browser implementation; tests use a recording surface.

use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::FlipbookError;

/// Straight (non-premultiplied) RGBA colour; `a` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black(a: f64) -> Self {
        Self::new(0, 0, 0, a)
    }

    pub const fn white(a: f64) -> Self {
        Self::new(255, 255, 255, a)
    }

    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Multiply the alpha channel, e.g. to fade a stop in with progress.
    #[must_use]
    pub fn scale_alpha(self, factor: f64) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS `rgba()` string.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

/// One stop of a linear gradient; `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Gradient along the segment `from → to`.
    Linear {
        from: Point,
        to: Point,
        stops: Vec<ColorStop>,
    },
}

/// Immediate-mode drawing target.
///
/// `save`/`restore` bracket clip, transform and alpha changes exactly like the
/// HTML canvas state stack: clips only ever narrow until restored.
pub trait DrawingSurface {
    type Image;

    fn save(&mut self);

    fn restore(&mut self);

    /// Intersect the current clip with `path` (nonzero fill rule), in the
    /// current transform.
    fn clip(&mut self, path: &BezPath);

    /// Post-multiply the current transform by `affine`.
    fn transform(&mut self, affine: Affine) -> Result<(), FlipbookError>;

    fn set_alpha(&mut self, alpha: f64);

    fn clear(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), FlipbookError>;

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64);

    fn draw_image(&mut self, image: &Self::Image, dest: Rect) -> Result<(), FlipbookError>;
}
