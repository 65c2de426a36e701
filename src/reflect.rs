//! Reflection about the fold line.
//!
//! Rendering the front image through this transform puts every pixel where
//! the back of the sheet lands once folded, so no separate back-face texture
//! is needed.

use kurbo::{Affine, Point};

use crate::error::FlipbookError;
use crate::geometry::Fold;
use crate::surface::DrawingSurface;

#[cfg(test)]
#[path = "reflect_test.rs"]
mod reflect_test;

/// `x ↦ (I − 2nnᵀ)x + 2n(n·m)` for unit normal `n` through midpoint `m`.
#[must_use]
pub fn reflection(fold: &Fold) -> Affine {
    let n = fold.normal;
    let offset = 2.0 * n.dot(fold.mid.to_vec2());
    Affine::new([
        1.0 - 2.0 * n.x * n.x,
        -2.0 * n.x * n.y,
        -2.0 * n.x * n.y,
        1.0 - 2.0 * n.y * n.y,
        offset * n.x,
        offset * n.y,
    ])
}

#[must_use]
pub fn reflect_point(fold: &Fold, p: Point) -> Point {
    reflection(fold) * p
}

/// Concatenate the fold reflection onto the surface transform.
pub fn reflect_across_fold<S: DrawingSurface>(surface: &mut S, fold: &Fold) -> Result<(), FlipbookError> {
    surface.transform(reflection(fold))
}
