//! Curl renderer: composites one frame from a read-only state snapshot.
//!
//! Layer order for a curl, each in its own `save`/`restore`:
//!
//! 1. revealed page, clipped to the corner side, with the lifted sheet's shadow
//! 2. current page, clipped to the kept side, with a faint crease highlight
//! 3. back of the sheet: kept side, then reflected, then corner side again;
//!    paper fill, mirrored bleed-through of the front, shading across the flap
//! 4. crease strokes
//!
//! The renderer never mutates state; call it after every state change.

use kurbo::{Rect, Shape, Size};

use crate::clip::{Clipper, Side};
use crate::config::CurlTuning;
use crate::error::FlipbookError;
use crate::geometry::{Fold, compute_fold, constrain_pointer, curvature, progress};
use crate::reflect::reflect_across_fold;
use crate::state::InteractionState;
use crate::surface::{ColorStop, DrawingSurface, Paint, Rgba};

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Render one frame of `state` onto `surface`.
pub fn render<S: DrawingSurface>(
    surface: &mut S,
    state: &InteractionState,
    pages: &[S::Image],
    page: Size,
    tuning: &CurlTuning,
) -> Result<(), FlipbookError> {
    CurlRenderer::new(page, tuning).render(surface, state, pages)
}

/// Per-frame derived values shared by the layers.
struct Curl {
    fold: Fold,
    progress: f64,
    curvature: f64,
}

pub struct CurlRenderer<'a> {
    page: Size,
    tuning: &'a CurlTuning,
    clipper: Clipper,
}

impl<'a> CurlRenderer<'a> {
    #[must_use]
    pub fn new(page: Size, tuning: &'a CurlTuning) -> Self {
        Self {
            page,
            tuning,
            clipper: Clipper::new(page, tuning),
        }
    }

    fn page_rect(&self) -> Rect {
        self.page.to_rect()
    }

    pub fn render<S: DrawingSurface>(
        &self,
        surface: &mut S,
        state: &InteractionState,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        surface.clear(self.page_rect());
        if state.is_curling() {
            self.render_curl(surface, state, pages)
        } else {
            self.draw_page(surface, Some(state.current_page), pages)
        }
    }

    /// Draw the curl described by `state`, or the flat page when the corner
    /// and pointer coincide.
    pub fn render_curl<S: DrawingSurface>(
        &self,
        surface: &mut S,
        state: &InteractionState,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        let t = self.tuning;
        let corner = state.corner_origin;
        let pointer = constrain_pointer(corner, state.pointer_pos, self.page, t.midpoint_margin);
        let Some(fold) = compute_fold(corner, pointer) else {
            return self.draw_page(surface, Some(state.current_page), pages);
        };
        let progress = progress(fold.dist, self.page);
        let curl = Curl {
            fold,
            progress,
            curvature: curvature(progress, self.page.width, t.curvature_k),
        };
        let reveal = state
            .reveal_index()
            .and_then(|i| usize::try_from(i).ok());

        layer(surface, |s| {
            s.clip(&self.page_rect().to_path(0.1));
            layer(s, |s| self.revealed_layer(s, &curl, reveal, pages))?;
            layer(s, |s| self.kept_layer(s, &curl, state.current_page, pages))?;
            layer(s, |s| self.back_layer(s, &curl, state.current_page, pages))?;
            layer(s, |s| self.edge_layer(s, &curl))
        })
    }

    fn revealed_layer<S: DrawingSurface>(
        &self,
        surface: &mut S,
        curl: &Curl,
        reveal: Option<usize>,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        let t = self.tuning;
        let fold = &curl.fold;
        self.clipper.clip(surface, fold, Side::Corner, curl.curvature);
        self.draw_page(surface, reveal, pages)?;

        let width = (self.page.width * curl.progress * t.shadow_width_frac).clamp(1.0, t.shadow_width_max);
        let alpha = (curl.progress * t.shadow_alpha_gain).min(t.shadow_alpha_cap);
        let from = crease_apex(curl);
        surface.fill_rect(
            self.page_rect(),
            &Paint::Linear {
                from,
                to: from + fold.normal * width,
                stops: vec![
                    ColorStop::new(0.0, Rgba::black(alpha)),
                    ColorStop::new(1.0, Rgba::black(0.0)),
                ],
            },
        )
    }

    fn kept_layer<S: DrawingSurface>(
        &self,
        surface: &mut S,
        curl: &Curl,
        current: usize,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        let t = self.tuning;
        let fold = &curl.fold;
        self.clipper.clip(surface, fold, Side::Kept, curl.curvature);
        self.draw_page(surface, Some(current), pages)?;
        if curl.progress <= t.highlight_min_progress {
            return Ok(());
        }
        let from = crease_apex(curl);
        surface.fill_rect(
            self.page_rect(),
            &Paint::Linear {
                from,
                to: from - fold.normal * t.highlight_width,
                stops: vec![
                    ColorStop::new(0.0, Rgba::white(t.highlight_alpha * curl.progress.min(1.0))),
                    ColorStop::new(1.0, Rgba::white(0.0)),
                ],
            },
        )
    }

    fn back_layer<S: DrawingSurface>(
        &self,
        surface: &mut S,
        curl: &Curl,
        current: usize,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        let t = self.tuning;
        let fold = &curl.fold;
        let rect = self.page_rect();
        // The flap lies over the kept side; inside the reflected frame it is
        // the corner side of the page.
        self.clipper.clip(surface, fold, Side::Kept, curl.curvature);
        reflect_across_fold(surface, fold)?;
        self.clipper.clip(surface, fold, Side::Corner, curl.curvature);

        surface.fill_rect(rect, &Paint::Solid(t.paper))?;
        if let Some(front) = pages.get(current) {
            surface.set_alpha(t.bleed_alpha);
            let drawn = surface.draw_image(front, rect);
            surface.set_alpha(1.0);
            drawn?;
        }
        surface.fill_rect(
            rect,
            &Paint::Linear {
                from: fold.mid,
                to: fold.corner(),
                stops: t.shading.clone(),
            },
        )
    }

    fn edge_layer<S: DrawingSurface>(&self, surface: &mut S, curl: &Curl) -> Result<(), FlipbookError> {
        let t = self.tuning;
        let strength = (curl.progress * 2.0).min(1.0);
        let width_scale = 0.5 + curl.progress;
        let dark = self.clipper.crease(&curl.fold, curl.curvature, 0.0);
        surface.stroke_path(&dark, t.edge_dark.scale_alpha(strength), t.edge_dark_width * width_scale);
        // Offset toward the flap.
        let light = self.clipper.crease(&curl.fold, curl.curvature, -t.edge_light_offset);
        surface.stroke_path(&light, t.edge_light.scale_alpha(strength), t.edge_light_width * width_scale);
        Ok(())
    }

    /// Page image at `index`, or blank paper when there is none.
    fn draw_page<S: DrawingSurface>(
        &self,
        surface: &mut S,
        index: Option<usize>,
        pages: &[S::Image],
    ) -> Result<(), FlipbookError> {
        match index.and_then(|i| pages.get(i)) {
            Some(image) => surface.draw_image(image, self.page_rect()),
            None => surface.fill_rect(self.page_rect(), &Paint::Solid(self.tuning.paper)),
        }
    }
}

/// Deepest point of the bowed crease; gradients start there.
fn crease_apex(curl: &Curl) -> kurbo::Point {
    curl.fold.mid - curl.fold.normal * (curl.curvature * 0.5)
}

/// Run `draw` between `save` and `restore`, restoring even on error.
fn layer<S, F>(surface: &mut S, draw: F) -> Result<(), FlipbookError>
where
    S: DrawingSurface,
    F: FnOnce(&mut S) -> Result<(), FlipbookError>,
{
    surface.save();
    let result = draw(surface);
    surface.restore();
    result
}
