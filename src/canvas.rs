//! [`DrawingSurface`] over a browser `CanvasRenderingContext2d`.

use kurbo::{Affine, BezPath, PathEl, Rect};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::FlipbookError;
use crate::surface::{DrawingSurface, Paint, Rgba};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Grab the 2d context of `canvas`.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, FlipbookError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(FlipbookError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FlipbookError::ContextUnavailable)?;
        Ok(Self::new(ctx))
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Reset the base transform to CSS pixels for a backing store scaled by
    /// `dpr`. Call after every canvas resize.
    pub fn set_pixel_ratio(&self, dpr: f64) -> Result<(), FlipbookError> {
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        Ok(())
    }

    fn trace(&self, path: &BezPath) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

impl DrawingSurface for CanvasSurface {
    type Image = HtmlImageElement;

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip(&mut self, path: &BezPath) {
        self.trace(path);
        self.ctx.clip();
    }

    fn transform(&mut self, affine: Affine) -> Result<(), FlipbookError> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        self.ctx.transform(a, b, c, d, e, f)?;
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn clear(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), FlipbookError> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                for stop in stops {
                    gradient.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &stop.color.css())?;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.trace(path);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dest: Rect) -> Result<(), FlipbookError> {
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            dest.x0,
            dest.y0,
            dest.width(),
            dest.height(),
        )?;
        Ok(())
    }
}
