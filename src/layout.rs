//! Page sizing against the viewport.

use kurbo::Size;

use crate::config::LayoutConfig;

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    /// Page size in CSS pixels; also the canvas' CSS size.
    pub page: Size,
    pub dpr: f64,
}

impl PageLayout {
    /// Canvas backing-store size in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        let px = |v: f64| (v * self.dpr).round().max(0.0) as u32;
        (px(self.page.width), px(self.page.height))
    }
}

/// Fit one page into a `viewport_w × viewport_h` viewport: a fraction of the
/// width at the configured aspect, shrunk to fit the height when too tall.
#[must_use]
pub fn fit_page(viewport_w: f64, viewport_h: f64, dpr: f64, cfg: &LayoutConfig) -> PageLayout {
    let frac = if viewport_w <= cfg.mobile_breakpoint {
        cfg.mobile_width_frac
    } else {
        cfg.desktop_width_frac
    };
    let aspect = if cfg.aspect > 0.0 { cfg.aspect } else { LayoutConfig::default().aspect };
    let mut w = viewport_w.max(0.0) * frac;
    let mut h = w / aspect;
    let max_h = viewport_h.max(0.0) * cfg.max_height_frac;
    if h > max_h {
        h = max_h;
        w = h * aspect;
    }
    PageLayout {
        page: Size::new(w.round(), h.round()),
        dpr: if dpr > 0.0 && dpr.is_finite() { dpr } else { 1.0 },
    }
}
