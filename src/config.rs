//! Flipbook configuration: page list, layout fractions, motion timing and the
//! cosmetic curl constants.
//!
//! Every struct is `#[serde(default)]`, so a host page only has to spell out
//! what it wants to change:
//!
//! ```json
//! { "pages": ["menu/1.png", "menu/2.png"], "motion": { "complete_ms": 600 } }
//! ```

use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::FlipbookError;
use crate::surface::{ColorStop, Rgba};

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "flipbook-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipbookConfig {
    pub pages: Vec<String>,
    pub layout: LayoutConfig,
    pub motion: MotionTuning,
    pub curl: CurlTuning,
    /// Play the synthesized paper sound when a flip starts.
    pub sound: bool,
}

impl Default for FlipbookConfig {
    fn default() -> Self {
        Self {
            pages: (1..=5).map(|n| format!("pages/page_{n}.png")).collect(),
            layout: LayoutConfig::default(),
            motion: MotionTuning::default(),
            curl: CurlTuning::default(),
            sound: true,
        }
    }
}

impl FlipbookConfig {
    pub fn from_json(raw: &str) -> Result<Self, FlipbookError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read overrides from the document, falling back to defaults.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                log::info!("loaded flipbook config ({} pages)", config.pages.len());
                config
            }
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page width / height.
    pub aspect: f64,
    pub desktop_width_frac: f64,
    pub mobile_width_frac: f64,
    /// Viewports at most this wide (CSS px) use `mobile_width_frac`.
    pub mobile_breakpoint: f64,
    pub max_height_frac: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            aspect: 21.0 / 29.7,
            desktop_width_frac: 0.80,
            mobile_width_frac: 0.95,
            mobile_breakpoint: 768.0,
            max_height_frac: 0.88,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Width of the grab band on either side, as a fraction of page width.
    pub edge_zone_frac: f64,
    /// Releases above this progress complete the flip.
    pub release_threshold: f64,
    /// Releases closer than this to the press point snap back whatever the
    /// progress.
    pub click_slop_px: f64,
    pub complete_ms: f64,
    pub snap_back_ms: f64,
    /// How far past the opposite edge the completing pointer aims, × page width.
    pub overshoot_frac: f64,
    /// Diagonal inset of the synthesized pointer for keyboard/button flips.
    pub auto_inset_px: f64,
    pub peek_enabled: bool,
    pub peek_ms: f64,
    pub peek_delay_ms: f64,
    /// Peak lift of the peek hint, × page width / height.
    pub peek_lift_x: f64,
    pub peek_lift_y: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            edge_zone_frac: 0.30,
            release_threshold: 0.18,
            click_slop_px: 4.0,
            complete_ms: 480.0,
            snap_back_ms: 320.0,
            overshoot_frac: 0.35,
            auto_inset_px: 4.0,
            peek_enabled: true,
            peek_ms: 900.0,
            peek_delay_ms: 700.0,
            peek_lift_x: 0.16,
            peek_lift_y: 0.08,
        }
    }
}

/// Cosmetic constants of the curl. None of these affect the fold geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlTuning {
    /// Bow depth coefficient: `curvature = sin(progress·π) · page_w · k`.
    pub curvature_k: f64,
    /// Fold-line midpoint may sit this far outside the page (px).
    pub midpoint_margin: f64,
    /// Region extension as a multiple of the page diagonal.
    pub extension_factor: f64,
    /// Curvature at or below this draws a straight crease.
    pub straight_below: f64,
    pub shadow_alpha_cap: f64,
    pub shadow_alpha_gain: f64,
    pub shadow_width_max: f64,
    pub shadow_width_frac: f64,
    pub highlight_min_progress: f64,
    pub highlight_alpha: f64,
    pub highlight_width: f64,
    /// Paper stock of the sheet's back and of blank placeholder pages.
    pub paper: Rgba,
    /// Alpha of the mirrored front image showing through the back.
    pub bleed_alpha: f64,
    /// Shading across the curl back, crease (0) to tip (1).
    pub shading: Vec<ColorStop>,
    pub edge_dark: Rgba,
    pub edge_dark_width: f64,
    pub edge_light: Rgba,
    pub edge_light_width: f64,
    pub edge_light_offset: f64,
}

impl Default for CurlTuning {
    fn default() -> Self {
        Self {
            curvature_k: 0.06,
            midpoint_margin: 30.0,
            extension_factor: 2.0,
            straight_below: 0.5,
            shadow_alpha_cap: 0.45,
            shadow_alpha_gain: 0.9,
            shadow_width_max: 40.0,
            shadow_width_frac: 0.15,
            highlight_min_progress: 0.02,
            highlight_alpha: 0.12,
            highlight_width: 24.0,
            paper: Rgba::new(245, 240, 232, 1.0),
            bleed_alpha: 0.12,
            shading: vec![
                ColorStop::new(0.0, Rgba::black(0.10)),
                ColorStop::new(0.3, Rgba::white(0.10)),
                ColorStop::new(0.5, Rgba::black(0.02)),
                ColorStop::new(0.7, Rgba::white(0.08)),
                ColorStop::new(1.0, Rgba::new(180, 170, 155, 0.18)),
            ],
            edge_dark: Rgba::black(0.35),
            edge_dark_width: 1.5,
            edge_light: Rgba::white(0.6),
            edge_light_width: 1.0,
            edge_light_offset: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
