//! Page-curl flipbook for the browser.
//!
//! Drag a page corner (or press an arrow key) and the sheet curls along a
//! fold line that follows the pointer, revealing the neighbouring page with a
//! shaded back and a drop shadow. The curl engine is plain geometry over a
//! [`surface::DrawingSurface`]; only [`canvas`], [`loader`], [`audio`] and the
//! Yew [`components`] touch the DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Fold line, progress, curvature, pointer constraint |
//! | [`clip`] | Corner/kept regions on either side of the crease |
//! | [`reflect`] | Reflection across the fold line |
//! | [`render`] | Layered curl compositing |
//! | [`animation`] | Easings and the `advance(dt)` animation step |
//! | [`machine`] | Interaction state machine (drag, complete, snap back, peek) |
//! | [`state`] | State snapshot shared by the machine and the renderer |
//! | [`surface`] | Drawing-surface trait, colours and paints |
//! | [`canvas`] | `CanvasRenderingContext2d` surface |
//! | [`layout`] | Page sizing against the viewport |
//! | [`loader`] | Page image loading |
//! | [`audio`] | Synthesized page-turn sound |
//! | [`config`] | JSON configuration and tuning constants |
//! | [`model`] | Viewer reducer for load status and page indicator |
//! | [`components`] | Yew UI |

pub mod animation;
pub mod audio;
pub mod canvas;
pub mod clip;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod loader;
pub mod machine;
pub mod model;
pub mod reflect;
pub mod render;
pub mod state;
pub mod surface;
pub mod util;
