//! Interaction state machine.
//!
//! ```text
//! Idle ──pointer_down──▶ Dragging ──pointer_up──▶ Completing ──▶ Idle (page ± 1)
//!  │                                         └──▶ SnappingBack ─▶ Idle
//!  ├──flip/next/previous──▶ Completing
//!  └──peek──▶ Peeking ──▶ Idle
//! ```
//!
//! Every entry point is a synchronous method that mutates the owned
//! [`InteractionState`] and returns the [`Notice`]s the host must act on
//! (sound cue, page indicator). Requests that arrive while a drag or an
//! animation is active are dropped, never queued.

use kurbo::{Point, Size};

use crate::animation::{Animation, Motion, Step};
use crate::config::MotionTuning;
use crate::geometry::{constrain_pointer, progress};
use crate::state::{FlipDirection, InteractionState, Phase};

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

/// Side effects the host performs after a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A flip is now guaranteed to complete; play the page sound.
    FlipStarted { direction: FlipDirection },
    /// A flip settled; `page` is zero-based.
    PageChanged { page: usize, total: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Directional keyboard triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(Self::Next),
            "ArrowLeft" | "ArrowUp" => Some(Self::Previous),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Flipbook {
    state: InteractionState,
    page_count: usize,
    page: Size,
    motion: MotionTuning,
    /// Fold midpoint margin, shared with the renderer's pointer constraint.
    margin: f64,
}

impl Flipbook {
    #[must_use]
    pub fn new(page: Size, page_count: usize, motion: MotionTuning, margin: f64) -> Self {
        Self {
            state: InteractionState::default(),
            page_count,
            page,
            motion,
            margin,
        }
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn page_size(&self) -> Size {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Refresh the page size from the layout provider. Every stored point,
    /// including the endpoints of a running animation, is rescaled so an
    /// in-flight curl keeps its shape.
    pub fn set_page_size(&mut self, page: Size) {
        if self.page.width > 0.0 && self.page.height > 0.0 {
            let (sx, sy) = (page.width / self.page.width, page.height / self.page.height);
            let scale = |p: Point| Point::new(p.x * sx, p.y * sy);
            self.state.corner_origin = scale(self.state.corner_origin);
            self.state.pointer_pos = scale(self.state.pointer_pos);
            self.state.press_pos = scale(self.state.press_pos);
            if let Phase::Animating(anim) = &mut self.state.phase {
                anim.rescale(sx, sy);
            }
        }
        self.page = page;
    }

    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        if self.state.current_page >= page_count {
            self.state.current_page = page_count.saturating_sub(1);
        }
    }

    /// Pointer as the renderer sees it: constrained against the corner.
    #[must_use]
    pub fn constrained_pointer(&self) -> Point {
        constrain_pointer(self.state.corner_origin, self.state.pointer_pos, self.page, self.margin)
    }

    /// Progress of the current curl, `0` when idle.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.state.flip_direction.is_none() {
            return 0.0;
        }
        let dist = self.state.corner_origin.distance(self.constrained_pointer());
        progress(dist, self.page)
    }

    fn has_page(&self, direction: FlipDirection) -> bool {
        direction.target(self.state.current_page, self.page_count).is_some()
    }

    /// Which flip a press at `pos` would start, if any.
    fn edge_hit(&self, pos: Point) -> Option<FlipDirection> {
        let zone = self.page.width * self.motion.edge_zone_frac;
        if pos.x >= self.page.width - zone && self.has_page(FlipDirection::Forward) {
            Some(FlipDirection::Forward)
        } else if pos.x <= zone && self.has_page(FlipDirection::Backward) {
            Some(FlipDirection::Backward)
        } else {
            None
        }
    }

    fn edge_x(&self, direction: FlipDirection) -> f64 {
        match direction {
            FlipDirection::Forward => self.page.width,
            FlipDirection::Backward => 0.0,
        }
    }

    pub fn pointer_down(&mut self, pos: Point) -> bool {
        if self.state.is_busy() {
            return false;
        }
        let Some(direction) = self.edge_hit(pos) else {
            return false;
        };
        let corner_y = if pos.y < self.page.height * 0.5 { 0.0 } else { self.page.height };
        self.state.phase = Phase::Dragging;
        self.state.flip_direction = Some(direction);
        self.state.corner_origin = Point::new(self.edge_x(direction), corner_y);
        self.state.pointer_pos = pos;
        self.state.press_pos = pos;
        log::debug!("drag start {direction:?} from {:?}", self.state.corner_origin);
        true
    }

    /// Track the pointer while dragging; returns whether a redraw is due.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        self.state.pointer_pos = pos;
        true
    }

    pub fn pointer_up(&mut self) -> Vec<Notice> {
        if !self.state.is_dragging() {
            return Vec::new();
        }
        let Some(direction) = self.state.flip_direction else {
            self.state.reset_to_idle();
            return Vec::new();
        };
        let released = self.progress();
        let from = self.constrained_pointer();
        // A press released in place is a click, not a throw.
        let dragged = self.state.pointer_pos.distance(self.state.press_pos) > self.motion.click_slop_px;
        if dragged && released > self.motion.release_threshold {
            log::debug!("release at {released:.2}: completing");
            vec![self.begin_complete(direction, from)]
        } else {
            log::debug!("release at {released:.2}: snapping back");
            self.state.pointer_pos = from;
            self.state.phase = Phase::Animating(Animation::new(
                Motion::SnapBack,
                from,
                self.state.corner_origin,
                self.motion.snap_back_ms,
            ));
            Vec::new()
        }
    }

    /// Programmatic flip from the bottom corner, straight into completing.
    pub fn flip(&mut self, direction: FlipDirection) -> Vec<Notice> {
        if self.state.is_busy() {
            log::debug!("flip {direction:?} dropped: busy");
            return Vec::new();
        }
        if !self.has_page(direction) {
            return Vec::new();
        }
        let inset = self.motion.auto_inset_px;
        let corner = Point::new(self.edge_x(direction), self.page.height);
        let start = match direction {
            FlipDirection::Forward => Point::new(corner.x - inset, corner.y - inset),
            FlipDirection::Backward => Point::new(corner.x + inset, corner.y - inset),
        };
        self.state.corner_origin = corner;
        vec![self.begin_complete(direction, start)]
    }

    pub fn next(&mut self) -> Vec<Notice> {
        self.flip(FlipDirection::Forward)
    }

    pub fn previous(&mut self) -> Vec<Notice> {
        self.flip(FlipDirection::Backward)
    }

    pub fn key(&mut self, key: &str) -> Vec<Notice> {
        match NavKey::from_key(key) {
            Some(NavKey::Next) => self.next(),
            Some(NavKey::Previous) => self.previous(),
            None => Vec::new(),
        }
    }

    /// One-shot hint: lift the bottom-right corner and drop it again.
    pub fn peek(&mut self) -> bool {
        if !self.motion.peek_enabled || self.state.is_busy() || !self.has_page(FlipDirection::Forward) {
            return false;
        }
        let corner = Point::new(self.page.width, self.page.height);
        let lifted = Point::new(
            corner.x - self.page.width * self.motion.peek_lift_x,
            corner.y - self.page.height * self.motion.peek_lift_y,
        );
        self.state.flip_direction = Some(FlipDirection::Forward);
        self.state.corner_origin = corner;
        self.state.pointer_pos = corner;
        self.state.phase = Phase::Animating(Animation::new(Motion::Peek, corner, lifted, self.motion.peek_ms));
        log::debug!("peek hint");
        true
    }

    /// Step the active animation by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Notice> {
        let Phase::Animating(anim) = &mut self.state.phase else {
            return Vec::new();
        };
        let step = anim.advance(dt_ms);
        let motion = anim.motion();
        self.state.pointer_pos = anim.position();
        if step == Step::Running {
            return Vec::new();
        }

        let direction = self.state.flip_direction;
        self.state.reset_to_idle();
        match (motion, direction) {
            (Motion::Complete, Some(direction)) => {
                let Some(page) = direction.target(self.state.current_page, self.page_count) else {
                    return Vec::new();
                };
                self.state.current_page = page;
                log::info!("page {} / {}", page + 1, self.page_count);
                vec![Notice::PageChanged {
                    page,
                    total: self.page_count,
                }]
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn cursor_at(&self, pos: Point) -> Cursor {
        if self.state.is_dragging() {
            Cursor::Grabbing
        } else if !self.state.is_busy() && self.edge_hit(pos).is_some() {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }

    fn begin_complete(&mut self, direction: FlipDirection, from: Point) -> Notice {
        let overshoot = self.page.width * self.motion.overshoot_frac;
        let target_x = match direction {
            FlipDirection::Forward => -overshoot,
            FlipDirection::Backward => self.page.width + overshoot,
        };
        let target = Point::new(target_x, self.state.corner_origin.y);
        self.state.flip_direction = Some(direction);
        self.state.pointer_pos = from;
        self.state.phase =
            Phase::Animating(Animation::new(Motion::Complete, from, target, self.motion.complete_ms));
        log::debug!("completing {direction:?}");
        Notice::FlipStarted { direction }
    }
}
