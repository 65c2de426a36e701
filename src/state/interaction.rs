// Interaction state owned by the flip state machine, read by the renderer.
use kurbo::Point;

use crate::animation::{Animation, Motion};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    /// Right edge, toward the next page.
    Forward,
    /// Left edge, toward the previous page.
    Backward,
}

impl FlipDirection {
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// Index of the page this direction reveals from `page`, if it exists.
    #[must_use]
    pub fn target(self, page: usize, page_count: usize) -> Option<usize> {
        match self {
            Self::Forward => page.checked_add(1).filter(|&p| p < page_count),
            Self::Backward => page.checked_sub(1).filter(|&p| p < page_count),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Animating(Animation),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub phase: Phase,
    /// Set iff a curl is in progress.
    pub flip_direction: Option<FlipDirection>,
    pub corner_origin: Point,
    pub pointer_pos: Point,
    /// Where the current drag was grabbed.
    pub press_pos: Point,
    /// Changes only when a completed flip settles.
    pub current_page: usize,
}

impl InteractionState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    #[must_use]
    pub fn motion(&self) -> Option<Motion> {
        match &self.phase {
            Phase::Animating(anim) => Some(anim.motion()),
            _ => None,
        }
    }

    /// True while the renderer should draw a curl instead of the flat page.
    #[must_use]
    pub fn is_curling(&self) -> bool {
        self.flip_direction.is_some() && self.is_busy()
    }

    /// Page underneath the curl: `current_page ± 1`, possibly out of range.
    #[must_use]
    pub fn reveal_index(&self) -> Option<isize> {
        let dir = self.flip_direction?;
        let current = isize::try_from(self.current_page).ok()?;
        Some(current + dir.sign() as isize)
    }

    pub(crate) fn reset_to_idle(&mut self) {
        self.phase = Phase::Idle;
        self.flip_direction = None;
    }
}
