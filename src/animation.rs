//! Finite pointer animations and their easing curves.
//!
//! An animation only knows how to move the virtual pointer from one point to
//! another over time. The host frame loop calls [`Animation::advance`] with
//! the elapsed milliseconds; the state machine reacts to [`Step::Done`].

use std::f64::consts::PI;

use kurbo::Point;

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Carry the sheet past the opposite edge; commits the page turn.
    Complete,
    /// Let the sheet fall back onto its corner.
    SnapBack,
    /// Lift the corner a little and drop it again.
    Peek,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Running,
    Done,
}

#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-out with a cosine term: overshoots the target slightly, then
/// settles onto it. `settle(0) = 0`, `settle(1) = 1`.
#[must_use]
pub fn settle(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3) * (1.5 * PI * t).cos()
}

/// Out-and-back envelope: 0 at both ends, 1 at the middle.
#[must_use]
pub fn out_and_back(t: f64) -> f64 {
    (PI * t).sin().max(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    motion: Motion,
    from: Point,
    to: Point,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Animation {
    #[must_use]
    pub fn new(motion: Motion, from: Point, to: Point, duration_ms: f64) -> Self {
        Self {
            motion,
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.from
    }

    #[must_use]
    pub fn target(&self) -> Point {
        self.to
    }

    /// Scale both endpoints, for a page resize mid-flight.
    pub fn rescale(&mut self, sx: f64, sy: f64) {
        self.from = Point::new(self.from.x * sx, self.from.y * sy);
        self.to = Point::new(self.to.x * sx, self.to.y * sy);
    }

    /// Normalized time in `[0, 1]`.
    #[must_use]
    pub fn t(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Pointer position at the current time. A snap-back never passes its
    /// target: the overshoot of [`settle`] bounces back along the same
    /// segment, so the corner is reached and left again without crossing.
    #[must_use]
    pub fn position(&self) -> Point {
        let t = self.t();
        let eased = match self.motion {
            Motion::Complete => ease_out_cubic(t),
            Motion::SnapBack => 1.0 - (1.0 - settle(t)).abs(),
            Motion::Peek => out_and_back(t),
        };
        self.from.lerp(self.to, eased)
    }

    pub fn advance(&mut self, dt_ms: f64) -> Step {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        if self.t() >= 1.0 { Step::Done } else { Step::Running }
    }
}
