//! Frame time model.
//!
//! Navigation advances in variable-length frames: each step carries a
//! `dt` in seconds.  The integer `Tick` counts steps so observers can order
//! events exactly, while `SimClock` accumulates the elapsed seconds.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed world steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus accumulated simulated seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub now:     Tick,
    /// Seconds simulated so far; `f64` so long runs do not lose precision.
    pub elapsed: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step of `dt` seconds and return the new tick.
    ///
    /// Negative `dt` still counts as a step but adds no time.
    pub fn advance(&mut self, dt: f32) -> Tick {
        self.now = self.now.next();
        self.elapsed += f64::from(dt.max(0.0));
        self.now
    }
}
