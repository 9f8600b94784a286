//! Deterministic RNG wrapper.
//!
//! Navigation itself is deterministic; randomness only enters when a caller
//! asks for "somewhere on this scaffold" (idle wandering, work-spot
//! assignment).  `NavRng` is seeded explicitly so those picks are
//! reproducible run to run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for navigation queries that need a random pick.
///
/// Used only from single-threaded contexts.
pub struct NavRng(SmallRng);

impl NavRng {
    pub fn new(seed: u64) -> Self {
        NavRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f32` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }

    /// Uniform value in `[lo, hi]`; returns `lo` when the span is empty, so
    /// degenerate (zero-width) rectangles never panic.
    #[inline]
    pub fn span(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.unit() * (hi - lo)
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
