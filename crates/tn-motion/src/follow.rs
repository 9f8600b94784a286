//! Per-agent path cursor.
//!
//! A [`PathFollowState`] owns the waypoint list and remembers which waypoint
//! the agent is heading for.  It never owns a timer: callers pass the
//! agent's current position, speed, and frame time to [`PathFollowState::update`]
//! and write the returned position back wherever they keep it.

use tn_core::Vec3;
use tn_elevated::ElevatedPath;
use tn_grid::{NavGrid, NavPath};

/// Result of one [`PathFollowState::update`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FollowUpdate {
    pub new_position: Vec3,
    pub is_complete:  bool,
    /// Fraction of the path's length covered, in `[0, 1]`.
    pub progress:     f32,
}

/// Cursor over a waypoint polyline.
///
/// `distance_traveled` never decreases and never exceeds `total_distance`;
/// the waypoint index never decreases.
#[derive(Clone, Debug, PartialEq)]
pub struct PathFollowState {
    points:            Vec<Vec3>,
    current:           usize,
    complete:          bool,
    total_distance:    f32,
    distance_traveled: f32,
}

impl PathFollowState {
    /// Start following `points` from the first waypoint.
    ///
    /// An empty list is a path that is already complete.
    pub fn new(points: Vec<Vec3>) -> Self {
        let total_distance = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        Self {
            complete: points.is_empty(),
            points,
            current: 0,
            total_distance,
            distance_traveled: 0.0,
        }
    }

    /// Follow `points` from where the agent actually stands.
    ///
    /// The approach from `from` to the first waypoint counts toward
    /// [`total_distance`](Self::total_distance), so progress only reaches
    /// `1` on arrival.
    pub fn departing(from: Vec3, points: Vec<Vec3>) -> Self {
        if points.is_empty() {
            return Self::new(points);
        }
        let mut all = Vec::with_capacity(points.len() + 1);
        all.push(from);
        all.extend(points);
        Self::new(all)
    }

    pub fn from_elevated(path: &ElevatedPath) -> Self {
        Self::new(path.positions())
    }

    /// Follow a grid path through the world-space centers of its cells.
    pub fn from_nav_path(path: &NavPath, grid: &NavGrid) -> Self {
        Self::new(cell_centers(path, grid))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The waypoint the agent is heading for, `None` once complete.
    #[inline]
    pub fn current_target(&self) -> Option<Vec3> {
        self.points.get(self.current).copied()
    }

    /// Final waypoint of the path.
    #[inline]
    pub fn destination(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    #[inline]
    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    /// `distance_traveled / total_distance`, or `0` for a zero-length path.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total_distance > 0.0 {
            (self.distance_traveled / self.total_distance).min(1.0)
        } else {
            0.0
        }
    }

    // ── Update ────────────────────────────────────────────────────────────

    /// Advance from `current` by `speed * dt` along the remaining waypoints.
    ///
    /// Every waypoint the budget reaches is consumed in this call and the
    /// leftover distance carries on toward the next one.  A non-positive
    /// budget, or a completed path, leaves the position unchanged.
    pub fn update(&mut self, current: Vec3, speed: f32, dt: f32) -> FollowUpdate {
        let mut budget = speed * dt;
        let mut pos = current;

        if !self.complete && budget > 0.0 {
            while let Some(target) = self.current_target() {
                let remaining = pos.distance(target);
                if budget >= remaining {
                    budget -= remaining;
                    self.advance_traveled(remaining);
                    pos = target;
                    self.current += 1;
                } else {
                    pos = pos.lerp(target, budget / remaining);
                    self.advance_traveled(budget);
                    break;
                }
            }
            if self.current >= self.points.len() {
                self.complete = true;
                self.distance_traveled = self.total_distance;
            }
        }

        FollowUpdate { new_position: pos, is_complete: self.complete, progress: self.progress() }
    }

    fn advance_traveled(&mut self, d: f32) {
        self.distance_traveled = (self.distance_traveled + d).min(self.total_distance);
    }
}

// ── Free helpers ──────────────────────────────────────────────────────────────

/// World-space centers of `path`'s cells, in order.
fn cell_centers(path: &NavPath, grid: &NavGrid) -> Vec<Vec3> {
    path.cells.iter().map(|c| grid.cell_world_pos(c.pos)).collect()
}

/// Waypoints for an agent at `from` walking `path`.
///
/// The start cell's center is dropped when the agent already stands within
/// one cell of it, so the agent does not double back to it.
pub fn grid_waypoints(from: Vec3, path: &NavPath, grid: &NavGrid) -> Vec<Vec3> {
    let mut points = cell_centers(path, grid);
    if points.len() > 1 && from.distance(points[0]) <= grid.cell_size() {
        points.remove(0);
    }
    points
}

/// Move from `current` toward a single `target` by `speed * dt`.
///
/// Returns the new position and whether the target was reached.
pub fn move_toward_target(current: Vec3, target: Vec3, speed: f32, dt: f32) -> (Vec3, bool) {
    let budget = (speed * dt).max(0.0);
    let remaining = current.distance(target);
    if remaining <= budget {
        (target, true)
    } else {
        (current.lerp(target, budget / remaining), false)
    }
}

/// `true` if `pos` is within `threshold` of `target` in 3D.
#[inline]
pub fn is_near_target(pos: Vec3, target: Vec3, threshold: f32) -> bool {
    pos.distance(target) <= threshold
}
