//! World-space points and grid coordinates.
//!
//! The world is y-up: `x`/`z` span the ground plane and `y` is height.
//! `Vec3` uses `f32`, matching the precision of the rendering layer that
//! consumes our waypoints.

use std::ops::{Add, Mul, Sub};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A world-space position.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in 3D.
    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Distance projected onto the ground plane (ignores `y`).
    #[inline]
    pub fn distance_xz(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Linear interpolation: `t = 0` → `self`, `t = 1` → `other`.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── GridPos ───────────────────────────────────────────────────────────────────

/// Identity of a grid cell: integer column `x`, row `z`, and `floor`
/// (`0` = ground, `1..=N` = tower interior).
///
/// Ordering is `(floor, x, z)` lexicographic via field order below, which the
/// grid pathfinder relies on for deterministic tie-breaking.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub floor: i32,
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, z: i32, floor: i32) -> Self {
        Self { floor, x, z }
    }

    /// The same column/row shifted by `(dx, dz)` on the same floor.
    #[inline]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz, self.floor)
    }

    /// Chebyshev (king-move) distance on the x/z plane.  Floors are ignored.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {} @ floor {}]", self.x, self.z, self.floor)
    }
}
