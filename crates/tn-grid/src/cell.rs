//! Grid value types: cells, paths, and static obstacles.

use tn_core::GridPos;

// ── NavCell ───────────────────────────────────────────────────────────────────

/// One discrete grid location.
///
/// Identity is `pos`.  The shape never changes after construction; only
/// `walkable` and `cost` may be updated in place by the owning
/// [`NavGrid`](crate::NavGrid).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavCell {
    pub pos: GridPos,
    pub walkable: bool,
    /// Movement cost multiplier applied when entering this cell.  `>= 1.0`.
    pub cost: f32,
    /// Cell on another floor this one leads to (stairs and the tower entrance).
    pub stair_target: Option<GridPos>,
    /// `true` for tower-interior cells.
    pub is_interior: bool,
}

impl NavCell {
    /// A plain walkable-or-not ground cell with unit cost.
    #[inline]
    pub fn new(pos: GridPos, walkable: bool) -> Self {
        Self { pos, walkable, cost: 1.0, stair_target: None, is_interior: false }
    }

    /// A walkable tower-interior cell.
    #[inline]
    pub fn interior(pos: GridPos) -> Self {
        Self { is_interior: true, ..Self::new(pos, true) }
    }

    #[inline]
    pub fn is_stair(&self) -> bool {
        self.stair_target.is_some()
    }
}

// ── NavPath ───────────────────────────────────────────────────────────────────

/// Result of a grid routing query: cells from start to goal (inclusive) and
/// the summed movement cost.
#[derive(Clone, Debug, PartialEq)]
pub struct NavPath {
    pub cells: Vec<NavCell>,
    pub total_cost: f32,
}

impl NavPath {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` if start and goal are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    /// Number of floor changes along the path.
    pub fn floor_changes(&self) -> usize {
        self.cells.windows(2).filter(|w| w[0].pos.floor != w[1].pos.floor).count()
    }
}

// ── ObstacleDef ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    Tree,
    Rock,
    /// The tower footprint.  Ignored when marking ground cells: the interior
    /// grid models the tower instead.
    Tower,
}

/// A static circular obstacle on the ground plane.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleDef {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
    pub kind: ObstacleKind,
}

impl ObstacleDef {
    #[inline]
    pub fn new(x: f32, z: f32, radius: f32, kind: ObstacleKind) -> Self {
        Self { x, z, radius, kind }
    }

    /// `true` if world point `(x, z)` is inside (or on) the obstacle circle.
    #[inline]
    pub fn covers(&self, x: f32, z: f32) -> bool {
        let dx = x - self.x;
        let dz = z - self.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }
}
