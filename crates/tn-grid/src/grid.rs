//! The navigation grid: an in-memory store of [`NavCell`]s.
//!
//! # Data layout
//!
//! Cells live in an `FxHashMap<GridPos, NavCell>` (integer keys hash fast with
//! FxHash) plus a per-floor index so `cells_on_floor` does not scan the whole
//! map.  The grid is built once per level and is read-mostly afterwards.
//!
//! # Spatial resolution
//!
//! [`world_to_grid`](NavGrid::world_to_grid) and
//! [`grid_to_world`](NavGrid::grid_to_world) are the single source of truth
//! for converting between world units and cell indices.

use std::collections::BTreeMap;
use std::f32::consts::SQRT_2;

use rustc_hash::FxHashMap;
use tn_core::{GridPos, Vec3};

use crate::NavCell;

/// Flat penalty added to any move that changes floor.
pub const STAIR_PENALTY: f32 = 2.0;

/// Largest ring radius searched by [`NavGrid::find_nearest_walkable`].
pub const NEAREST_SEARCH_RADIUS: i32 = 5;

/// The 8 same-floor neighbor offsets: orthogonal first, then diagonal.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// Uniform cell store for the ground (floor 0) and tower interior (floors 1..N).
///
/// Construct with [`GridBuilder`](crate::GridBuilder) or, for hand-made
/// test levels, [`NavGrid::new`] followed by [`add_cell`](Self::add_cell).
#[derive(Clone, Debug)]
pub struct NavGrid {
    cells:        FxHashMap<GridPos, NavCell>,
    floors:       BTreeMap<i32, Vec<GridPos>>,
    cell_size:    f32,
    floor_height: f32,
}

impl NavGrid {
    /// An empty grid with the given spatial resolution.
    pub fn new(cell_size: f32, floor_height: f32) -> Self {
        Self {
            cells: FxHashMap::default(),
            floors: BTreeMap::new(),
            cell_size,
            floor_height,
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `cell`, replacing any existing cell with the same identity.
    pub fn add_cell(&mut self, cell: NavCell) {
        let pos = cell.pos;
        if self.cells.insert(pos, cell).is_none() {
            self.floors.entry(pos.floor).or_default().push(pos);
        }
    }

    /// Update a cell's walkability.  Returns `false` if the cell does not exist.
    pub fn set_walkable(&mut self, pos: GridPos, walkable: bool) -> bool {
        match self.cells.get_mut(&pos) {
            Some(cell) => {
                cell.walkable = walkable;
                true
            }
            None => false,
        }
    }

    /// Update a cell's cost multiplier (clamped to `>= 1.0`).  Returns `false`
    /// if the cell does not exist.
    pub fn set_cost(&mut self, pos: GridPos, cost: f32) -> bool {
        match self.cells.get_mut(&pos) {
            Some(cell) => {
                cell.cost = cost.max(1.0);
                true
            }
            None => false,
        }
    }

    /// Link `pos` to `target` as a one-way stair.  Returns `false` if `pos`
    /// does not exist.
    pub fn set_stair_target(&mut self, pos: GridPos, target: GridPos) -> bool {
        match self.cells.get_mut(&pos) {
            Some(cell) => {
                cell.stair_target = Some(target);
                true
            }
            None => false,
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, pos: GridPos) -> Option<&NavCell> {
        self.cells.get(&pos)
    }

    /// Convenience for `cell(GridPos::new(x, z, floor))`.
    #[inline]
    pub fn cell_at(&self, x: i32, z: i32, floor: i32) -> Option<&NavCell> {
        self.cell(GridPos::new(x, z, floor))
    }

    #[inline]
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.cells.get(&pos).is_some_and(|c| c.walkable)
    }

    /// All cells on `floor`, in insertion order.
    pub fn cells_on_floor(&self, floor: i32) -> Vec<&NavCell> {
        self.floors
            .get(&floor)
            .map(|ps| ps.iter().filter_map(|p| self.cells.get(p)).collect())
            .unwrap_or_default()
    }

    /// Floor indices that hold at least one cell, ascending.
    pub fn floors(&self) -> impl Iterator<Item = i32> + '_ {
        self.floors.keys().copied()
    }

    /// Iterator over every cell, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = &NavCell> + '_ {
        self.cells.values()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.values().filter(|c| c.walkable).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Walkable cells reachable in one move from `cell`: the 8 same-floor
    /// neighbors, plus the stair target when `cell` is a stair.
    pub fn neighbors(&self, cell: &NavCell) -> Vec<&NavCell> {
        let mut out = Vec::with_capacity(9);
        for (dx, dz) in NEIGHBOR_OFFSETS {
            if let Some(n) = self.cells.get(&cell.pos.offset(dx, dz)) {
                if n.walkable {
                    out.push(n);
                }
            }
        }
        if let Some(target) = cell.stair_target {
            if let Some(n) = self.cells.get(&target) {
                if n.walkable {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Cost of moving from `from` to the adjacent cell `to`.
    ///
    /// `1.0` orthogonal, `√2` diagonal, plus [`STAIR_PENALTY`] when the floor
    /// changes; the sum is scaled by `to.cost`.
    pub fn movement_cost(&self, from: &NavCell, to: &NavCell) -> f32 {
        let dx = from.pos.x - to.pos.x;
        let dz = from.pos.z - to.pos.z;
        let mut base = if dx != 0 && dz != 0 { SQRT_2 } else { 1.0 };
        if from.pos.floor != to.pos.floor {
            base += STAIR_PENALTY;
        }
        base * to.cost
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest walkable cell to world point `(world_x, world_z)` on `floor`.
    ///
    /// Tries the exact cell first, then square rings of radius
    /// `1..=NEAREST_SEARCH_RADIUS`.  Within a ring the scan order is `dx`
    /// ascending (outer) then `dz` ascending (inner), ring-edge cells only;
    /// the first walkable hit wins.
    pub fn find_nearest_walkable(&self, world_x: f32, world_z: f32, floor: i32) -> Option<&NavCell> {
        let cx = self.world_to_grid(world_x);
        let cz = self.world_to_grid(world_z);

        if let Some(c) = self.cells.get(&GridPos::new(cx, cz, floor)) {
            if c.walkable {
                return Some(c);
            }
        }

        for r in 1..=NEAREST_SEARCH_RADIUS {
            for dx in -r..=r {
                for dz in -r..=r {
                    if dx.abs() != r && dz.abs() != r {
                        continue;
                    }
                    if let Some(c) = self.cells.get(&GridPos::new(cx + dx, cz + dz, floor)) {
                        if c.walkable {
                            return Some(c);
                        }
                    }
                }
            }
        }
        None
    }

    /// World coordinate → cell index along one axis.
    #[inline]
    pub fn world_to_grid(&self, world: f32) -> i32 {
        (world / self.cell_size).round() as i32
    }

    /// Cell index → world coordinate along one axis.
    #[inline]
    pub fn grid_to_world(&self, grid: i32) -> f32 {
        grid as f32 * self.cell_size
    }

    /// Floor index whose walking height is closest to world `y`.
    #[inline]
    pub fn floor_at(&self, y: f32) -> i32 {
        if self.floor_height <= 0.0 {
            return 0;
        }
        (y / self.floor_height).round() as i32
    }

    /// World-space center of the cell at `pos` (y from the floor height).
    #[inline]
    pub fn cell_world_pos(&self, pos: GridPos) -> Vec3 {
        Vec3::new(
            self.grid_to_world(pos.x),
            pos.floor as f32 * self.floor_height,
            self.grid_to_world(pos.z),
        )
    }
}
