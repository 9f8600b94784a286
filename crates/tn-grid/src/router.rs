//! Grid routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`GridRouter`] trait, so a game can swap in a
//! different search (A*, JPS, a precomputed flow field) without touching the
//! motion or world crates.  Grids are small (hundreds of cells), so the
//! default [`DijkstraRouter`] favours obviously-correct over fast.
//!
//! # Failure
//!
//! Routing never errors: an unreachable goal, or a missing/non-walkable
//! endpoint, is `None`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use tn_core::GridPos;

use crate::{NavGrid, NavPath};

// ── GridRouter trait ──────────────────────────────────────────────────────────

/// Pluggable grid routing engine.
///
/// Implementations must be `Send + Sync` so a world can be moved to (or
/// shared with) whichever thread drives the simulation.
pub trait GridRouter: Send + Sync {
    /// Least-cost path from `start` to `goal`, both inclusive.
    ///
    /// Returns `None` if either endpoint is missing or non-walkable, or if no
    /// path exists.  `start == goal` yields a one-cell path of cost 0.
    fn find_path(&self, grid: &NavGrid, start: GridPos, goal: GridPos) -> Option<NavPath>;

    /// Resolve world coordinates `(x, z, floor)` to the nearest walkable
    /// cells, then route between them.
    fn find_path_world(
        &self,
        grid:  &NavGrid,
        start: (f32, f32, i32),
        goal:  (f32, f32, i32),
    ) -> Option<NavPath> {
        let s = grid.find_nearest_walkable(start.0, start.1, start.2)?.pos;
        let g = grid.find_nearest_walkable(goal.0, goal.1, goal.2)?.pos;
        self.find_path(grid, s, g)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Uniform-cost search using [`NavGrid::movement_cost`] as edge weight.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl GridRouter for DijkstraRouter {
    fn find_path(&self, grid: &NavGrid, start: GridPos, goal: GridPos) -> Option<NavPath> {
        dijkstra(grid, start, goal)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry.  Costs are `f32`, so ordering goes through `total_cmp`;
/// `GridPos` breaks ties deterministically.
struct OpenEntry {
    cost: f32,
    pos:  GridPos,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the cheapest on top.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

fn dijkstra(grid: &NavGrid, start: GridPos, goal: GridPos) -> Option<NavPath> {
    grid.cell(start).filter(|c| c.walkable)?;
    grid.cell(goal).filter(|c| c.walkable)?;

    let mut dist: FxHashMap<GridPos, f32> = FxHashMap::default();
    let mut parent: FxHashMap<GridPos, GridPos> = FxHashMap::default();
    let mut visited: FxHashSet<GridPos> = FxHashSet::default();

    dist.insert(start, 0.0);
    let mut heap = BinaryHeap::new();
    heap.push(OpenEntry { cost: 0.0, pos: start });

    while let Some(OpenEntry { cost, pos }) = heap.pop() {
        if pos == goal {
            trace!("grid route {start} -> {goal}: cost {cost:.3}, {} cells settled", visited.len());
            return Some(reconstruct(grid, &parent, start, goal, cost));
        }
        // Skip stale heap entries.
        if !visited.insert(pos) {
            continue;
        }
        let Some(cell) = grid.cell(pos) else { continue };

        for n in grid.neighbors(cell) {
            if visited.contains(&n.pos) {
                continue;
            }
            let new_cost = cost + grid.movement_cost(cell, n);
            let improves = dist.get(&n.pos).is_none_or(|&d| new_cost < d);
            if improves {
                dist.insert(n.pos, new_cost);
                parent.insert(n.pos, pos);
                heap.push(OpenEntry { cost: new_cost, pos: n.pos });
            }
        }
    }

    trace!("grid route {start} -> {goal}: unreachable after {} cells", visited.len());
    None
}

fn reconstruct(
    grid:   &NavGrid,
    parent: &FxHashMap<GridPos, GridPos>,
    start:  GridPos,
    goal:   GridPos,
    total_cost: f32,
) -> NavPath {
    let mut positions = vec![goal];
    let mut cur = goal;
    while cur != start {
        match parent.get(&cur) {
            Some(&p) => {
                positions.push(p);
                cur = p;
            }
            None => break,
        }
    }
    positions.reverse();
    let cells = positions
        .into_iter()
        .filter_map(|p| grid.cell(p).cloned())
        .collect();
    NavPath { cells, total_cost }
}
