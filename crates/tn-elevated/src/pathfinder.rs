//! A* routing across ground, stairs, and elevated platforms.
//!
//! # Graph
//!
//! The graph is implicit: nodes are generated on demand from the registry.
//!
//! | Current point | Neighbors                                                     |
//! |---------------|---------------------------------------------------------------|
//! | `Ground`      | entry of every ground-level stair within `width + grid_size`   |
//! | `OnSurface`   | 8 lattice steps inside the bounds, stairs whose endpoint is within `width`, adjacent platforms at the same height |
//!
//! A stair may land just past its platform's edge.  Such a landing steps
//! onto the nearest edge point, and stair entry distances are measured to
//! the endpoint clamped into the bounds.
//! | `OnStair`     | the stair's two endpoints                                     |
//!
//! Point identity is quantised to the lattice (`grid_size` on x/z, half a
//! unit on y) and tagged with the ground, surface, or stair it belongs to,
//! so two platforms stacked at the same x/z never alias.
//!
//! # Cost
//!
//! Steps cost their 3D length, scaled up for stairs and for height changes
//! and by the destination's cost multiplier.  Every factor is ≥ 1, so the
//! straight-line heuristic never overestimates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use log::trace;
use rustc_hash::FxHashMap;
use tn_core::{ConnectionId, ElevatedPathConfig, NavRng, StructureId, SurfaceId, Vec3};

use crate::{ElevatedNavPoint, ElevatedPath, SurfaceRegistry};

/// Multiplier for any step that starts or ends on a stair.
const STAIR_FACTOR: f32 = 1.5;
/// Multiplier for any step that changes height by more than [`CLIMB_EPSILON`].
const CLIMB_FACTOR: f32 = 1.5;
const CLIMB_EPSILON: f32 = 0.1;
/// Height difference below which two points count as the same level.
const LEVEL_TOLERANCE: f32 = 0.5;

const LATTICE_STEPS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

// ── Point keys ────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum Tag {
    Ground,
    Surface(SurfaceId),
    Stair(ConnectionId),
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct PointKey {
    x:   i32,
    z:   i32,
    y:   i32,
    tag: Tag,
}

// ── Search state ──────────────────────────────────────────────────────────────

struct Node {
    point:  ElevatedNavPoint,
    g:      f32,
    parent: Option<usize>,
    closed: bool,
}

/// Min-heap entry keyed on `f = g + h`; insertion order breaks ties.
struct OpenEntry {
    f:   f32,
    idx: usize,
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
        other.f.total_cmp(&self.f).then_with(|| other.idx.cmp(&self.idx))
    }
}

// ── ElevatedPathfinder ────────────────────────────────────────────────────────

/// Stateless A* router over a [`SurfaceRegistry`].
#[derive(Clone, Debug, Default)]
pub struct ElevatedPathfinder {
    config: ElevatedPathConfig,
}

impl ElevatedPathfinder {
    pub fn new(config: ElevatedPathConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ElevatedPathConfig {
        &self.config
    }

    /// Least-cost route from `start` to `goal`.
    ///
    /// The returned path begins at `start` and ends exactly at `goal`.
    /// `None` if no sequence of platforms and stairs connects them.
    pub fn find_path(
        &self,
        registry: &SurfaceRegistry,
        start: &ElevatedNavPoint,
        goal: &ElevatedNavPoint,
    ) -> Option<ElevatedPath> {
        let goal_pos = goal.pos();

        let mut nodes = vec![Node { point: start.clone(), g: 0.0, parent: None, closed: false }];
        let mut index: FxHashMap<PointKey, usize> = FxHashMap::default();
        index.insert(self.key(start), 0);

        let mut open = BinaryHeap::new();
        open.push(OpenEntry { f: start.pos().distance(goal_pos), idx: 0 });
        let mut expanded = 0usize;

        while let Some(OpenEntry { idx, .. }) = open.pop() {
            if nodes[idx].closed {
                continue;
            }
            nodes[idx].closed = true;
            expanded += 1;

            if self.is_goal(nodes[idx].point.pos(), goal_pos) {
                let path = self.reconstruct(registry, &nodes, idx, goal);
                trace!(
                    "elevated route: {} points, cost {:.3}, {expanded} nodes expanded",
                    path.len(),
                    path.total_cost
                );
                return Some(path);
            }

            let current = nodes[idx].point.clone();
            let g = nodes[idx].g;

            for next in self.neighbors(registry, &current, goal) {
                let tentative = g + step_cost(registry, &current, &next);
                let key = self.key(&next);
                match index.get(&key) {
                    Some(&j) => {
                        let node = &mut nodes[j];
                        if node.closed || tentative >= node.g {
                            continue;
                        }
                        node.g = tentative;
                        node.parent = Some(idx);
                        open.push(OpenEntry { f: tentative + node.point.pos().distance(goal_pos), idx: j });
                    }
                    None => {
                        let j = nodes.len();
                        let f = tentative + next.pos().distance(goal_pos);
                        nodes.push(Node { point: next, g: tentative, parent: Some(idx), closed: false });
                        index.insert(key, j);
                        open.push(OpenEntry { f, idx: j });
                    }
                }
            }
        }

        trace!("elevated route: unreachable after {expanded} nodes expanded");
        None
    }

    /// Route from a ground position up to the center of `surface`.
    pub fn find_path_from_ground(
        &self,
        registry: &SurfaceRegistry,
        x: f32,
        z: f32,
        ground_y: f32,
        surface: &SurfaceId,
    ) -> Option<ElevatedPath> {
        let target = registry.surface(surface)?;
        let c = target.center();
        let goal = ElevatedNavPoint::on_surface(c.x, c.y, c.z, target.id.clone());
        self.find_path(registry, &ElevatedNavPoint::ground(x, ground_y, z), &goal)
    }

    /// A random point on one of `parent`'s platforms.
    pub fn find_random_point_for_parent(
        &self,
        registry: &SurfaceRegistry,
        parent: StructureId,
        rng: &mut NavRng,
    ) -> Option<ElevatedNavPoint> {
        let surfaces = registry.surfaces_for_parent(parent);
        let surface = rng.choose(&surfaces)?;
        registry.random_point_on_surface(&surface.id, rng)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn key(&self, point: &ElevatedNavPoint) -> PointKey {
        let p = point.pos();
        let gs = self.config.grid_size;
        let tag = match point {
            ElevatedNavPoint::Ground { .. } => Tag::Ground,
            ElevatedNavPoint::OnSurface { surface, .. } => Tag::Surface(surface.clone()),
            ElevatedNavPoint::OnStair { connection, .. } => Tag::Stair(connection.clone()),
        };
        PointKey {
            x: (p.x / gs).round() as i32,
            z: (p.z / gs).round() as i32,
            y: (p.y * 2.0).round() as i32,
            tag,
        }
    }

    fn is_goal(&self, pos: Vec3, goal: Vec3) -> bool {
        pos.distance_xz(goal) <= self.config.grid_size && (pos.y - goal.y).abs() <= LEVEL_TOLERANCE
    }

    fn neighbors(
        &self,
        registry: &SurfaceRegistry,
        point: &ElevatedNavPoint,
        goal: &ElevatedNavPoint,
    ) -> Vec<ElevatedNavPoint> {
        match point {
            ElevatedNavPoint::OnStair { connection, .. } => registry
                .connection(connection)
                .map(|c| vec![c.lower.nav_point(), c.upper.nav_point()])
                .unwrap_or_default(),
            ElevatedNavPoint::Ground { pos } => {
                let gs = self.config.grid_size;
                registry
                    .ground_connections()
                    .into_iter()
                    .filter(|c| pos.distance_xz(c.lower.pos) <= c.width + gs)
                    .map(|c| ElevatedNavPoint::OnStair { pos: c.lower.pos, connection: c.id.clone() })
                    .collect()
            }
            ElevatedNavPoint::OnSurface { pos, surface } => {
                self.surface_neighbors(registry, *pos, surface, goal)
            }
        }
    }

    fn surface_neighbors(
        &self,
        registry: &SurfaceRegistry,
        pos: Vec3,
        surface: &SurfaceId,
        goal: &ElevatedNavPoint,
    ) -> Vec<ElevatedNavPoint> {
        let Some(here) = registry.surface(surface) else { return Vec::new() };
        let gs = self.config.grid_size;
        let mut out = Vec::with_capacity(LATTICE_STEPS.len() + 4);

        for (dx, dz) in LATTICE_STEPS {
            let x = pos.x + dx as f32 * gs;
            let z = pos.z + dz as f32 * gs;
            if here.bounds.contains(x, z) {
                out.push(ElevatedNavPoint::OnSurface { pos: Vec3::new(x, here.y, z), surface: here.id.clone() });
            }
        }

        // A landing past the platform edge steps onto the nearest edge point.
        if !here.bounds.contains(pos.x, pos.z) {
            let (x, z) = here.bounds.clamp(pos.x, pos.z);
            out.push(ElevatedNavPoint::OnSurface { pos: Vec3::new(x, here.y, z), surface: here.id.clone() });
        }

        // Off-lattice goal on this platform (e.g. tucked into a corner).
        if let ElevatedNavPoint::OnSurface { pos: gpos, surface: gsurf } = goal {
            if gsurf == surface && pos.distance_xz(*gpos) <= gs * SQRT_2 {
                out.push(goal.clone());
            }
        }

        for c in registry.connections_for_surface(surface) {
            if let Some(end) = c.endpoint_on(surface) {
                let (ex, ez) = here.bounds.clamp(end.pos.x, end.pos.z);
                if pos.distance_xz(Vec3::new(ex, pos.y, ez)) <= c.width {
                    out.push(ElevatedNavPoint::OnStair { pos: end.pos, connection: c.id.clone() });
                }
            }
        }

        let tolerance = self.config.adjacency_tolerance;
        let reach = gs + tolerance;
        for other in registry.all_surfaces() {
            if other.id == here.id
                || (other.y - here.y).abs() > LEVEL_TOLERANCE
                || !here.bounds.overlaps(&other.bounds, tolerance)
            {
                continue;
            }
            let (x, z) = other.bounds.clamp(pos.x, pos.z);
            let across = Vec3::new(x, other.y, z);
            if pos.distance_xz(across) <= reach {
                out.push(ElevatedNavPoint::OnSurface { pos: across, surface: other.id.clone() });
            }
        }

        out
    }

    fn reconstruct(
        &self,
        registry: &SurfaceRegistry,
        nodes: &[Node],
        reached: usize,
        goal: &ElevatedNavPoint,
    ) -> ElevatedPath {
        let mut points = Vec::new();
        let mut cur = Some(reached);
        while let Some(i) = cur {
            points.push(nodes[i].point.clone());
            cur = nodes[i].parent;
        }
        points.reverse();

        let mut total_cost = nodes[reached].g;
        let last = &nodes[reached].point;
        if last != goal {
            total_cost += step_cost(registry, last, goal);
            points.push(goal.clone());
        }
        ElevatedPath { points, total_cost }
    }
}

fn step_cost(registry: &SurfaceRegistry, from: &ElevatedNavPoint, to: &ElevatedNavPoint) -> f32 {
    let (a, b) = (from.pos(), to.pos());
    let mut cost = a.distance(b);
    if from.is_stair() || to.is_stair() {
        cost *= STAIR_FACTOR;
    }
    if (b.y - a.y).abs() > CLIMB_EPSILON {
        cost *= CLIMB_FACTOR;
    }
    let multiplier = match to {
        ElevatedNavPoint::Ground { .. } => 1.0,
        ElevatedNavPoint::OnSurface { surface, .. } => {
            registry.surface(surface).map_or(1.0, |s| s.cost_multiplier())
        }
        ElevatedNavPoint::OnStair { connection, .. } => {
            registry.connection(connection).map_or(1.0, |c| c.cost_multiplier())
        }
    };
    cost * multiplier
}
