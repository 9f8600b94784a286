//! Build a [`NavGrid`] from static level geometry.
//!
//! # Topology
//!
//! ```text
//! floor 0   annular ground: inner_radius <= |p| <= outer_radius, minus obstacles
//! floor 1.. tower interior: centered rectangle, fully walkable
//! stairs    floor i (x, z) <-> floor i+1 (x + dx, z + dz)
//! entrance  ground threshold <-> floor-1 interior cell
//! ```
//!
//! Output depends only on the inputs; there is no randomness.

use log::debug;
use tn_core::{GridPos, NavError, NavGridConfig, NavResult, TowerNavConfig};

use crate::{NavCell, NavGrid, ObstacleDef, ObstacleKind};

/// Construct a [`NavGrid`] from a ground config, a tower config, and a list
/// of obstacles, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tn_core::{NavGridConfig, TowerNavConfig};
/// use tn_grid::{GridBuilder, ObstacleDef, ObstacleKind};
///
/// let grid = GridBuilder::new(NavGridConfig::default(), TowerNavConfig::default())
///     .obstacle(ObstacleDef::new(10.0, 0.0, 1.5, ObstacleKind::Tree))
///     .build()
///     .unwrap();
/// assert!(grid.cell_at(0, -4, 0).unwrap().is_stair()); // tower entrance
/// ```
pub struct GridBuilder {
    grid:      NavGridConfig,
    tower:     TowerNavConfig,
    obstacles: Vec<ObstacleDef>,
}

impl GridBuilder {
    pub fn new(grid: NavGridConfig, tower: TowerNavConfig) -> Self {
        Self { grid, tower, obstacles: Vec::new() }
    }

    /// Add one obstacle.
    pub fn obstacle(mut self, obstacle: ObstacleDef) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Add many obstacles.
    pub fn obstacles(mut self, obstacles: impl IntoIterator<Item = ObstacleDef>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Validate both configs and produce the grid.
    pub fn build(self) -> NavResult<NavGrid> {
        self.grid.validate()?;
        self.tower.validate()?;

        let mut grid = NavGrid::new(self.grid.cell_size, self.tower.floor_height);
        self.add_ground(&mut grid);
        self.add_interior(&mut grid);
        self.link_stairs(&mut grid);
        self.link_entrance(&mut grid)?;

        debug!(
            "built nav grid: {} cells ({} walkable) on {} floors, {} obstacles",
            grid.cell_count(),
            grid.walkable_count(),
            grid.floors().count(),
            self.obstacles.len()
        );
        Ok(grid)
    }

    // ── Stages ────────────────────────────────────────────────────────────

    fn add_ground(&self, grid: &mut NavGrid) {
        let cfg = &self.grid;
        // The tower obstacle is modelled by the interior grid, not as a hole.
        let blocking: Vec<&ObstacleDef> = self
            .obstacles
            .iter()
            .filter(|o| o.kind != ObstacleKind::Tower)
            .collect();

        for x in cfg.min_x..=cfg.max_x {
            for z in cfg.min_z..=cfg.max_z {
                let wx = x as f32 * cfg.cell_size;
                let wz = z as f32 * cfg.cell_size;
                let dist = (wx * wx + wz * wz).sqrt();
                let in_ring = dist >= cfg.inner_radius && dist <= cfg.outer_radius;
                let walkable = in_ring && !blocking.iter().any(|o| o.covers(wx, wz));
                grid.add_cell(NavCell::new(GridPos::new(x, z, 0), walkable));
            }
        }
    }

    fn add_interior(&self, grid: &mut NavGrid) {
        let t = &self.tower;
        for floor in 1..=t.floors {
            for x in -t.half_width..=t.half_width {
                for z in -t.half_depth..=t.half_depth {
                    grid.add_cell(NavCell::interior(GridPos::new(x, z, floor)));
                }
            }
        }
    }

    fn link_stairs(&self, grid: &mut NavGrid) {
        // Both ends are interior cells (checked by `TowerNavConfig::validate`).
        for stair in &self.tower.stairs {
            let base = stair.base();
            let landing = stair.landing();
            grid.set_stair_target(base, landing);
            grid.set_stair_target(landing, base);
        }
    }

    fn link_entrance(&self, grid: &mut NavGrid) -> NavResult<()> {
        let Some(entrance) = self.tower.entrance else {
            return Ok(());
        };
        let outside = GridPos::new(entrance.ground.0, entrance.ground.1, 0);
        let inside = GridPos::new(entrance.interior.0, entrance.interior.1, 1);
        if grid.cell(outside).is_none() {
            return Err(NavError::EntranceMissing(outside));
        }

        // The doorway threshold is always walkable, even if the annulus or an
        // obstacle would otherwise close it.
        grid.set_walkable(outside, true);
        grid.set_stair_target(outside, inside);
        grid.set_stair_target(inside, outside);
        Ok(())
    }
}
