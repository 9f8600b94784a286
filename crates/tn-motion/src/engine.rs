//! High-level motion engine: plans routes and advances following agents.

use log::debug;
use tn_core::{AgentId, ElevatedPathConfig, GridPos, Vec3};
use tn_elevated::{ElevatedNavPoint, ElevatedPathfinder, SurfaceRegistry};
use tn_grid::{GridRouter, NavGrid};

use crate::{grid_waypoints, MotionError, MotionResult, MotionStore, PathFollowState};

/// Wraps a [`GridRouter`], an [`ElevatedPathfinder`] and a [`MotionStore`].
///
/// # Type parameter
///
/// `R` is the grid routing algorithm (e.g. [`tn_grid::DijkstraRouter`]),
/// chosen at compile time.
pub struct MotionEngine<R: GridRouter> {
    pub router:     R,
    pub pathfinder: ElevatedPathfinder,
    pub store:      MotionStore,
    default_speed:  f32,
}

impl<R: GridRouter> MotionEngine<R> {
    /// Create an engine with `agent_count` agents at the origin.
    ///
    /// # Errors
    ///
    /// [`MotionError::Nav`] if `config` is invalid,
    /// [`MotionError::InvalidSpeed`] if `default_speed` is negative or not
    /// finite.
    pub fn new(
        router:        R,
        config:        ElevatedPathConfig,
        agent_count:   usize,
        default_speed: f32,
    ) -> MotionResult<Self> {
        config.validate()?;
        if !(default_speed.is_finite() && default_speed >= 0.0) {
            return Err(MotionError::InvalidSpeed(default_speed));
        }
        Ok(Self {
            router,
            pathfinder: ElevatedPathfinder::new(config),
            store: MotionStore::new(agent_count, default_speed),
            default_speed,
        })
    }

    /// Add an agent at `pos` moving at the default speed.
    pub fn spawn(&mut self, pos: Vec3) -> AgentId {
        self.store.add_agent(pos, self.default_speed)
    }

    /// Teleport `agent` to `pos`, cancelling any active path.
    pub fn place(&mut self, agent: AgentId, pos: Vec3) -> MotionResult<()> {
        self.store.place(agent, pos)
    }

    /// Route `agent` across the grid to `goal` and start following.
    ///
    /// The start cell is the walkable cell nearest the agent's position on
    /// the floor matching its height.  Replaces any active path.
    pub fn begin_grid_travel(&mut self, agent: AgentId, grid: &NavGrid, goal: GridPos) -> MotionResult<()> {
        let pos = self.position_of(agent)?;
        let unreachable = || MotionError::Unreachable { agent, goal: grid.cell_world_pos(goal) };

        let start = grid
            .find_nearest_walkable(pos.x, pos.z, grid.floor_at(pos.y))
            .ok_or_else(unreachable)?
            .pos;
        let path = self.router.find_path(grid, start, goal).ok_or_else(unreachable)?;
        debug!("{agent}: grid route {start} -> {goal}, {} cells", path.len());
        let points = grid_waypoints(pos, &path, grid);
        self.store.begin(agent, PathFollowState::departing(pos, points))
    }

    /// Route `agent` from `start` to `goal` across elevated geometry and
    /// start following.  Replaces any active path.
    pub fn begin_elevated_travel(
        &mut self,
        agent:    AgentId,
        registry: &SurfaceRegistry,
        start:    &ElevatedNavPoint,
        goal:     &ElevatedNavPoint,
    ) -> MotionResult<()> {
        let pos = self.position_of(agent)?;
        let path = self
            .pathfinder
            .find_path(registry, start, goal)
            .ok_or(MotionError::Unreachable { agent, goal: goal.pos() })?;
        debug!("{agent}: elevated route to {}, {} points", goal.pos(), path.len());
        self.store.begin(agent, PathFollowState::departing(pos, path.positions()))
    }

    /// Walk `agent` across the grid to the foot of a ground-level stair,
    /// then climb to `goal`.  Replaces any active path.
    ///
    /// Stairs are tried nearest first; the first with both a ground route
    /// to its foot and an elevated route from it to `goal` is taken.
    pub fn begin_climb(
        &mut self,
        agent:    AgentId,
        grid:     &NavGrid,
        registry: &SurfaceRegistry,
        goal:     &ElevatedNavPoint,
    ) -> MotionResult<()> {
        let pos = self.position_of(agent)?;
        let unreachable = || MotionError::Unreachable { agent, goal: goal.pos() };
        let start = grid
            .find_nearest_walkable(pos.x, pos.z, grid.floor_at(pos.y))
            .ok_or_else(unreachable)?
            .pos;

        let mut stairs = registry.ground_connections();
        stairs.sort_by(|a, b| pos.distance_xz(a.lower.pos).total_cmp(&pos.distance_xz(b.lower.pos)));

        for stair in stairs {
            let foot = stair.lower.pos;
            let ground = ElevatedNavPoint::Ground { pos: foot };
            let Some(climb) = self.pathfinder.find_path(registry, &ground, goal) else { continue };
            let Some(foot_cell) = grid.find_nearest_walkable(foot.x, foot.z, grid.floor_at(foot.y))
            else {
                continue;
            };
            let Some(walk) = self.router.find_path(grid, start, foot_cell.pos) else { continue };

            debug!(
                "{agent}: {} cells to the foot of {}, then {} points to {}",
                walk.len(),
                stair.id,
                climb.len(),
                goal.pos()
            );
            let mut points = grid_waypoints(pos, &walk, grid);
            points.extend(climb.positions());
            return self.store.begin(agent, PathFollowState::departing(pos, points));
        }
        Err(unreachable())
    }

    /// Stop `agent` where it stands.  Returns `true` if it was moving.
    pub fn cancel(&mut self, agent: AgentId) -> bool {
        self.store.cancel(agent).is_some()
    }

    /// Advance every following agent by `dt` seconds.
    ///
    /// Returns the agents that reached the end of their path this tick.
    pub fn tick(&mut self, dt: f32) -> Vec<AgentId> {
        self.store.advance(dt)
    }

    /// Fraction of the active path covered, `None` if `agent` is not moving.
    pub fn progress(&self, agent: AgentId) -> Option<f32> {
        self.store.follow(agent).map(PathFollowState::progress)
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.store.is_moving(agent)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Vec3> {
        self.store.position(agent)
    }

    pub fn agent_count(&self) -> usize {
        self.store.agent_count()
    }

    fn position_of(&self, agent: AgentId) -> MotionResult<Vec3> {
        self.store.position(agent).ok_or(MotionError::UnknownAgent(agent))
    }
}
