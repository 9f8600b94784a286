//! Fluent builder for constructing a [`NavWorld`].

use log::debug;
use tn_core::{NavRng, SimClock, Vec3, WorldConfig};
use tn_elevated::SurfaceRegistry;
use tn_grid::{GridBuilder, GridRouter, ObstacleDef};
use tn_motion::MotionEngine;

use crate::{NavWorld, WorldResult};

/// Fluent builder for [`NavWorld<R>`].
///
/// # Required inputs
///
/// - [`WorldConfig`]: grid, tower, pathfinder and scaffold settings, seed
/// - `R: GridRouter`: the grid routing algorithm (e.g. [`tn_grid::DijkstraRouter`])
///
/// # Optional inputs
///
/// | Method            | Default          |
/// |-------------------|------------------|
/// | `.obstacle(o)`    | No obstacles     |
/// | `.agent(pos)`     | No agents        |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = NavWorldBuilder::new(WorldConfig::default(), DijkstraRouter)
///     .obstacle(ObstacleDef::new(6.0, 2.0, 1.0, ObstacleKind::Tree))
///     .agent(Vec3::new(0.0, 0.0, -8.0))
///     .build()?;
/// world.step(0.1, &mut NoopObserver);
/// ```
pub struct NavWorldBuilder<R: GridRouter> {
    config:    WorldConfig,
    router:    R,
    obstacles: Vec<ObstacleDef>,
    agents:    Vec<Vec3>,
}

impl<R: GridRouter> NavWorldBuilder<R> {
    pub fn new(config: WorldConfig, router: R) -> Self {
        Self { config, router, obstacles: Vec::new(), agents: Vec::new() }
    }

    pub fn obstacle(mut self, obstacle: ObstacleDef) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn obstacles(mut self, obstacles: impl IntoIterator<Item = ObstacleDef>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Spawn an agent at `pos` with the configured default speed.  Ids are
    /// assigned in call order starting from 0.
    pub fn agent(mut self, pos: Vec3) -> Self {
        self.agents.push(pos);
        self
    }

    pub fn agents(mut self, positions: impl IntoIterator<Item = Vec3>) -> Self {
        self.agents.extend(positions);
        self
    }

    /// Validate the configuration, build the grid, and place the agents.
    pub fn build(self) -> WorldResult<NavWorld<R>> {
        self.config.validate()?;

        let grid = GridBuilder::new(self.config.grid.clone(), self.config.tower.clone())
            .obstacles(self.obstacles)
            .build()?;

        let mut motion = MotionEngine::new(
            self.router,
            self.config.elevated.clone(),
            0,
            self.config.default_speed,
        )?;
        for pos in self.agents {
            motion.spawn(pos);
        }
        debug!(
            "world ready: {} walkable cells, {} agents, seed {}",
            grid.walkable_count(),
            motion.agent_count(),
            self.config.seed
        );

        Ok(NavWorld {
            clock:      SimClock::new(),
            rng:        NavRng::new(self.config.seed),
            config:     self.config,
            grid,
            registry:   SurfaceRegistry::new(),
            motion,
            structures: Default::default(),
            pending:    Vec::new(),
        })
    }
}
