//! The `NavWorld` struct: structure lifecycle, path requests, and stepping.

use std::collections::BTreeMap;

use log::{debug, warn};
use tn_core::{AgentId, GridPos, NavRng, SimClock, StructureId, Tick, Vec3, WorldConfig};
use tn_elevated::{ElevatedNavPoint, ElevatedSurface, Footprint, ScaffoldLayout, SurfaceRegistry};
use tn_grid::{GridRouter, NavGrid};
use tn_motion::{MotionEngine, MotionError};

use crate::{StructureChange, WorldError, WorldObserver, WorldResult};

/// Height slack when deciding whether a point stands on a platform.
const ON_SURFACE_TOLERANCE: f32 = 0.25;

/// Owns everything agents navigate through and moves them each step.
///
/// # Step
///
/// 1. `on_tick_start`.
/// 2. Report scaffolding changes made since the previous step.
/// 3. Advance every moving agent by `dt`; report arrivals.
/// 4. `on_tick_end`, then advance the clock.
///
/// Create via [`NavWorldBuilder`][crate::NavWorldBuilder].
pub struct NavWorld<R: GridRouter> {
    pub config: WorldConfig,

    /// Step counter and elapsed seconds.
    pub clock: SimClock,

    /// Ground and tower-interior grid, built once.
    pub grid: NavGrid,

    /// Scaffold platforms of structures under construction.
    pub registry: SurfaceRegistry,

    pub motion: MotionEngine<R>,

    pub(crate) rng:        NavRng,
    pub(crate) structures: BTreeMap<StructureId, Footprint>,
    pub(crate) pending:    Vec<(StructureId, StructureChange)>,
}

impl<R: GridRouter> NavWorld<R> {
    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent at `pos` with the default speed.
    pub fn spawn_agent(&mut self, pos: Vec3) -> AgentId {
        self.motion.spawn(pos)
    }

    #[inline]
    pub fn agent_position(&self, agent: AgentId) -> Option<Vec3> {
        self.motion.position(agent)
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.motion.is_moving(agent)
    }

    #[inline]
    pub fn progress(&self, agent: AgentId) -> Option<f32> {
        self.motion.progress(agent)
    }

    // ── Structure lifecycle ───────────────────────────────────────────────

    /// Raise standard scaffolding around `footprint`, standing on terrain at
    /// `base_y`.  Replaces any scaffolding `structure` already has.
    ///
    /// Returns the number of platforms registered.
    pub fn begin_construction(
        &mut self,
        structure: StructureId,
        footprint: Footprint,
        base_y:    f32,
    ) -> WorldResult<usize> {
        if self.structures.contains_key(&structure) {
            self.end_construction(structure)?;
        }
        let layout = ScaffoldLayout::build(structure, footprint, base_y, &self.config.scaffold);
        let surfaces = layout.surfaces.len();
        self.registry.register_layout(layout)?;
        self.structures.insert(structure, footprint);
        self.pending.push((structure, StructureChange::Raised { surfaces }));
        debug!("{structure}: scaffolding raised, {surfaces} platforms");
        Ok(surfaces)
    }

    /// Remove `structure`'s scaffolding.
    ///
    /// Agents whose remaining path crosses the removed platforms are not
    /// re-planned; they are listed in the [`StructureChange::Removed`]
    /// reported at the next step.
    pub fn end_construction(&mut self, structure: StructureId) -> WorldResult<usize> {
        if self.structures.remove(&structure).is_none() {
            return Err(WorldError::NotUnderConstruction(structure));
        }
        let removed: Vec<ElevatedSurface> =
            self.registry.surfaces_for_parent(structure).into_iter().cloned().collect();
        let stranded = self.agents_crossing(&removed);
        for agent in &stranded {
            warn!("{agent}: path crosses scaffolding of {structure}, which was removed");
        }

        let surfaces = self.registry.unregister_by_parent(structure);
        self.pending.push((structure, StructureChange::Removed { surfaces, stranded }));
        debug!("{structure}: scaffolding removed, {surfaces} platforms");
        Ok(surfaces)
    }

    #[inline]
    pub fn is_under_construction(&self, structure: StructureId) -> bool {
        self.structures.contains_key(&structure)
    }

    // ── Path requests ─────────────────────────────────────────────────────

    /// Send `agent` across the grid to `goal`.
    pub fn request_grid_path(&mut self, agent: AgentId, goal: GridPos) -> WorldResult<()> {
        Ok(self.motion.begin_grid_travel(agent, &self.grid, goal)?)
    }

    /// Send `agent` to a random spot on `structure`'s scaffolding.
    ///
    /// An agent already on a platform routes from there.  One on the ground
    /// first walks the grid to the nearest usable stair foot, then climbs.
    /// Returns the chosen destination.
    pub fn request_scaffold_path(
        &mut self,
        agent:     AgentId,
        structure: StructureId,
    ) -> WorldResult<ElevatedNavPoint> {
        if !self.structures.contains_key(&structure) {
            return Err(WorldError::NotUnderConstruction(structure));
        }
        let pos = self.motion.position(agent).ok_or(MotionError::UnknownAgent(agent))?;
        let goal = self
            .motion
            .pathfinder
            .find_random_point_for_parent(&self.registry, structure, &mut self.rng)
            .ok_or(WorldError::NotUnderConstruction(structure))?;

        match self.registry.surface_at(pos.x, pos.z, pos.y, ON_SURFACE_TOLERANCE) {
            Some(s) => {
                let start = ElevatedNavPoint::on_surface(pos.x, s.y, pos.z, s.id.clone());
                self.motion.begin_elevated_travel(agent, &self.registry, &start, &goal)?;
            }
            None => self.motion.begin_climb(agent, &self.grid, &self.registry, &goal)?,
        }
        Ok(goal)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the world by `dt` seconds.  Returns the tick just processed.
    pub fn step<O: WorldObserver>(&mut self, dt: f32, observer: &mut O) -> Tick {
        let now = self.clock.now;
        observer.on_tick_start(now);

        for (structure, change) in self.pending.drain(..) {
            observer.on_structure_changed(now, structure, &change);
        }

        for agent in self.motion.tick(dt) {
            let pos = self.motion.position(agent).unwrap_or(Vec3::ZERO);
            observer.on_arrival(now, agent, pos);
        }

        observer.on_tick_end(now, self.motion.store.follows.len());
        self.clock.advance(dt);
        now
    }

    /// Run `n` steps of `dt` seconds each.
    pub fn run_steps<O: WorldObserver>(&mut self, n: u64, dt: f32, observer: &mut O) {
        for _ in 0..n {
            self.step(dt, observer);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Moving agents with a remaining waypoint on any of `surfaces`.
    fn agents_crossing(&self, surfaces: &[ElevatedSurface]) -> Vec<AgentId> {
        if surfaces.is_empty() {
            return Vec::new();
        }
        let on_removed = |p: &Vec3| {
            surfaces.iter().any(|s| {
                s.bounds.contains(p.x, p.z) && (p.y - s.y).abs() <= ON_SURFACE_TOLERANCE
            })
        };
        let mut agents: Vec<AgentId> = self
            .motion
            .store
            .follows
            .iter()
            .filter(|(_, f)| {
                let remaining = f.points().get(f.current_index()..).unwrap_or_default();
                remaining.iter().any(|p| on_removed(p))
            })
            .map(|(&agent, _)| agent)
            .collect();
        agents.sort_unstable();
        agents
    }
}
