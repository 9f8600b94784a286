//! The `MotionStore`: per-agent position and speed plus sparse follow state.

use rustc_hash::FxHashMap;
use tn_core::{AgentId, Vec3};

use crate::{MotionError, MotionResult, PathFollowState};

/// Holds position and speed for every agent plus follow state for agents
/// that are moving.
///
/// `positions` and `speeds` are indexed by `AgentId` and always have the same
/// length.  `follows` is sparse: only agents with an active path have an
/// entry, and it is removed on arrival or cancellation.
#[derive(Clone, Debug, Default)]
pub struct MotionStore {
    /// World position, indexed by `AgentId`.
    pub positions: Vec<Vec3>,

    /// Movement speed in world units per second, indexed by `AgentId`.
    pub speeds: Vec<f32>,

    /// Active paths: `AgentId → PathFollowState`.
    pub follows: FxHashMap<AgentId, PathFollowState>,
}

impl MotionStore {
    /// Create a store with `agent_count` agents at the origin.
    pub fn new(agent_count: usize, speed: f32) -> Self {
        Self {
            positions: vec![Vec3::ZERO; agent_count],
            speeds:    vec![speed; agent_count],
            follows:   FxHashMap::default(),
        }
    }

    /// Append one agent and return its id.
    pub fn add_agent(&mut self, pos: Vec3, speed: f32) -> AgentId {
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(pos);
        self.speeds.push(speed);
        id
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// `Ok(())` if `agent` exists.
    #[inline]
    pub fn check(&self, agent: AgentId) -> MotionResult<()> {
        if agent.index() < self.positions.len() {
            Ok(())
        } else {
            Err(MotionError::UnknownAgent(agent))
        }
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Vec3> {
        self.positions.get(agent.index()).copied()
    }

    #[inline]
    pub fn speed(&self, agent: AgentId) -> Option<f32> {
        self.speeds.get(agent.index()).copied()
    }

    pub fn set_speed(&mut self, agent: AgentId, speed: f32) -> MotionResult<()> {
        self.check(agent)?;
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(MotionError::InvalidSpeed(speed));
        }
        self.speeds[agent.index()] = speed;
        Ok(())
    }

    /// Move `agent` to `pos` and drop any active path.
    pub fn place(&mut self, agent: AgentId, pos: Vec3) -> MotionResult<()> {
        self.check(agent)?;
        self.positions[agent.index()] = pos;
        self.follows.remove(&agent);
        Ok(())
    }

    /// Start (or replace) `agent`'s active path.
    pub fn begin(&mut self, agent: AgentId, state: PathFollowState) -> MotionResult<()> {
        self.check(agent)?;
        self.follows.insert(agent, state);
        Ok(())
    }

    /// Drop `agent`'s active path, returning it if there was one.
    pub fn cancel(&mut self, agent: AgentId) -> Option<PathFollowState> {
        self.follows.remove(&agent)
    }

    #[inline]
    pub fn follow(&self, agent: AgentId) -> Option<&PathFollowState> {
        self.follows.get(&agent)
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.follows.contains_key(&agent)
    }

    /// Advance every active path by `dt` seconds.
    ///
    /// Returns the agents whose path completed, in ascending id order; their
    /// follow state is removed.
    pub fn advance(&mut self, dt: f32) -> Vec<AgentId> {
        let mut arrived = Vec::new();
        for (&agent, state) in self.follows.iter_mut() {
            let i = agent.index();
            let update = state.update(self.positions[i], self.speeds[i], dt);
            self.positions[i] = update.new_position;
            if update.is_complete {
                arrived.push(agent);
            }
        }
        arrived.sort_unstable();
        for agent in &arrived {
            self.follows.remove(agent);
        }
        arrived
    }
}
