//! World observer trait for reporting and data collection.

use tn_core::{AgentId, StructureId, Tick, Vec3};

/// What happened to a structure's scaffolding.
#[derive(Clone, Debug, PartialEq)]
pub enum StructureChange {
    /// Scaffolding registered; `surfaces` platforms are now walkable.
    Raised { surfaces: usize },

    /// Scaffolding removed.  `stranded` lists agents whose remaining path
    /// ran across the removed platforms; they keep following it until the
    /// caller re-plans them.
    Removed { surfaces: usize, stranded: Vec<AgentId> },
}

/// Callbacks invoked by [`NavWorld::step`][crate::NavWorld::step].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival logger
///
/// ```rust,ignore
/// struct Arrivals(Vec<AgentId>);
///
/// impl WorldObserver for Arrivals {
///     fn on_arrival(&mut self, _tick: Tick, agent: AgentId, _pos: Vec3) {
///         self.0.push(agent);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each step, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per scaffolding change since the previous step, in the
    /// order the changes were made.
    fn on_structure_changed(&mut self, _tick: Tick, _structure: StructureId, _change: &StructureChange) {}

    /// Called for each agent that reached the end of its path this step, in
    /// ascending `AgentId` order.
    fn on_arrival(&mut self, _tick: Tick, _agent: AgentId, _pos: Vec3) {}

    /// Called at the end of each step.  `moving` is the number of agents
    /// still following a path.
    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
