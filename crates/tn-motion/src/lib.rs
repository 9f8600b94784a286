//! `tn-motion`: turning computed paths into per-frame movement.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                          |
//! |------------|-------------------------------------------------------------------|
//! | [`follow`] | `PathFollowState`, `FollowUpdate`, `grid_waypoints`, `move_toward_target`, `is_near_target` |
//! | [`store`]  | `MotionStore`: positions and speeds by `AgentId` + sparse follow states |
//! | [`engine`] | `MotionEngine<R>`: plans with either pathfinder and advances agents |
//! | [`error`]  | `MotionError`, `MotionResult<T>`                                  |
//!
//! # Movement model (continuous)
//!
//! Agents move at a constant speed along a polyline of waypoints:
//!
//! 1. `MotionEngine::begin_grid_travel`, `begin_elevated_travel` or
//!    `begin_climb` plans a route and stores a [`PathFollowState`] for the
//!    agent.  The path starts from the agent's actual position.
//! 2. Every frame `MotionEngine::tick(dt)` spends `speed * dt` of distance
//!    along each active path, consuming as many waypoints as the budget
//!    covers so closely spaced waypoints cost no speed.
//! 3. Agents whose path completes are returned from `tick` and lose their
//!    follow state; the caller decides what they do next.
//!
//! A [`PathFollowState`] is also usable on its own, without the store or
//! engine, for callers that keep agent state elsewhere.

pub mod engine;
pub mod error;
pub mod follow;
pub mod store;


pub use engine::MotionEngine;
pub use error::{MotionError, MotionResult};
pub use follow::{grid_waypoints, is_near_target, move_toward_target, FollowUpdate, PathFollowState};
pub use store::MotionStore;
