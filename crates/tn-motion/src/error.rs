use thiserror::Error;
use tn_core::{AgentId, NavError, Vec3};

#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("agent {0} has not been spawned")]
    UnknownAgent(AgentId),

    #[error("no route for agent {agent} to {goal}")]
    Unreachable { agent: AgentId, goal: Vec3 },

    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    #[error(transparent)]
    Nav(#[from] NavError),
}

pub type MotionResult<T> = Result<T, MotionError>;
